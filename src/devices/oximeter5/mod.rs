//! Oximeter 5 Click - MAX30102 pulse oximeter and heart-rate sensor (I2C)
//!
//! The driver half reads raw red/IR samples out of the sensor FIFO; the
//! `spo2` half turns a window of those samples into heart rate and SpO2
//! estimates. The two halves are independent: `spo2` is pure math and needs
//! no hardware.

mod driver;
pub mod registers;
pub mod spo2;

pub use driver::{InterruptStatus, Oximeter5, Oximeter5Config, Sample};
