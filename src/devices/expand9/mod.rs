//! Expand 9 Click - SX1509B 16-channel I/O expander with LED driver (I2C)

mod driver;
pub mod registers;

pub use driver::{Expand9, Expand9Config, PinDirection};
