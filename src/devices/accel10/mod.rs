//! Accel 10 Click driver (ST LIS2DW12)
//!
//! Three-axis MEMS accelerometer reachable over I2C or SPI, selected by
//! board jumpers; the driver is written against
//! [`BusTransport`](crate::devices::traits::BusTransport).

mod driver;
pub mod registers;

pub use driver::{Accel10, Accel10Config, FullScale, OutputDataRate, Status};
