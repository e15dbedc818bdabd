//! Pressure 4 Click driver (Bosch BMP280)
//!
//! Barometric pressure and temperature sensor over I2C or SPI, selected by
//! board jumpers. Raw ADC readings are corrected with the per-part
//! calibration coefficients using the datasheet integer compensation
//! (32-bit for temperature, 64-bit Q24.8 for pressure).

mod driver;
pub mod registers;

pub use driver::{Calibration, Measurement, Pressure4, Pressure4Config};
