//! Ambient 2 Click driver (TI OPT3001)
//!
//! Ambient light sensor with a floating-point result register: a 4-bit
//! exponent and 12-bit mantissa, lux = 0.01 x 2^E x M.

use crate::devices::traits::{DeviceError, DeviceResult};
use crate::log_info;
use crate::platform::traits::I2cInterface;

/// Default I2C address (ADDR to GND)
pub const DEFAULT_ADDR: u8 = 0x44;

const REG_RESULT: u8 = 0x00;
const REG_CONFIG: u8 = 0x01;
const REG_LOW_LIMIT: u8 = 0x02;
const REG_HIGH_LIMIT: u8 = 0x03;
const REG_MANUFACTURER_ID: u8 = 0x7E;
const REG_DEVICE_ID: u8 = 0x7F;

/// "TI" in ASCII
const MANUFACTURER_ID: u16 = 0x5449;
const DEVICE_ID: u16 = 0x3001;

/// Automatic range, 800 ms conversion, continuous mode, latched comparator
const CONFIG_CONTINUOUS: u16 = 0xCE10;

/// CONFIG: conversion ready flag
const CONFIG_CRF: u16 = 0x0080;

/// Ambient 2 Click driver
pub struct Ambient2<I2C: I2cInterface> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2cInterface> Ambient2<I2C> {
    /// Probe the sensor and start continuous conversions
    pub fn new(i2c: I2C, address: u8) -> DeviceResult<Self> {
        let mut driver = Self { i2c, address };

        let manufacturer = driver.read_reg16(REG_MANUFACTURER_ID)?;
        if manufacturer != MANUFACTURER_ID {
            return Err(DeviceError::WrongDeviceId {
                expected: MANUFACTURER_ID,
                found: manufacturer,
            });
        }
        let device = driver.read_reg16(REG_DEVICE_ID)?;
        if device != DEVICE_ID {
            return Err(DeviceError::WrongDeviceId {
                expected: DEVICE_ID,
                found: device,
            });
        }

        driver.write_reg16(REG_CONFIG, CONFIG_CONTINUOUS)?;
        log_info!("OPT3001 in continuous conversion mode");
        Ok(driver)
    }

    /// Whether a new result is waiting since the last read
    pub fn conversion_ready(&mut self) -> DeviceResult<bool> {
        Ok(self.read_reg16(REG_CONFIG)? & CONFIG_CRF != 0)
    }

    /// Read the illuminance in lux
    pub fn read_lux(&mut self) -> DeviceResult<f32> {
        Ok(decode_lux(self.read_reg16(REG_RESULT)?))
    }

    /// Program the interrupt window, in the raw exponent/mantissa format
    pub fn set_limits(&mut self, low: u16, high: u16) -> DeviceResult<()> {
        self.write_reg16(REG_LOW_LIMIT, low)?;
        self.write_reg16(REG_HIGH_LIMIT, high)
    }

    /// Release the underlying bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn read_reg16(&mut self, reg: u8) -> DeviceResult<u16> {
        let mut buf = [0u8; 2];
        self.i2c.write_read(self.address, &[reg], &mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    fn write_reg16(&mut self, reg: u8, value: u16) -> DeviceResult<()> {
        let v = value.to_be_bytes();
        self.i2c.write(self.address, &[reg, v[0], v[1]])?;
        Ok(())
    }
}

/// Decode the exponent/mantissa result register to lux
pub fn decode_lux(raw: u16) -> f32 {
    let exponent = raw >> 12;
    let mantissa = raw & 0x0FFF;
    0.01 * f32::from(mantissa) * (1u32 << exponent) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{I2cTransaction, MockI2c};

    fn new_driver() -> Ambient2<MockI2c> {
        let mut i2c = MockI2c::new(Default::default());
        i2c.set_read_data(&MANUFACTURER_ID.to_be_bytes());
        i2c.set_read_data(&DEVICE_ID.to_be_bytes());
        Ambient2::new(i2c, DEFAULT_ADDR).unwrap()
    }

    #[test]
    fn test_decode_lux() {
        // E=3, M=1110: 0.01 * 8 * 1110
        assert!((decode_lux(0x3456) - 88.8).abs() < 0.01);
        assert_eq!(decode_lux(0x0000), 0.0);
        // Full scale: 0.01 * 2^11 * 4095
        assert!((decode_lux(0xBFFF) - 83_865.6).abs() < 0.5);
    }

    #[test]
    fn test_new_probes_and_configures() {
        let driver = new_driver();
        assert_eq!(
            driver.i2c.transactions().last().unwrap(),
            &I2cTransaction::Write {
                addr: DEFAULT_ADDR,
                data: vec![REG_CONFIG, 0xCE, 0x10],
            }
        );
    }

    #[test]
    fn test_new_rejects_wrong_id() {
        let mut i2c = MockI2c::new(Default::default());
        i2c.set_read_data(&MANUFACTURER_ID.to_be_bytes());
        i2c.set_read_data(&[0x12, 0x34]);
        // The full 16-bit register value is reported
        assert!(matches!(
            Ambient2::new(i2c, DEFAULT_ADDR),
            Err(DeviceError::WrongDeviceId {
                expected: DEVICE_ID,
                found: 0x1234,
            })
        ));
    }

    #[test]
    fn test_read_lux() {
        let mut driver = new_driver();
        driver.i2c.set_read_data(&[0x34, 0x56]);
        assert!((driver.read_lux().unwrap() - 88.8).abs() < 0.01);
    }

    #[test]
    fn test_conversion_ready_flag() {
        let mut driver = new_driver();
        driver.i2c.set_read_data(&[0xCE, 0x90]);
        assert!(driver.conversion_ready().unwrap());
    }

    #[test]
    fn test_set_limits() {
        let mut driver = new_driver();
        driver.set_limits(0x0100, 0xBFFF).unwrap();
        let transactions = driver.i2c.transactions();
        let n = transactions.len();
        assert_eq!(
            &transactions[n - 2..],
            &[
                I2cTransaction::Write {
                    addr: DEFAULT_ADDR,
                    data: vec![REG_LOW_LIMIT, 0x01, 0x00],
                },
                I2cTransaction::Write {
                    addr: DEFAULT_ADDR,
                    data: vec![REG_HIGH_LIMIT, 0xBF, 0xFF],
                },
            ]
        );
    }
}
