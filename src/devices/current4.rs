//! Current 4 Click driver (TI INA219)
//!
//! High-side current/power monitor. Current and power registers only read
//! real units after the calibration register is programmed from the shunt
//! value and the chosen current LSB.

use crate::devices::traits::{DeviceError, DeviceResult};
use crate::log_info;
use crate::platform::traits::I2cInterface;

/// Default I2C address (A1, A0 grounded)
pub const DEFAULT_ADDR: u8 = 0x40;

const REG_CONFIG: u8 = 0x00;
const REG_SHUNT_VOLTAGE: u8 = 0x01;
const REG_BUS_VOLTAGE: u8 = 0x02;
const REG_POWER: u8 = 0x03;
const REG_CURRENT: u8 = 0x04;
const REG_CALIBRATION: u8 = 0x05;

/// 32 V range, ±320 mV shunt gain, 12-bit continuous conversion
const CONFIG_DEFAULT: u16 = 0x399F;

/// Shunt voltage LSB in millivolts
const SHUNT_LSB_MV: f32 = 0.01;
/// Bus voltage LSB in millivolts (register bits 15:3)
const BUS_LSB_MV: f32 = 4.0;

/// Bus voltage register: conversion ready
const BUS_CNVR: u16 = 0x0002;
/// Bus voltage register: math overflow
const BUS_OVF: u16 = 0x0001;

/// Driver configuration
#[derive(Debug, Clone, Copy)]
pub struct Current4Config {
    /// I2C slave address
    pub address: u8,
    /// Shunt resistance in ohms
    pub shunt_ohms: f32,
    /// Current register LSB in amperes
    pub current_lsb_a: f32,
}

impl Default for Current4Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDR,
            shunt_ohms: 0.1,
            // 100 µA/bit: calibration 4096, 3.2 A full scale
            current_lsb_a: 100e-6,
        }
    }
}

/// Current 4 Click driver
pub struct Current4<I2C: I2cInterface> {
    i2c: I2C,
    address: u8,
    current_lsb_a: f32,
}

impl<I2C: I2cInterface> Current4<I2C> {
    /// Configure and calibrate the monitor
    pub fn new(i2c: I2C, config: Current4Config) -> DeviceResult<Self> {
        if config.shunt_ohms <= 0.0 || config.current_lsb_a <= 0.0 {
            return Err(DeviceError::InvalidArgument);
        }
        let calibration = 0.04096 / (config.current_lsb_a * config.shunt_ohms);
        if calibration as i64 > u16::MAX as i64 {
            return Err(DeviceError::InvalidArgument);
        }

        let mut driver = Self {
            i2c,
            address: config.address,
            current_lsb_a: config.current_lsb_a,
        };
        driver.write_reg16(REG_CONFIG, CONFIG_DEFAULT)?;
        driver.write_reg16(REG_CALIBRATION, calibration as u16)?;

        log_info!(
            "INA219 calibrated: {} at {} uA/bit",
            calibration as u16,
            config.current_lsb_a * 1e6
        );
        Ok(driver)
    }

    /// Shunt voltage drop in millivolts
    pub fn shunt_voltage_mv(&mut self) -> DeviceResult<f32> {
        let raw = self.read_reg16(REG_SHUNT_VOLTAGE)? as i16;
        Ok(f32::from(raw) * SHUNT_LSB_MV)
    }

    /// Bus voltage in millivolts
    pub fn bus_voltage_mv(&mut self) -> DeviceResult<f32> {
        let raw = self.read_reg16(REG_BUS_VOLTAGE)?;
        Ok(f32::from(raw >> 3) * BUS_LSB_MV)
    }

    /// Whether the current/power registers overflowed
    pub fn overflow(&mut self) -> DeviceResult<bool> {
        Ok(self.read_reg16(REG_BUS_VOLTAGE)? & BUS_OVF != 0)
    }

    /// Whether a conversion has completed since the last bus voltage read
    pub fn conversion_ready(&mut self) -> DeviceResult<bool> {
        Ok(self.read_reg16(REG_BUS_VOLTAGE)? & BUS_CNVR != 0)
    }

    /// Load current in milliamperes
    pub fn current_ma(&mut self) -> DeviceResult<f32> {
        let raw = self.read_reg16(REG_CURRENT)? as i16;
        Ok(f32::from(raw) * self.current_lsb_a * 1000.0)
    }

    /// Load power in milliwatts (power LSB is 20x the current LSB)
    pub fn power_mw(&mut self) -> DeviceResult<f32> {
        let raw = self.read_reg16(REG_POWER)?;
        Ok(f32::from(raw) * self.current_lsb_a * 20.0 * 1000.0)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{I2cTransaction, MockI2c};

    fn new_driver() -> Current4<MockI2c> {
        Current4::new(MockI2c::new(Default::default()), Current4Config::default()).unwrap()
    }

    #[test]
    fn test_new_programs_calibration() {
        let driver = new_driver();
        let transactions = driver.i2c.transactions();
        // 0.04096 / (100 uA * 0.1 ohm) = 4096
        assert_eq!(
            transactions,
            vec![
                I2cTransaction::Write {
                    addr: DEFAULT_ADDR,
                    data: vec![REG_CONFIG, 0x39, 0x9F],
                },
                I2cTransaction::Write {
                    addr: DEFAULT_ADDR,
                    data: vec![REG_CALIBRATION, 0x10, 0x00],
                },
            ]
        );
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = Current4Config {
            shunt_ohms: 0.0,
            ..Default::default()
        };
        assert!(Current4::new(MockI2c::new(Default::default()), config).is_err());
    }

    #[test]
    fn test_bus_voltage_decodes_upper_13_bits() {
        let mut driver = new_driver();
        // 3000 counts << 3, at 4 mV/count = 12 V
        driver.i2c.set_read_data(&(3000u16 << 3).to_be_bytes());
        assert_eq!(driver.bus_voltage_mv().unwrap(), 12_000.0);
    }

    #[test]
    fn test_shunt_voltage_is_signed() {
        let mut driver = new_driver();
        driver.i2c.set_read_data(&(-1500i16).to_be_bytes());
        assert!((driver.shunt_voltage_mv().unwrap() + 15.0).abs() < 1e-3);
    }

    #[test]
    fn test_current_scaling() {
        let mut driver = new_driver();
        driver.i2c.set_read_data(&1000u16.to_be_bytes());
        assert!((driver.current_ma().unwrap() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_power_scaling() {
        let mut driver = new_driver();
        driver.i2c.set_read_data(&500u16.to_be_bytes());
        // 500 * 2 mW/bit
        assert!((driver.power_mw().unwrap() - 1_000.0).abs() < 1e-2);
    }

    #[test]
    fn test_overflow_flag() {
        let mut driver = new_driver();
        driver.i2c.set_read_data(&[0x00, 0x01]);
        assert!(driver.overflow().unwrap());
    }
}
