//! Thermo 8 Click driver (Microchip MCP9808)
//!
//! ±0.25 °C I2C temperature sensor. The ambient register packs a 13-bit
//! signed temperature in 0.0625 °C steps plus three alert comparator flags
//! in the top bits.

use crate::devices::traits::{DeviceError, DeviceResult};
use crate::log_info;
use crate::platform::traits::I2cInterface;
use bitflags::bitflags;

/// Default I2C address (A2..A0 low)
pub const DEFAULT_ADDR: u8 = 0x18;

const REG_CONFIG: u8 = 0x01;
const REG_T_UPPER: u8 = 0x02;
const REG_T_LOWER: u8 = 0x03;
const REG_T_CRIT: u8 = 0x04;
const REG_TA: u8 = 0x05;
const REG_MANUF_ID: u8 = 0x06;
const REG_DEVICE_ID: u8 = 0x07;
const REG_RESOLUTION: u8 = 0x08;

const MANUFACTURER_ID: u16 = 0x0054;
const DEVICE_ID: u8 = 0x04;

/// Config register shutdown bit
const CONFIG_SHUTDOWN: u16 = 0x0100;

/// Sign bit of the 13-bit ambient value
const TA_SIGN: u16 = 0x1000;

bitflags! {
    /// Alert comparator flags from the ambient temperature register
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AlertFlags: u16 {
        /// TA >= TCRIT
        const CRITICAL = 0x8000;
        /// TA > TUPPER
        const ABOVE_UPPER = 0x4000;
        /// TA < TLOWER
        const BELOW_LOWER = 0x2000;
    }
}

/// Conversion resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// 0.5 °C, 30 ms conversion
    Half = 0x00,
    /// 0.25 °C, 65 ms conversion
    Quarter = 0x01,
    /// 0.125 °C, 130 ms conversion
    Eighth = 0x02,
    /// 0.0625 °C, 250 ms conversion (power-on default)
    Sixteenth = 0x03,
}

/// Driver configuration
#[derive(Debug, Clone, Copy)]
pub struct Thermo8Config {
    /// I2C slave address
    pub address: u8,
}

impl Default for Thermo8Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDR,
        }
    }
}

/// Thermo 8 Click driver
pub struct Thermo8<I2C: I2cInterface> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2cInterface> Thermo8<I2C> {
    /// Create the driver, verifying manufacturer and device IDs
    pub fn new(i2c: I2C, config: Thermo8Config) -> DeviceResult<Self> {
        let mut driver = Self {
            i2c,
            address: config.address,
        };

        let manufacturer = driver.read_reg16(REG_MANUF_ID)?;
        if manufacturer != MANUFACTURER_ID {
            return Err(DeviceError::WrongDeviceId {
                expected: MANUFACTURER_ID,
                found: manufacturer,
            });
        }
        // Device ID lives in the high byte; the low byte is the revision
        let device = (driver.read_reg16(REG_DEVICE_ID)? >> 8) as u8;
        if device != DEVICE_ID {
            return Err(DeviceError::WrongDeviceId {
                expected: DEVICE_ID.into(),
                found: device.into(),
            });
        }

        log_info!("MCP9808 detected at {:#04x}", config.address);
        Ok(driver)
    }

    /// Read the ambient temperature in °C
    pub fn read_temperature(&mut self) -> DeviceResult<f32> {
        Ok(decode_temperature(self.read_reg16(REG_TA)?))
    }

    /// Read the alert comparator flags alongside the temperature
    pub fn read_temperature_with_flags(&mut self) -> DeviceResult<(f32, AlertFlags)> {
        let raw = self.read_reg16(REG_TA)?;
        Ok((
            decode_temperature(raw),
            AlertFlags::from_bits_truncate(raw),
        ))
    }

    /// Set the conversion resolution
    pub fn set_resolution(&mut self, resolution: Resolution) -> DeviceResult<()> {
        self.i2c
            .write(self.address, &[REG_RESOLUTION, resolution as u8])?;
        Ok(())
    }

    /// Program the upper alert limit in °C
    pub fn set_upper_limit(&mut self, celsius: f32) -> DeviceResult<()> {
        self.write_limit(REG_T_UPPER, celsius)
    }

    /// Program the lower alert limit in °C
    pub fn set_lower_limit(&mut self, celsius: f32) -> DeviceResult<()> {
        self.write_limit(REG_T_LOWER, celsius)
    }

    /// Program the critical alert limit in °C
    pub fn set_critical_limit(&mut self, celsius: f32) -> DeviceResult<()> {
        self.write_limit(REG_T_CRIT, celsius)
    }

    /// Enter low-power shutdown (conversions stop, registers readable)
    pub fn shutdown(&mut self) -> DeviceResult<()> {
        let config = self.read_reg16(REG_CONFIG)?;
        self.write_reg16(REG_CONFIG, config | CONFIG_SHUTDOWN)
    }

    /// Resume continuous conversion
    pub fn wakeup(&mut self) -> DeviceResult<()> {
        let config = self.read_reg16(REG_CONFIG)?;
        self.write_reg16(REG_CONFIG, config & !CONFIG_SHUTDOWN)
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

    /// Limits use the same 13-bit signed format as TA, in 0.25 °C steps
    fn write_limit(&mut self, reg: u8, celsius: f32) -> DeviceResult<()> {
        if !(-128.0..=127.75).contains(&celsius) {
            return Err(DeviceError::InvalidArgument);
        }
        let raw = ((celsius * 16.0) as i16 as u16) & 0x1FFC;
        self.write_reg16(reg, raw)
    }
}

/// Decode the 13-bit signed ambient temperature to °C
pub fn decode_temperature(raw: u16) -> f32 {
    let magnitude = (raw & 0x0FFF) as f32 / 16.0;
    if raw & TA_SIGN != 0 {
        magnitude - 256.0
    } else {
        magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{I2cTransaction, MockI2c};

    fn new_driver(i2c: MockI2c) -> Thermo8<MockI2c> {
        let mut i2c = i2c;
        // Manufacturer then device ID probe responses
        i2c.set_read_data(&[0x00, 0x54]);
        i2c.set_read_data(&[0x04, 0x00]);
        Thermo8::new(i2c, Thermo8Config::default()).unwrap()
    }

    #[test]
    fn test_decode_positive_temperature() {
        // 25.25 °C from the datasheet decode example
        assert_eq!(decode_temperature(0x0194), 25.25);
        assert_eq!(decode_temperature(0x0000), 0.0);
    }

    #[test]
    fn test_decode_negative_temperature() {
        // Sign bit set: subtract 256
        assert_eq!(decode_temperature(0x1FF0), -1.0);
        assert_eq!(decode_temperature(0x1E00), -32.0);
    }

    #[test]
    fn test_new_rejects_wrong_manufacturer() {
        let mut i2c = MockI2c::new(Default::default());
        i2c.set_read_data(&[0x12, 0x34]);
        // The full 16-bit register value is reported
        assert!(matches!(
            Thermo8::new(i2c, Thermo8Config::default()),
            Err(DeviceError::WrongDeviceId {
                expected: MANUFACTURER_ID,
                found: 0x1234,
            })
        ));
    }

    #[test]
    fn test_read_temperature() {
        let mut driver = new_driver(MockI2c::new(Default::default()));
        driver.i2c.set_read_data(&[0x01, 0x94]);
        assert_eq!(driver.read_temperature().unwrap(), 25.25);
    }

    #[test]
    fn test_alert_flags() {
        let mut driver = new_driver(MockI2c::new(Default::default()));
        driver.i2c.set_read_data(&[0x41, 0x94]);
        let (temp, flags) = driver.read_temperature_with_flags().unwrap();
        assert_eq!(temp, 25.25);
        assert_eq!(flags, AlertFlags::ABOVE_UPPER);
    }

    #[test]
    fn test_set_resolution() {
        let mut driver = new_driver(MockI2c::new(Default::default()));
        driver.set_resolution(Resolution::Eighth).unwrap();
        let transactions = driver.i2c.transactions();
        assert_eq!(
            transactions.last().unwrap(),
            &I2cTransaction::Write {
                addr: DEFAULT_ADDR,
                data: vec![0x08, 0x02],
            }
        );
    }

    #[test]
    fn test_shutdown_sets_config_bit() {
        let mut driver = new_driver(MockI2c::new(Default::default()));
        driver.i2c.set_read_data(&[0x00, 0x00]);
        driver.shutdown().unwrap();
        let transactions = driver.i2c.transactions();
        assert_eq!(
            transactions.last().unwrap(),
            &I2cTransaction::Write {
                addr: DEFAULT_ADDR,
                data: vec![0x01, 0x01, 0x00],
            }
        );
    }

    #[test]
    fn test_limit_encoding() {
        let mut driver = new_driver(MockI2c::new(Default::default()));
        driver.set_upper_limit(30.0).unwrap();
        let transactions = driver.i2c.transactions();
        // 30 °C -> 480 -> 0x01E0
        assert_eq!(
            transactions.last().unwrap(),
            &I2cTransaction::Write {
                addr: DEFAULT_ADDR,
                data: vec![0x02, 0x01, 0xE0],
            }
        );
        assert!(driver.set_upper_limit(300.0).is_err());
    }
}
