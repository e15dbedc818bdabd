//! SX1509B driver implementation

use super::registers as regs;
use crate::devices::traits::{DeviceError, DeviceResult};
use crate::platform::traits::I2cInterface;

/// Expand 9 configuration
#[derive(Debug, Clone, Copy)]
pub struct Expand9Config {
    /// 7-bit I2C address (0x3E-0x71 depending on ADDR pins)
    pub address: u8,
}

impl Default for Expand9Config {
    fn default() -> Self {
        Self {
            address: regs::DEFAULT_ADDR,
        }
    }
}

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinDirection {
    /// Input (power-on default)
    Input,
    /// Output
    Output,
}

/// SX1509B 16-channel I/O expander driver
pub struct Expand9<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2cInterface> Expand9<I2C> {
    /// Create the driver and program the power-on configuration
    ///
    /// Issues a software reset, then enables the internal 2 MHz oscillator
    /// so the LED driver can run.
    pub fn new(i2c: I2C, config: Expand9Config) -> DeviceResult<Self> {
        let mut driver = Self {
            i2c,
            address: config.address,
        };

        // Software reset takes the magic two-byte sequence
        driver.write_reg(regs::REG_RESET, regs::RESET_SEQ_1)?;
        driver.write_reg(regs::REG_RESET, regs::RESET_SEQ_2)?;

        driver.write_reg(regs::REG_CLOCK, regs::CLOCK_FOSC_INTERNAL)?;
        driver.write_reg(regs::REG_MISC, regs::MISC_LED_CLOCK_DIV_2)?;

        crate::log_info!("SX1509B initialized at {:#04x}", config.address);
        Ok(driver)
    }

    /// Set the direction of one pin (0-15)
    pub fn set_direction(&mut self, pin: u8, dir: PinDirection) -> DeviceResult<()> {
        let (reg, mask) = Self::bank_reg(regs::REG_DIR_B, pin)?;
        self.modify_reg(reg, |v| match dir {
            PinDirection::Input => v | mask,
            PinDirection::Output => v & !mask,
        })
    }

    /// Drive an output pin high
    pub fn set_pin(&mut self, pin: u8) -> DeviceResult<()> {
        let (reg, mask) = Self::bank_reg(regs::REG_DATA_B, pin)?;
        self.modify_reg(reg, |v| v | mask)
    }

    /// Drive an output pin low
    pub fn clear_pin(&mut self, pin: u8) -> DeviceResult<()> {
        let (reg, mask) = Self::bank_reg(regs::REG_DATA_B, pin)?;
        self.modify_reg(reg, |v| v & !mask)
    }

    /// Toggle an output pin
    pub fn toggle_pin(&mut self, pin: u8) -> DeviceResult<()> {
        let (reg, mask) = Self::bank_reg(regs::REG_DATA_B, pin)?;
        self.modify_reg(reg, |v| v ^ mask)
    }

    /// Read the level of one pin
    pub fn read_pin(&mut self, pin: u8) -> DeviceResult<bool> {
        let (reg, mask) = Self::bank_reg(regs::REG_DATA_B, pin)?;
        Ok(self.read_reg(reg)? & mask != 0)
    }

    /// Read all 16 pins at once (bit 0 = pin 0)
    pub fn read_pins(&mut self) -> DeviceResult<u16> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(self.address, &[regs::REG_DATA_B], &mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    /// Write all 16 pins at once (bit 0 = pin 0)
    pub fn write_pins(&mut self, value: u16) -> DeviceResult<()> {
        let bytes = value.to_be_bytes();
        self.i2c
            .write(self.address, &[regs::REG_DATA_B, bytes[0], bytes[1]])?;
        Ok(())
    }

    /// Enable pull-up on an input pin
    pub fn set_pull_up(&mut self, pin: u8, enable: bool) -> DeviceResult<()> {
        let (reg, mask) = Self::bank_reg(regs::REG_PULL_UP_B, pin)?;
        self.modify_reg(reg, |v| if enable { v | mask } else { v & !mask })
    }

    /// Put a pin into LED driver mode
    ///
    /// Per datasheet: disable the input buffer, disable pull-up, make the
    /// output open-drain, set it as output, enable the LED driver, and start
    /// with the line low.
    pub fn led_driver_enable(&mut self, pin: u8) -> DeviceResult<()> {
        let (inp, mask) = Self::bank_reg(regs::REG_INPUT_DISABLE_B, pin)?;
        self.modify_reg(inp, |v| v | mask)?;

        let (pull, _) = Self::bank_reg(regs::REG_PULL_UP_B, pin)?;
        self.modify_reg(pull, |v| v & !mask)?;

        let (od, _) = Self::bank_reg(regs::REG_OPEN_DRAIN_B, pin)?;
        self.modify_reg(od, |v| v | mask)?;

        self.set_direction(pin, PinDirection::Output)?;

        let (led, _) = Self::bank_reg(regs::REG_LED_DRIVER_ENABLE_B, pin)?;
        self.modify_reg(led, |v| v | mask)?;

        self.clear_pin(pin)
    }

    /// Set LED ON intensity (0-255) for a pin in LED driver mode
    pub fn set_intensity(&mut self, pin: u8, intensity: u8) -> DeviceResult<()> {
        if pin > 15 {
            return Err(DeviceError::InvalidArgument);
        }
        self.write_reg(regs::REG_I_ON[pin as usize], intensity)
    }

    /// Release the I2C bus handle
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Map a pin number to its bank register and bit mask
    ///
    /// `reg_b` is the bank-B (pins 8-15) address; bank A follows at +1.
    fn bank_reg(reg_b: u8, pin: u8) -> DeviceResult<(u8, u8)> {
        match pin {
            0..=7 => Ok((reg_b + 1, 1 << pin)),
            8..=15 => Ok((reg_b, 1 << (pin - 8))),
            _ => Err(DeviceError::InvalidArgument),
        }
    }

    fn read_reg(&mut self, reg: u8) -> DeviceResult<u8> {
        let mut buf = [0u8; 1];
        self.i2c.write_read(self.address, &[reg], &mut buf)?;
        Ok(buf[0])
    }

    fn write_reg(&mut self, reg: u8, value: u8) -> DeviceResult<()> {
        self.i2c.write(self.address, &[reg, value])?;
        Ok(())
    }

    fn modify_reg(&mut self, reg: u8, f: impl FnOnce(u8) -> u8) -> DeviceResult<()> {
        let value = self.read_reg(reg)?;
        self.write_reg(reg, f(value))
    }
}
