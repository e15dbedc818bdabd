//! DIGI POT Click driver (Microchip MCP4161)
//!
//! Single-channel SPI digital potentiometer with a 9-bit wiper (0-256
//! full-scale). Commands are a 4-bit register address, a 2-bit operation
//! and the two data MSBs, followed by one data byte.

use crate::devices::traits::{DeviceError, DeviceResult};
use crate::platform::traits::{GpioInterface, SpiInterface};

/// Full-scale wiper position
pub const WIPER_MAX: u16 = 0x100;

/// Volatile wiper 0 register
const REG_WIPER0: u8 = 0x00;

/// Command bits: read (write is 0b00)
const CMD_READ: u8 = 0x0C;

/// DIGI POT Click driver
pub struct Digipot<SPI: SpiInterface, CS: GpioInterface> {
    spi: SPI,
    cs: CS,
}

impl<SPI: SpiInterface, CS: GpioInterface> Digipot<SPI, CS> {
    /// Create the driver; drives CS high (inactive)
    pub fn new(spi: SPI, mut cs: CS) -> DeviceResult<Self> {
        cs.set_high()?;
        Ok(Self { spi, cs })
    }

    /// Set the volatile wiper position (0 = B terminal, 256 = A terminal)
    pub fn set_wiper(&mut self, position: u16) -> DeviceResult<()> {
        if position > WIPER_MAX {
            return Err(DeviceError::InvalidArgument);
        }
        let frame = [
            (REG_WIPER0 << 4) | ((position >> 8) as u8 & 0x01),
            (position & 0xFF) as u8,
        ];
        self.cs.set_low()?;
        let result = self.spi.write(&frame);
        self.cs.set_high()?;
        result?;
        Ok(())
    }

    /// Set the wiper as a percentage of full scale
    pub fn set_percent(&mut self, percent: u8) -> DeviceResult<()> {
        if percent > 100 {
            return Err(DeviceError::InvalidArgument);
        }
        let position = u32::from(WIPER_MAX) * u32::from(percent) / 100;
        self.set_wiper(position as u16)
    }

    /// Read the volatile wiper position back
    pub fn read_wiper(&mut self) -> DeviceResult<u16> {
        let tx = [(REG_WIPER0 << 4) | CMD_READ, 0xFF];
        let mut rx = [0u8; 2];
        self.cs.set_low()?;
        let result = self.spi.transfer(&tx, &mut rx);
        self.cs.set_high()?;
        result?;
        Ok((u16::from(rx[0] & 0x01) << 8) | u16::from(rx[1]))
    }

    /// Release the underlying bus and chip-select pin
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}
