//! Register bus transport selector
//!
//! Several Click parts expose the same register map over either I2C or SPI,
//! chosen by board jumpers. Drivers for those parts are written against
//! `BusTransport`, which fixes the backend at construction time and never
//! changes it afterwards.
//!
//! SPI register access follows the usual convention for these parts: bit 7 of
//! the register address selects read (1) or write (0), and the chip-select
//! pin is asserted (low) around each transaction.

use crate::platform::{
    error::GpioError,
    traits::{GpioInterface, GpioMode, I2cInterface, SpiInterface},
    PlatformError, Result,
};

/// SPI register-address read flag (bit 7)
const SPI_READ_BIT: u8 = 0x80;

/// Transport over an I2C bus (7-bit address) or an SPI bus with a dedicated
/// chip-select pin. Selected once at driver construction.
pub enum BusTransport<I2C, SPI, CS> {
    /// I2C backend
    I2c {
        /// Open I2C bus handle
        bus: I2C,
        /// 7-bit device address
        address: u8,
    },
    /// SPI backend
    Spi {
        /// Open SPI bus handle
        bus: SPI,
        /// Chip-select pin, active low
        cs: CS,
    },
}

/// Transport alias for I2C-only wiring
pub type I2cTransport<I2C> = BusTransport<I2C, NoBus, NoPin>;

/// Transport alias for SPI-only wiring
pub type SpiTransport<SPI, CS> = BusTransport<NoBus, SPI, CS>;

/// Build an I2C transport
pub fn i2c<I2C: I2cInterface>(bus: I2C, address: u8) -> I2cTransport<I2C> {
    BusTransport::I2c { bus, address }
}

/// Build an SPI transport; drives CS high (inactive) immediately
pub fn spi<SPI: SpiInterface, CS: GpioInterface>(bus: SPI, mut cs: CS) -> Result<SpiTransport<SPI, CS>> {
    cs.set_high()?;
    Ok(BusTransport::Spi { bus, cs })
}

impl<I2C, SPI, CS> BusTransport<I2C, SPI, CS>
where
    I2C: I2cInterface,
    SPI: SpiInterface,
    CS: GpioInterface,
{
    /// Read consecutive registers starting at `reg`
    pub fn read_regs(&mut self, reg: u8, buf: &mut [u8]) -> Result<()> {
        match self {
            BusTransport::I2c { bus, address } => bus.write_read(*address, &[reg], buf),
            BusTransport::Spi { bus, cs } => {
                cs.set_low()?;
                let res = bus
                    .write(&[reg | SPI_READ_BIT])
                    .and_then(|_| bus.read(buf));
                cs.set_high()?;
                res
            }
        }
    }

    /// Write consecutive registers starting at `reg`
    pub fn write_regs(&mut self, reg: u8, data: &[u8]) -> Result<()> {
        match self {
            BusTransport::I2c { bus, address } => {
                // Register address followed by payload in one transaction
                let mut frame = [0u8; 17];
                if data.len() + 1 > frame.len() {
                    return Err(PlatformError::InvalidConfig);
                }
                frame[0] = reg;
                frame[1..=data.len()].copy_from_slice(data);
                bus.write(*address, &frame[..=data.len()])
            }
            BusTransport::Spi { bus, cs } => {
                cs.set_low()?;
                let res = bus
                    .write(&[reg & !SPI_READ_BIT])
                    .and_then(|_| bus.write(data));
                cs.set_high()?;
                res
            }
        }
    }

    /// Read a single register
    pub fn read_reg(&mut self, reg: u8) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.read_regs(reg, &mut buf)?;
        Ok(buf[0])
    }

    /// Write a single register
    pub fn write_reg(&mut self, reg: u8, value: u8) -> Result<()> {
        self.write_regs(reg, &[value])
    }

    /// Read-modify-write a single register
    ///
    /// Not atomic; the single-owner bus rule makes that acceptable.
    pub fn modify_reg(&mut self, reg: u8, f: impl FnOnce(u8) -> u8) -> Result<()> {
        let value = self.read_reg(reg)?;
        self.write_reg(reg, f(value))
    }
}

/// Placeholder bus type for the unused side of a `BusTransport`
///
/// Never instantiated; every method is unreachable in practice and reports
/// `ResourceUnavailable` if it somehow is.
pub struct NoBus;

impl I2cInterface for NoBus {
    fn write(&mut self, _addr: u8, _data: &[u8]) -> Result<()> {
        Err(PlatformError::ResourceUnavailable)
    }

    fn read(&mut self, _addr: u8, _buffer: &mut [u8]) -> Result<()> {
        Err(PlatformError::ResourceUnavailable)
    }

    fn write_read(&mut self, _addr: u8, _write_data: &[u8], _read_buffer: &mut [u8]) -> Result<()> {
        Err(PlatformError::ResourceUnavailable)
    }

    fn set_frequency(&mut self, _frequency: u32) -> Result<()> {
        Err(PlatformError::ResourceUnavailable)
    }
}

impl SpiInterface for NoBus {
    fn transfer(&mut self, _write_buffer: &[u8], _read_buffer: &mut [u8]) -> Result<()> {
        Err(PlatformError::ResourceUnavailable)
    }

    fn write(&mut self, _data: &[u8]) -> Result<()> {
        Err(PlatformError::ResourceUnavailable)
    }

    fn read(&mut self, _buffer: &mut [u8]) -> Result<()> {
        Err(PlatformError::ResourceUnavailable)
    }

    fn set_frequency(&mut self, _frequency: u32) -> Result<()> {
        Err(PlatformError::ResourceUnavailable)
    }
}

/// Placeholder pin type for the unused side of a `BusTransport`
pub struct NoPin;

impl GpioInterface for NoPin {
    fn set_high(&mut self) -> Result<()> {
        Err(PlatformError::Gpio(GpioError::InvalidPin))
    }

    fn set_low(&mut self) -> Result<()> {
        Err(PlatformError::Gpio(GpioError::InvalidPin))
    }

    fn toggle(&mut self) -> Result<()> {
        Err(PlatformError::Gpio(GpioError::InvalidPin))
    }

    fn read(&self) -> bool {
        false
    }

    fn set_mode(&mut self, _mode: GpioMode) -> Result<()> {
        Err(PlatformError::Gpio(GpioError::InvalidPin))
    }

    fn mode(&self) -> GpioMode {
        GpioMode::Input
    }
}
