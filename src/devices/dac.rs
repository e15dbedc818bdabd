//! DAC Click driver (Microchip MCP4921)
//!
//! 12-bit SPI digital-to-analog converter. Each update is one 16-bit word:
//! four control bits (channel, buffer, gain, shutdown) followed by the
//! 12-bit output code, latched on the rising edge of chip select.

use crate::devices::traits::{DeviceError, DeviceResult};
use crate::platform::traits::{GpioInterface, SpiInterface};

/// Largest 12-bit output code
pub const VALUE_MAX: u16 = 0x0FFF;

/// Command word: VREF input buffered
const CMD_BUF: u16 = 0x4000;
/// Command word: gain 1x (0 selects 2x)
const CMD_GAIN_1X: u16 = 0x2000;
/// Command word: output active (0 shuts down)
const CMD_ACTIVE: u16 = 0x1000;

/// Driver configuration
#[derive(Debug, Clone, Copy)]
pub struct DacConfig {
    /// Buffer the VREF input
    pub buffered: bool,
    /// Unity gain; `false` doubles the output span
    pub gain_1x: bool,
}

impl Default for DacConfig {
    fn default() -> Self {
        Self {
            buffered: false,
            gain_1x: true,
        }
    }
}

/// DAC Click driver
pub struct Dac<SPI: SpiInterface, CS: GpioInterface> {
    spi: SPI,
    cs: CS,
    config: DacConfig,
}

impl<SPI: SpiInterface, CS: GpioInterface> Dac<SPI, CS> {
    /// Create the driver; drives CS high (inactive)
    pub fn new(spi: SPI, mut cs: CS, config: DacConfig) -> DeviceResult<Self> {
        cs.set_high()?;
        Ok(Self { spi, cs, config })
    }

    /// Write a 12-bit output code
    pub fn set_value(&mut self, value: u16) -> DeviceResult<()> {
        if value > VALUE_MAX {
            return Err(DeviceError::InvalidArgument);
        }
        self.write_word(self.command_bits() | CMD_ACTIVE | value)
    }

    /// Set the output as a percentage of full scale
    pub fn set_percent(&mut self, percent: u8) -> DeviceResult<()> {
        if percent > 100 {
            return Err(DeviceError::InvalidArgument);
        }
        let value = u32::from(VALUE_MAX) * u32::from(percent) / 100;
        self.set_value(value as u16)
    }

    /// Shut the output down (high-impedance)
    pub fn shutdown(&mut self) -> DeviceResult<()> {
        self.write_word(self.command_bits())
    }

    /// Release the underlying bus and chip-select pin
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }

    fn command_bits(&self) -> u16 {
        let mut bits = 0;
        if self.config.buffered {
            bits |= CMD_BUF;
        }
        if self.config.gain_1x {
            bits |= CMD_GAIN_1X;
        }
        bits
    }

    fn write_word(&mut self, word: u16) -> DeviceResult<()> {
        self.cs.set_low()?;
        let result = self.spi.write(&word.to_be_bytes());
        self.cs.set_high()?;
        result?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{MockGpio, MockSpi, SpiTransaction};

    fn new_driver() -> Dac<MockSpi, MockGpio> {
        Dac::new(
            MockSpi::new(Default::default()),
            MockGpio::new_output(),
            DacConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_set_value_word_layout() {
        let mut driver = new_driver();
        driver.set_value(0x0ABC).unwrap();
        // gain 1x + active + value
        assert_eq!(
            driver.spi.transactions(),
            vec![SpiTransaction::Write {
                data: vec![0x3A, 0xBC],
            }]
        );
        assert!(driver.cs.read());
    }

    #[test]
    fn test_set_value_rejects_overrange() {
        let mut driver = new_driver();
        assert!(matches!(
            driver.set_value(0x1000),
            Err(DeviceError::InvalidArgument)
        ));
        assert!(driver.spi.transactions().is_empty());
    }

    #[test]
    fn test_set_percent() {
        let mut driver = new_driver();
        driver.set_percent(100).unwrap();
        driver.set_percent(0).unwrap();
        assert_eq!(
            driver.spi.transactions(),
            vec![
                SpiTransaction::Write {
                    data: vec![0x3F, 0xFF],
                },
                SpiTransaction::Write {
                    data: vec![0x30, 0x00],
                },
            ]
        );
        assert!(driver.set_percent(101).is_err());
    }

    #[test]
    fn test_shutdown_clears_active_bit() {
        let mut driver = new_driver();
        driver.shutdown().unwrap();
        assert_eq!(
            driver.spi.transactions(),
            vec![SpiTransaction::Write {
                data: vec![0x20, 0x00],
            }]
        );
    }

    #[test]
    fn test_buffered_config_sets_buf_bit() {
        let mut driver = Dac::new(
            MockSpi::new(Default::default()),
            MockGpio::new_output(),
            DacConfig {
                buffered: true,
                gain_1x: true,
            },
        )
        .unwrap();
        driver.set_value(0).unwrap();
        assert_eq!(
            driver.spi.transactions(),
            vec![SpiTransaction::Write {
                data: vec![0x70, 0x00],
            }]
        );
    }
}
