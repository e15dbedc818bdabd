//! Root platform trait
//!
//! Aggregates all peripheral interfaces behind associated types so drivers
//! get compile-time dispatch with no platform-specific imports.

use super::{
    GpioInterface, I2cConfig, I2cInterface, PwmConfig, PwmInterface, SpiConfig, SpiInterface,
    TimerInterface, UartConfig, UartInterface,
};
use crate::platform::Result;

/// Root platform trait
///
/// Platform implementations provide concrete types for each peripheral
/// interface and hand out peripheral instances by id. Each peripheral can be
/// created once; the drivers then own their handles for the life of the
/// program.
pub trait Platform: Sized {
    /// UART peripheral type
    type Uart: UartInterface;

    /// I2C peripheral type
    type I2c: I2cInterface;

    /// SPI peripheral type
    type Spi: SpiInterface;

    /// PWM peripheral type
    type Pwm: PwmInterface;

    /// GPIO peripheral type
    type Gpio: GpioInterface;

    /// Timer peripheral type
    type Timer: TimerInterface;

    /// Initialize the platform (clocks, peripheral blocks)
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InitializationFailed` if initialization fails.
    fn init() -> Result<Self>;

    /// Get system clock frequency in Hz
    fn system_clock_hz(&self) -> u32;

    /// Create a UART peripheral instance
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::ResourceUnavailable` if the UART is already in
    /// use or the id is invalid.
    fn create_uart(&mut self, uart_id: u8, config: UartConfig) -> Result<Self::Uart>;

    /// Create an I2C peripheral instance
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::ResourceUnavailable` if the I2C bus is already
    /// in use or the id is invalid.
    fn create_i2c(&mut self, i2c_id: u8, config: I2cConfig) -> Result<Self::I2c>;

    /// Create an SPI peripheral instance
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::ResourceUnavailable` if the SPI bus is already
    /// in use or the id is invalid.
    fn create_spi(&mut self, spi_id: u8, config: SpiConfig) -> Result<Self::Spi>;

    /// Create a PWM channel on a pin
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::ResourceUnavailable` if the pin does not
    /// support PWM or is already in use.
    fn create_pwm(&mut self, pin: u8, config: PwmConfig) -> Result<Self::Pwm>;

    /// Create a GPIO pin instance
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::ResourceUnavailable` if the pin is already in
    /// use or the pin number is invalid.
    fn create_gpio(&mut self, pin: u8) -> Result<Self::Gpio>;

    /// Get timer instance
    fn timer(&self) -> &Self::Timer;

    /// Get mutable timer instance
    fn timer_mut(&mut self) -> &mut Self::Timer;
}
