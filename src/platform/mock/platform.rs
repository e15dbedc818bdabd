//! Mock platform implementation for testing

use crate::platform::{
    error::PlatformError,
    traits::{I2cConfig, Platform, PwmConfig, SpiConfig, UartConfig},
    Result,
};

use super::{MockGpio, MockI2c, MockPwm, MockSpi, MockTimer, MockUart};
use std::vec::Vec;

/// Mock platform implementation
///
/// Hands out mock peripherals with the same resource-allocation rules a real
/// platform would enforce (bounded peripheral counts, one owner per pin).
///
/// # Example
///
/// ```
/// use click_drivers::platform::mock::MockPlatform;
/// use click_drivers::platform::traits::{Platform, UartInterface};
///
/// let mut platform = MockPlatform::new();
/// let mut uart = platform.create_uart(0, Default::default()).unwrap();
/// uart.write(b"Hello").unwrap();
/// ```
#[derive(Debug)]
pub struct MockPlatform {
    timer: MockTimer,
    uart_count: u8,
    i2c_count: u8,
    spi_count: u8,
    gpio_allocated: Vec<u8>,
}

impl MockPlatform {
    /// Create a new mock platform
    pub fn new() -> Self {
        Self {
            timer: MockTimer::new(),
            uart_count: 0,
            i2c_count: 0,
            spi_count: 0,
            gpio_allocated: Vec::new(),
        }
    }

    /// Maximum number of UART peripherals
    pub const MAX_UARTS: u8 = 2;

    /// Maximum number of I2C peripherals
    pub const MAX_I2CS: u8 = 2;

    /// Maximum number of SPI peripherals
    pub const MAX_SPIS: u8 = 2;

    /// Maximum GPIO pin number
    pub const MAX_GPIO: u8 = 29;
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for MockPlatform {
    type Uart = MockUart;
    type I2c = MockI2c;
    type Spi = MockSpi;
    type Pwm = MockPwm;
    type Gpio = MockGpio;
    type Timer = MockTimer;

    fn init() -> Result<Self> {
        Ok(Self::new())
    }

    fn system_clock_hz(&self) -> u32 {
        125_000_000 // simulated 125 MHz system clock
    }

    fn create_uart(&mut self, uart_id: u8, config: UartConfig) -> Result<Self::Uart> {
        if uart_id >= Self::MAX_UARTS || self.uart_count >= Self::MAX_UARTS {
            return Err(PlatformError::ResourceUnavailable);
        }
        self.uart_count += 1;
        Ok(MockUart::new(config))
    }

    fn create_i2c(&mut self, i2c_id: u8, config: I2cConfig) -> Result<Self::I2c> {
        if i2c_id >= Self::MAX_I2CS || self.i2c_count >= Self::MAX_I2CS {
            return Err(PlatformError::ResourceUnavailable);
        }
        self.i2c_count += 1;
        Ok(MockI2c::new(config))
    }

    fn create_spi(&mut self, spi_id: u8, config: SpiConfig) -> Result<Self::Spi> {
        if spi_id >= Self::MAX_SPIS || self.spi_count >= Self::MAX_SPIS {
            return Err(PlatformError::ResourceUnavailable);
        }
        self.spi_count += 1;
        Ok(MockSpi::new(config))
    }

    fn create_pwm(&mut self, pin: u8, config: PwmConfig) -> Result<Self::Pwm> {
        if pin > Self::MAX_GPIO || self.gpio_allocated.contains(&pin) {
            return Err(PlatformError::ResourceUnavailable);
        }
        self.gpio_allocated.push(pin);
        Ok(MockPwm::new(config))
    }

    fn create_gpio(&mut self, pin: u8) -> Result<Self::Gpio> {
        if pin > Self::MAX_GPIO || self.gpio_allocated.contains(&pin) {
            return Err(PlatformError::ResourceUnavailable);
        }
        self.gpio_allocated.push(pin);
        Ok(MockGpio::new_output())
    }

    fn timer(&self) -> &Self::Timer {
        &self.timer
    }

    fn timer_mut(&mut self) -> &mut Self::Timer {
        &mut self.timer
    }
}
