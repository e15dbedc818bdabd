//! Mock platform implementation for testing
//!
//! Provides mock implementations of the platform traits so drivers can be
//! unit-tested without hardware. Reads return pre-programmed data, writes are
//! recorded in transaction logs, and a one-shot error can be injected to
//! exercise driver error paths.
//!
//! Available during test builds and when the `mock` feature is enabled.
//!
//! # Example
//!
//! ```
//! use click_drivers::platform::mock::MockPlatform;
//! use click_drivers::platform::traits::{Platform, UartInterface};
//!
//! let mut platform = MockPlatform::new();
//! let mut uart = platform.create_uart(0, Default::default()).unwrap();
//! uart.write(b"test").unwrap();
//! ```

#![cfg(any(test, feature = "mock"))]

mod gpio;
mod i2c;
mod platform;
mod pwm;
mod spi;
mod timer;
mod uart;

pub use gpio::MockGpio;
pub use i2c::{I2cTransaction, MockI2c};
pub use platform::MockPlatform;
pub use pwm::MockPwm;
pub use spi::{MockSpi, SpiTransaction};
pub use timer::MockTimer;
pub use uart::MockUart;
