//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.
//! All interfaces are synchronous and blocking: every transaction completes
//! (or fails) before the call returns.

pub mod gpio;
pub mod i2c;
pub mod platform;
pub mod pwm;
pub mod spi;
pub mod timer;
pub mod uart;

// Re-export trait interfaces
pub use gpio::{GpioInterface, GpioMode};
pub use i2c::{I2cConfig, I2cInterface};
pub use platform::Platform;
pub use pwm::{PwmConfig, PwmInterface};
pub use spi::{SpiBitOrder, SpiConfig, SpiInterface, SpiMode};
pub use timer::TimerInterface;
pub use uart::{UartConfig, UartInterface, UartParity, UartStopBits};
