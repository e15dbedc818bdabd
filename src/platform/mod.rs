//! Platform abstraction layer
//!
//! This module provides hardware abstraction for different microcontroller
//! platforms. Drivers only talk to the traits defined here; concrete HAL
//! implementations live out of tree.

pub mod error;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use traits::{
    GpioInterface, I2cInterface, Platform, PwmInterface, SpiInterface, TimerInterface,
    UartInterface,
};
