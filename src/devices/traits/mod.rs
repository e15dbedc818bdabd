//! Shared device driver types
//!
//! The error type every driver returns and the bus transport selector used
//! by parts that can sit on either I2C or SPI.

pub mod bus;

pub use bus::{BusTransport, I2cTransport, NoBus, NoPin, SpiTransport};

use crate::platform::PlatformError;
use core::fmt;

/// Result type for device driver operations
pub type DeviceResult<T> = core::result::Result<T, DeviceError>;

/// Device driver errors
///
/// Bus-layer errors are carried through unchanged in `Bus`; the remaining
/// variants cover conditions the bus layer cannot express.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceError {
    /// Underlying bus transaction failed
    Bus(PlatformError),
    /// Identity register did not match the expected part
    ///
    /// Fields are wide enough for 16-bit manufacturer/device IDs; 8-bit
    /// parts report zero-extended values.
    WrongDeviceId { expected: u16, found: u16 },
    /// Received frame failed length or checksum validation
    BadFrame,
    /// Argument outside the device's accepted range
    InvalidArgument,
    /// Bounded retry loop exhausted without a response
    Timeout,
    /// Data not yet available (e.g. empty FIFO, conversion in progress)
    NotReady,
}

impl From<PlatformError> for DeviceError {
    fn from(e: PlatformError) -> Self {
        DeviceError::Bus(e)
    }
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::Bus(e) => write!(f, "bus error: {}", e),
            DeviceError::WrongDeviceId { expected, found } => {
                write!(
                    f,
                    "wrong device id: expected {:#06x}, found {:#06x}",
                    expected, found
                )
            }
            DeviceError::BadFrame => write!(f, "invalid frame"),
            DeviceError::InvalidArgument => write!(f, "invalid argument"),
            DeviceError::Timeout => write!(f, "timed out waiting for device"),
            DeviceError::NotReady => write!(f, "data not ready"),
        }
    }
}
