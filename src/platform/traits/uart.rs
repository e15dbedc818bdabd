//! UART interface trait
//!
//! Defines the serial interface that platform implementations must provide.

use crate::platform::Result;

/// UART parity setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UartParity {
    /// No parity bit
    None,
    /// Even parity
    Even,
    /// Odd parity
    Odd,
}

/// UART stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UartStopBits {
    /// One stop bit
    One,
    /// Two stop bits
    Two,
}

/// UART configuration
#[derive(Debug, Clone, Copy)]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baud_rate: u32,
    /// Data bits per character (5-8)
    pub data_bits: u8,
    /// Parity setting
    pub parity: UartParity,
    /// Number of stop bits
    pub stop_bits: UartStopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115_200, // 115200 8N1
            data_bits: 8,
            parity: UartParity::None,
            stop_bits: UartStopBits::One,
        }
    }
}

/// UART interface trait
///
/// # Safety Invariants
///
/// - UART peripheral must be initialized before use
/// - Only one owner per UART instance
/// - No concurrent access to the same UART from multiple contexts
pub trait UartInterface {
    /// Write data, returning the number of bytes accepted
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Uart` if the write fails.
    fn write(&mut self, data: &[u8]) -> Result<usize>;

    /// Read available data into `buffer`, returning the number of bytes read
    ///
    /// Returns immediately with 0 if no data is pending.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Uart` if the read fails.
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize>;

    /// Set baud rate
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Uart(UartError::InvalidBaudRate)` if the rate
    /// cannot be achieved with the current clock configuration.
    fn set_baud_rate(&mut self, baud: u32) -> Result<()>;

    /// Whether received data is pending
    fn available(&self) -> bool;

    /// Block until all queued transmit data has left the peripheral
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Uart` if the flush fails.
    fn flush(&mut self) -> Result<()>;
}
