//! PWM interface trait
//!
//! Defines the PWM output interface that platform implementations must provide.

use crate::platform::Result;

/// PWM configuration
#[derive(Debug, Clone, Copy)]
pub struct PwmConfig {
    /// Output frequency in Hz
    pub frequency: u32,
    /// Initial duty cycle (0.0 to 1.0)
    pub duty_cycle: f32,
}

impl Default for PwmConfig {
    fn default() -> Self {
        Self {
            frequency: 1_000,
            duty_cycle: 0.0,
        }
    }
}

/// PWM interface trait
///
/// # Safety Invariants
///
/// - PWM channel must be initialized before use
/// - Only one owner per PWM channel instance
pub trait PwmInterface {
    /// Set duty cycle (0.0 to 1.0)
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Pwm(PwmError::InvalidDutyCycle)` if the value
    /// is outside 0.0..=1.0.
    fn set_duty_cycle(&mut self, duty_cycle: f32) -> Result<()>;

    /// Get current duty cycle
    fn duty_cycle(&self) -> f32;

    /// Set output frequency in Hz
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Pwm(PwmError::InvalidFrequency)` if the
    /// frequency is zero or cannot be achieved.
    fn set_frequency(&mut self, frequency: u32) -> Result<()>;

    /// Get current output frequency in Hz
    fn frequency(&self) -> u32;

    /// Enable the output
    fn enable(&mut self);

    /// Disable the output
    fn disable(&mut self);

    /// Whether the output is enabled
    fn is_enabled(&self) -> bool;
}
