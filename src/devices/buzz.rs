//! BUZZ Click driver
//!
//! Piezo buzzer on a PWM output. A tone is a PWM frequency at 50% duty;
//! volume scales the duty toward zero.

use crate::devices::traits::{DeviceError, DeviceResult};
use crate::platform::traits::{PwmInterface, TimerInterface};

/// Playable frequency range of the transducer, in Hz
pub const FREQ_MIN: u32 = 100;
pub const FREQ_MAX: u32 = 20_000;

/// Note frequencies for the octave starting at middle C, in Hz
pub mod note {
    pub const C4: u32 = 262;
    pub const D4: u32 = 294;
    pub const E4: u32 = 330;
    pub const F4: u32 = 349;
    pub const G4: u32 = 392;
    pub const A4: u32 = 440;
    pub const B4: u32 = 494;
    pub const C5: u32 = 523;
}

/// BUZZ Click driver
pub struct Buzz<PWM: PwmInterface> {
    pwm: PWM,
    /// Volume 0-100; 100 is 50% duty (loudest for a piezo)
    volume: u8,
}

impl<PWM: PwmInterface> Buzz<PWM> {
    /// Create the driver, silent, at full volume
    pub fn new(mut pwm: PWM) -> Self {
        pwm.disable();
        Self { pwm, volume: 100 }
    }

    /// Set volume as a percentage
    pub fn set_volume(&mut self, volume: u8) -> DeviceResult<()> {
        if volume > 100 {
            return Err(DeviceError::InvalidArgument);
        }
        self.volume = volume;
        Ok(())
    }

    /// Start a continuous tone
    pub fn start_tone(&mut self, frequency: u32) -> DeviceResult<()> {
        if !(FREQ_MIN..=FREQ_MAX).contains(&frequency) {
            return Err(DeviceError::InvalidArgument);
        }
        self.pwm.set_frequency(frequency)?;
        self.pwm
            .set_duty_cycle(0.5 * f32::from(self.volume) / 100.0)?;
        self.pwm.enable();
        Ok(())
    }

    /// Stop the output
    pub fn stop(&mut self) {
        self.pwm.disable();
    }

    /// Play a tone for `duration_ms`, blocking, then stop
    pub fn play_tone<T: TimerInterface>(
        &mut self,
        timer: &mut T,
        frequency: u32,
        duration_ms: u32,
    ) -> DeviceResult<()> {
        self.start_tone(frequency)?;
        timer.delay_ms(duration_ms);
        self.stop();
        Ok(())
    }

    /// Release the underlying PWM channel
    pub fn release(self) -> PWM {
        self.pwm
    }
}
