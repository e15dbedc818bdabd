//! PWM 2 Click - 48-channel 12-bit PWM LED driver (SPI)
//!
//! The device is a daisy-chained shift register: all 48 channel duty values
//! are streamed out in one 72-byte frame, highest channel first, 12 bits per
//! channel MSB-first, and latched on the rising edge of chip select.
//!
//! The driver owns the channel array; callers stage duty values with
//! [`Pwm2::set_channel`] and push the whole frame with [`Pwm2::update`].

use crate::devices::traits::{DeviceError, DeviceResult};
use crate::platform::traits::{GpioInterface, SpiInterface};

/// Number of PWM channels
pub const CHANNELS: usize = 48;

/// Frame length in bytes (48 channels x 12 bits)
pub const FRAME_LEN: usize = CHANNELS * 12 / 8;

/// Maximum duty value (12-bit)
pub const DUTY_MAX: u16 = 0x0FFF;

/// PWM 2 driver
pub struct Pwm2<SPI, CS> {
    spi: SPI,
    cs: CS,
    channels: [u16; CHANNELS],
}

impl<SPI: SpiInterface, CS: GpioInterface> Pwm2<SPI, CS> {
    /// Create the driver with all channels off and push the initial frame
    pub fn new(spi: SPI, mut cs: CS) -> DeviceResult<Self> {
        cs.set_high()?;
        let mut driver = Self {
            spi,
            cs,
            channels: [0; CHANNELS],
        };
        driver.update()?;
        Ok(driver)
    }

    /// Stage a duty value (0..=0x0FFF) for one channel (0-47)
    ///
    /// Takes effect on the next [`Pwm2::update`].
    pub fn set_channel(&mut self, channel: usize, duty: u16) -> DeviceResult<()> {
        if channel >= CHANNELS || duty > DUTY_MAX {
            return Err(DeviceError::InvalidArgument);
        }
        self.channels[channel] = duty;
        Ok(())
    }

    /// Stage the same duty value on every channel
    pub fn set_all(&mut self, duty: u16) -> DeviceResult<()> {
        if duty > DUTY_MAX {
            return Err(DeviceError::InvalidArgument);
        }
        self.channels = [duty; CHANNELS];
        Ok(())
    }

    /// Currently staged duty value for a channel
    pub fn channel(&self, channel: usize) -> DeviceResult<u16> {
        self.channels
            .get(channel)
            .copied()
            .ok_or(DeviceError::InvalidArgument)
    }

    /// Shift the staged frame out and latch it
    pub fn update(&mut self) -> DeviceResult<()> {
        let frame = self.pack_frame();
        self.cs.set_low()?;
        let res = self.spi.write(&frame);
        // Rising edge latches the shifted data into the PWM outputs
        self.cs.set_high()?;
        res?;
        Ok(())
    }

    /// Release the bus and pin handles
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }

    /// Pack the channel array into the wire frame
    ///
    /// Channel 47 is shifted out first so it lands at the far end of the
    /// daisy chain.
    fn pack_frame(&self) -> [u8; FRAME_LEN] {
        let mut frame = [0u8; FRAME_LEN];
        let mut bit = 0usize;
        for ch in (0..CHANNELS).rev() {
            let value = self.channels[ch] & DUTY_MAX;
            for shift in (0..12).rev() {
                if value & (1 << shift) != 0 {
                    frame[bit / 8] |= 0x80 >> (bit % 8);
                }
                bit += 1;
            }
        }
        frame
    }
}
