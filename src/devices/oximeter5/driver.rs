//! MAX30102 driver implementation

use super::registers as regs;
use crate::devices::traits::{DeviceError, DeviceResult};
use crate::platform::traits::{I2cInterface, TimerInterface};
use bitflags::bitflags;

bitflags! {
    /// Interrupt status flags (INT_STATUS_1)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct InterruptStatus: u8 {
        /// FIFO almost full
        const FIFO_ALMOST_FULL = 0x80;
        /// New PPG sample ready
        const PPG_READY = 0x40;
        /// Ambient light cancellation overflow
        const ALC_OVERFLOW = 0x20;
        /// Power ready after brownout
        const POWER_READY = 0x01;
    }
}

/// One FIFO sample: 18-bit red and IR ADC counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    pub red: u32,
    pub ir: u32,
}

/// Oximeter 5 configuration
#[derive(Debug, Clone, Copy)]
pub struct Oximeter5Config {
    /// FIFO_CONFIG register value
    pub fifo_config: u8,
    /// SPO2_CONFIG register value
    pub spo2_config: u8,
    /// Red LED pulse amplitude
    pub led1_pa: u8,
    /// IR LED pulse amplitude
    pub led2_pa: u8,
}

impl Default for Oximeter5Config {
    fn default() -> Self {
        Self {
            fifo_config: regs::FIFO_CONFIG_DEFAULT,
            spo2_config: regs::SPO2_CONFIG_DEFAULT,
            led1_pa: regs::LED_PA_DEFAULT,
            led2_pa: regs::LED_PA_DEFAULT,
        }
    }
}

/// MAX30102 pulse oximeter driver
pub struct Oximeter5<I2C> {
    i2c: I2C,
}

impl<I2C: I2cInterface> Oximeter5<I2C> {
    /// Create the driver: probe PART_ID, reset, and program SpO2 mode
    pub fn new<T: TimerInterface>(
        i2c: I2C,
        config: Oximeter5Config,
        timer: &mut T,
    ) -> DeviceResult<Self> {
        let mut driver = Self { i2c };

        let part_id = driver.read_reg(regs::PART_ID)?;
        if part_id != regs::PART_ID_VALUE {
            crate::log_error!(
                "MAX30102 PART_ID mismatch: expected {:#04x}, got {:#04x}",
                regs::PART_ID_VALUE,
                part_id
            );
            return Err(DeviceError::WrongDeviceId {
                expected: regs::PART_ID_VALUE.into(),
                found: part_id.into(),
            });
        }

        driver.write_reg(regs::MODE_CONFIG, regs::MODE_RESET)?;
        timer.delay_ms(100);

        // Clear FIFO pointers after reset
        driver.write_reg(regs::FIFO_WR_PTR, 0x00)?;
        driver.write_reg(regs::OVF_COUNTER, 0x00)?;
        driver.write_reg(regs::FIFO_RD_PTR, 0x00)?;

        driver.write_reg(regs::FIFO_CONFIG, config.fifo_config)?;
        driver.write_reg(regs::MODE_CONFIG, regs::MODE_SPO2)?;
        driver.write_reg(regs::SPO2_CONFIG, config.spo2_config)?;
        driver.write_reg(regs::LED1_PA, config.led1_pa)?;
        driver.write_reg(regs::LED2_PA, config.led2_pa)?;

        let _rev = driver.read_reg(regs::REV_ID)?;
        crate::log_info!("MAX30102 initialized (rev {:#04x})", _rev);
        Ok(driver)
    }

    /// Number of unread samples in the FIFO
    pub fn samples_available(&mut self) -> DeviceResult<u8> {
        let wr = self.read_reg(regs::FIFO_WR_PTR)? & 0x1F;
        let rd = self.read_reg(regs::FIFO_RD_PTR)? & 0x1F;
        Ok(wr.wrapping_sub(rd) & (regs::FIFO_DEPTH - 1))
    }

    /// Read one sample from the FIFO
    ///
    /// Each FIFO entry is six bytes: red[17:0] then IR[17:0], left-justified
    /// big-endian.
    pub fn read_sample(&mut self) -> DeviceResult<Sample> {
        let mut buf = [0u8; 6];
        self.i2c
            .write_read(regs::I2C_ADDR, &[regs::FIFO_DATA], &mut buf)?;

        let red = (u32::from(buf[0]) << 16 | u32::from(buf[1]) << 8 | u32::from(buf[2])) & 0x03FFFF;
        let ir = (u32::from(buf[3]) << 16 | u32::from(buf[4]) << 8 | u32::from(buf[5])) & 0x03FFFF;
        Ok(Sample { red, ir })
    }

    /// Fill `out` with FIFO samples, returning how many were actually read
    pub fn read_samples(&mut self, out: &mut [Sample]) -> DeviceResult<usize> {
        let available = self.samples_available()? as usize;
        let count = core::cmp::min(available, out.len());
        for slot in out.iter_mut().take(count) {
            *slot = self.read_sample()?;
        }
        Ok(count)
    }

    /// Read and clear the interrupt status flags
    pub fn interrupt_status(&mut self) -> DeviceResult<InterruptStatus> {
        let raw = self.read_reg(regs::INT_STATUS_1)?;
        Ok(InterruptStatus::from_bits_truncate(raw))
    }

    /// Measure die temperature in degrees C
    ///
    /// Starts a single conversion and polls the ready flag with a bounded
    /// retry loop.
    pub fn read_temperature<T: TimerInterface>(&mut self, timer: &mut T) -> DeviceResult<f32> {
        self.write_reg(regs::TEMP_CONFIG, regs::TEMP_EN)?;

        let mut retries = 10;
        loop {
            let status = self.read_reg(regs::INT_STATUS_2)?;
            if status & regs::DIE_TEMP_RDY != 0 {
                break;
            }
            retries -= 1;
            if retries == 0 {
                return Err(DeviceError::Timeout);
            }
            timer.delay_ms(5);
        }

        let int_part = self.read_reg(regs::TEMP_INT)? as i8;
        let frac = self.read_reg(regs::TEMP_FRAC)? & 0x0F;
        Ok(f32::from(int_part) + f32::from(frac) * regs::TEMP_FRAC_LSB)
    }

    /// Put the part into shutdown (registers retain their values)
    pub fn shutdown(&mut self) -> DeviceResult<()> {
        self.modify_reg(regs::MODE_CONFIG, |v| v | regs::MODE_SHUTDOWN)
    }

    /// Wake the part from shutdown
    pub fn wakeup(&mut self) -> DeviceResult<()> {
        self.modify_reg(regs::MODE_CONFIG, |v| v & !regs::MODE_SHUTDOWN)
    }

    /// Release the I2C bus handle
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn read_reg(&mut self, reg: u8) -> DeviceResult<u8> {
        let mut buf = [0u8; 1];
        self.i2c.write_read(regs::I2C_ADDR, &[reg], &mut buf)?;
        Ok(buf[0])
    }

    fn write_reg(&mut self, reg: u8, value: u8) -> DeviceResult<()> {
        self.i2c.write(regs::I2C_ADDR, &[reg, value])?;
        Ok(())
    }

    fn modify_reg(&mut self, reg: u8, f: impl FnOnce(u8) -> u8) -> DeviceResult<()> {
        let value = self.read_reg(reg)?;
        self.write_reg(reg, f(value))
    }
}
