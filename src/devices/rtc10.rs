//! RTC 10 Click driver (Maxim DS1339)
//!
//! Battery-backed real-time clock. All time and date registers are BCD
//! coded; the driver converts at the register boundary and exposes plain
//! binary fields.

use crate::devices::traits::{DeviceError, DeviceResult};
use crate::platform::traits::I2cInterface;

/// Fixed I2C address
pub const DEFAULT_ADDR: u8 = 0x68;

const REG_SECONDS: u8 = 0x00;
const REG_CONTROL: u8 = 0x0E;
const REG_STATUS: u8 = 0x0F;

/// Status register: oscillator stop flag
const STATUS_OSF: u8 = 0x80;
/// Control register: oscillator enable (active low)
const CONTROL_EOSC_N: u8 = 0x80;
/// Hours register: 12-hour mode select
const HOURS_12H: u8 = 0x40;

/// Calendar time, binary fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    pub seconds: u8,
    pub minutes: u8,
    /// 24-hour clock
    pub hours: u8,
    /// Day of week, 1-7
    pub weekday: u8,
    /// Day of month, 1-31
    pub day: u8,
    /// Month, 1-12
    pub month: u8,
    /// Full year, 2000-2099
    pub year: u16,
}

impl DateTime {
    fn validate(&self) -> DeviceResult<()> {
        let ok = self.seconds < 60
            && self.minutes < 60
            && self.hours < 24
            && (1..=7).contains(&self.weekday)
            && (1..=31).contains(&self.day)
            && (1..=12).contains(&self.month)
            && (2000..=2099).contains(&self.year);
        if ok {
            Ok(())
        } else {
            Err(DeviceError::InvalidArgument)
        }
    }
}

/// RTC 10 Click driver
pub struct Rtc10<I2C: I2cInterface> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2cInterface> Rtc10<I2C> {
    /// Create the driver and make sure the oscillator is running
    pub fn new(i2c: I2C) -> DeviceResult<Self> {
        let mut driver = Self {
            i2c,
            address: DEFAULT_ADDR,
        };
        let control = driver.read_reg(REG_CONTROL)?;
        if control & CONTROL_EOSC_N != 0 {
            driver.write_reg(REG_CONTROL, control & !CONTROL_EOSC_N)?;
        }
        Ok(driver)
    }

    /// Whether the oscillator stopped since the flag was last cleared
    ///
    /// A set flag means the time is not trustworthy.
    pub fn oscillator_stopped(&mut self) -> DeviceResult<bool> {
        Ok(self.read_reg(REG_STATUS)? & STATUS_OSF != 0)
    }

    /// Clear the oscillator stop flag after setting a known-good time
    pub fn clear_oscillator_flag(&mut self) -> DeviceResult<()> {
        let status = self.read_reg(REG_STATUS)?;
        self.write_reg(REG_STATUS, status & !STATUS_OSF)
    }

    /// Burst-read the seven clock registers
    pub fn read_time(&mut self) -> DeviceResult<DateTime> {
        let mut buf = [0u8; 7];
        self.i2c
            .write_read(self.address, &[REG_SECONDS], &mut buf)?;

        if buf[2] & HOURS_12H != 0 {
            // Driver always programs 24-hour mode; 12-hour means foreign state
            return Err(DeviceError::BadFrame);
        }
        Ok(DateTime {
            seconds: bcd_to_bin(buf[0] & 0x7F),
            minutes: bcd_to_bin(buf[1] & 0x7F),
            hours: bcd_to_bin(buf[2] & 0x3F),
            weekday: buf[3] & 0x07,
            day: bcd_to_bin(buf[4] & 0x3F),
            month: bcd_to_bin(buf[5] & 0x1F),
            year: 2000 + u16::from(bcd_to_bin(buf[6])),
        })
    }

    /// Burst-write the seven clock registers (24-hour mode)
    pub fn set_time(&mut self, time: &DateTime) -> DeviceResult<()> {
        time.validate()?;
        let frame = [
            REG_SECONDS,
            bin_to_bcd(time.seconds),
            bin_to_bcd(time.minutes),
            bin_to_bcd(time.hours),
            time.weekday,
            bin_to_bcd(time.day),
            bin_to_bcd(time.month),
            bin_to_bcd((time.year - 2000) as u8),
        ];
        self.i2c.write(self.address, &frame)?;
        Ok(())
    }

    /// Release the underlying bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn read_reg(&mut self, reg: u8) -> DeviceResult<u8> {
        let mut buf = [0u8; 1];
        self.i2c.write_read(self.address, &[reg], &mut buf)?;
        Ok(buf[0])
    }

    fn write_reg(&mut self, reg: u8, value: u8) -> DeviceResult<()> {
        self.i2c.write(self.address, &[reg, value])?;
        Ok(())
    }
}

/// Two-digit BCD to binary
pub fn bcd_to_bin(bcd: u8) -> u8 {
    (bcd >> 4) * 10 + (bcd & 0x0F)
}

/// Binary (0-99) to two-digit BCD
pub fn bin_to_bcd(bin: u8) -> u8 {
    ((bin / 10) << 4) | (bin % 10)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{I2cTransaction, MockI2c};

    fn new_driver() -> Rtc10<MockI2c> {
        let mut i2c = MockI2c::new(Default::default());
        // Control register: oscillator already enabled
        i2c.set_read_data(&[0x00]);
        Rtc10::new(i2c).unwrap()
    }

    #[test]
    fn test_bcd_round_trip() {
        assert_eq!(bcd_to_bin(0x59), 59);
        assert_eq!(bcd_to_bin(0x00), 0);
        assert_eq!(bin_to_bcd(59), 0x59);
        assert_eq!(bin_to_bcd(7), 0x07);
        for v in 0..100u8 {
            assert_eq!(bcd_to_bin(bin_to_bcd(v)), v);
        }
    }

    #[test]
    fn test_new_enables_stopped_oscillator() {
        let mut i2c = MockI2c::new(Default::default());
        i2c.set_read_data(&[CONTROL_EOSC_N]);
        let driver = Rtc10::new(i2c).unwrap();
        assert_eq!(
            driver.i2c.transactions().last().unwrap(),
            &I2cTransaction::Write {
                addr: DEFAULT_ADDR,
                data: vec![REG_CONTROL, 0x00],
            }
        );
    }

    #[test]
    fn test_read_time_decodes_bcd() {
        let mut driver = new_driver();
        // 2026-08-30 (Sunday) 23:59:45
        driver
            .i2c
            .set_read_data(&[0x45, 0x59, 0x23, 0x07, 0x30, 0x08, 0x26]);
        let time = driver.read_time().unwrap();
        assert_eq!(
            time,
            DateTime {
                seconds: 45,
                minutes: 59,
                hours: 23,
                weekday: 7,
                day: 30,
                month: 8,
                year: 2026,
            }
        );
    }

    #[test]
    fn test_read_time_rejects_12_hour_mode() {
        let mut driver = new_driver();
        driver
            .i2c
            .set_read_data(&[0x00, 0x00, HOURS_12H | 0x11, 0x01, 0x01, 0x01, 0x00]);
        assert!(matches!(
            driver.read_time(),
            Err(DeviceError::BadFrame)
        ));
    }

    #[test]
    fn test_set_time_encodes_bcd() {
        let mut driver = new_driver();
        let time = DateTime {
            seconds: 45,
            minutes: 59,
            hours: 23,
            weekday: 7,
            day: 30,
            month: 8,
            year: 2026,
        };
        driver.set_time(&time).unwrap();
        assert_eq!(
            driver.i2c.transactions().last().unwrap(),
            &I2cTransaction::Write {
                addr: DEFAULT_ADDR,
                data: vec![REG_SECONDS, 0x45, 0x59, 0x23, 0x07, 0x30, 0x08, 0x26],
            }
        );
    }

    #[test]
    fn test_set_time_validates_fields() {
        let mut driver = new_driver();
        let bad = DateTime {
            seconds: 61,
            minutes: 0,
            hours: 0,
            weekday: 1,
            day: 1,
            month: 1,
            year: 2026,
        };
        assert!(matches!(
            driver.set_time(&bad),
            Err(DeviceError::InvalidArgument)
        ));
    }

    #[test]
    fn test_oscillator_flag() {
        let mut driver = new_driver();
        driver.i2c.set_read_data(&[STATUS_OSF]);
        assert!(driver.oscillator_stopped().unwrap());
        driver.i2c.set_read_data(&[STATUS_OSF]);
        driver.clear_oscillator_flag().unwrap();
        assert_eq!(
            driver.i2c.transactions().last().unwrap(),
            &I2cTransaction::Write {
                addr: DEFAULT_ADDR,
                data: vec![REG_STATUS, 0x00],
            }
        );
    }
}
