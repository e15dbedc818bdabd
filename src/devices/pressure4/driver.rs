//! BMP280 driver logic and compensation math

use crate::devices::traits::{BusTransport, DeviceError, DeviceResult};
use crate::log_info;
use crate::platform::traits::{GpioInterface, I2cInterface, SpiInterface, TimerInterface};

use super::registers as regs;

/// Per-part calibration coefficients, read once at init
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Calibration {
    pub dig_t1: u16,
    pub dig_t2: i16,
    pub dig_t3: i16,
    pub dig_p1: u16,
    pub dig_p2: i16,
    pub dig_p3: i16,
    pub dig_p4: i16,
    pub dig_p5: i16,
    pub dig_p6: i16,
    pub dig_p7: i16,
    pub dig_p8: i16,
    pub dig_p9: i16,
}

impl Calibration {
    /// Unpack the 24-byte little-endian coefficient block at 0x88
    pub fn from_bytes(raw: &[u8; 24]) -> Self {
        let u = |i: usize| u16::from_le_bytes([raw[i], raw[i + 1]]);
        let s = |i: usize| i16::from_le_bytes([raw[i], raw[i + 1]]);
        Self {
            dig_t1: u(0),
            dig_t2: s(2),
            dig_t3: s(4),
            dig_p1: u(6),
            dig_p2: s(8),
            dig_p3: s(10),
            dig_p4: s(12),
            dig_p5: s(14),
            dig_p6: s(16),
            dig_p7: s(18),
            dig_p8: s(20),
            dig_p9: s(22),
        }
    }

    /// Datasheet 32-bit temperature compensation
    ///
    /// Returns the temperature in 0.01 °C and the `t_fine` carrier the
    /// pressure compensation needs.
    pub fn compensate_temperature(&self, adc_t: i32) -> (i32, i32) {
        let t1 = i32::from(self.dig_t1);
        let var1 = (((adc_t >> 3) - (t1 << 1)) * i32::from(self.dig_t2)) >> 11;
        let d = (adc_t >> 4) - t1;
        let var2 = (((d * d) >> 12) * i32::from(self.dig_t3)) >> 14;
        let t_fine = var1 + var2;
        ((t_fine * 5 + 128) >> 8, t_fine)
    }

    /// Datasheet 64-bit pressure compensation
    ///
    /// Returns the pressure in Q24.8 Pa (divide by 256), or 0 when the
    /// calibration would divide by zero.
    pub fn compensate_pressure(&self, adc_p: i32, t_fine: i32) -> u32 {
        let mut var1 = i64::from(t_fine) - 128_000;
        let mut var2 = var1 * var1 * i64::from(self.dig_p6);
        var2 += (var1 * i64::from(self.dig_p5)) << 17;
        var2 += i64::from(self.dig_p4) << 35;
        var1 = ((var1 * var1 * i64::from(self.dig_p3)) >> 8)
            + ((var1 * i64::from(self.dig_p2)) << 12);
        var1 = (((1i64 << 47) + var1) * i64::from(self.dig_p1)) >> 33;
        if var1 == 0 {
            return 0;
        }

        let mut p = 1_048_576 - i64::from(adc_p);
        p = (((p << 31) - var2) * 3125) / var1;
        var1 = (i64::from(self.dig_p9) * (p >> 13) * (p >> 13)) >> 25;
        var2 = (i64::from(self.dig_p8) * p) >> 19;
        p = ((p + var1 + var2) >> 8) + (i64::from(self.dig_p7) << 4);
        p as u32
    }
}

/// One compensated reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Temperature in °C
    pub temperature: f32,
    /// Pressure in Pa
    pub pressure: f32,
}

/// Driver configuration
#[derive(Debug, Clone, Copy)]
pub struct Pressure4Config {
    /// CTRL_MEAS register value (mode and oversampling)
    pub ctrl_meas: u8,
    /// CONFIG register value (standby and filter)
    pub config: u8,
}

impl Default for Pressure4Config {
    fn default() -> Self {
        Self {
            ctrl_meas: regs::CTRL_MEAS_DEFAULT,
            config: regs::CONFIG_DEFAULT,
        }
    }
}

/// Pressure 4 Click driver
pub struct Pressure4<I2C, SPI, CS> {
    bus: BusTransport<I2C, SPI, CS>,
    calibration: Calibration,
}

impl<I2C, SPI, CS> Pressure4<I2C, SPI, CS>
where
    I2C: I2cInterface,
    SPI: SpiInterface,
    CS: GpioInterface,
{
    /// Probe the chip, reset it, read calibration and start sampling
    pub fn new<T: TimerInterface>(
        mut bus: BusTransport<I2C, SPI, CS>,
        config: Pressure4Config,
        timer: &mut T,
    ) -> DeviceResult<Self> {
        let id = bus.read_reg(regs::REG_ID)?;
        if id != regs::CHIP_ID {
            return Err(DeviceError::WrongDeviceId {
                expected: regs::CHIP_ID.into(),
                found: id.into(),
            });
        }

        bus.write_reg(regs::REG_RESET, regs::RESET_VALUE)?;
        timer.delay_ms(3);

        let mut raw = [0u8; 24];
        bus.read_regs(regs::REG_CALIB, &mut raw)?;
        let calibration = Calibration::from_bytes(&raw);

        bus.write_reg(regs::REG_CONFIG, config.config)?;
        bus.write_reg(regs::REG_CTRL_MEAS, config.ctrl_meas)?;

        log_info!("BMP280 configured");
        Ok(Self { bus, calibration })
    }

    /// Whether a conversion is currently running
    pub fn measuring(&mut self) -> DeviceResult<bool> {
        Ok(self.bus.read_reg(regs::REG_STATUS)? & regs::STATUS_MEASURING != 0)
    }

    /// Burst-read the raw 20-bit pressure and temperature ADC values
    pub fn read_raw(&mut self) -> DeviceResult<(i32, i32)> {
        let mut buf = [0u8; 6];
        self.bus.read_regs(regs::REG_PRESS_MSB, &mut buf)?;
        let adc_p =
            (i32::from(buf[0]) << 12) | (i32::from(buf[1]) << 4) | (i32::from(buf[2]) >> 4);
        let adc_t =
            (i32::from(buf[3]) << 12) | (i32::from(buf[4]) << 4) | (i32::from(buf[5]) >> 4);
        Ok((adc_p, adc_t))
    }

    /// Read one compensated measurement
    pub fn read_measurement(&mut self) -> DeviceResult<Measurement> {
        let (adc_p, adc_t) = self.read_raw()?;
        let (centi_celsius, t_fine) = self.calibration.compensate_temperature(adc_t);
        let pressure_q24_8 = self.calibration.compensate_pressure(adc_p, t_fine);
        Ok(Measurement {
            temperature: centi_celsius as f32 / 100.0,
            pressure: pressure_q24_8 as f32 / 256.0,
        })
    }

    /// The calibration block read at init
    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Release the underlying transport
    pub fn release(self) -> BusTransport<I2C, SPI, CS> {
        self.bus
    }
}
