//! LIS2DW12 driver logic

use crate::devices::traits::{BusTransport, DeviceError, DeviceResult};
use crate::log_info;
use crate::platform::traits::{GpioInterface, I2cInterface, SpiInterface, TimerInterface};
use bitflags::bitflags;
use nalgebra::Vector3;

use super::registers as regs;

/// Standard gravity, for mg → m/s² conversion
const GRAVITY: f32 = 9.80665;

bitflags! {
    /// STATUS register flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Status: u8 {
        /// FIFO threshold reached
        const FIFO_THRESHOLD = 0x80;
        /// Wake-up event
        const WAKE_UP = 0x40;
        /// Sleep state active
        const SLEEP = 0x20;
        /// Double-tap event
        const DOUBLE_TAP = 0x10;
        /// Single-tap event
        const SINGLE_TAP = 0x08;
        /// 6D orientation change
        const ORIENTATION = 0x04;
        /// New XYZ sample available
        const DATA_READY = 0x01;
    }
}

/// Output data rate (CTRL1 ODR field)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputDataRate {
    PowerDown = 0x0,
    Hz1_6 = 0x1,
    Hz12_5 = 0x2,
    Hz25 = 0x3,
    Hz50 = 0x4,
    Hz100 = 0x5,
    Hz200 = 0x6,
    Hz400 = 0x7,
}

/// Full-scale range (CTRL6 FS field)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullScale {
    G2 = 0x0,
    G4 = 0x1,
    G8 = 0x2,
    G16 = 0x3,
}

impl FullScale {
    /// Sensitivity in mg per LSB of the 14-bit sample, high-performance mode
    fn sensitivity_mg(self) -> f32 {
        match self {
            FullScale::G2 => 0.244,
            FullScale::G4 => 0.488,
            FullScale::G8 => 0.976,
            FullScale::G16 => 1.952,
        }
    }
}

/// Driver configuration
#[derive(Debug, Clone, Copy)]
pub struct Accel10Config {
    pub odr: OutputDataRate,
    pub full_scale: FullScale,
}

impl Default for Accel10Config {
    fn default() -> Self {
        Self {
            odr: OutputDataRate::Hz100,
            full_scale: FullScale::G2,
        }
    }
}

/// Accel 10 Click driver
pub struct Accel10<I2C, SPI, CS> {
    bus: BusTransport<I2C, SPI, CS>,
    full_scale: FullScale,
}

impl<I2C, SPI, CS> Accel10<I2C, SPI, CS>
where
    I2C: I2cInterface,
    SPI: SpiInterface,
    CS: GpioInterface,
{
    /// Probe and configure the sensor
    ///
    /// Verifies WHO_AM_I, issues a software reset, then programs block data
    /// update, address auto-increment, high-performance mode and the
    /// requested rate and range.
    pub fn new<T: TimerInterface>(
        mut bus: BusTransport<I2C, SPI, CS>,
        config: Accel10Config,
        timer: &mut T,
    ) -> DeviceResult<Self> {
        let id = bus.read_reg(regs::REG_WHO_AM_I)?;
        if id != regs::DEVICE_ID {
            return Err(DeviceError::WrongDeviceId {
                expected: regs::DEVICE_ID.into(),
                found: id.into(),
            });
        }

        bus.write_reg(regs::REG_CTRL2, regs::CTRL2_SOFT_RESET)?;
        timer.delay_ms(5);

        bus.write_reg(regs::REG_CTRL2, regs::CTRL2_BDU | regs::CTRL2_IF_ADD_INC)?;
        bus.write_reg(
            regs::REG_CTRL1,
            ((config.odr as u8) << 4) | regs::CTRL1_MODE_HIGH_PERF,
        )?;
        bus.write_reg(
            regs::REG_CTRL6,
            (config.full_scale as u8) << regs::CTRL6_FS_SHIFT,
        )?;

        log_info!("LIS2DW12 configured");
        Ok(Self {
            bus,
            full_scale: config.full_scale,
        })
    }

    /// Whether a new sample is available
    pub fn data_ready(&mut self) -> DeviceResult<bool> {
        Ok(self.status()?.contains(Status::DATA_READY))
    }

    /// Read the STATUS register
    pub fn status(&mut self) -> DeviceResult<Status> {
        let raw = self.bus.read_reg(regs::REG_STATUS)?;
        Ok(Status::from_bits_truncate(raw))
    }

    /// Read one raw XYZ sample (left-justified 14-bit, as stored)
    pub fn read_raw(&mut self) -> DeviceResult<(i16, i16, i16)> {
        let mut buf = [0u8; 6];
        self.bus.read_regs(regs::REG_OUT_X_L, &mut buf)?;
        Ok((
            i16::from_le_bytes([buf[0], buf[1]]),
            i16::from_le_bytes([buf[2], buf[3]]),
            i16::from_le_bytes([buf[4], buf[5]]),
        ))
    }

    /// Read one acceleration sample in m/s²
    pub fn read_accel(&mut self) -> DeviceResult<Vector3<f32>> {
        let (x, y, z) = self.read_raw()?;
        let scale = self.full_scale.sensitivity_mg() * GRAVITY / 1000.0;
        // Samples are left-justified; shift down to the 14-bit value
        Ok(Vector3::new(
            f32::from(x >> 2) * scale,
            f32::from(y >> 2) * scale,
            f32::from(z >> 2) * scale,
        ))
    }

    /// Read the die temperature in °C (8-bit register, 25 °C offset)
    pub fn read_temperature(&mut self) -> DeviceResult<i16> {
        let raw = self.bus.read_reg(regs::REG_OUT_T)? as i8;
        Ok(i16::from(raw) + 25)
    }

    /// Release the underlying transport
    pub fn release(self) -> BusTransport<I2C, SPI, CS> {
        self.bus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::traits::bus;
    use crate::devices::traits::I2cTransport;
    use crate::platform::mock::{MockI2c, MockTimer};

    fn new_driver() -> Accel10<MockI2c, crate::devices::traits::NoBus, crate::devices::traits::NoPin>
    {
        let mut i2c = MockI2c::new(Default::default());
        i2c.set_read_data(&[regs::DEVICE_ID]);
        let transport: I2cTransport<MockI2c> = bus::i2c(i2c, regs::DEFAULT_ADDR);
        Accel10::new(transport, Accel10Config::default(), &mut MockTimer::new()).unwrap()
    }

    fn mock(driver: &mut Accel10<MockI2c, crate::devices::traits::NoBus, crate::devices::traits::NoPin>) -> &mut MockI2c {
        match &mut driver.bus {
            BusTransport::I2c { bus, .. } => bus,
            BusTransport::Spi { .. } => unreachable!(),
        }
    }

    #[test]
    fn test_new_rejects_wrong_id() {
        let mut i2c = MockI2c::new(Default::default());
        i2c.set_read_data(&[0x00]);
        let transport = bus::i2c(i2c, regs::DEFAULT_ADDR);
        assert!(matches!(
            Accel10::new(transport, Accel10Config::default(), &mut MockTimer::new()),
            Err(DeviceError::WrongDeviceId {
                expected: 0x44,
                found: 0x00,
            })
        ));
    }

    #[test]
    fn test_data_ready() {
        let mut driver = new_driver();
        mock(&mut driver).set_read_data(&[0x01]);
        assert!(driver.data_ready().unwrap());
        mock(&mut driver).set_read_data(&[0x00]);
        assert!(!driver.data_ready().unwrap());
    }

    #[test]
    fn test_read_raw_is_little_endian() {
        let mut driver = new_driver();
        mock(&mut driver).set_read_data(&[0x00, 0x40, 0x00, 0xC0, 0xFC, 0xFF]);
        let (x, y, z) = driver.read_raw().unwrap();
        assert_eq!(x, 0x4000);
        assert_eq!(y, -16384);
        assert_eq!(z, -4);
    }

    #[test]
    fn test_read_accel_scales_to_ms2() {
        let mut driver = new_driver();
        // +1 g on X: 0x4000 >> 2 = 4096 LSB at 0.244 mg/LSB
        mock(&mut driver).set_read_data(&[0x00, 0x40, 0x00, 0x00, 0x00, 0x00]);
        let accel = driver.read_accel().unwrap();
        assert!((accel.x - GRAVITY).abs() < 0.05);
        assert_eq!(accel.y, 0.0);
        assert_eq!(accel.z, 0.0);
    }

    #[test]
    fn test_read_temperature_offset() {
        let mut driver = new_driver();
        mock(&mut driver).set_read_data(&[0x00]);
        assert_eq!(driver.read_temperature().unwrap(), 25);
        mock(&mut driver).set_read_data(&[0xF6]);
        assert_eq!(driver.read_temperature().unwrap(), 15);
    }
}
