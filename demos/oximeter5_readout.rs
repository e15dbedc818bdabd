//! Oximeter 5 demo: read a window of FIFO samples and estimate SpO2 and
//! heart rate.
//!
//! The mock I2C bus is preloaded with a synthetic 75 bpm pulse waveform,
//! so the estimator output is deterministic.

use click_drivers::devices::oximeter5::spo2;
use click_drivers::devices::oximeter5::{Oximeter5, Oximeter5Config};
use click_drivers::platform::mock::MockPlatform;
use click_drivers::platform::traits::Platform;
use click_drivers::{log_error, log_info};

/// One FIFO entry: 18-bit red then IR, big-endian, left-padded to 3 bytes
fn fifo_entry(red: u32, ir: u32) -> [u8; 6] {
    [
        (red >> 16) as u8,
        (red >> 8) as u8,
        red as u8,
        (ir >> 16) as u8,
        (ir >> 8) as u8,
        ir as u8,
    ]
}

fn main() {
    let mut platform = MockPlatform::init().expect("mock platform");
    let mut i2c = platform
        .create_i2c(0, Default::default())
        .expect("i2c bus available");

    // Probe and revision responses, then one 4-second sample window with a
    // pulse dip every 20 samples
    i2c.set_read_data(&[0x15]);
    i2c.set_read_data(&[0x03]);
    for i in 0..spo2::BUFFER_LEN {
        let (ir_dip, red_dip) = match i % 20 {
            5 => (200, 100),
            6 => (400, 200),
            7 => (600, 300),
            8 => (400, 200),
            9 => (200, 100),
            _ => (0, 0),
        };
        i2c.set_read_data(&fifo_entry(90_000 - red_dip, 100_000 - ir_dip));
    }

    let mut sensor = match Oximeter5::new(i2c, Oximeter5Config::default(), platform.timer_mut()) {
        Ok(d) => d,
        Err(e) => {
            log_error!("oximeter init failed: {}", e);
            return;
        }
    };

    let mut ir = [0u32; spo2::BUFFER_LEN];
    let mut red = [0u32; spo2::BUFFER_LEN];
    for i in 0..spo2::BUFFER_LEN {
        let sample = sensor.read_sample().expect("fifo sample");
        red[i] = sample.red;
        ir[i] = sample.ir;
    }

    let estimate = spo2::estimate(&ir, &red);
    if estimate.heart_rate_valid {
        log_info!("heart rate: {} bpm", estimate.heart_rate);
    } else {
        log_info!("heart rate: no pulse found");
    }
    if estimate.spo2_valid {
        log_info!("SpO2: {}%", estimate.spo2);
    } else {
        log_info!("SpO2: reading invalid");
    }
}
