//! Expand 9 demo: walk a blink pattern across the low eight expander pins.
//!
//! Runs against the mock platform, so the I2C traffic lands in an in-memory
//! transaction log instead of hardware.

use click_drivers::devices::expand9::{Expand9, Expand9Config, PinDirection};
use click_drivers::platform::mock::MockPlatform;
use click_drivers::platform::traits::{Platform, TimerInterface};
use click_drivers::{log_error, log_info};

fn main() {
    let mut platform = match MockPlatform::init() {
        Ok(p) => p,
        Err(e) => {
            log_error!("platform init failed: {}", e);
            return;
        }
    };

    let i2c = platform
        .create_i2c(0, Default::default())
        .expect("i2c bus available");

    let mut expander = match Expand9::new(i2c, Expand9Config::default()) {
        Ok(d) => d,
        Err(e) => {
            log_error!("expander init failed: {}", e);
            return;
        }
    };

    for pin in 0..8 {
        expander
            .set_direction(pin, PinDirection::Output)
            .expect("pin direction");
    }

    log_info!("walking pins 0-7");
    for step in 0..24u32 {
        let pin = (step % 8) as u8;
        expander.toggle_pin(pin).expect("toggle");
        log_info!("step {}: toggled pin {}", step, pin);
        platform.timer_mut().delay_ms(100);
    }
    log_info!("done after {} ms", platform.timer().now_ms());
}
