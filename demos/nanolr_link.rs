//! Nano LR demo: query the module state, join the network and send a few
//! packets.
//!
//! The mock UART answers each command with a canned response frame, so the
//! full request/response framing path runs without a radio.

use click_drivers::devices::nanolr::{msg, Frame, NanoLr, NanoLrConfig};
use click_drivers::platform::mock::MockPlatform;
use click_drivers::platform::traits::Platform;
use click_drivers::{log_error, log_info};

fn main() {
    let mut platform = MockPlatform::init().expect("mock platform");
    let mut uart = platform
        .create_uart(0, Default::default())
        .expect("uart available");

    // Canned module responses in command order
    let responses = [
        Frame::new(msg::DEVICE_STATE, &[0x01]).expect("frame"),
        Frame::new(msg::NETWORK_START, &[0x00]).expect("frame"),
        Frame::new(msg::SEND_DATA, &[0x00]).expect("frame"),
        Frame::new(msg::SEND_DATA, &[0x00]).expect("frame"),
        Frame::new(msg::SEND_DATA, &[0x00]).expect("frame"),
    ];
    for response in &responses {
        uart.inject_rx_data(&response.encode());
    }

    let mut radio = NanoLr::new(uart, NanoLrConfig::default());
    let timer = platform.timer_mut();

    match radio.device_state(timer) {
        Ok(frame) => log_info!("device state: {:?}", &frame.payload[..]),
        Err(e) => {
            log_error!("module not answering: {}", e);
            return;
        }
    }

    let joined = radio.network_start(timer).expect("network start");
    log_info!("network start status: {:?}", &joined.payload[..]);

    for packet in 0..3u8 {
        let reply = radio
            .send_data(timer, &[0xC0, 0xFF, packet])
            .expect("send data");
        log_info!("packet {} ack status {:?}", packet, &reply.payload[..]);
    }
    log_info!("link demo done");
}
