//! Nano LR Click driver (Embit EMB-LR1276S)
//!
//! LoRa module speaking a binary command protocol over UART. Every frame is
//! a 2-byte big-endian length, a message-ID byte, the payload, and a 1-byte
//! additive checksum. The length counts the message ID plus payload; the
//! checksum is the sum of all preceding frame bytes mod 256.

use crate::devices::traits::{DeviceError, DeviceResult};
use crate::platform::traits::{TimerInterface, UartInterface};
use heapless::Vec;

/// Maximum payload bytes per frame
pub const PAYLOAD_MAX: usize = 256;

/// Maximum on-wire frame size: length prefix + ID + payload + checksum
pub const FRAME_MAX: usize = PAYLOAD_MAX + 4;

/// Length prefix + message ID
const HEADER_LEN: usize = 3;

/// Message IDs from the EMB-LR1276S command set
pub mod msg {
    /// Device information request/response
    pub const DEVICE_INFO: u8 = 0x01;
    /// Device state request/response
    pub const DEVICE_STATE: u8 = 0x04;
    /// Firmware version request/response
    pub const FW_VERSION: u8 = 0x05;
    /// Network stop
    pub const NETWORK_STOP: u8 = 0x30;
    /// Network start
    pub const NETWORK_START: u8 = 0x31;
    /// Transmit data
    pub const SEND_DATA: u8 = 0x50;
    /// Received data indication
    pub const RECEIVED_DATA: u8 = 0x60;
}

/// A decoded protocol frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message ID byte
    pub id: u8,
    /// Payload bytes, checksum stripped
    pub payload: Vec<u8, PAYLOAD_MAX>,
}

impl Frame {
    /// Build a frame from ID and payload
    pub fn new(id: u8, payload: &[u8]) -> DeviceResult<Self> {
        let payload = Vec::from_slice(payload).map_err(|_| DeviceError::InvalidArgument)?;
        Ok(Self { id, payload })
    }

    /// Serialize to the on-wire format
    pub fn encode(&self) -> Vec<u8, FRAME_MAX> {
        let mut out: Vec<u8, FRAME_MAX> = Vec::new();
        // Length counts ID and payload, not the checksum
        let length = (self.payload.len() + 1) as u16;
        let _ = out.extend_from_slice(&length.to_be_bytes());
        let _ = out.push(self.id);
        let _ = out.extend_from_slice(&self.payload);
        let _ = out.push(checksum(&out));
        out
    }

    /// Parse one complete frame from `bytes`
    ///
    /// Returns [`DeviceError::BadFrame`] on truncation, length mismatch or
    /// checksum failure.
    pub fn decode(bytes: &[u8]) -> DeviceResult<Self> {
        if bytes.len() < HEADER_LEN + 1 {
            return Err(DeviceError::BadFrame);
        }
        let length = u16::from_be_bytes([bytes[0], bytes[1]]) as usize;
        if length < 1 || bytes.len() != length + 3 {
            return Err(DeviceError::BadFrame);
        }

        let body = &bytes[..bytes.len() - 1];
        let expected = checksum(body);
        let found = bytes[bytes.len() - 1];
        if expected != found {
            return Err(DeviceError::BadFrame);
        }

        Frame::new(bytes[2], &bytes[HEADER_LEN..bytes.len() - 1])
    }
}

/// Additive checksum: sum of bytes modulo 256
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Driver configuration
#[derive(Debug, Clone, Copy)]
pub struct NanoLrConfig {
    /// Read attempts while waiting for a response frame
    pub read_retries: u32,
    /// Delay between read attempts in milliseconds
    pub retry_delay_ms: u32,
}

impl Default for NanoLrConfig {
    fn default() -> Self {
        Self {
            read_retries: 50,
            retry_delay_ms: 10,
        }
    }
}

/// Nano LR Click driver
pub struct NanoLr<U: UartInterface> {
    uart: U,
    config: NanoLrConfig,
    rx: Vec<u8, FRAME_MAX>,
}

impl<U: UartInterface> NanoLr<U> {
    /// Create the driver
    pub fn new(uart: U, config: NanoLrConfig) -> Self {
        Self {
            uart,
            config,
            rx: Vec::new(),
        }
    }

    /// Send one frame
    pub fn send_frame(&mut self, frame: &Frame) -> DeviceResult<()> {
        let mut data = &frame.encode()[..];
        while !data.is_empty() {
            let n = self.uart.write(data)?;
            if n == 0 {
                return Err(DeviceError::Timeout);
            }
            data = &data[n..];
        }
        Ok(())
    }

    /// Send a command and wait for the module's response frame
    pub fn command<T: TimerInterface>(
        &mut self,
        timer: &mut T,
        id: u8,
        payload: &[u8],
    ) -> DeviceResult<Frame> {
        self.send_frame(&Frame::new(id, payload)?)?;
        self.read_frame(timer)
    }

    /// Poll the UART until one complete, checksummed frame arrives
    ///
    /// Partial input is buffered across calls; retry exhaustion maps to
    /// [`DeviceError::Timeout`].
    pub fn read_frame<T: TimerInterface>(&mut self, timer: &mut T) -> DeviceResult<Frame> {
        for _ in 0..self.config.read_retries {
            let mut chunk = [0u8; 32];
            let n = self.uart.read(&mut chunk)?;
            for &b in &chunk[..n] {
                if self.rx.push(b).is_err() {
                    // A corrupt header can declare a length no frame reaches;
                    // drop the garbage so the next call starts in sync
                    self.rx.clear();
                    return Err(DeviceError::BadFrame);
                }
            }

            if let Some(frame_len) = self.pending_frame_len() {
                let frame = Frame::decode(&self.rx[..frame_len]);
                self.consume(frame_len);
                return frame;
            }
            timer.delay_ms(self.config.retry_delay_ms);
        }
        Err(DeviceError::Timeout)
    }

    /// Request the device state (`msg::DEVICE_STATE`)
    pub fn device_state<T: TimerInterface>(&mut self, timer: &mut T) -> DeviceResult<Frame> {
        self.command(timer, msg::DEVICE_STATE, &[])
    }

    /// Request firmware version (`msg::FW_VERSION`)
    pub fn firmware_version<T: TimerInterface>(&mut self, timer: &mut T) -> DeviceResult<Frame> {
        self.command(timer, msg::FW_VERSION, &[])
    }

    /// Join the network (`msg::NETWORK_START`) and return the response
    pub fn network_start<T: TimerInterface>(&mut self, timer: &mut T) -> DeviceResult<Frame> {
        self.command(timer, msg::NETWORK_START, &[])
    }

    /// Transmit application data (`msg::SEND_DATA`)
    pub fn send_data<T: TimerInterface>(
        &mut self,
        timer: &mut T,
        data: &[u8],
    ) -> DeviceResult<Frame> {
        self.command(timer, msg::SEND_DATA, data)
    }

    /// Release the underlying UART
    pub fn release(self) -> U {
        self.uart
    }

    /// Length of the complete frame at the head of the buffer, if any
    fn pending_frame_len(&self) -> Option<usize> {
        if self.rx.len() < 2 {
            return None;
        }
        let length = u16::from_be_bytes([self.rx[0], self.rx[1]]) as usize;
        let total = length + 3;
        (self.rx.len() >= total).then_some(total)
    }

    fn consume(&mut self, n: usize) {
        let remaining = self.rx.len() - n;
        for i in 0..remaining {
            self.rx[i] = self.rx[i + n];
        }
        self.rx.truncate(remaining);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{MockTimer, MockUart};

    fn new_driver() -> NanoLr<MockUart> {
        NanoLr::new(MockUart::new(Default::default()), NanoLrConfig::default())
    }

    #[test]
    fn test_checksum_is_sum_mod_256() {
        assert_eq!(checksum(&[]), 0);
        assert_eq!(checksum(&[1, 2, 3]), 6);
        assert_eq!(checksum(&[0xFF, 0x01]), 0);
        assert_eq!(checksum(&[0x80, 0x80, 0x80]), 0x80);
    }

    #[test]
    fn test_encode_frame() {
        let frame = Frame::new(msg::SEND_DATA, &[0xDE, 0xAD]).unwrap();
        let wire = frame.encode();
        // length = id + payload = 3; checksum = (0x03 + 0x50 + 0xDE + 0xAD) mod 256
        assert_eq!(&wire[..], &[0x00, 0x03, 0x50, 0xDE, 0xAD, 0xDE]);
    }

    #[test]
    fn test_decode_round_trip() {
        let frame = Frame::new(msg::RECEIVED_DATA, b"ping").unwrap();
        let decoded = Frame::decode(&frame.encode()).unwrap();
        assert_eq!(decoded, frame);
    }

    #[test]
    fn test_decode_rejects_bad_checksum() {
        let mut wire = Frame::new(msg::DEVICE_STATE, &[]).unwrap().encode();
        let last = wire.len() - 1;
        wire[last] = wire[last].wrapping_add(1);
        assert!(matches!(Frame::decode(&wire), Err(DeviceError::BadFrame)));
    }

    #[test]
    fn test_decode_rejects_truncation() {
        let wire = Frame::new(msg::DEVICE_STATE, &[1, 2, 3]).unwrap().encode();
        assert!(matches!(
            Frame::decode(&wire[..wire.len() - 1]),
            Err(DeviceError::BadFrame)
        ));
        assert!(matches!(Frame::decode(&[0x00]), Err(DeviceError::BadFrame)));
    }

    #[test]
    fn test_command_round_trip() {
        let mut driver = new_driver();
        let mut timer = MockTimer::new();

        // Response arrives split across two polls
        let response = Frame::new(msg::DEVICE_STATE, &[0x01]).unwrap().encode();
        driver.uart.inject_rx_data(&response);

        let reply = driver.device_state(&mut timer).unwrap();
        assert_eq!(reply.id, msg::DEVICE_STATE);
        assert_eq!(&reply.payload[..], &[0x01]);

        // Request went out as a well-formed frame
        let tx = driver.uart.tx_buffer();
        assert_eq!(Frame::decode(&tx).unwrap().id, msg::DEVICE_STATE);
    }

    #[test]
    fn test_read_frame_times_out_without_data() {
        let mut driver = new_driver();
        driver.config.read_retries = 5;
        let mut timer = MockTimer::new();
        assert!(matches!(
            driver.read_frame(&mut timer),
            Err(DeviceError::Timeout)
        ));
    }

    #[test]
    fn test_back_to_back_frames_are_buffered() {
        let mut driver = new_driver();
        let mut timer = MockTimer::new();

        let first = Frame::new(msg::FW_VERSION, &[1, 0]).unwrap();
        let second = Frame::new(msg::RECEIVED_DATA, b"hi").unwrap();
        driver.uart.inject_rx_data(&first.encode());
        driver.uart.inject_rx_data(&second.encode());

        assert_eq!(driver.read_frame(&mut timer).unwrap(), first);
        assert_eq!(driver.read_frame(&mut timer).unwrap(), second);
    }

    #[test]
    fn test_recovers_after_oversized_length_header() {
        let mut driver = new_driver();
        let mut timer = MockTimer::new();

        // Header claiming 1000 bytes, then filler until the buffer overflows
        let mut garbage = [0u8; 288];
        garbage[0] = 0x03;
        garbage[1] = 0xE8;
        driver.uart.inject_rx_data(&garbage);
        assert_eq!(driver.read_frame(&mut timer), Err(DeviceError::BadFrame));

        let frame = Frame::new(msg::DEVICE_STATE, &[0x01]).unwrap();
        driver.uart.inject_rx_data(&frame.encode());
        assert_eq!(driver.read_frame(&mut timer).unwrap(), frame);
    }
}
