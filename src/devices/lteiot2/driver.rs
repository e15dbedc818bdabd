//! SARA-R412M AT-command driver

use crate::devices::traits::{DeviceError, DeviceResult};
use crate::log_info;
use crate::platform::traits::{GpioInterface, TimerInterface, UartInterface};
use core::fmt::Write as _;
use heapless::{String, Vec};

use super::pdu;

/// Response accumulation buffer size
pub const RSP_MAX: usize = 256;

/// End-of-message marker in SMS entry mode
const CTRL_Z: u8 = 0x1A;

/// Modem response outcomes recognised by [`Lteiot2::wait_response`]
const RSP_OK: &[u8] = b"OK\r\n";
const RSP_ERROR: &[u8] = b"ERROR";

/// Driver configuration
#[derive(Debug, Clone, Copy)]
pub struct Lteiot2Config {
    /// Read attempts before a command is declared unanswered
    pub cmd_retries: u32,
    /// Delay between read attempts in milliseconds
    pub retry_delay_ms: u32,
}

impl Default for Lteiot2Config {
    fn default() -> Self {
        Self {
            cmd_retries: 50,
            retry_delay_ms: 100,
        }
    }
}

/// LTE IoT 2 Click driver
///
/// Owns the modem UART and the PWR_ON control pin. All commands are
/// blocking; responses are polled with a bounded retry loop.
pub struct Lteiot2<U: UartInterface, G: GpioInterface> {
    uart: U,
    pwr: G,
    config: Lteiot2Config,
}

impl<U: UartInterface, G: GpioInterface> Lteiot2<U, G> {
    /// Create the driver
    ///
    /// The modem boots asynchronously; call [`power_on`](Self::power_on)
    /// and wait for `AT` to answer before real traffic.
    pub fn new(uart: U, pwr: G, config: Lteiot2Config) -> Self {
        Self { uart, pwr, config }
    }

    /// Pulse the PWR_ON pin and wait out the module boot time
    pub fn power_on<T: TimerInterface>(&mut self, timer: &mut T) -> DeviceResult<()> {
        self.pwr.set_high()?;
        timer.delay_ms(750);
        self.pwr.set_low()?;
        timer.delay_ms(2_500);
        log_info!("LTE IoT 2 power-on sequence complete");
        Ok(())
    }

    /// Send an AT command, appending CR-LF
    pub fn send_cmd(&mut self, cmd: &str) -> DeviceResult<()> {
        self.write_all(cmd.as_bytes())?;
        self.write_all(b"\r\n")
    }

    /// Send an AT command with a single unquoted parameter
    pub fn send_cmd_with_param(&mut self, cmd: &str, param: &str) -> DeviceResult<()> {
        let mut line: String<64> = String::new();
        write!(line, "{}={}", cmd, param).map_err(|_| DeviceError::InvalidArgument)?;
        self.send_cmd(&line)
    }

    /// Poll the UART until the modem answers `OK` or `ERROR`
    ///
    /// The raw response accumulates in `rsp` for the caller to inspect
    /// (URCs, query results). `ERROR` maps to [`DeviceError::NotReady`],
    /// retry exhaustion to [`DeviceError::Timeout`].
    pub fn wait_response<T: TimerInterface>(
        &mut self,
        timer: &mut T,
        rsp: &mut Vec<u8, RSP_MAX>,
    ) -> DeviceResult<()> {
        rsp.clear();
        for _ in 0..self.config.cmd_retries {
            let mut chunk = [0u8; 32];
            let n = self.uart.read(&mut chunk)?;
            for &b in &chunk[..n] {
                rsp.push(b).map_err(|_| DeviceError::BadFrame)?;
            }
            if contains(rsp, RSP_OK) {
                return Ok(());
            }
            if contains(rsp, RSP_ERROR) {
                return Err(DeviceError::NotReady);
            }
            timer.delay_ms(self.config.retry_delay_ms);
        }
        Err(DeviceError::Timeout)
    }

    /// Select SMS text mode (`AT+CMGF=1`)
    pub fn set_text_mode(&mut self) -> DeviceResult<()> {
        self.send_cmd("AT+CMGF=1")
    }

    /// Select SMS PDU mode (`AT+CMGF=0`)
    pub fn set_pdu_mode(&mut self) -> DeviceResult<()> {
        self.send_cmd("AT+CMGF=0")
    }

    /// Send an SMS in text mode
    ///
    /// Requires text mode to be selected and the prompt delay honoured by
    /// the modem; the message is terminated with Ctrl-Z.
    pub fn send_sms_text<T: TimerInterface>(
        &mut self,
        timer: &mut T,
        number: &str,
        text: &str,
    ) -> DeviceResult<()> {
        let mut line: String<64> = String::new();
        write!(line, "AT+CMGS=\"{}\"", number).map_err(|_| DeviceError::InvalidArgument)?;
        self.send_cmd(&line)?;
        timer.delay_ms(100);
        self.write_all(text.as_bytes())?;
        self.write_all(&[CTRL_Z])
    }

    /// Send an SMS in PDU mode
    ///
    /// Encodes the message per GSM 03.40, issues `AT+CMGS=<tpdu length>`,
    /// then streams the PDU as uppercase hex terminated with Ctrl-Z. PDU
    /// mode must already be selected.
    pub fn send_sms_pdu<T: TimerInterface>(
        &mut self,
        timer: &mut T,
        smsc: &str,
        number: &str,
        text: &str,
    ) -> DeviceResult<()> {
        let encoded = pdu::encode_submit(smsc, number, text)?;

        let mut line: String<24> = String::new();
        write!(line, "AT+CMGS={}", encoded.tpdu_len).map_err(|_| DeviceError::InvalidArgument)?;
        self.send_cmd(&line)?;
        timer.delay_ms(100);

        let mut hex: String<{ pdu::PDU_MAX * 2 }> = String::new();
        for byte in &encoded.bytes {
            write!(hex, "{:02X}", byte).map_err(|_| DeviceError::InvalidArgument)?;
        }
        self.write_all(hex.as_bytes())?;
        self.write_all(&[CTRL_Z])
    }

    /// Release the underlying UART and power pin
    pub fn release(self) -> (U, G) {
        (self.uart, self.pwr)
    }

    fn write_all(&mut self, mut data: &[u8]) -> DeviceResult<()> {
        while !data.is_empty() {
            let n = self.uart.write(data)?;
            if n == 0 {
                return Err(DeviceError::Timeout);
            }
            data = &data[n..];
        }
        Ok(())
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{MockGpio, MockTimer, MockUart};

    fn new_driver() -> Lteiot2<MockUart, MockGpio> {
        Lteiot2::new(
            MockUart::new(Default::default()),
            MockGpio::new_output(),
            Lteiot2Config::default(),
        )
    }

    #[test]
    fn test_send_cmd_appends_crlf() {
        let mut driver = new_driver();
        driver.send_cmd("AT").unwrap();
        assert_eq!(driver.uart.tx_buffer(), b"AT\r\n");
    }

    #[test]
    fn test_send_cmd_with_param() {
        let mut driver = new_driver();
        driver.send_cmd_with_param("AT+CFUN", "1").unwrap();
        assert_eq!(driver.uart.tx_buffer(), b"AT+CFUN=1\r\n");
    }

    #[test]
    fn test_wait_response_ok() {
        let mut driver = new_driver();
        let mut timer = MockTimer::new();
        driver.uart.inject_rx_data(b"\r\nOK\r\n");

        let mut rsp: Vec<u8, RSP_MAX> = Vec::new();
        driver.wait_response(&mut timer, &mut rsp).unwrap();
        assert_eq!(&rsp[..], b"\r\nOK\r\n");
    }

    #[test]
    fn test_wait_response_error() {
        let mut driver = new_driver();
        let mut timer = MockTimer::new();
        driver.uart.inject_rx_data(b"\r\nERROR\r\n");

        let mut rsp: Vec<u8, RSP_MAX> = Vec::new();
        assert!(matches!(
            driver.wait_response(&mut timer, &mut rsp),
            Err(DeviceError::NotReady)
        ));
    }

    #[test]
    fn test_wait_response_times_out() {
        let mut driver = new_driver();
        driver.config.cmd_retries = 3;
        let mut timer = MockTimer::new();

        let mut rsp: Vec<u8, RSP_MAX> = Vec::new();
        assert!(matches!(
            driver.wait_response(&mut timer, &mut rsp),
            Err(DeviceError::Timeout)
        ));
        assert_eq!(timer.elapsed_us(), 3 * 100_000);
    }

    #[test]
    fn test_send_sms_pdu_traffic() {
        let mut driver = new_driver();
        let mut timer = MockTimer::new();
        driver
            .send_sms_pdu(&mut timer, "", "+46708251358", "hellohello")
            .unwrap();

        let tx = driver.uart.tx_buffer();
        let tx_str = core::str::from_utf8(&tx[..tx.len() - 1]).unwrap();
        assert!(tx_str.starts_with("AT+CMGS=23\r\n"));
        assert!(tx_str.ends_with("0011000B916407281553F80000AA0AE8329BFD4697D9EC37"));
        assert_eq!(*tx.last().unwrap(), CTRL_Z);
    }

    #[test]
    fn test_power_on_pulses_pin() {
        let mut driver = new_driver();
        let mut timer = MockTimer::new();
        driver.power_on(&mut timer).unwrap();
        assert!(!driver.pwr.read());
        assert_eq!(timer.elapsed_us(), (750 + 2_500) * 1_000);
    }
}
