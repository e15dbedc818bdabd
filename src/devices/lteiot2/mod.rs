//! LTE IoT 2 Click driver (u-blox SARA-R412M)
//!
//! AT-command control of an LTE Cat M1/NB1 modem over UART, including SMS
//! submission in both text and PDU mode. The GSM 03.40 PDU encoder lives in
//! the [`pdu`] submodule and is testable without hardware.

mod driver;
pub mod pdu;

pub use driver::{Lteiot2, Lteiot2Config};
