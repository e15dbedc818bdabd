//! GSM 03.40 SMS-SUBMIT PDU encoder
//!
//! Builds the binary PDU a modem expects in `AT+CMGS` PDU mode: optional
//! SMSC address, first octet, semi-octet (nibble-swapped BCD) destination
//! address, protocol/coding/validity octets, and the user data packed as
//! 7-bit septets.

use crate::devices::traits::{DeviceError, DeviceResult};
use heapless::Vec;

/// Maximum message length in GSM 7-bit characters
pub const TEXT_MAX: usize = 160;

/// Maximum encoded PDU size: SMSC field plus a full-length TPDU
pub const PDU_MAX: usize = 184;

/// SMS-SUBMIT with a relative validity period present
const FIRST_OCTET_SUBMIT: u8 = 0x11;

/// Relative validity period: 4 days
const VALIDITY_PERIOD: u8 = 0xAA;

/// Type-of-address: international number, ISDN numbering plan
const TOA_INTERNATIONAL: u8 = 0x91;

/// Type-of-address: unknown number type, ISDN numbering plan
const TOA_UNKNOWN: u8 = 0x81;

/// An encoded SMS-SUBMIT PDU
#[derive(Debug)]
pub struct EncodedPdu {
    /// The complete PDU, SMSC field first
    pub bytes: Vec<u8, PDU_MAX>,
    /// TPDU length in octets, excluding the SMSC field (the `AT+CMGS`
    /// length parameter)
    pub tpdu_len: usize,
}

/// Encode an SMS-SUBMIT PDU
///
/// `smsc` may be empty to use the network default service centre. Numbers
/// may carry a leading `+` for international format. `text` is limited to
/// [`TEXT_MAX`] characters; characters outside the GSM default alphabet
/// subset handled here are replaced with `?`.
pub fn encode_submit(smsc: &str, destination: &str, text: &str) -> DeviceResult<EncodedPdu> {
    // Septet count follows characters, not UTF-8 bytes
    let septets = text.chars().count();
    if septets > TEXT_MAX {
        return Err(DeviceError::InvalidArgument);
    }

    let mut bytes: Vec<u8, PDU_MAX> = Vec::new();

    // SMSC field: length octet counts the type-of-address byte too
    let (smsc_digits, smsc_intl) = split_number(smsc);
    if smsc_digits.is_empty() {
        push(&mut bytes, 0x00)?;
    } else {
        check_digits(smsc_digits)?;
        let field_len = 1 + (smsc_digits.len() + 1) / 2;
        push(&mut bytes, field_len as u8)?;
        push(&mut bytes, type_of_address(smsc_intl))?;
        push_semi_octets(&mut bytes, smsc_digits)?;
    }
    let smsc_field_len = bytes.len();

    push(&mut bytes, FIRST_OCTET_SUBMIT)?;
    push(&mut bytes, 0x00)?; // message reference: modem assigns

    // Destination address: length octet counts digits, not octets
    let (da_digits, da_intl) = split_number(destination);
    if da_digits.is_empty() {
        return Err(DeviceError::InvalidArgument);
    }
    check_digits(da_digits)?;
    push(&mut bytes, da_digits.len() as u8)?;
    push(&mut bytes, type_of_address(da_intl))?;
    push_semi_octets(&mut bytes, da_digits)?;

    push(&mut bytes, 0x00)?; // protocol identifier: standard SMS
    push(&mut bytes, 0x00)?; // data coding scheme: GSM 7-bit default
    push(&mut bytes, VALIDITY_PERIOD)?;

    push(&mut bytes, septets as u8)?; // user data length in septets
    pack_7bit(text, &mut bytes)?;

    Ok(EncodedPdu {
        tpdu_len: bytes.len() - smsc_field_len,
        bytes,
    })
}

/// Strip a leading `+`, reporting whether the number was international
fn split_number(number: &str) -> (&[u8], bool) {
    match number.as_bytes() {
        [b'+', rest @ ..] => (rest, true),
        digits => (digits, false),
    }
}

fn type_of_address(international: bool) -> u8 {
    if international {
        TOA_INTERNATIONAL
    } else {
        TOA_UNKNOWN
    }
}

fn check_digits(digits: &[u8]) -> DeviceResult<()> {
    if digits.iter().all(|d| d.is_ascii_digit()) {
        Ok(())
    } else {
        Err(DeviceError::InvalidArgument)
    }
}

fn push(out: &mut Vec<u8, PDU_MAX>, byte: u8) -> DeviceResult<()> {
    out.push(byte).map_err(|_| DeviceError::InvalidArgument)
}

/// Nibble-swapped BCD: digit pairs are stored low-digit-first, with an odd
/// trailing digit padded by 0xF in the high nibble
fn push_semi_octets(out: &mut Vec<u8, PDU_MAX>, digits: &[u8]) -> DeviceResult<()> {
    for pair in digits.chunks(2) {
        let lo = pair[0] - b'0';
        let hi = if pair.len() == 2 { pair[1] - b'0' } else { 0x0F };
        push(out, (hi << 4) | lo)?;
    }
    Ok(())
}

/// Pack GSM septets LSB-first into octets
fn pack_7bit(text: &str, out: &mut Vec<u8, PDU_MAX>) -> DeviceResult<()> {
    let mut acc: u16 = 0;
    let mut bits = 0u8;
    for c in text.chars() {
        acc |= u16::from(gsm_septet(c)) << bits;
        bits += 7;
        while bits >= 8 {
            push(out, (acc & 0xFF) as u8)?;
            acc >>= 8;
            bits -= 8;
        }
    }
    if bits > 0 {
        push(out, acc as u8)?;
    }
    Ok(())
}

/// Map a character to the GSM 03.38 default alphabet
///
/// Letters, digits and common punctuation share their ASCII codes; the few
/// divergent positions needed for SMS text are remapped and everything else
/// becomes `?`.
fn gsm_septet(c: char) -> u8 {
    match c {
        '@' => 0x00,
        '$' => 0x02,
        '\n' => 0x0A,
        '\r' => 0x0D,
        '_' => 0x11,
        'a'..='z' | 'A'..='Z' | '0'..='9' => c as u8,
        ' ' | '!' | '"' | '#' | '%' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | '-' | '.'
        | '/' | ':' | ';' | '<' | '=' | '>' | '?' => c as u8,
        _ => b'?',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(bytes: &[u8]) -> std::string::String {
        bytes.iter().map(|b| std::format!("{:02X}", b)).collect()
    }

    #[test]
    fn test_known_submit_vector() {
        let pdu = encode_submit("", "+46708251358", "hellohello").unwrap();
        assert_eq!(
            hex(&pdu.bytes),
            "0011000B916407281553F80000AA0AE8329BFD4697D9EC37"
        );
        // AT+CMGS length excludes the one-byte empty SMSC field
        assert_eq!(pdu.tpdu_len, 23);
    }

    #[test]
    fn test_pack_7bit_hellohello() {
        let mut out: Vec<u8, PDU_MAX> = Vec::new();
        pack_7bit("hellohello", &mut out).unwrap();
        assert_eq!(&out[..], &[0xE8, 0x32, 0x9B, 0xFD, 0x46, 0x97, 0xD9, 0xEC, 0x37]);
    }

    #[test]
    fn test_odd_digit_count_is_f_padded() {
        let mut out: Vec<u8, PDU_MAX> = Vec::new();
        push_semi_octets(&mut out, b"46708251358").unwrap();
        assert_eq!(&out[..], &[0x64, 0x07, 0x28, 0x15, 0x53, 0xF8]);
    }

    #[test]
    fn test_explicit_smsc_field() {
        let pdu = encode_submit("+46707990001", "+46708251358", "hi").unwrap();
        // 12 digits -> 6 octets plus type byte
        assert_eq!(pdu.bytes[0], 0x07);
        assert_eq!(pdu.bytes[1], 0x91);
        assert_eq!(pdu.tpdu_len, pdu.bytes.len() - 8);
    }

    #[test]
    fn test_national_number_type() {
        let pdu = encode_submit("", "0708251358", "x").unwrap();
        // [len][first][mr][da len][toa]
        assert_eq!(pdu.bytes[4], 0x81);
    }

    #[test]
    fn test_rejects_non_digit_number() {
        assert!(matches!(
            encode_submit("", "+4670hello", "x"),
            Err(DeviceError::InvalidArgument)
        ));
        assert!(matches!(
            encode_submit("", "", "x"),
            Err(DeviceError::InvalidArgument)
        ));
    }

    #[test]
    fn test_udl_counts_characters_not_bytes() {
        // Three-byte UTF-8 character packs as a single '?' septet
        let pdu = encode_submit("", "123", "\u{20AC}").unwrap();
        let udl = pdu.bytes[pdu.bytes.len() - 2];
        assert_eq!(udl, 1);
        assert_eq!(*pdu.bytes.last().unwrap(), b'?');

        let pdu = encode_submit("", "123", "a\u{20AC}b").unwrap();
        let udl = pdu.bytes[pdu.bytes.len() - 4];
        assert_eq!(udl, 3);
    }

    #[test]
    fn test_unmapped_characters_become_question_marks() {
        let mut plain: Vec<u8, PDU_MAX> = Vec::new();
        let mut mapped: Vec<u8, PDU_MAX> = Vec::new();
        pack_7bit("?", &mut plain).unwrap();
        pack_7bit("\u{20AC}", &mut mapped).unwrap();
        assert_eq!(&plain[..], &mapped[..]);
    }
}
