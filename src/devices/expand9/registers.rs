//! SX1509B register definitions
//!
//! Based on the Semtech SX1509B datasheet. Register pairs come in two banks:
//! bank B covers pins 8-15, bank A covers pins 0-7, with B at the lower
//! address so a two-byte auto-increment write covers all 16 pins.

#![allow(dead_code)]

/// Default 7-bit I2C address (ADDR0/ADDR1 low)
pub const DEFAULT_ADDR: u8 = 0x3E;

/// Input buffer disable
pub const REG_INPUT_DISABLE_B: u8 = 0x00;
pub const REG_INPUT_DISABLE_A: u8 = 0x01;

/// Pull-up enable
pub const REG_PULL_UP_B: u8 = 0x06;
pub const REG_PULL_UP_A: u8 = 0x07;

/// Pull-down enable
pub const REG_PULL_DOWN_B: u8 = 0x08;
pub const REG_PULL_DOWN_A: u8 = 0x09;

/// Open-drain output enable
pub const REG_OPEN_DRAIN_B: u8 = 0x0A;
pub const REG_OPEN_DRAIN_A: u8 = 0x0B;

/// Pin direction (1 = input, power-on default)
pub const REG_DIR_B: u8 = 0x0E;
pub const REG_DIR_A: u8 = 0x0F;

/// Pin data
pub const REG_DATA_B: u8 = 0x10;
pub const REG_DATA_A: u8 = 0x11;

/// Oscillator configuration
pub const REG_CLOCK: u8 = 0x1E;

/// Miscellaneous configuration (LED driver clock divider)
pub const REG_MISC: u8 = 0x1F;

/// LED driver enable
pub const REG_LED_DRIVER_ENABLE_B: u8 = 0x20;
pub const REG_LED_DRIVER_ENABLE_A: u8 = 0x21;

/// Software reset register and magic sequence
pub const REG_RESET: u8 = 0x7D;
pub const RESET_SEQ_1: u8 = 0x12;
pub const RESET_SEQ_2: u8 = 0x34;

/// RegClock: internal 2 MHz oscillator
pub const CLOCK_FOSC_INTERNAL: u8 = 0x40;

/// RegMisc: LED driver clock = fOSC / 2
pub const MISC_LED_CLOCK_DIV_2: u8 = 0x10;

/// ON intensity register per pin (RegIOnN)
///
/// The LED driver register block is irregular: pins 4-7 and 12-15 carry
/// extra fade registers, so the IOn addresses do not form an arithmetic
/// sequence and have to be table-looked-up per pin.
pub const REG_I_ON: [u8; 16] = [
    0x2A, 0x2D, 0x30, 0x33, // pins 0-3: TOn, IOn, Off
    0x36, 0x3B, 0x40, 0x45, // pins 4-7: TOn, IOn, Off, TRise, TFall
    0x4A, 0x4D, 0x50, 0x53, // pins 8-11
    0x56, 0x5B, 0x60, 0x65, // pins 12-15
];
