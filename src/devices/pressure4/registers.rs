//! BMP280 register map

/// Default I2C address (SDO high)
pub const DEFAULT_ADDR: u8 = 0x77;

/// ID register response
pub const CHIP_ID: u8 = 0x58;

/// First calibration coefficient register (24 bytes, little-endian words)
pub const REG_CALIB: u8 = 0x88;
pub const REG_ID: u8 = 0xD0;
pub const REG_RESET: u8 = 0xE0;
pub const REG_STATUS: u8 = 0xF3;
pub const REG_CTRL_MEAS: u8 = 0xF4;
pub const REG_CONFIG: u8 = 0xF5;
/// Burst read start: press MSB/LSB/XLSB then temp MSB/LSB/XLSB
pub const REG_PRESS_MSB: u8 = 0xF7;

/// Reset register magic value
pub const RESET_VALUE: u8 = 0xB6;

/// STATUS: conversion in progress
pub const STATUS_MEASURING: u8 = 0x08;

/// CTRL_MEAS: normal power mode, osrs_t x2, osrs_p x16
pub const CTRL_MEAS_DEFAULT: u8 = 0x57;

/// CONFIG: 0.5 ms standby, IIR coefficient 16
pub const CONFIG_DEFAULT: u8 = 0x10;
