//! LIS2DW12 register map

/// Default I2C address (SA0 high)
pub const DEFAULT_ADDR: u8 = 0x19;

/// WHO_AM_I response
pub const DEVICE_ID: u8 = 0x44;

pub const REG_OUT_T: u8 = 0x26;
pub const REG_WHO_AM_I: u8 = 0x0F;
pub const REG_CTRL1: u8 = 0x20;
pub const REG_CTRL2: u8 = 0x21;
pub const REG_CTRL3: u8 = 0x22;
pub const REG_CTRL6: u8 = 0x25;
pub const REG_STATUS: u8 = 0x27;
pub const REG_OUT_X_L: u8 = 0x28;

/// CTRL1: high-performance mode select
pub const CTRL1_MODE_HIGH_PERF: u8 = 0x04;

/// CTRL2: block data update
pub const CTRL2_BDU: u8 = 0x08;
/// CTRL2: register address auto-increment
pub const CTRL2_IF_ADD_INC: u8 = 0x04;
/// CTRL2: software reset, self-clearing
pub const CTRL2_SOFT_RESET: u8 = 0x40;

/// CTRL6: full-scale field position
pub const CTRL6_FS_SHIFT: u8 = 4;
