//! MAX30102 register definitions
//!
//! Based on the Maxim MAX30102 datasheet (rev 1).

#![allow(dead_code)]

/// 7-bit I2C address (fixed)
pub const I2C_ADDR: u8 = 0x57;

/// Interrupt status / enable
pub const INT_STATUS_1: u8 = 0x00;
pub const INT_STATUS_2: u8 = 0x01;
pub const INT_ENABLE_1: u8 = 0x02;
pub const INT_ENABLE_2: u8 = 0x03;

/// FIFO pointers and data
pub const FIFO_WR_PTR: u8 = 0x04;
pub const OVF_COUNTER: u8 = 0x05;
pub const FIFO_RD_PTR: u8 = 0x06;
pub const FIFO_DATA: u8 = 0x07;

/// Configuration
pub const FIFO_CONFIG: u8 = 0x08;
pub const MODE_CONFIG: u8 = 0x09;
pub const SPO2_CONFIG: u8 = 0x0A;
pub const LED1_PA: u8 = 0x0C;
pub const LED2_PA: u8 = 0x0D;
pub const MULTI_LED_CTRL_1: u8 = 0x11;
pub const MULTI_LED_CTRL_2: u8 = 0x12;

/// Die temperature
pub const TEMP_INT: u8 = 0x1F;
pub const TEMP_FRAC: u8 = 0x20;
pub const TEMP_CONFIG: u8 = 0x21;

/// Part identification
pub const REV_ID: u8 = 0xFE;
pub const PART_ID: u8 = 0xFF;

/// Expected PART_ID value
pub const PART_ID_VALUE: u8 = 0x15;

/// MODE_CONFIG bits
pub const MODE_SHUTDOWN: u8 = 0x80;
pub const MODE_RESET: u8 = 0x40;
pub const MODE_HEART_RATE: u8 = 0x02;
pub const MODE_SPO2: u8 = 0x03;

/// FIFO_CONFIG: 4-sample averaging, rollover enabled, almost-full at 17
pub const FIFO_CONFIG_DEFAULT: u8 = 0x4F;

/// SPO2_CONFIG: 4096 nA ADC range, 100 sps, 411 us pulse width (18-bit)
pub const SPO2_CONFIG_DEFAULT: u8 = 0x2F;

/// LED pulse amplitude default (~7 mA)
pub const LED_PA_DEFAULT: u8 = 0x24;

/// TEMP_CONFIG: start a single die-temperature conversion
pub const TEMP_EN: u8 = 0x01;

/// INT_STATUS_2 / INT_ENABLE_2: die temp conversion done
pub const DIE_TEMP_RDY: u8 = 0x02;

/// Number of FIFO sample slots
pub const FIFO_DEPTH: u8 = 32;

/// Die temperature fraction LSB in degrees C
pub const TEMP_FRAC_LSB: f32 = 0.0625;
