//! Device drivers
//!
//! One module per Click board. Every driver follows the same shape: a
//! register map, a configuration struct, an `init` that verifies the chip
//! where it has an identity register and programs the power-on setup, and
//! accessors built on generic register read/write helpers. Drivers are
//! independent of each other.
//!
//! ## Modules
//!
//! - `traits`: shared error type and the I2C/SPI transport selector
//! - `accel10`: LIS2DW12 3-axis accelerometer (I2C or SPI)
//! - `ambient2`: OPT3001 ambient light sensor (I2C)
//! - `buzz`: piezo buzzer (PWM)
//! - `current4`: INA219 current/power monitor (I2C)
//! - `dac`: MCP4921 12-bit DAC (SPI)
//! - `digipot`: MCP4161 digital potentiometer (SPI)
//! - `expand9`: SX1509B 16-channel I/O expander with LED driver (I2C)
//! - `lteiot2`: SARA-R412M LTE Cat M1/NB1 modem (UART, AT commands)
//! - `nanolr`: EMB-LR1276S LoRa module (UART, binary framing)
//! - `oximeter5`: MAX30102 pulse oximeter (I2C) with SpO2/heart-rate math
//! - `pressure4`: BMP280 barometer (I2C or SPI)
//! - `pwm2`: 48-channel 12-bit PWM LED driver (SPI)
//! - `relay`: dual relay board (GPIO)
//! - `rtc10`: DS1339 real-time clock (I2C)
//! - `thermo8`: MCP9808 temperature sensor (I2C)

pub mod traits;

pub mod accel10;
pub mod ambient2;
pub mod buzz;
pub mod current4;
pub mod dac;
pub mod digipot;
pub mod expand9;
pub mod lteiot2;
pub mod nanolr;
pub mod oximeter5;
pub mod pressure4;
pub mod pwm2;
pub mod relay;
pub mod rtc10;
pub mod thermo8;
