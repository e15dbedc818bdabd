#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! click-drivers - Platform-independent Click board peripheral drivers
//!
//! This library provides a platform abstraction layer and a flat collection of
//! independent drivers for Click add-on boards (sensors, power-management ICs,
//! communication transceivers) attached over I2C, SPI, UART, GPIO, or PWM.
//!
//! Each driver is self-contained: a register map, a configuration struct, and
//! accessor functions layered over the `platform::traits` bus interfaces. The
//! drivers do not depend on each other; any subset can be used.

// Platform abstraction layer (bus traits, errors, mock peripherals)
pub mod platform;

// Device drivers using platform abstraction
pub mod devices;

// Logging macros
pub mod core;
