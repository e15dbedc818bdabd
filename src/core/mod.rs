//! Shared infrastructure
//!
//! This module contains the pieces shared by every driver, currently the
//! logging abstraction.

pub mod logging;
