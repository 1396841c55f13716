//! Core types for Maruzzella.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod department;
pub mod id;
pub mod pin;
pub mod wall_time;

pub use department::{Department, EmployeeRole};
pub use id::*;
pub use pin::{Pin, PinError};
pub use wall_time::{WallTime, WallTimeError};
