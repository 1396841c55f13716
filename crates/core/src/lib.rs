//! Maruzzella Core - Staff roster domain library.
//!
//! This crate provides the types and engines shared by all Maruzzella
//! components:
//! - `server` - HTTP API hosting the in-memory state and its persistence
//! - `cli` - Command-line tools for migrations, seeding and exports
//!
//! # Architecture
//!
//! The core crate contains only types and synchronous engines - no I/O, no
//! database access, no HTTP clients. Engines borrow the state they operate
//! on and either commit a change or return an error without touching it.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, PINs, wall-clock times, departments
//! - [`model`] - Employees, shifts, rosters, time logs and the state snapshot
//! - [`engine`] - Roster, time clock, payroll and employee directory operations
//! - [`access`] - Role and department permission checks
//! - [`format`] - Worked-time display formatting
//! - [`export`] - Payroll and roster CSV exports
//! - [`briefing`] - Daily briefing prompt planning

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod access;
pub mod briefing;
pub mod engine;
pub mod export;
pub mod format;
pub mod model;
pub mod types;

pub use types::*;
