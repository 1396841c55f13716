//! Engines: synchronous operations over the in-memory state.
//!
//! Every operation either commits fully or returns an error without touching
//! the state.

pub mod clock;
pub mod directory;
pub mod payroll;
pub mod roster;

pub use clock::{ClockError, ClockState, ClockStatus, TimeClock, clock_status, fresh_log_id};
pub use directory::{Directory, DirectoryError, Removal, authenticate, find, orphaned_logs};
pub use payroll::{Decision, EmployeePay, HourTotals, ManualLog, Payroll, PayrollError, summarize};
pub use roster::ShiftRef;
