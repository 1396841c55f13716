//! Domain model: plain data contracts shared by the engines, the server and
//! the CLI. Field names serialize in camelCase to match the stored documents.

pub mod employee;
pub mod roster;
pub mod shift;
pub mod snapshot;
pub mod time_log;

pub use employee::{Employee, EmployeeDraft, EmployeeSummary, seed_employees};
pub use roster::{DayOfWeek, Roster, Rosters, WeekKey};
pub use shift::{Shift, ShiftDraft, ShiftError};
pub use snapshot::{SnapshotError, StateSnapshot};
pub use time_log::{TimeLog, TimeLogStatus};
