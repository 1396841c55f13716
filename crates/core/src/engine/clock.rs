//! Time clock: derives who is clocked in from the log history and records
//! clock-in/clock-out events.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{TimeLog, TimeLogStatus};
use crate::types::{EmployeeId, TimeLogId};

/// Errors from clocking in or out. Messages are shown to staff verbatim.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    #[error("This employee is already clocked in.")]
    AlreadyClockedIn,
    #[error("Error: Cannot find an active shift to clock out from.")]
    NoOpenLog,
    #[error("no time log id left above {0}")]
    LogIdsExhausted(TimeLogId),
}

/// Whether an employee is on the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockState {
    In,
    Out,
}

/// Derived clock status: state plus the time it last changed, if ever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClockStatus {
    pub status: ClockState,
    pub time: Option<DateTime<Utc>>,
}

/// Status of `employee` from their latest log by clock-in time.
///
/// Ties on clock-in time resolve to the earliest-inserted log.
#[must_use]
pub fn clock_status(logs: &[TimeLog], employee: EmployeeId) -> ClockStatus {
    let latest = logs
        .iter()
        .filter(|log| log.employee_id == employee)
        .fold(None::<&TimeLog>, |best, log| match best {
            Some(b) if b.clock_in_time >= log.clock_in_time => Some(b),
            _ => Some(log),
        });

    match latest {
        Some(log) if log.is_open() => ClockStatus {
            status: ClockState::In,
            time: Some(log.clock_in_time),
        },
        Some(log) => ClockStatus {
            status: ClockState::Out,
            time: log.clock_out_time,
        },
        None => ClockStatus {
            status: ClockState::Out,
            time: None,
        },
    }
}

/// Allocate a log id from the wall clock, bumped past every existing id.
///
/// # Errors
///
/// Returns the highest existing id when it is `i64::MAX`.
pub fn fresh_log_id(logs: &[TimeLog], now: DateTime<Utc>) -> Result<TimeLogId, TimeLogId> {
    let Some(max) = logs.iter().map(|log| log.id).max() else {
        return Ok(TimeLogId::new(now.timestamp_millis()));
    };
    let next_after_max = max.as_i64().checked_add(1).ok_or(max)?;
    Ok(TimeLogId::new(now.timestamp_millis().max(next_after_max)))
}

/// Clock operations over the time log list.
pub struct TimeClock<'a> {
    logs: &'a mut Vec<TimeLog>,
}

impl<'a> TimeClock<'a> {
    pub const fn new(logs: &'a mut Vec<TimeLog>) -> Self {
        Self { logs }
    }

    #[must_use]
    pub fn status(&self, employee: EmployeeId) -> ClockStatus {
        clock_status(self.logs, employee)
    }

    /// Open a new log for `employee` at `now`.
    ///
    /// # Errors
    ///
    /// Returns `ClockError::AlreadyClockedIn` if the latest log is still open,
    /// or `ClockError::LogIdsExhausted` if no id is left to allocate.
    pub fn clock_in(&mut self, employee: EmployeeId, now: DateTime<Utc>) -> Result<TimeLog, ClockError> {
        if self.status(employee).status == ClockState::In {
            return Err(ClockError::AlreadyClockedIn);
        }

        let log = TimeLog {
            id: fresh_log_id(self.logs, now).map_err(ClockError::LogIdsExhausted)?,
            employee_id: employee,
            clock_in_time: now,
            clock_out_time: None,
            status: None,
        };
        self.logs.push(log.clone());
        Ok(log)
    }

    /// Close the most recently inserted open log of `employee` at `now`.
    ///
    /// # Errors
    ///
    /// Returns `ClockError::NoOpenLog` if the employee has no open log.
    pub fn clock_out(&mut self, employee: EmployeeId, now: DateTime<Utc>) -> Result<TimeLog, ClockError> {
        let log = self
            .logs
            .iter_mut()
            .rev()
            .find(|log| log.employee_id == employee && log.is_open())
            .ok_or(ClockError::NoOpenLog)?;

        log.clock_out_time = Some(now);
        log.status = Some(TimeLogStatus::Pending);
        Ok(log.clone())
    }
}
