//! Payroll: hour totals per approval status, approvals and manual log
//! corrections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::clock::fresh_log_id;
use crate::model::{Employee, TimeLog, TimeLogStatus};
use crate::types::{Department, EmployeeId, TimeLogId};

/// Errors from payroll operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PayrollError {
    #[error("time log {0} not found")]
    LogNotFound(TimeLogId),
    #[error("only pending time logs can be approved or rejected (log is {0})")]
    NotPending(&'static str),
    #[error("Clock-out time must be after clock-in time.")]
    ClockOutBeforeClockIn,
    #[error("no time log id left above {0}")]
    LogIdsExhausted(TimeLogId),
}

/// Worked time in milliseconds, split by approval status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourTotals {
    pub approved_ms: i64,
    pub pending_ms: i64,
    pub rejected_ms: i64,
}

impl HourTotals {
    /// Sum closed logs by status. Open logs are ignored.
    #[must_use]
    pub fn from_logs<'a>(logs: impl IntoIterator<Item = &'a TimeLog>) -> Self {
        logs.into_iter().fold(Self::default(), |mut totals, log| {
            if let (Some(ms), Some(status)) = (log.duration_ms(), log.status) {
                match status {
                    TimeLogStatus::Approved => totals.approved_ms += ms,
                    TimeLogStatus::Pending => totals.pending_ms += ms,
                    TimeLogStatus::Rejected => totals.rejected_ms += ms,
                }
            }
            totals
        })
    }
}

impl std::ops::Add for HourTotals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            approved_ms: self.approved_ms + rhs.approved_ms,
            pending_ms: self.pending_ms + rhs.pending_ms,
            rejected_ms: self.rejected_ms + rhs.rejected_ms,
        }
    }
}

/// One employee's payroll line.
#[derive(Debug, Clone)]
pub struct EmployeePay<'a> {
    pub employee: &'a Employee,
    /// The employee's logs, newest clock-in first.
    pub logs: Vec<&'a TimeLog>,
    pub totals: HourTotals,
}

/// Payroll lines for every employee of `department`, in directory order.
///
/// Logs whose employee is no longer in the directory are not counted.
#[must_use]
pub fn summarize<'a>(
    employees: &'a [Employee],
    logs: &'a [TimeLog],
    department: Department,
) -> Vec<EmployeePay<'a>> {
    employees
        .iter()
        .filter(|e| e.department == department)
        .map(|employee| {
            let mut own: Vec<&TimeLog> = logs
                .iter()
                .filter(|log| log.employee_id == employee.id)
                .collect();
            own.sort_by(|a, b| b.clock_in_time.cmp(&a.clock_in_time));
            let totals = HourTotals::from_logs(own.iter().copied());
            EmployeePay {
                employee,
                logs: own,
                totals,
            }
        })
        .collect()
}

/// A manager's decision on a pending log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approved,
    Rejected,
}

impl From<Decision> for TimeLogStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Approved => Self::Approved,
            Decision::Rejected => Self::Rejected,
        }
    }
}

/// A manually entered or corrected time log.
///
/// A missing or zero `id` creates a new log.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualLog {
    #[serde(default)]
    pub id: Option<TimeLogId>,
    pub employee_id: EmployeeId,
    pub clock_in_time: DateTime<Utc>,
    #[serde(default)]
    pub clock_out_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<TimeLogStatus>,
}

/// Payroll operations over the time log list.
pub struct Payroll<'a> {
    logs: &'a mut Vec<TimeLog>,
}

impl<'a> Payroll<'a> {
    pub const fn new(logs: &'a mut Vec<TimeLog>) -> Self {
        Self { logs }
    }

    /// Approve or reject a pending log.
    ///
    /// Re-applying the status a log already has succeeds without change.
    ///
    /// # Errors
    ///
    /// Returns `PayrollError::LogNotFound` or `PayrollError::NotPending`.
    pub fn set_status(&mut self, id: TimeLogId, decision: Decision) -> Result<TimeLog, PayrollError> {
        let log = self
            .logs
            .iter_mut()
            .find(|log| log.id == id)
            .ok_or(PayrollError::LogNotFound(id))?;

        let target = TimeLogStatus::from(decision);
        match log.status {
            Some(TimeLogStatus::Pending) => log.status = Some(target),
            Some(current) if current == target => {}
            Some(current) => return Err(PayrollError::NotPending(current.as_str())),
            None => return Err(PayrollError::NotPending("open")),
        }
        Ok(log.clone())
    }

    /// Create or overwrite a log from the correction form.
    ///
    /// # Errors
    ///
    /// Returns `PayrollError::ClockOutBeforeClockIn`, `PayrollError::LogNotFound`
    /// when overwriting, or `PayrollError::LogIdsExhausted` when creating.
    pub fn upsert_manual_log(&mut self, manual: ManualLog, now: DateTime<Utc>) -> Result<TimeLog, PayrollError> {
        if let Some(out) = manual.clock_out_time
            && out <= manual.clock_in_time
        {
            return Err(PayrollError::ClockOutBeforeClockIn);
        }

        let existing = manual.id.filter(|id| id.as_i64() != 0);
        let mut log = TimeLog {
            id: match existing {
                Some(id) => id,
                None => fresh_log_id(self.logs, now).map_err(PayrollError::LogIdsExhausted)?,
            },
            employee_id: manual.employee_id,
            clock_in_time: manual.clock_in_time,
            clock_out_time: manual.clock_out_time,
            status: manual.status,
        };
        log.normalize_status();

        match existing {
            Some(id) => {
                let slot = self
                    .logs
                    .iter_mut()
                    .find(|l| l.id == id)
                    .ok_or(PayrollError::LogNotFound(id))?;
                *slot = log.clone();
            }
            None => self.logs.push(log.clone()),
        }
        Ok(log)
    }

    /// Remove a log outright.
    ///
    /// # Errors
    ///
    /// Returns `PayrollError::LogNotFound` if no log has that id.
    pub fn delete_log(&mut self, id: TimeLogId) -> Result<TimeLog, PayrollError> {
        let pos = self
            .logs
            .iter()
            .position(|log| log.id == id)
            .ok_or(PayrollError::LogNotFound(id))?;
        Ok(self.logs.remove(pos))
    }

    /// Add every incoming log whose id is not already present.
    ///
    /// Existing entries win. Returns the number of logs added.
    pub fn merge_logs(&mut self, incoming: impl IntoIterator<Item = TimeLog>) -> usize {
        let mut added = 0;
        for mut log in incoming {
            if self.logs.iter().any(|existing| existing.id == log.id) {
                continue;
            }
            log.normalize_status();
            self.logs.push(log);
            added += 1;
        }
        added
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::model::seed_employees;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 6, hour, 0, 0).unwrap()
    }

    fn closed(id: i64, employee: i64, from: u32, to: u32, status: TimeLogStatus) -> TimeLog {
        TimeLog {
            id: TimeLogId::new(id),
            employee_id: EmployeeId::new(employee),
            clock_in_time: at(from),
            clock_out_time: Some(at(to)),
            status: Some(status),
        }
    }

    const HOUR: i64 = 3_600_000;

    #[test]
    fn test_totals_by_status_ignore_open_logs() {
        let logs = vec![
            closed(1, 1, 9, 17, TimeLogStatus::Pending),
            closed(2, 1, 6, 8, TimeLogStatus::Approved),
            closed(3, 1, 18, 19, TimeLogStatus::Rejected),
            TimeLog {
                id: TimeLogId::new(4),
                employee_id: EmployeeId::new(1),
                clock_in_time: at(20),
                clock_out_time: None,
                status: None,
            },
        ];
        let totals = HourTotals::from_logs(&logs);
        assert_eq!(
            totals,
            HourTotals {
                approved_ms: 2 * HOUR,
                pending_ms: 8 * HOUR,
                rejected_ms: HOUR,
            }
        );
    }

    #[test]
    fn test_totals_are_additive_and_order_independent() {
        let a = vec![
            closed(1, 1, 9, 17, TimeLogStatus::Pending),
            closed(2, 1, 6, 8, TimeLogStatus::Approved),
        ];
        let b = vec![
            closed(3, 1, 18, 19, TimeLogStatus::Rejected),
            closed(4, 1, 1, 4, TimeLogStatus::Approved),
        ];
        let mut all: Vec<TimeLog> = a.iter().chain(&b).cloned().collect();

        let combined = HourTotals::from_logs(&all);
        assert_eq!(combined, HourTotals::from_logs(&a) + HourTotals::from_logs(&b));

        all.reverse();
        assert_eq!(HourTotals::from_logs(&all), combined);
    }

    #[test]
    fn test_summarize_scopes_department_and_sorts_logs() {
        let mut employees = seed_employees();
        employees[2].department = Department::Foh;
        let logs = vec![
            closed(1, 1, 6, 8, TimeLogStatus::Approved),
            closed(2, 1, 9, 17, TimeLogStatus::Pending),
            closed(3, 3, 9, 17, TimeLogStatus::Pending),
            closed(4, 99, 9, 17, TimeLogStatus::Pending),
        ];

        let lines = summarize(&employees, &logs, Department::Kitchen);
        assert_eq!(lines.len(), 9);
        assert!(lines.iter().all(|l| l.employee.id != EmployeeId::new(3)));

        let huda = &lines[0];
        assert_eq!(huda.logs[0].id, TimeLogId::new(2));
        assert_eq!(huda.totals.pending_ms, 8 * HOUR);
        assert_eq!(huda.totals.approved_ms, 2 * HOUR);

        let orphan_counted = lines.iter().any(|l| l.logs.iter().any(|log| log.employee_id.as_i64() == 99));
        assert!(!orphan_counted);
    }

    #[test]
    fn test_set_status_only_from_pending() {
        let mut logs = vec![closed(1, 1, 9, 17, TimeLogStatus::Pending)];
        let mut payroll = Payroll::new(&mut logs);

        let log = payroll.set_status(TimeLogId::new(1), Decision::Approved).unwrap();
        assert_eq!(log.status, Some(TimeLogStatus::Approved));

        // same decision again is a no-op
        assert!(payroll.set_status(TimeLogId::new(1), Decision::Approved).is_ok());
        assert_eq!(
            payroll.set_status(TimeLogId::new(1), Decision::Rejected),
            Err(PayrollError::NotPending("approved"))
        );
        assert_eq!(
            payroll.set_status(TimeLogId::new(7), Decision::Rejected),
            Err(PayrollError::LogNotFound(TimeLogId::new(7)))
        );
    }

    #[test]
    fn test_set_status_rejects_open_log() {
        let mut logs = vec![TimeLog {
            id: TimeLogId::new(1),
            employee_id: EmployeeId::new(1),
            clock_in_time: at(9),
            clock_out_time: None,
            status: None,
        }];
        assert_eq!(
            Payroll::new(&mut logs).set_status(TimeLogId::new(1), Decision::Approved),
            Err(PayrollError::NotPending("open"))
        );
    }

    #[test]
    fn test_manual_log_create_and_overwrite() {
        let mut logs = vec![closed(1_000, 1, 9, 17, TimeLogStatus::Pending)];
        let mut payroll = Payroll::new(&mut logs);

        let created = payroll
            .upsert_manual_log(
                ManualLog {
                    id: Some(TimeLogId::new(0)),
                    employee_id: EmployeeId::new(2),
                    clock_in_time: at(10),
                    clock_out_time: Some(at(12)),
                    status: None,
                },
                at(13),
            )
            .unwrap();
        assert_eq!(created.status, Some(TimeLogStatus::Pending));
        assert_eq!(created.id.as_i64(), at(13).timestamp_millis());

        let edited = payroll
            .upsert_manual_log(
                ManualLog {
                    id: Some(TimeLogId::new(1_000)),
                    employee_id: EmployeeId::new(1),
                    clock_in_time: at(8),
                    clock_out_time: None,
                    status: Some(TimeLogStatus::Approved),
                },
                at(13),
            )
            .unwrap();
        assert_eq!(edited.status, None);
        assert_eq!(logs.len(), 2);
        assert!(logs[0].is_open());
    }

    #[test]
    fn test_manual_log_validation() {
        let mut logs = Vec::new();
        let mut payroll = Payroll::new(&mut logs);
        let bad = ManualLog {
            id: None,
            employee_id: EmployeeId::new(1),
            clock_in_time: at(12),
            clock_out_time: Some(at(12)),
            status: None,
        };
        assert_eq!(
            payroll.upsert_manual_log(bad, at(13)),
            Err(PayrollError::ClockOutBeforeClockIn)
        );

        let missing = ManualLog {
            id: Some(TimeLogId::new(55)),
            employee_id: EmployeeId::new(1),
            clock_in_time: at(9),
            clock_out_time: Some(at(12)),
            status: None,
        };
        assert_eq!(
            payroll.upsert_manual_log(missing, at(13)),
            Err(PayrollError::LogNotFound(TimeLogId::new(55)))
        );
        assert!(logs.is_empty());
    }

    #[test]
    fn test_manual_log_fails_when_log_ids_run_out() {
        let mut logs = vec![closed(i64::MAX, 1, 9, 17, TimeLogStatus::Approved)];
        let manual = ManualLog {
            id: None,
            employee_id: EmployeeId::new(2),
            clock_in_time: at(10),
            clock_out_time: Some(at(12)),
            status: None,
        };
        assert_eq!(
            Payroll::new(&mut logs).upsert_manual_log(manual, at(13)),
            Err(PayrollError::LogIdsExhausted(TimeLogId::new(i64::MAX)))
        );
        assert_eq!(logs.len(), 1);
    }

    #[test]
    fn test_set_status_returns_updated_log() {
        let mut logs = vec![closed(1, 1, 9, 17, TimeLogStatus::Pending)];
        let log = Payroll::new(&mut logs)
            .set_status(TimeLogId::new(1), Decision::Rejected)
            .unwrap();
        assert_eq!(log, logs[0]);
        assert_eq!(logs[0].status, Some(TimeLogStatus::Rejected));
    }

    #[test]
    fn test_delete_log() {
        let mut logs = vec![closed(1, 1, 9, 17, TimeLogStatus::Rejected)];
        let mut payroll = Payroll::new(&mut logs);
        assert!(payroll.delete_log(TimeLogId::new(1)).is_ok());
        assert_eq!(
            payroll.delete_log(TimeLogId::new(1)),
            Err(PayrollError::LogNotFound(TimeLogId::new(1)))
        );
    }

    #[test]
    fn test_merge_keeps_existing_entries() {
        let mut logs = vec![closed(1, 1, 9, 17, TimeLogStatus::Approved)];
        let incoming = vec![
            closed(1, 1, 9, 10, TimeLogStatus::Pending),
            TimeLog {
                status: None,
                ..closed(2, 2, 9, 10, TimeLogStatus::Pending)
            },
        ];

        let added = Payroll::new(&mut logs).merge_logs(incoming);

        assert_eq!(added, 1);
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].status, Some(TimeLogStatus::Approved));
        assert_eq!(logs[1].status, Some(TimeLogStatus::Pending));
    }
}
