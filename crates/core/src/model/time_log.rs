//! Clock-in/clock-out records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{EmployeeId, TimeLogId};

/// Approval state of a closed time log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeLogStatus {
    Pending,
    Approved,
    Rejected,
}

impl TimeLogStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for TimeLogStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One clock-in/clock-out record for one employee.
///
/// `status` is only meaningful once `clock_out_time` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeLog {
    pub id: TimeLogId,
    pub employee_id: EmployeeId,
    pub clock_in_time: DateTime<Utc>,
    #[serde(default)]
    pub clock_out_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TimeLogStatus>,
}

impl TimeLog {
    /// Whether the employee has not clocked out yet.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.clock_out_time.is_none()
    }

    /// Worked time in milliseconds, `None` while open.
    #[must_use]
    pub fn duration_ms(&self) -> Option<i64> {
        self.clock_out_time
            .map(|out| (out - self.clock_in_time).num_milliseconds())
    }

    /// Bring `status` in line with the open/closed state: closed logs
    /// without a status become pending, open logs carry none.
    pub fn normalize_status(&mut self) {
        if self.clock_out_time.is_none() {
            self.status = None;
        } else if self.status.is_none() {
            self.status = Some(TimeLogStatus::Pending);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn log(out: Option<DateTime<Utc>>, status: Option<TimeLogStatus>) -> TimeLog {
        TimeLog {
            id: TimeLogId::new(1),
            employee_id: EmployeeId::new(2),
            clock_in_time: Utc.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap(),
            clock_out_time: out,
            status,
        }
    }

    #[test]
    fn test_open_log_serializes_null_clock_out() {
        let json = serde_json::to_value(log(None, None)).unwrap();
        assert_eq!(json["clockOutTime"], serde_json::Value::Null);
        assert!(json.get("status").is_none());
        assert_eq!(json["employeeId"], 2);
    }

    #[test]
    fn test_parses_javascript_timestamps() {
        let json = r#"{"id":1700000000000,"employeeId":4,"clockInTime":"2024-05-06T09:00:00.000Z","clockOutTime":"2024-05-06T17:00:00.000Z","status":"approved"}"#;
        let parsed: TimeLog = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.duration_ms(), Some(8 * 3_600_000));
        assert_eq!(parsed.status, Some(TimeLogStatus::Approved));
    }

    #[test]
    fn test_normalize_status() {
        let out = Utc.with_ymd_and_hms(2024, 5, 6, 17, 0, 0).unwrap();

        let mut closed = log(Some(out), None);
        closed.normalize_status();
        assert_eq!(closed.status, Some(TimeLogStatus::Pending));

        let mut open = log(None, Some(TimeLogStatus::Approved));
        open.normalize_status();
        assert_eq!(open.status, None);
        assert!(open.is_open());
    }
}
