//! Scheduled work blocks and their validation rules.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{EmployeeId, WallTime, WallTimeError};

/// Reasons a shift is rejected.
///
/// Messages are shown to managers verbatim.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShiftError {
    #[error("Please select at least one employee.")]
    NoEmployees,
    #[error("A shift must have either times or a status/note (e.g., \"RDO\").")]
    Empty,
    #[error("Please provide both a start and end time for a timed shift.")]
    PartialTimes,
    #[error("End time must be after start time, even for overnight shifts.")]
    EndBeforeStart,
    #[error("Please provide both a start and end time for the break.")]
    PartialBreak,
    #[error("Break end time must be after break start time.")]
    BreakEndBeforeStart,
    #[error(transparent)]
    InvalidTime(#[from] WallTimeError),
    #[error("Please fill in at least one time field to apply a change.")]
    NoTimesGiven,
    #[error("Select at least one day for a recurring shift.")]
    NoDays,
    #[error("Select at least one shift to edit.")]
    NoSelection,
    #[error("No shift at position {index} on {day}.")]
    NotFound { day: String, index: usize },
}

/// A work block (or status note such as "RDO") for one or more employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub employee_ids: Vec<EmployeeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<WallTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<WallTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_start_time: Option<WallTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_end_time: Option<WallTime>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "blank_as_none"
    )]
    pub notes: Option<String>,
}

impl Shift {
    /// Check the shift against the scheduling rules.
    ///
    /// # Errors
    ///
    /// Returns the first rule the shift breaks.
    pub fn validate(&self) -> Result<(), ShiftError> {
        if self.employee_ids.is_empty() {
            return Err(ShiftError::NoEmployees);
        }

        if self.start_time.is_none() && self.end_time.is_none() && self.notes.is_none() {
            return Err(ShiftError::Empty);
        }

        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) if end <= start && !end.is_midnight() => {
                return Err(ShiftError::EndBeforeStart);
            }
            (Some(_), None) | (None, Some(_)) => return Err(ShiftError::PartialTimes),
            _ => {}
        }

        match (self.break_start_time, self.break_end_time) {
            (Some(start), Some(end)) if end <= start => Err(ShiftError::BreakEndBeforeStart),
            (Some(_), None) | (None, Some(_)) => Err(ShiftError::PartialBreak),
            _ => Ok(()),
        }
    }

    /// Whether the shift has a start and end time.
    #[must_use]
    pub const fn is_timed(&self) -> bool {
        self.start_time.is_some() && self.end_time.is_some()
    }

    /// Whether `employee` is assigned to this shift.
    #[must_use]
    pub fn includes(&self, employee: EmployeeId) -> bool {
        self.employee_ids.contains(&employee)
    }

    /// Short cell text: `"09:00 - 17:00 (notes)"`, `"09:00 - 17:00"` or `"(notes)"`.
    #[must_use]
    pub fn label(&self) -> String {
        match (self.start_time, self.end_time, self.notes.as_deref()) {
            (Some(start), Some(end), Some(notes)) => format!("{start} - {end} ({notes})"),
            (Some(start), Some(end), None) => format!("{start} - {end}"),
            (_, _, Some(notes)) => format!("({notes})"),
            _ => String::new(),
        }
    }
}

/// Raw shift form input, before trimming and parsing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShiftDraft {
    pub employee_ids: Vec<EmployeeId>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub break_start_time: Option<String>,
    pub break_end_time: Option<String>,
    pub notes: Option<String>,
}

impl ShiftDraft {
    /// Trim and parse the form input into a validated [`Shift`].
    ///
    /// Blank fields count as absent and duplicate employee ids are dropped.
    ///
    /// # Errors
    ///
    /// Returns a `ShiftError` for malformed times or any broken rule.
    pub fn into_shift(self) -> Result<Shift, ShiftError> {
        let mut employee_ids = Vec::with_capacity(self.employee_ids.len());
        for id in self.employee_ids {
            if !employee_ids.contains(&id) {
                employee_ids.push(id);
            }
        }

        let notes = self
            .notes
            .map(|n| n.trim().to_owned())
            .filter(|n| !n.is_empty());

        let shift = Shift {
            employee_ids,
            start_time: WallTime::parse_optional(self.start_time.as_deref())?,
            end_time: WallTime::parse_optional(self.end_time.as_deref())?,
            break_start_time: WallTime::parse_optional(self.break_start_time.as_deref())?,
            break_end_time: WallTime::parse_optional(self.break_end_time.as_deref())?,
            notes,
        };
        shift.validate()?;
        Ok(shift)
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft(start: &str, end: &str) -> ShiftDraft {
        ShiftDraft {
            employee_ids: vec![EmployeeId::new(1)],
            start_time: Some(start.to_owned()),
            end_time: Some(end.to_owned()),
            ..ShiftDraft::default()
        }
    }

    #[test]
    fn test_day_shift_is_valid() {
        let shift = draft("09:00", "17:00").into_shift().unwrap();
        assert!(shift.is_timed());
        assert_eq!(shift.label(), "09:00 - 17:00");
    }

    #[test]
    fn test_overnight_to_midnight_is_valid() {
        assert!(draft("22:00", "00:00").into_shift().is_ok());
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        assert_eq!(
            draft("17:00", "09:00").into_shift(),
            Err(ShiftError::EndBeforeStart)
        );
        assert_eq!(
            draft("09:00", "09:00").into_shift(),
            Err(ShiftError::EndBeforeStart)
        );
    }

    #[test]
    fn test_partial_times_are_rejected() {
        let mut d = draft("09:00", "  ");
        assert_eq!(d.clone().into_shift(), Err(ShiftError::PartialTimes));
        d.start_time = None;
        d.end_time = Some("17:00".to_owned());
        assert_eq!(d.into_shift(), Err(ShiftError::PartialTimes));
    }

    #[test]
    fn test_notes_only_shift_is_valid() {
        let shift = ShiftDraft {
            employee_ids: vec![EmployeeId::new(2)],
            notes: Some("  RDO ".to_owned()),
            ..ShiftDraft::default()
        }
        .into_shift()
        .unwrap();
        assert_eq!(shift.notes.as_deref(), Some("RDO"));
        assert_eq!(shift.label(), "(RDO)");
    }

    #[test]
    fn test_empty_shift_is_rejected() {
        let d = ShiftDraft {
            employee_ids: vec![EmployeeId::new(2)],
            notes: Some("   ".to_owned()),
            ..ShiftDraft::default()
        };
        assert_eq!(d.into_shift(), Err(ShiftError::Empty));
    }

    #[test]
    fn test_no_employees_is_rejected() {
        let mut d = draft("09:00", "17:00");
        d.employee_ids.clear();
        assert_eq!(d.into_shift(), Err(ShiftError::NoEmployees));
    }

    #[test]
    fn test_break_rules() {
        let mut d = draft("09:00", "17:00");
        d.break_start_time = Some("13:00".to_owned());
        assert_eq!(d.clone().into_shift(), Err(ShiftError::PartialBreak));

        d.break_end_time = Some("13:00".to_owned());
        assert_eq!(d.clone().into_shift(), Err(ShiftError::BreakEndBeforeStart));

        // No midnight exception for breaks.
        d.break_end_time = Some("00:00".to_owned());
        assert_eq!(d.clone().into_shift(), Err(ShiftError::BreakEndBeforeStart));

        d.break_end_time = Some("13:30".to_owned());
        assert!(d.into_shift().is_ok());
    }

    #[test]
    fn test_malformed_time_is_rejected() {
        assert!(matches!(
            draft("9am", "17:00").into_shift(),
            Err(ShiftError::InvalidTime(_))
        ));
    }

    #[test]
    fn test_duplicate_employees_collapse() {
        let mut d = draft("09:00", "17:00");
        d.employee_ids = vec![EmployeeId::new(3), EmployeeId::new(3), EmployeeId::new(4)];
        let shift = d.into_shift().unwrap();
        assert_eq!(shift.employee_ids, vec![EmployeeId::new(3), EmployeeId::new(4)]);
    }

    #[test]
    fn test_wire_format_skips_absent_fields() {
        let shift = draft("09:00", "17:00").into_shift().unwrap();
        let json = serde_json::to_value(&shift).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"employeeIds": [1], "startTime": "09:00", "endTime": "17:00"})
        );
    }

    #[test]
    fn test_blank_notes_hydrate_as_none() {
        let shift: Shift =
            serde_json::from_str(r#"{"employeeIds":[1],"notes":"","startTime":"09:00","endTime":"10:00"}"#)
                .unwrap();
        assert_eq!(shift.notes, None);
    }
}
