//! CSV exports: payroll summary and roster grid.

use chrono::NaiveDate;

use crate::engine::EmployeePay;
use crate::format::format_hours_decimal;
use crate::model::{DayOfWeek, Employee, Roster, WeekKey};

/// Errors while writing CSV.
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV write error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Payroll summary: one row per employee with decimal hours per status.
///
/// # Errors
///
/// Returns `ExportError` if the CSV writer fails.
pub fn payroll_csv(lines: &[EmployeePay<'_>]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "Employee Name",
        "Role",
        "Approved Hours",
        "Pending Hours",
        "Rejected Hours",
    ])?;

    for line in lines {
        writer.write_record([
            line.employee.name.as_str(),
            line.employee.role.as_str(),
            &format_hours_decimal(line.totals.approved_ms),
            &format_hours_decimal(line.totals.pending_ms),
            &format_hours_decimal(line.totals.rejected_ms),
        ])?;
    }

    finish(writer)
}

/// Roster grid: one row per employee, one column per day. Each cell lists
/// the employee's shifts for that day, one per line.
///
/// # Errors
///
/// Returns `ExportError` if the CSV writer fails.
pub fn roster_csv(roster: &Roster, employees: &[Employee]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["Employee", "Role"];
    header.extend(DayOfWeek::ALL.map(DayOfWeek::as_str));
    writer.write_record(&header)?;

    for employee in employees {
        let mut row = vec![employee.name.clone(), employee.role.to_string()];
        for day in DayOfWeek::ALL {
            let cell = roster
                .shifts_for(day, employee.id)
                .into_iter()
                .map(|(_, shift)| shift.label())
                .collect::<Vec<_>>()
                .join("\n");
            row.push(cell);
        }
        writer.write_record(&row)?;
    }

    finish(writer)
}

/// Download name for a payroll summary exported on `date`.
#[must_use]
pub fn payroll_filename(date: NaiveDate) -> String {
    format!("Maruzzella_Weekly_Summary_{date}.csv")
}

/// Download name for a roster export of `week`, starting `date`.
#[must_use]
pub fn roster_filename(week: WeekKey, date: NaiveDate) -> String {
    let label = match week {
        WeekKey::CurrentWeek => "ThisWeek",
        WeekKey::NextWeek => "NextWeek",
    };
    format!("Maruzzella_Roster_{label}_{date}.csv")
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = writer.into_inner().map_err(csv::IntoInnerError::into_error)?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::engine::summarize;
    use crate::model::{Rosters, Shift, StateSnapshot, TimeLog, TimeLogStatus};
    use crate::types::{Department, EmployeeId, TimeLogId, WallTime};
    use chrono::{TimeZone, Utc};

    fn shift(ids: &[i64], times: Option<(&str, &str)>, notes: Option<&str>) -> Shift {
        Shift {
            employee_ids: ids.iter().copied().map(EmployeeId::new).collect(),
            start_time: times.map(|(s, _)| WallTime::parse(s).unwrap()),
            end_time: times.map(|(_, e)| WallTime::parse(e).unwrap()),
            break_start_time: None,
            break_end_time: None,
            notes: notes.map(str::to_owned),
        }
    }

    #[test]
    fn test_payroll_csv() {
        let mut state = StateSnapshot::seeded();
        state.employees[2].name = "Luca \"the Chef\"".to_owned();
        state.time_logs.push(TimeLog {
            id: TimeLogId::new(1),
            employee_id: EmployeeId::new(1),
            clock_in_time: Utc.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap(),
            clock_out_time: Some(Utc.with_ymd_and_hms(2024, 5, 6, 17, 0, 0).unwrap()),
            status: Some(TimeLogStatus::Approved),
        });

        let lines = summarize(&state.employees, &state.time_logs, Department::Kitchen);
        let csv = payroll_csv(&lines).unwrap();
        let rows: Vec<&str> = csv.lines().collect();

        assert_eq!(rows[0], "Employee Name,Role,Approved Hours,Pending Hours,Rejected Hours");
        assert_eq!(rows[1], "Huda,Manager,8.00,0.00,0.00");
        assert_eq!(rows[3], "\"Luca \"\"the Chef\"\"\",Chef,0.00,0.00,0.00");
        assert_eq!(rows.len(), 11);
    }

    #[test]
    fn test_roster_csv_joins_shifts_with_newlines() {
        let state = StateSnapshot::seeded();
        let mut rosters = Rosters::default();
        rosters
            .add_shift(
                WeekKey::CurrentWeek,
                DayOfWeek::Monday,
                shift(&[1, 2], Some(("09:00", "17:00")), Some("Opening")),
            )
            .unwrap();
        rosters
            .add_shift(WeekKey::CurrentWeek, DayOfWeek::Monday, shift(&[1], None, Some("Stock take")))
            .unwrap();
        rosters
            .add_shift(WeekKey::CurrentWeek, DayOfWeek::Sunday, shift(&[2], None, Some("RDO")))
            .unwrap();

        let csv = roster_csv(&rosters.current_week, &state.employees[..2]).unwrap();
        let mut reader = csv::Reader::from_reader(csv.as_bytes());

        let header = reader.headers().unwrap().clone();
        assert_eq!(header.len(), 9);
        assert_eq!(&header[2], "Monday");
        assert_eq!(&header[8], "Sunday");

        let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][0], "Huda");
        assert_eq!(&records[0][2], "09:00 - 17:00 (Opening)\n(Stock take)");
        assert_eq!(&records[0][3], "");
        assert_eq!(&records[1][8], "(RDO)");
    }

    #[test]
    fn test_filenames() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
        assert_eq!(payroll_filename(date), "Maruzzella_Weekly_Summary_2024-05-06.csv");
        assert_eq!(
            roster_filename(WeekKey::NextWeek, date),
            "Maruzzella_Roster_NextWeek_2024-05-06.csv"
        );
    }
}
