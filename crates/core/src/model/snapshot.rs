//! The whole application state as one value.

use std::collections::HashSet;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use super::employee::{Employee, seed_employees};
use super::roster::{DayOfWeek, Rosters, WeekKey};
use super::shift::ShiftError;
use super::time_log::TimeLog;
use crate::types::{Department, EmployeeId, EmployeeRole};

/// Errors raised when reading a state document.
#[derive(thiserror::Error, Debug)]
pub enum SnapshotError {
    #[error("Invalid data file. Missing required section: {0}")]
    MissingSection(&'static str),
    #[error("Invalid {section}: {source}")]
    InvalidSection {
        section: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("state document must be a JSON object")]
    NotAnObject,
    #[error("Invalid employees: id {0} appears more than once")]
    DuplicateEmployee(EmployeeId),
    #[error("Invalid employees: {role} is not a role in {department} (employee {id})")]
    RoleNotInDepartment {
        id: EmployeeId,
        role: EmployeeRole,
        department: Department,
    },
    #[error("Invalid rosters: {week} {day} shift {index}: {source}")]
    InvalidShift {
        week: WeekKey,
        day: DayOfWeek,
        index: usize,
        #[source]
        source: ShiftError,
    },
}

/// Employees, rosters and time logs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub rosters: Rosters,
    #[serde(default)]
    pub time_logs: Vec<TimeLog>,
}

impl StateSnapshot {
    pub const EMPLOYEES: &'static str = "employees";
    pub const ROSTERS: &'static str = "rosters";
    pub const TIME_LOGS: &'static str = "timeLogs";

    /// State of a fresh install: the default staff and empty rosters.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            employees: seed_employees(),
            rosters: Rosters::default(),
            time_logs: Vec::new(),
        }
    }

    /// Fix up time log statuses after loading untrusted data.
    pub fn normalize(&mut self) {
        for log in &mut self.time_logs {
            log.normalize_status();
        }
    }

    /// Overwrite every section present and valid in `doc`.
    ///
    /// Missing, malformed or inconsistent sections keep their current value,
    /// as does an empty staff list. Returns the names of the sections that
    /// were replaced.
    pub fn apply_sections(&mut self, doc: &Value) -> Vec<&'static str> {
        let employees = parsed::<Vec<Employee>>(doc, Self::EMPLOYEES)
            .ok()
            .flatten()
            .filter(|employees| !employees.is_empty() && check_employees(employees).is_ok());
        let rosters = parsed::<Rosters>(doc, Self::ROSTERS)
            .ok()
            .flatten()
            .filter(|rosters| check_rosters(rosters).is_ok());
        let time_logs = parsed::<Vec<TimeLog>>(doc, Self::TIME_LOGS).ok().flatten();

        self.assign(employees, rosters, time_logs)
    }

    /// Overwrite the sections present in `doc`, or nothing at all.
    ///
    /// Missing sections and an empty staff list keep their current value.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError` for the first section that is malformed or
    /// breaks a consistency rule; the state is left untouched.
    pub fn replace_sections(&mut self, doc: &Value) -> Result<Vec<&'static str>, SnapshotError> {
        if !doc.is_object() {
            return Err(SnapshotError::NotAnObject);
        }

        let employees = parsed::<Vec<Employee>>(doc, Self::EMPLOYEES)?.filter(|e| !e.is_empty());
        if let Some(employees) = &employees {
            check_employees(employees)?;
        }
        let rosters = parsed::<Rosters>(doc, Self::ROSTERS)?;
        if let Some(rosters) = &rosters {
            check_rosters(rosters)?;
        }
        let time_logs = parsed::<Vec<TimeLog>>(doc, Self::TIME_LOGS)?;

        Ok(self.assign(employees, rosters, time_logs))
    }

    /// Read a full data file. All three sections must be present and valid.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError` when a section is missing, malformed or
    /// inconsistent. An empty staff list counts as missing.
    pub fn from_document(doc: &Value) -> Result<Self, SnapshotError> {
        if !doc.is_object() {
            return Err(SnapshotError::NotAnObject);
        }

        let employees = parsed::<Vec<Employee>>(doc, Self::EMPLOYEES)?
            .filter(|e| !e.is_empty())
            .ok_or(SnapshotError::MissingSection(Self::EMPLOYEES))?;
        check_employees(&employees)?;
        let rosters = parsed::<Rosters>(doc, Self::ROSTERS)?.ok_or(SnapshotError::MissingSection(Self::ROSTERS))?;
        check_rosters(&rosters)?;
        let time_logs =
            parsed::<Vec<TimeLog>>(doc, Self::TIME_LOGS)?.ok_or(SnapshotError::MissingSection(Self::TIME_LOGS))?;

        let mut snapshot = Self {
            employees,
            rosters,
            time_logs,
        };
        snapshot.normalize();
        Ok(snapshot)
    }

    fn assign(
        &mut self,
        employees: Option<Vec<Employee>>,
        rosters: Option<Rosters>,
        time_logs: Option<Vec<TimeLog>>,
    ) -> Vec<&'static str> {
        let mut applied = Vec::new();

        if let Some(employees) = employees {
            self.employees = employees;
            applied.push(Self::EMPLOYEES);
        }
        if let Some(rosters) = rosters {
            self.rosters = rosters;
            applied.push(Self::ROSTERS);
        }
        if let Some(time_logs) = time_logs {
            self.time_logs = time_logs;
            applied.push(Self::TIME_LOGS);
        }

        self.normalize();
        applied
    }
}

/// Section `key` of `doc`, or `None` when absent or null.
fn parsed<T: DeserializeOwned>(doc: &Value, key: &'static str) -> Result<Option<T>, SnapshotError> {
    doc.get(key)
        .filter(|value| !value.is_null())
        .map(T::deserialize)
        .transpose()
        .map_err(|source| SnapshotError::InvalidSection { section: key, source })
}

/// Ids are unique and every role belongs to its department.
fn check_employees(employees: &[Employee]) -> Result<(), SnapshotError> {
    let mut seen = HashSet::new();
    for employee in employees {
        if !seen.insert(employee.id) {
            return Err(SnapshotError::DuplicateEmployee(employee.id));
        }
        if !employee.department.allows(employee.role) {
            return Err(SnapshotError::RoleNotInDepartment {
                id: employee.id,
                role: employee.role,
                department: employee.department,
            });
        }
    }
    Ok(())
}

fn check_rosters(rosters: &Rosters) -> Result<(), SnapshotError> {
    for week in [WeekKey::CurrentWeek, WeekKey::NextWeek] {
        for (day, shifts) in rosters.week(week).iter() {
            for (index, shift) in shifts.iter().enumerate() {
                shift
                    .validate()
                    .map_err(|source| SnapshotError::InvalidShift {
                        week,
                        day,
                        index,
                        source,
                    })?;
            }
        }
    }
    Ok(())
}
