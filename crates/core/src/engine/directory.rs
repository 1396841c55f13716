//! Employee directory: PIN login and staff CRUD with roster cascade.

use crate::model::{Employee, EmployeeDraft, StateSnapshot, TimeLog};
use crate::types::{Department, EmployeeId, EmployeeRole, Pin, PinError};

/// Errors from directory operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("employee {0} not found")]
    NotFound(EmployeeId),
    #[error("Please fill out all fields. Name is required.")]
    EmptyName,
    #[error("Please fill out all fields. {0}")]
    InvalidPin(#[from] PinError),
    #[error("{role} is not a role in {department}")]
    RoleNotInDepartment {
        role: EmployeeRole,
        department: Department,
    },
    #[error("no employee id left above {0}")]
    IdsExhausted(EmployeeId),
}

/// Result of deleting an employee.
#[derive(Debug, Clone)]
pub struct Removal {
    pub employee: Employee,
    /// Shifts dropped because the employee was their only assignee.
    pub shifts_removed: usize,
}

/// Staff operations over the application state.
pub struct Directory<'a> {
    state: &'a mut StateSnapshot,
}

impl<'a> Directory<'a> {
    pub const fn new(state: &'a mut StateSnapshot) -> Self {
        Self { state }
    }

    /// Check a PIN for `id`. Unknown ids and wrong PINs fail identically.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::InvalidCredentials`.
    pub fn login(&self, id: EmployeeId, pin: &str) -> Result<&Employee, DirectoryError> {
        authenticate(&self.state.employees, id, pin)
    }

    /// Add a new employee with an id no employee or time log has used.
    ///
    /// # Errors
    ///
    /// Returns a validation error or `DirectoryError::IdsExhausted`; nothing
    /// is written.
    pub fn add(&mut self, draft: EmployeeDraft) -> Result<Employee, DirectoryError> {
        let (name, pin) = validate(&draft, None)?;
        let id = next_employee_id(self.state)?;

        let employee = Employee {
            id,
            name,
            role: draft.role,
            pin,
            department: draft.department,
        };
        self.state.employees.push(employee.clone());
        Ok(employee)
    }

    /// Overwrite an employee's fields. A blank PIN keeps the current one.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::NotFound` or a validation error.
    pub fn edit(&mut self, id: EmployeeId, draft: EmployeeDraft) -> Result<Employee, DirectoryError> {
        let employee = self
            .state
            .employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(DirectoryError::NotFound(id))?;

        let (name, pin) = validate(&draft, Some(&employee.pin))?;
        employee.name = name;
        employee.role = draft.role;
        employee.department = draft.department;
        employee.pin = pin;
        Ok(employee.clone())
    }

    /// Delete an employee and unassign them from every shift.
    ///
    /// Their time logs stay behind for audit.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::NotFound`.
    pub fn delete(&mut self, id: EmployeeId) -> Result<Removal, DirectoryError> {
        let pos = self
            .state
            .employees
            .iter()
            .position(|e| e.id == id)
            .ok_or(DirectoryError::NotFound(id))?;

        let employee = self.state.employees.remove(pos);
        let shifts_removed = self.state.rosters.remove_employee_everywhere(id);
        Ok(Removal {
            employee,
            shifts_removed,
        })
    }

    /// Time logs whose employee no longer exists.
    #[must_use]
    pub fn orphaned_logs(&self) -> Vec<&TimeLog> {
        orphaned_logs(self.state)
    }
}

/// Check a PIN for `id` against `employees`.
///
/// # Errors
///
/// Returns `DirectoryError::InvalidCredentials` for unknown ids and wrong PINs alike.
pub fn authenticate<'a>(employees: &'a [Employee], id: EmployeeId, pin: &str) -> Result<&'a Employee, DirectoryError> {
    find(employees, id)
        .filter(|e| e.pin.matches(pin))
        .ok_or(DirectoryError::InvalidCredentials)
}

/// Look up an employee by id.
#[must_use]
pub fn find(employees: &[Employee], id: EmployeeId) -> Option<&Employee> {
    employees.iter().find(|e| e.id == id)
}

/// Time logs whose employee no longer exists.
#[must_use]
pub fn orphaned_logs(state: &StateSnapshot) -> Vec<&TimeLog> {
    state
        .time_logs
        .iter()
        .filter(|log| find(&state.employees, log.employee_id).is_none())
        .collect()
}

/// One past the highest id held by an employee or referenced by a time log.
///
/// Ids of deleted employees stay taken while their logs remain.
fn next_employee_id(state: &StateSnapshot) -> Result<EmployeeId, DirectoryError> {
    let used = state
        .employees
        .iter()
        .map(|e| e.id)
        .chain(state.time_logs.iter().map(|log| log.employee_id))
        .max();

    match used {
        None => Ok(EmployeeId::new(1)),
        Some(max) => max
            .as_i64()
            .checked_add(1)
            .map(EmployeeId::new)
            .ok_or(DirectoryError::IdsExhausted(max)),
    }
}

fn validate(draft: &EmployeeDraft, current_pin: Option<&Pin>) -> Result<(String, Pin), DirectoryError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(DirectoryError::EmptyName);
    }

    if !draft.department.allows(draft.role) {
        return Err(DirectoryError::RoleNotInDepartment {
            role: draft.role,
            department: draft.department,
        });
    }

    let pin = match (draft.pin.trim(), current_pin) {
        ("", Some(current)) => current.clone(),
        (raw, _) => Pin::parse(raw)?,
    };

    Ok((name.to_owned(), pin))
}
