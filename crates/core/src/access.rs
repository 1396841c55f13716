//! Role and department checks in front of every engine operation.

use crate::model::Employee;
use crate::types::{Department, EmployeeId};

/// Authorization failure. The message never names the rule that failed.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("access denied")]
pub struct AccessDenied;

/// Something a signed-in employee wants to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Read the roster.
    ViewRoster,
    /// Generate today's briefing.
    Briefing,
    /// Add, edit, delete, copy or bulk-edit shifts.
    EditRoster,
    /// List, add or edit employees of a department.
    ManageEmployees,
    /// Delete an employee.
    DeleteEmployee(EmployeeId),
    /// Read or change payroll of a department.
    Payroll,
    /// Clock an employee in or out.
    Clock(EmployeeId),
    /// Read or overwrite the whole stored state. Kitchen managers only.
    RawState,
}

/// Decide whether `user` may perform `op` on something in `target`.
///
/// `target` is the department of the affected employee, where there is one.
///
/// # Errors
///
/// Returns `AccessDenied` when the operation is not permitted.
pub fn authorize(user: &Employee, op: Operation, target: Option<Department>) -> Result<(), AccessDenied> {
    let same_department = target.is_none_or(|dept| dept == user.department);

    let allowed = match op {
        Operation::ViewRoster => user.department.has_roster(),
        Operation::EditRoster | Operation::Briefing | Operation::RawState => {
            user.is_manager() && user.department.has_roster()
        }
        Operation::ManageEmployees | Operation::Payroll => user.is_manager() && same_department,
        Operation::DeleteEmployee(id) => user.is_manager() && same_department && id != user.id,
        Operation::Clock(id) => id == user.id || (user.is_manager() && same_department),
    };

    if allowed { Ok(()) } else { Err(AccessDenied) }
}

/// Employees whose clock `user` may see: the whole department for managers,
/// only themselves otherwise.
#[must_use]
pub fn clock_scope<'a>(user: &Employee, employees: &'a [Employee]) -> Vec<&'a Employee> {
    employees
        .iter()
        .filter(|e| {
            if user.is_manager() {
                e.department == user.department
            } else {
                e.id == user.id
            }
        })
        .collect()
}
