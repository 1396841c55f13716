//! Staff records.

use serde::{Deserialize, Serialize};

use crate::types::{Department, EmployeeId, EmployeeRole, Pin};

/// A member of staff.
///
/// Legacy records without a `department` hydrate into the Kitchen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub role: EmployeeRole,
    pub pin: Pin,
    #[serde(default)]
    pub department: Department,
}

impl Employee {
    /// Whether this employee has manager permissions.
    #[must_use]
    pub const fn is_manager(&self) -> bool {
        self.role.is_manager()
    }
}

/// Employee fields as submitted by the management form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    pub name: String,
    pub role: EmployeeRole,
    pub department: Department,
    pub pin: String,
}

/// Public view of an employee, without the PIN.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeSummary {
    pub id: EmployeeId,
    pub name: String,
    pub role: EmployeeRole,
    pub department: Department,
}

impl From<&Employee> for EmployeeSummary {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name.clone(),
            role: employee.role,
            department: employee.department,
        }
    }
}

/// The default staff list for a fresh install.
#[must_use]
pub fn seed_employees() -> Vec<Employee> {
    const STAFF: [(&str, EmployeeRole); 10] = [
        ("Huda", EmployeeRole::Manager),
        ("Suman", EmployeeRole::Manager),
        ("Luca", EmployeeRole::Chef),
        ("Dennis", EmployeeRole::Chef),
        ("Enrico", EmployeeRole::Chef),
        ("Sundesh", EmployeeRole::Chef),
        ("Siyam", EmployeeRole::Chef),
        ("Taki", EmployeeRole::Chef),
        ("Tanbir", EmployeeRole::Chef),
        ("Progganur", EmployeeRole::Chef),
    ];

    let pin = Pin::seed_default();

    (1_i64..)
        .zip(STAFF)
        .map(|(id, (name, role))| Employee {
            id: EmployeeId::new(id),
            name: name.to_owned(),
            role,
            pin: pin.clone(),
            department: Department::Kitchen,
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_department_defaults_to_kitchen() {
        let json = r#"{"id":3,"name":"Luca","role":"Chef","pin":"1234"}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.department, Department::Kitchen);
        assert_eq!(employee.id, EmployeeId::new(3));
    }

    #[test]
    fn test_employee_rejects_bad_pin() {
        let json = r#"{"id":3,"name":"Luca","role":"Chef","pin":"12"}"#;
        assert!(serde_json::from_str::<Employee>(json).is_err());
    }

    #[test]
    fn test_seed_has_two_managers_and_eight_chefs() {
        let staff = seed_employees();
        assert_eq!(staff.len(), 10);
        assert_eq!(staff.iter().filter(|e| e.is_manager()).count(), 2);
        assert_eq!(
            staff
                .iter()
                .filter(|e| e.role == EmployeeRole::Chef)
                .count(),
            8
        );
        assert!(staff.iter().all(|e| e.pin.matches("1234")));
        assert!(staff.iter().all(|e| e.department == Department::Kitchen));
        assert_eq!(staff[0].name, "Huda");
        assert_eq!(staff[9].id, EmployeeId::new(10));
    }

    #[test]
    fn test_summary_omits_pin() {
        let staff = seed_employees();
        let json = serde_json::to_value(EmployeeSummary::from(&staff[0])).unwrap();
        assert!(json.get("pin").is_none());
        assert_eq!(json["department"], "Kitchen");
    }
}
