//! Departments and the roles that belong to them.

use serde::{Deserialize, Serialize};

/// A restaurant department.
///
/// Departments silo staff visibility: managers only act on employees of their
/// own department, and only the Kitchen plans a weekly roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Department {
    /// Kitchen brigade. The only department with a roster.
    #[default]
    Kitchen,
    /// Front-of-house.
    #[serde(rename = "FOH")]
    Foh,
    /// Stewarding (dish and cleaning crew).
    Stewarding,
}

impl Department {
    /// All departments, in display order.
    pub const ALL: [Self; 3] = [Self::Kitchen, Self::Foh, Self::Stewarding];

    /// Roles an employee of this department may hold.
    #[must_use]
    pub const fn roles(self) -> &'static [EmployeeRole] {
        match self {
            Self::Kitchen => &[
                EmployeeRole::Manager,
                EmployeeRole::Chef,
                EmployeeRole::Cook,
                EmployeeRole::KitchenHand,
            ],
            Self::Foh => &[
                EmployeeRole::Manager,
                EmployeeRole::Supervisor,
                EmployeeRole::BarTender,
                EmployeeRole::FoodRunner,
            ],
            Self::Stewarding => &[
                EmployeeRole::Manager,
                EmployeeRole::Supervisor,
                EmployeeRole::KitchenHand,
            ],
        }
    }

    /// Whether `role` may be held by an employee of this department.
    #[must_use]
    pub fn allows(self, role: EmployeeRole) -> bool {
        self.roles().contains(&role)
    }

    /// Whether this department plans a weekly roster.
    #[must_use]
    pub const fn has_roster(self) -> bool {
        matches!(self, Self::Kitchen)
    }

    /// Wire name of the department.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kitchen => "Kitchen",
            Self::Foh => "FOH",
            Self::Stewarding => "Stewarding",
        }
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Department {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kitchen" => Ok(Self::Kitchen),
            "foh" | "front-of-house" => Ok(Self::Foh),
            "stewarding" => Ok(Self::Stewarding),
            _ => Err(format!("invalid department: {s}")),
        }
    }
}

/// Job role of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmployeeRole {
    Manager,
    Chef,
    Cook,
    #[serde(rename = "Kitchen Hand")]
    KitchenHand,
    Supervisor,
    #[serde(rename = "Bar Tender")]
    BarTender,
    #[serde(rename = "Food Runner")]
    FoodRunner,
}

impl EmployeeRole {
    /// Display name, identical to the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manager => "Manager",
            Self::Chef => "Chef",
            Self::Cook => "Cook",
            Self::KitchenHand => "Kitchen Hand",
            Self::Supervisor => "Supervisor",
            Self::BarTender => "Bar Tender",
            Self::FoodRunner => "Food Runner",
        }
    }

    /// Whether this role carries manager permissions.
    #[must_use]
    pub const fn is_manager(self) -> bool {
        matches!(self, Self::Manager)
    }
}

impl std::fmt::Display for EmployeeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_department_wire_names() {
        assert_eq!(serde_json::to_string(&Department::Foh).unwrap(), "\"FOH\"");
        let dept: Department = serde_json::from_str("\"Stewarding\"").unwrap();
        assert_eq!(dept, Department::Stewarding);
    }

    #[test]
    fn test_department_from_str_is_case_insensitive() {
        assert_eq!("foh".parse::<Department>().unwrap(), Department::Foh);
        assert_eq!("KITCHEN".parse::<Department>().unwrap(), Department::Kitchen);
        assert!("bar".parse::<Department>().is_err());
    }

    #[test]
    fn test_role_wire_names_use_spaces() {
        assert_eq!(
            serde_json::to_string(&EmployeeRole::KitchenHand).unwrap(),
            "\"Kitchen Hand\""
        );
        let role: EmployeeRole = serde_json::from_str("\"Bar Tender\"").unwrap();
        assert_eq!(role, EmployeeRole::BarTender);
    }

    #[test]
    fn test_every_department_allows_manager() {
        for dept in Department::ALL {
            assert!(dept.allows(EmployeeRole::Manager));
        }
    }

    #[test]
    fn test_roles_are_department_scoped() {
        assert!(Department::Kitchen.allows(EmployeeRole::Chef));
        assert!(!Department::Foh.allows(EmployeeRole::Chef));
        assert!(!Department::Kitchen.allows(EmployeeRole::BarTender));
        assert!(Department::Stewarding.allows(EmployeeRole::KitchenHand));
    }

    #[test]
    fn test_only_kitchen_has_roster() {
        assert!(Department::Kitchen.has_roster());
        assert!(!Department::Foh.has_roster());
        assert!(!Department::Stewarding.has_roster());
    }
}
