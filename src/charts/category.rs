//! Employee categories derived from the HR position.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Broad employee category used to group mismatches.
///
/// # Example
///
/// ```
/// use payroll_audit::charts::EmployeeCategory;
///
/// assert_eq!(EmployeeCategory::from_position(Some("Adjunct Professor")), EmployeeCategory::Adjunct);
/// assert_eq!(EmployeeCategory::from_position(Some("Associate Professor")), EmployeeCategory::Faculty);
/// assert_eq!(EmployeeCategory::from_position(None), EmployeeCategory::Staff);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EmployeeCategory {
    /// Positions containing "Adjunct".
    Adjunct,
    /// Positions containing "Professor" but not "Adjunct".
    Faculty,
    /// Every other position, including an absent one.
    Staff,
}

impl EmployeeCategory {
    /// Every category, in chart order.
    pub const ALL: [EmployeeCategory; 3] = [
        EmployeeCategory::Adjunct,
        EmployeeCategory::Faculty,
        EmployeeCategory::Staff,
    ];

    /// Categorises a position. Matching is case-sensitive and "Adjunct" wins.
    pub fn from_position(position: Option<&str>) -> Self {
        match position {
            Some(p) if p.contains("Adjunct") => EmployeeCategory::Adjunct,
            Some(p) if p.contains("Professor") => EmployeeCategory::Faculty,
            _ => EmployeeCategory::Staff,
        }
    }

    /// The display label.
    pub fn label(self) -> &'static str {
        match self {
            EmployeeCategory::Adjunct => "Adjunct",
            EmployeeCategory::Faculty => "Faculty",
            EmployeeCategory::Staff => "Staff",
        }
    }
}

impl fmt::Display for EmployeeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjunct_takes_precedence_over_professor() {
        assert_eq!(
            EmployeeCategory::from_position(Some("Adjunct Professor")),
            EmployeeCategory::Adjunct
        );
        assert_eq!(
            EmployeeCategory::from_position(Some("Adjunct Lecturer")),
            EmployeeCategory::Adjunct
        );
    }

    #[test]
    fn test_professor_is_faculty() {
        assert_eq!(
            EmployeeCategory::from_position(Some("Professor")),
            EmployeeCategory::Faculty
        );
        assert_eq!(
            EmployeeCategory::from_position(Some("Assistant Professor")),
            EmployeeCategory::Faculty
        );
    }

    #[test]
    fn test_everything_else_is_staff() {
        assert_eq!(
            EmployeeCategory::from_position(Some("Systems Analyst")),
            EmployeeCategory::Staff
        );
        assert_eq!(
            EmployeeCategory::from_position(Some("professor")),
            EmployeeCategory::Staff
        );
        assert_eq!(EmployeeCategory::from_position(None), EmployeeCategory::Staff);
    }
}
