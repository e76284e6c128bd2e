use serde::{Deserialize, Serialize};
use sqlx::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "userrole", rename_all = "lowercase")]
pub(crate) enum UserRole {
    Student,
    Teacher,
}

impl UserRole {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
        }
    }
}

/// `Submitted` rows exist only between insert and the first evaluation;
/// the submission flow writes `Analyzed`, the follow-up flow `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "assignmentstatus", rename_all = "lowercase")]
pub(crate) enum AssignmentStatus {
    Submitted,
    Analyzed,
    Completed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        assert_eq!(serde_json::to_value(UserRole::Teacher).unwrap(), "teacher");
        assert_eq!(serde_json::from_str::<UserRole>("\"student\"").unwrap(), UserRole::Student);
        assert!(serde_json::from_str::<UserRole>("\"admin\"").is_err());
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(AssignmentStatus::Analyzed).unwrap(), "analyzed");
    }
}
