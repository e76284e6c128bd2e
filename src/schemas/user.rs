use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_rfc3339;
use crate::db::models::User;
use crate::db::types::UserRole;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct UserRegister {
    #[validate(length(min = 2, max = 100, message = "name must be 2-100 characters"))]
    pub(crate) name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub(crate) email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub(crate) password: String,
    #[serde(default = "default_user_role")]
    pub(crate) role: UserRole,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct UserLogin {
    #[validate(email(message = "email must be a valid address"))]
    pub(crate) email: String,
    pub(crate) password: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct UserResponse {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) role: UserRole,
    pub(crate) created_at: String,
}

impl UserResponse {
    pub(crate) fn from_db(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: format_rfc3339(user.created_at),
        }
    }
}

fn default_user_role() -> UserRole {
    UserRole::Student
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_defaults_to_student() {
        let payload: UserRegister = serde_json::from_value(serde_json::json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "secret1"
        }))
        .expect("payload");
        assert_eq!(payload.role, UserRole::Student);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn register_rejects_short_fields() {
        let payload = UserRegister {
            name: "A".to_string(),
            email: "not-an-email".to_string(),
            password: "12345".to_string(),
            role: UserRole::Teacher,
        };
        let errors = payload.validate().expect_err("invalid payload");
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn unknown_role_is_rejected() {
        let result: Result<UserRegister, _> = serde_json::from_value(serde_json::json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "secret1",
            "role": "admin"
        }));
        assert!(result.is_err());
    }
}
