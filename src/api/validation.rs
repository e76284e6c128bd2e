use validator::Validate;

use crate::api::errors::ApiError;

pub(crate) fn validate_payload<T: Validate>(payload: &T) -> Result<(), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Emails are matched case-insensitively and stored lowercased.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}
