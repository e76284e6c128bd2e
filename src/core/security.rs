use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Validation};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{Duration, OffsetDateTime};

use crate::core::config::Settings;
use crate::db::types::UserRole;

const ARGON2_MEMORY_KIB: u32 = 19_456;
const ARGON2_TIME: u32 = 2;
const ARGON2_PARALLELISM: u32 = 1;

#[derive(Debug, Error)]
pub(crate) enum SecurityError {
    #[error("password hashing failed")]
    Hashing,
    #[error("password verification failed")]
    Verification,
    #[error("jwt encoding failed")]
    JwtEncoding,
    #[error("jwt decoding failed")]
    JwtDecoding,
    #[error("token subject is not a user id: {0}")]
    InvalidSubject(String),
    #[error("unsupported jwt algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Claims {
    pub(crate) sub: String,
    pub(crate) role: UserRole,
    pub(crate) exp: i64,
}

impl Claims {
    pub(crate) fn user_id(&self) -> Result<i64, SecurityError> {
        self.sub.parse().map_err(|_| SecurityError::InvalidSubject(self.sub.clone()))
    }
}

fn hasher() -> Result<Argon2<'static>, argon2::Error> {
    let params = argon2::Params::new(ARGON2_MEMORY_KIB, ARGON2_TIME, ARGON2_PARALLELISM, None)?;
    Ok(Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params))
}

pub(crate) fn hash_password(password: &str) -> Result<String, SecurityError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = hasher().map_err(|_| SecurityError::Hashing)?;

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| SecurityError::Hashing)?
        .to_string();

    Ok(hash)
}

pub(crate) fn verify_password(password: &str, hash: &str) -> Result<bool, SecurityError> {
    let parsed = PasswordHash::new(hash).map_err(|_| SecurityError::Verification)?;
    let argon2 = hasher().map_err(|_| SecurityError::Verification)?;

    match argon2.verify_password(password.as_bytes(), &parsed) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(_) => Err(SecurityError::Verification),
    }
}

pub(crate) fn create_access_token(
    user_id: i64,
    role: UserRole,
    settings: &Settings,
    expires_in: Option<Duration>,
) -> Result<String, SecurityError> {
    let algorithm = algorithm_from_settings(settings)?;
    let expire = OffsetDateTime::now_utc()
        + expires_in.unwrap_or_else(|| {
            Duration::minutes(settings.security().access_token_expire_minutes as i64)
        });

    let claims = Claims { sub: user_id.to_string(), role, exp: expire.unix_timestamp() };

    encode(
        &jsonwebtoken::Header::new(algorithm),
        &claims,
        &EncodingKey::from_secret(settings.security().secret_key.as_bytes()),
    )
    .map_err(|_| SecurityError::JwtEncoding)
}

pub(crate) fn verify_token(token: &str, settings: &Settings) -> Result<Claims, SecurityError> {
    let algorithm = algorithm_from_settings(settings)?;
    let mut validation = Validation::new(algorithm);
    validation.validate_exp = true;
    validation.required_spec_claims.insert("exp".to_string());
    validation.required_spec_claims.insert("sub".to_string());

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.security().secret_key.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| SecurityError::JwtDecoding)
}

fn algorithm_from_settings(settings: &Settings) -> Result<Algorithm, SecurityError> {
    match settings.security().algorithm.as_str() {
        "HS256" => Ok(Algorithm::HS256),
        other => Err(SecurityError::UnsupportedAlgorithm(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[test]
    fn password_hash_roundtrip() {
        let hash = hash_password("correct-horse-battery-staple").expect("hash");
        assert!(verify_password("correct-horse-battery-staple", &hash).unwrap());
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn verify_rejects_malformed_hash() {
        assert!(matches!(verify_password("pw", "not-a-phc-string"), Err(SecurityError::Verification)));
    }

    #[tokio::test]
    async fn jwt_carries_user_id_and_role() {
        let _guard = test_support::env_lock().await;
        test_support::set_test_env();
        let settings = Settings::load().expect("settings");

        let token = create_access_token(42, UserRole::Teacher, &settings, Some(Duration::minutes(1)))
            .expect("token");
        let claims = verify_token(&token, &settings).expect("claims");

        assert_eq!(claims.user_id().expect("user id"), 42);
        assert_eq!(claims.role, UserRole::Teacher);
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let _guard = test_support::env_lock().await;
        test_support::set_test_env();
        let settings = Settings::load().expect("settings");

        let token = create_access_token(7, UserRole::Student, &settings, Some(Duration::minutes(-5)))
            .expect("token");

        assert!(matches!(verify_token(&token, &settings), Err(SecurityError::JwtDecoding)));
    }

    #[test]
    fn non_numeric_subject_is_invalid() {
        let claims = Claims { sub: "abc".to_string(), role: UserRole::Student, exp: 0 };
        assert!(matches!(claims.user_id(), Err(SecurityError::InvalidSubject(_))));
    }
}
