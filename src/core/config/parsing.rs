use std::env;

use super::types::{ConfigError, Environment};

const DEFAULT_CORS_ORIGINS: &[&str] =
    &["http://localhost:5173", "http://localhost:3000", "http://127.0.0.1:5173"];

pub(super) fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

pub(super) fn env_or_default(key: &str, default: &str) -> String {
    env_optional(key).unwrap_or_else(|| default.to_string())
}

/// First non-empty value among `keys`, in order.
pub(super) fn env_first(keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| env_optional(key))
}

pub(super) fn parse_u16(field: &'static str, value: String) -> Result<u16, ConfigError> {
    value.parse::<u16>().map_err(|_| ConfigError::InvalidValue { field, value })
}

pub(super) fn parse_u32(field: &'static str, value: String) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|_| ConfigError::InvalidValue { field, value })
}

pub(super) fn parse_u64(field: &'static str, value: String) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidValue { field, value })
}

pub(super) fn parse_optional_u64(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<u64>, ConfigError> {
    value.map(|raw| parse_u64(field, raw)).transpose()
}

pub(super) fn parse_cors_origins(value: Option<String>) -> Result<Vec<String>, ConfigError> {
    let Some(raw) = value else {
        return Ok(default_cors_origins());
    };

    if raw.trim().is_empty() {
        return Ok(default_cors_origins());
    }

    if raw.trim_start().starts_with('[') {
        let parsed: Vec<String> =
            serde_json::from_str(&raw).map_err(|_| ConfigError::InvalidCors(raw.clone()))?;
        if parsed.is_empty() {
            return Ok(default_cors_origins());
        }
        return Ok(parsed);
    }

    let items: Vec<String> = raw
        .split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect();

    if items.is_empty() {
        return Ok(default_cors_origins());
    }

    Ok(items)
}

pub(super) fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "on" | "ON")
}

pub(super) fn parse_environment(value: Option<String>) -> Environment {
    match value.as_deref().map(|item| item.to_lowercase()) {
        Some(ref val) if val == "production" || val == "prod" => Environment::Production,
        Some(ref val) if val == "staging" => Environment::Staging,
        Some(ref val) if val == "test" || val == "testing" => Environment::Test,
        _ => Environment::Development,
    }
}

fn default_cors_origins() -> Vec<String> {
    DEFAULT_CORS_ORIGINS.iter().map(|item| item.to_string()).collect()
}
