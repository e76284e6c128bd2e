use super::parsing::{
    env_first, env_optional, env_or_default, parse_bool, parse_cors_origins, parse_environment,
    parse_optional_u64, parse_u16, parse_u32, parse_u64,
};
use super::secret::load_or_create_secret_key;
use super::types::{
    AiSettings, ApiSettings, ConfigError, CorsSettings, DatabaseSettings, RedisSettings,
    RuntimeSettings, SecuritySettings, ServerHost, ServerPort, ServerSettings, Settings,
    TelemetrySettings,
};

const SUPPORTED_JWT_ALGORITHMS: &[&str] = &["HS256"];

impl Settings {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        let host = env_or_default("VERILEARN_HOST", "0.0.0.0");
        let port = env_or_default("VERILEARN_PORT", "10000");

        let environment = parse_environment(
            env_optional("VERILEARN_ENV").or_else(|| env_optional("ENVIRONMENT")),
        );
        let strict_config = env_optional("VERILEARN_STRICT_CONFIG")
            .map(|value| parse_bool(&value))
            .unwrap_or(false)
            || environment.is_production();

        let project_name = env_or_default("PROJECT_NAME", "VeriLearn API");
        let version = env_or_default("VERSION", env!("CARGO_PKG_VERSION"));

        let (secret_key, secret_key_from_env) = match env_optional("SECRET_KEY") {
            Some(value) => (value, true),
            None => (load_or_create_secret_key(), false),
        };

        let access_token_expire_minutes = parse_u64(
            "JWT_EXPIRATION_MINUTES",
            env_first(&["JWT_EXPIRATION_MINUTES", "ACCESS_TOKEN_EXPIRE_MINUTES"])
                .unwrap_or_else(|| "1440".to_string()),
        )?;
        let algorithm =
            env_first(&["JWT_ALGORITHM", "ALGORITHM"]).unwrap_or_else(|| "HS256".to_string());

        let cors_origins = parse_cors_origins(env_optional("BACKEND_CORS_ORIGINS"))?;

        let postgres_server = env_or_default("POSTGRES_SERVER", "localhost");
        let postgres_port = parse_u16("POSTGRES_PORT", env_or_default("POSTGRES_PORT", "5432"))?;
        let postgres_user = env_or_default("POSTGRES_USER", "verilearn");
        let postgres_password = env_or_default("POSTGRES_PASSWORD", "");
        let postgres_db = env_or_default("POSTGRES_DB", "verilearn_db");
        let database_url = env_optional("DATABASE_URL");
        let max_connections =
            parse_u32("DB_MAX_CONNECTIONS", env_or_default("DB_MAX_CONNECTIONS", "30"))?;
        let log_statements = env_optional("DEBUG").map(|value| parse_bool(&value)).unwrap_or(false);

        let redis_host = env_or_default("REDIS_HOST", "localhost");
        let redis_port = parse_u16("REDIS_PORT", env_or_default("REDIS_PORT", "6379"))?;
        let redis_db = parse_u16("REDIS_DB", env_or_default("REDIS_DB", "0"))?;
        let redis_password = env_or_default("REDIS_PASSWORD", "");

        let gemini_api_key = env_or_default("GEMINI_API_KEY", "");
        let analyzer_seed = parse_optional_u64("ANALYZER_SEED", env_optional("ANALYZER_SEED"))?;

        let log_level = env_or_default("VERILEARN_LOG_LEVEL", "info");
        let json = env_optional("VERILEARN_LOG_JSON").map(|value| parse_bool(&value)).unwrap_or(false);
        let prometheus_enabled =
            env_optional("PROMETHEUS_ENABLED").map(|value| parse_bool(&value)).unwrap_or(false);

        let settings = Self {
            server: ServerSettings {
                host: ServerHost::parse(host)?,
                port: ServerPort::parse(port)?,
            },
            runtime: RuntimeSettings { environment, strict_config },
            api: ApiSettings { project_name, version },
            security: SecuritySettings {
                secret_key,
                secret_key_from_env,
                access_token_expire_minutes,
                algorithm,
            },
            cors: CorsSettings { origins: cors_origins },
            database: DatabaseSettings {
                postgres_server,
                postgres_port,
                postgres_user,
                postgres_password,
                postgres_db,
                database_url,
                max_connections,
                log_statements,
            },
            redis: RedisSettings {
                host: redis_host,
                port: redis_port,
                db: redis_db,
                password: redis_password,
            },
            ai: AiSettings { gemini_api_key, analyzer_seed },
            telemetry: TelemetrySettings { log_level, json, prometheus_enabled },
        };

        settings.validate()?;
        Ok(settings)
    }

    pub(crate) fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host.0, self.server.port.0)
    }

    pub(crate) fn server_host(&self) -> &str {
        &self.server.host.0
    }

    pub(crate) fn server_port(&self) -> u16 {
        self.server.port.0
    }

    pub(crate) fn api(&self) -> &ApiSettings {
        &self.api
    }

    pub(crate) fn security(&self) -> &SecuritySettings {
        &self.security
    }

    pub(crate) fn cors(&self) -> &CorsSettings {
        &self.cors
    }

    pub(crate) fn database(&self) -> &DatabaseSettings {
        &self.database
    }

    pub(crate) fn redis(&self) -> &RedisSettings {
        &self.redis
    }

    pub(crate) fn ai(&self) -> &AiSettings {
        &self.ai
    }

    pub(crate) fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    pub(crate) fn runtime(&self) -> &RuntimeSettings {
        &self.runtime
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !SUPPORTED_JWT_ALGORITHMS.contains(&self.security.algorithm.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "JWT_ALGORITHM",
                value: self.security.algorithm.clone(),
            });
        }

        if self.security.access_token_expire_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "JWT_EXPIRATION_MINUTES",
                value: "0".to_string(),
            });
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "DB_MAX_CONNECTIONS",
                value: "0".to_string(),
            });
        }

        if !(self.runtime.strict_config || self.runtime.environment.is_production()) {
            return Ok(());
        }

        if !self.security.secret_key_from_env {
            return Err(ConfigError::MissingSecret("SECRET_KEY"));
        }
        if self.database.database_url.is_none() && self.database.postgres_password.is_empty() {
            return Err(ConfigError::MissingSecret("POSTGRES_PASSWORD"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Environment;
    use crate::test_support;

    #[tokio::test]
    async fn load_applies_defaults() {
        let _guard = test_support::env_lock().await;
        test_support::set_test_env();
        std::env::remove_var("JWT_EXPIRATION_MINUTES");
        std::env::remove_var("ACCESS_TOKEN_EXPIRE_MINUTES");
        std::env::remove_var("VERILEARN_PORT");
        std::env::remove_var("BACKEND_CORS_ORIGINS");
        std::env::remove_var("ANALYZER_SEED");

        let settings = Settings::load().expect("settings");

        assert_eq!(settings.server_port(), 10000);
        assert_eq!(settings.security().access_token_expire_minutes, 1440);
        assert_eq!(settings.security().algorithm, "HS256");
        assert_eq!(settings.api().project_name, "VeriLearn API");
        assert_eq!(settings.cors().origins.len(), 3);
        assert_eq!(settings.ai().analyzer_seed, None);
        assert_eq!(settings.runtime().environment, Environment::Test);
    }

    #[tokio::test]
    async fn legacy_token_lifetime_key_is_honoured() {
        let _guard = test_support::env_lock().await;
        test_support::set_test_env();
        std::env::remove_var("JWT_EXPIRATION_MINUTES");
        std::env::set_var("ACCESS_TOKEN_EXPIRE_MINUTES", "15");

        let settings = Settings::load().expect("settings");
        std::env::remove_var("ACCESS_TOKEN_EXPIRE_MINUTES");

        assert_eq!(settings.security().access_token_expire_minutes, 15);
    }

    #[tokio::test]
    async fn rejects_unsupported_algorithm() {
        let _guard = test_support::env_lock().await;
        test_support::set_test_env();
        std::env::set_var("JWT_ALGORITHM", "RS256");

        let result = Settings::load();
        std::env::remove_var("JWT_ALGORITHM");

        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { field: "JWT_ALGORITHM", .. })
        ));
    }

    #[tokio::test]
    async fn strict_mode_requires_explicit_secret() {
        let _guard = test_support::env_lock().await;
        test_support::set_test_env();
        std::env::remove_var("SECRET_KEY");
        std::env::set_var("VERILEARN_STRICT_CONFIG", "1");

        let result = Settings::load();
        std::env::set_var("VERILEARN_STRICT_CONFIG", "0");

        assert!(matches!(result, Err(ConfigError::MissingSecret("SECRET_KEY"))));
    }
}
