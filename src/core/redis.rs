use std::sync::Arc;

use redis::aio::ConnectionManager;
use redis::{cmd, Client, RedisError, Script};
use tokio::sync::RwLock;

const FIXED_WINDOW_SCRIPT: &str = r#"
    local current = redis.call("INCR", KEYS[1])
    if current == 1 then
        redis.call("EXPIRE", KEYS[1], ARGV[1])
    end
    return current
"#;

/// Optional Redis connection. Every operation degrades gracefully while
/// disconnected: health reports `Disconnected` and rate limits allow.
#[derive(Clone)]
pub(crate) struct RedisHandle {
    url: String,
    manager: Arc<RwLock<Option<ConnectionManager>>>,
}

#[derive(Debug, Clone)]
pub(crate) enum RedisHealth {
    Healthy,
    Disconnected,
    Unhealthy(String),
}

impl RedisHealth {
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Healthy => "healthy".to_string(),
            Self::Disconnected => "disconnected".to_string(),
            Self::Unhealthy(error) => format!("unhealthy: {error}"),
        }
    }
}

/// Fixed-window limit: at most `limit` hits per `window_seconds` for one key.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RateLimit {
    pub(crate) scope: &'static str,
    pub(crate) limit: u64,
    pub(crate) window_seconds: u64,
}

impl RateLimit {
    pub(crate) fn key(&self, identity: &str) -> String {
        format!("rl:{}:{}", self.scope, identity.to_ascii_lowercase())
    }
}

impl RedisHandle {
    pub(crate) fn new(url: String) -> Self {
        Self { url, manager: Arc::new(RwLock::new(None)) }
    }

    pub(crate) async fn connect(&self) -> Result<(), RedisError> {
        let client = Client::open(self.url.clone())?;
        let manager = ConnectionManager::new(client).await?;
        *self.manager.write().await = Some(manager);
        Ok(())
    }

    pub(crate) async fn disconnect(&self) {
        *self.manager.write().await = None;
    }

    async fn connection(&self) -> Option<ConnectionManager> {
        self.manager.read().await.clone()
    }

    pub(crate) async fn health(&self) -> RedisHealth {
        let Some(mut manager) = self.connection().await else {
            return RedisHealth::Disconnected;
        };

        match cmd("PING").query_async::<_, String>(&mut manager).await {
            Ok(_) => RedisHealth::Healthy,
            Err(err) => RedisHealth::Unhealthy(err.to_string()),
        }
    }

    pub(crate) async fn rate_limit(
        &self,
        key: &str,
        limit: u64,
        window_seconds: u64,
    ) -> Result<bool, RedisError> {
        let Some(mut manager) = self.connection().await else {
            return Ok(true);
        };

        let current: i64 = Script::new(FIXED_WINDOW_SCRIPT)
            .key(key)
            .arg(window_seconds as i64)
            .invoke_async(&mut manager)
            .await?;

        Ok(current <= limit as i64)
    }

    /// Applies `policy` to `identity`. Redis errors are logged and treated as allowed.
    pub(crate) async fn allow(&self, policy: RateLimit, identity: &str) -> bool {
        let key = policy.key(identity);
        match self.rate_limit(&key, policy.limit, policy.window_seconds).await {
            Ok(allowed) => allowed,
            Err(err) => {
                tracing::warn!(error = %err, scope = policy.scope, "Rate limit check failed");
                true
            }
        }
    }
}
