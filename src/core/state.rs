use std::sync::Arc;

use sqlx::PgPool;

use crate::core::{config::Settings, redis::RedisHandle};
use crate::services::evaluator::LearningAnalyzer;

#[derive(Clone)]
pub(crate) struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    settings: Settings,
    db: PgPool,
    redis: RedisHandle,
    analyzer: Arc<dyn LearningAnalyzer>,
}

impl AppState {
    pub(crate) fn new(
        settings: Settings,
        db: PgPool,
        redis: RedisHandle,
        analyzer: Arc<dyn LearningAnalyzer>,
    ) -> Self {
        Self { inner: Arc::new(InnerState { settings, db, redis, analyzer }) }
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    pub(crate) fn db(&self) -> &PgPool {
        &self.inner.db
    }

    pub(crate) fn redis(&self) -> &RedisHandle {
        &self.inner.redis
    }

    pub(crate) fn analyzer(&self) -> &dyn LearningAnalyzer {
        self.inner.analyzer.as_ref()
    }
}
