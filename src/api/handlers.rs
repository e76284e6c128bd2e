use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::collections::HashMap;

use crate::core::metrics;
use crate::core::redis::RedisHealth;
use crate::core::state::AppState;
use crate::repositories;
use crate::schemas::{HealthResponse, RootResponse};

pub(crate) async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    let api = state.settings().api();
    Json(RootResponse {
        app: api.project_name.clone(),
        version: api.version.clone(),
        status: "running".to_string(),
        database: "PostgreSQL".to_string(),
    })
}

pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut status = "healthy".to_string();
    let mut components = HashMap::new();

    let redis = state.redis().health().await;
    if matches!(redis, RedisHealth::Unhealthy(_)) {
        status = "degraded".to_string();
    }
    components.insert("redis".to_string(), redis.describe());

    match repositories::health::ping(state.db()).await {
        Ok(()) => {
            components.insert("database".to_string(), "healthy".to_string());
        }
        Err(err) => {
            components.insert("database".to_string(), format!("unhealthy: {err}"));
            status = "unhealthy".to_string();
        }
    }

    Json(HealthResponse { service: "verilearn-api".to_string(), status, components })
}

pub(crate) async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    if !state.settings().telemetry().prometheus_enabled {
        return StatusCode::NOT_FOUND.into_response();
    }

    match metrics::render() {
        Some(body) => ([(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
            .into_response(),
        None => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}
