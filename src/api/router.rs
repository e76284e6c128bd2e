use axum::{
    http::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN},
    http::{HeaderName, Method, Request, Response},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    normalize_path::NormalizePathLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::Span;

use crate::api::{auth, handlers, student, teacher};
use crate::core::{config::Settings, state::AppState};

pub(crate) fn router(state: AppState) -> Router {
    let cors = build_cors_layer(state.settings());

    let request_id_header = HeaderName::from_static("x-request-id");
    let request_id_header_for_span = request_id_header.clone();
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(move |request: &Request<_>| {
            let request_id = request
                .headers()
                .get(&request_id_header_for_span)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id
            )
        })
        .on_response(|response: &Response<axum::body::Body>, latency: Duration, _span: &Span| {
            let status_label = response.status().as_u16().to_string();
            metrics::counter!(
                "http_requests_total",
                "status" => status_label.clone()
            )
            .increment(1);
            metrics::histogram!(
                "http_request_duration_seconds",
                "status" => status_label
            )
            .record(latency.as_secs_f64());
        });

    let mut router: Router<AppState> = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health).head(handlers::health))
        .nest("/auth", auth::router())
        .nest("/student", student::router())
        .nest("/teacher", teacher::router())
        .layer(NormalizePathLayer::trim_trailing_slash())
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(trace_layer)
        .layer(cors);

    if state.settings().telemetry().prometheus_enabled {
        router = router.route("/metrics", get(handlers::metrics));
    }

    router.with_state(state)
}

fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origins = settings
        .cors()
        .origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect::<Vec<_>>();

    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ])
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            ACCEPT,
            ORIGIN,
            HeaderName::from_static("x-request-id"),
        ])
        .expose_headers([HeaderName::from_static("x-request-id")])
        .max_age(Duration::from_secs(3600));

    if origins.is_empty() {
        // Wildcard origin cannot be combined with allow_credentials
        base.allow_origin(Any)
    } else {
        base.allow_credentials(true)
            .allow_origin(AllowOrigin::list(origins))
    }
}

#[cfg(test)]
mod tests {
    use super::router;
    use axum::http::{header, Method, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::core::{config::Settings, metrics};
    use crate::test_support::{self, json_request, lazy_state, read_json};

    #[tokio::test]
    async fn root_reports_app_and_version() {
        let _guard = test_support::env_lock().await;
        test_support::set_test_env();

        let settings = Settings::load().expect("settings");
        let app = router(lazy_state(settings));

        let response = app.oneshot(json_request(Method::GET, "/", None, None)).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert_eq!(json["app"], "VeriLearn API");
        assert_eq!(json["status"], "running");
    }

    #[tokio::test]
    async fn metrics_disabled_returns_404() {
        let _guard = test_support::env_lock().await;
        test_support::set_test_env();

        let settings = Settings::load().expect("settings");
        let app = router(lazy_state(settings));

        let response =
            app.oneshot(json_request(Method::GET, "/metrics", None, None)).await.expect("response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn metrics_enabled_returns_200() {
        let _guard = test_support::env_lock().await;
        test_support::set_test_env();
        std::env::set_var("PROMETHEUS_ENABLED", "1");

        let settings = Settings::load().expect("settings");
        std::env::set_var("PROMETHEUS_ENABLED", "0");
        metrics::init(&settings).expect("metrics init");
        let app = router(lazy_state(settings));

        let response =
            app.oneshot(json_request(Method::GET, "/metrics", None, None)).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn protected_routes_require_bearer_token() {
        let _guard = test_support::env_lock().await;
        test_support::set_test_env();

        let settings = Settings::load().expect("settings");
        let app = router(lazy_state(settings));

        for uri in ["/auth/me", "/student/dashboard", "/teacher/class-analytics", "/teacher/students"] {
            let response = app
                .clone()
                .oneshot(json_request(Method::GET, uri, None, None))
                .await
                .expect("response");
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
            assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
        }

        let response = app
            .oneshot(json_request(Method::GET, "/student/results/1", Some("not-a-jwt"), None))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = read_json(response).await;
        assert_eq!(json["status"], 401);
        assert_eq!(json["detail"], "Invalid or expired token.");
    }

    #[tokio::test]
    async fn register_validates_before_touching_storage() {
        let _guard = test_support::env_lock().await;
        test_support::set_test_env();

        let settings = Settings::load().expect("settings");
        let app = router(lazy_state(settings));

        let response = app
            .oneshot(json_request(
                Method::POST,
                "/auth/register",
                None,
                Some(json!({ "name": "A", "email": "nope", "password": "123" })),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = read_json(response).await;
        assert_eq!(json["status"], 400);
    }
}
