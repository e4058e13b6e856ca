pub mod auth;
pub mod dashboard;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use common::{metrics, types::Health};

use crate::auth::ConsoleState;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics_handler() -> (StatusCode, String) {
    metrics::encode_metrics()
}

/// Build the console router: login, dashboard actions, health and metrics.
pub fn build_router(state: ConsoleState) -> Router {
    Router::new()
        .route("/", get(auth::index))
        .route("/login", get(auth::login_page).post(auth::login_submit))
        .route("/dashboard", get(dashboard::show))
        .route("/dashboard/tab", post(dashboard::select_tab))
        .route("/services", post(dashboard::create_service))
        .route("/settings", post(dashboard::save_settings))
        .route("/healthz", get(health))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        ))
}
