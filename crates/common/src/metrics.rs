//! Prometheus metrics for the console (default registry).

use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

/// Backend calls by endpoint and outcome (`ok`, `status`, `network`, `decode`).
pub static BACKEND_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "smm_console_backend_requests_total",
        "Total requests sent to the panel backend",
        &["endpoint", "outcome"]
    )
    .expect("register backend_requests_total")
});

/// Operator login attempts by result (`success`, `rejected`, `failed`).
pub static LOGIN_ATTEMPTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "smm_console_login_attempts_total",
        "Total operator login attempts",
        &["result"]
    )
    .expect("register login_attempts_total")
});

pub fn record_backend_request(endpoint: &str, outcome: &str) {
    BACKEND_REQUESTS_TOTAL.with_label_values(&[endpoint, outcome]).inc();
}

pub fn record_login_attempt(result: &str) {
    LOGIN_ATTEMPTS_TOTAL.with_label_values(&[result]).inc();
}

pub fn encode_metrics() -> (StatusCode, String) {
    // 确保指标在首次抓取前已注册
    Lazy::force(&BACKEND_REQUESTS_TOTAL);
    Lazy::force(&LOGIN_ATTEMPTS_TOTAL);

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
