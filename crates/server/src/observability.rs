use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static JOB_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "job_board_requests_total",
        "Job directory requests by operation and outcome",
        &["operation", "outcome"]
    )
    .expect("register job_board_requests_total")
});

/// Count one handled request. `outcome` is `ok`, `client_error`, `not_found` or `error`.
pub fn record(operation: &str, outcome: &str) {
    JOB_REQUESTS_TOTAL.with_label_values(&[operation, outcome]).inc();
}

pub fn outcome_of<T>(res: &Result<T, crate::errors::JsonApiError>) -> &'static str {
    match res {
        Ok(_) => "ok",
        Err(e) if e.status == axum::http::StatusCode::NOT_FOUND => "not_found",
        Err(e) if e.status.is_client_error() => "client_error",
        Err(_) => "error",
    }
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
