//! Prometheus metrics for post-service.
//!
//! Exposes request and store collectors and an HTTP handler for the `/metrics` endpoint.

use actix_web::HttpResponse;
use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};

lazy_static! {
    /// Total HTTP requests by method and response status.
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "Total HTTP requests segmented by method and status",
        &["method", "status"]
    )
    .expect("failed to register http_requests_total");

    /// HTTP request latency by method.
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request duration segmented by method",
        &["method"]
    )
    .expect("failed to register http_request_duration_seconds");

    /// Store operations by operation name and outcome (ok/not_found/error).
    pub static ref POST_STORE_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "post_store_operations_total",
        "Post store operations segmented by operation and outcome",
        &["operation", "outcome"]
    )
    .expect("failed to register post_store_operations_total");
}

pub fn record_store_operation(operation: &str, outcome: &str) {
    POST_STORE_OPERATIONS_TOTAL
        .with_label_values(&[operation, outcome])
        .inc();
}

/// Actix handler that renders Prometheus metrics in text format.
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
