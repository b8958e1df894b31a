//! Request metrics middleware.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::app_state::AppState;

pub async fn track(State(app): State<AppState>, req: Request, next: Next) -> Response {
    let method = req.method().as_str().to_string();
    let start = Instant::now();

    let resp = next.run(req).await;

    let status = resp.status();
    let metrics = app.metrics();
    metrics
        .http_requests
        .inc(&[("method", method.as_str()), ("status", status.as_str())]);
    metrics
        .http_duration
        .observe(&[("method", method.as_str())], start.elapsed());
    if status.is_server_error() {
        tracing::warn!(%method, status = status.as_u16(), "request failed");
    }
    resp
}
