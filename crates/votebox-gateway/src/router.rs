//! Axum router wiring.
//!
//! `/` serves the voting page (GET renders, POST votes or resets); the ops
//! endpoints sit alongside. Every route passes through the request metrics
//! middleware.

use axum::{middleware, routing::get, Router};

use crate::{app_state::AppState, obs, ops, web};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(web::index).post(web::vote))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .layer(middleware::from_fn_with_state(state.clone(), obs::http::track))
        .with_state(state)
}
