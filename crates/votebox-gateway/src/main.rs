//! votebox server
//!
//! - `GET /` renders the two tallies, `POST /` votes or resets
//! - Counters live in Redis; the store is checked at startup and an
//!   unreachable store stops the process (fail fast)
//! - `/healthz`, `/readyz`, `/metrics` for operators

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use votebox_core::error::{Result, VoteError};
use votebox_gateway::{app_state::AppState, config, infra::RedisKv, router};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, code = e.client_code().as_str(), "votebox stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cfg = config::load()?;
    tracing::info!(
        title = %cfg.title,
        option_a = %cfg.options.a(),
        option_b = %cfg.options.b(),
        "config resolved"
    );

    let kv = RedisKv::connect(&cfg.store).await?;

    let state = AppState::new(cfg, Arc::new(kv.clone()));
    state.init_counters().await?;

    let app = router::build_router(state.clone());

    let listen = state.cfg().listen;
    tracing::info!(%listen, "votebox starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| VoteError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .map_err(|e| VoteError::Internal(format!("server failed: {e}")))?;

    kv.quit().await;
    Ok(())
}

async fn shutdown_signal(state: AppState) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    state.set_draining();
    tracing::info!("signal received, starting graceful shutdown");
}
