//! Shared application state for the vote server.
//!
//! Owns the resolved config, the observed vote store (wrapping whatever
//! `KvStore` the binary or a test hands in), and the metrics registry.

use std::sync::Arc;

use votebox_core::error::Result;
use votebox_core::{KvStore, VoteOptions, VoteStore};

use crate::config::VoteConfig;
use crate::obs::{ObservedVotes, VoteMetrics};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    votes: ObservedVotes,
    metrics: Arc<VoteMetrics>,
}

struct AppStateInner {
    cfg: VoteConfig,
}

impl AppState {
    pub fn new(cfg: VoteConfig, kv: Arc<dyn KvStore>) -> Self {
        let metrics = Arc::new(VoteMetrics::default());
        let votes = ObservedVotes::new(VoteStore::new(kv), Arc::clone(&metrics));
        Self {
            inner: Arc::new(AppStateInner { cfg }),
            votes,
            metrics,
        }
    }

    /// Materialize both counters. Called once before serving; a failure here
    /// is fatal for the process.
    pub async fn init_counters(&self) -> Result<()> {
        self.votes.ensure_initialized(self.options()).await
    }

    pub fn cfg(&self) -> &VoteConfig {
        &self.inner.cfg
    }

    pub fn options(&self) -> &VoteOptions {
        &self.inner.cfg.options
    }

    pub fn title(&self) -> &str {
        &self.inner.cfg.title
    }

    pub fn votes(&self) -> &ObservedVotes {
        &self.votes
    }

    pub fn metrics(&self) -> Arc<VoteMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn set_draining(&self) {
        self.metrics.set_draining();
    }

    pub fn is_draining(&self) -> bool {
        self.metrics.is_draining()
    }
}
