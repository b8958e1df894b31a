//! Telemetry decorator around `VoteStore`.
//!
//! Handlers call `ObservedVotes`, never `VoteStore` directly. Each operation
//! runs in a `vote_store` span and feeds the metrics registry; `VoteStore`
//! itself stays free of telemetry.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use tracing::Instrument;

use votebox_core::{Result, Tally, VoteOptions, VoteStore};

use super::metrics::VoteMetrics;

#[derive(Clone)]
pub struct ObservedVotes {
    store: VoteStore,
    metrics: Arc<VoteMetrics>,
}

impl ObservedVotes {
    pub fn new(store: VoteStore, metrics: Arc<VoteMetrics>) -> Self {
        Self { store, metrics }
    }

    pub async fn ensure_initialized(&self, options: &VoteOptions) -> Result<()> {
        self.observe(
            "ensure_initialized",
            "*",
            self.store.ensure_initialized(options.a(), options.b()),
        )
        .await
    }

    pub async fn increment(&self, name: &str) -> Result<u64> {
        let count = self.observe("increment", name, self.store.increment(name)).await?;
        self.metrics.votes.inc(&[("option", name)]);
        self.metrics.tally.set(&[("option", name)], gauge_value(count));
        tracing::info!(option = %name, votes = count, "vote cast");
        Ok(count)
    }

    /// Reset both counters, then read them back for the log line. The
    /// read-back can observe a later vote; it is a log, not a guarantee.
    pub async fn reset(&self, options: &VoteOptions) -> Result<Tally> {
        self.observe("reset", "*", self.store.reset(options.a(), options.b()))
            .await?;
        self.metrics.resets.inc(&[]);

        let tally = self.tally(options).await?;
        tracing::info!(
            option_a = %tally.a.0,
            votes_a = tally.a.1,
            option_b = %tally.b.0,
            votes_b = tally.b.1,
            "votes reset"
        );
        Ok(tally)
    }

    pub async fn tally(&self, options: &VoteOptions) -> Result<Tally> {
        let tally = self.observe("tally", "*", self.store.tally(options)).await?;
        for (name, count) in [&tally.a, &tally.b] {
            self.metrics.tally.set(&[("option", name.as_str())], gauge_value(*count));
        }
        Ok(tally)
    }

    pub async fn ping(&self) -> Result<()> {
        self.observe("ping", "*", self.store.ping()).await
    }

    async fn observe<T, F>(&self, op: &'static str, counter: &str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let span = tracing::info_span!("vote_store", op, counter);
        let start = Instant::now();
        let res = fut.instrument(span).await;
        let elapsed = start.elapsed();

        let outcome = match &res {
            Ok(_) => "ok",
            Err(e) => {
                tracing::warn!(op, counter, error = %e, "vote store operation failed");
                e.client_code().as_str()
            }
        };
        self.metrics
            .store_ops
            .inc(&[("op", op), ("outcome", outcome)]);
        self.metrics.store_op_duration.observe(&[("op", op)], elapsed);
        res
    }
}

fn gauge_value(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}
