//! The vote tally over a shared key-value store.
//!
//! `VoteStore` keeps no local state: every read goes to the store so replicas
//! behind a load balancer agree, and every write relies on the store's own
//! atomic primitives. It does not retry; callers decide what a failure means.
//!
//! # Torn reset
//! `reset` is two independent writes. A reader running between them can see
//! one counter at zero and the other still at its old value. The window closes
//! as soon as the second write lands.

use std::sync::Arc;

use crate::ballot::{Tally, VoteOptions};
use crate::error::{Result, VoteError};
use crate::kv::KvStore;

#[derive(Clone)]
pub struct VoteStore {
    kv: Arc<dyn KvStore>,
}

impl VoteStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Materialize both counters at zero if absent. Idempotent.
    pub async fn ensure_initialized(&self, name_a: &str, name_b: &str) -> Result<()> {
        for name in [name_a, name_b] {
            if self.kv.set_if_absent(name, 0).await? {
                tracing::debug!(counter = %name, "counter materialized at zero");
            }
        }
        Ok(())
    }

    /// Current count. A missing counter is materialized and reads as zero.
    pub async fn get_count(&self, name: &str) -> Result<u64> {
        match self.kv.get(name).await? {
            Some(raw) => parse_count(name, &raw),
            None => {
                self.kv.set_if_absent(name, 0).await?;
                // Another writer may have raced the materialization.
                match self.kv.get(name).await? {
                    Some(raw) => parse_count(name, &raw),
                    None => Ok(0),
                }
            }
        }
    }

    /// Atomically add one and return the new count.
    pub async fn increment(&self, name: &str) -> Result<u64> {
        let next = self.kv.incr_by(name, 1).await?;
        u64::try_from(next).map_err(|_| VoteError::corrupt(name, next.to_string()))
    }

    /// Zero both counters. Not atomic across the two keys; see module docs.
    pub async fn reset(&self, name_a: &str, name_b: &str) -> Result<()> {
        self.kv.set(name_a, 0).await?;
        self.kv.set(name_b, 0).await?;
        Ok(())
    }

    /// Read both counters in option order.
    pub async fn tally(&self, options: &VoteOptions) -> Result<Tally> {
        let a = self.get_count(options.a()).await?;
        let b = self.get_count(options.b()).await?;
        Ok(Tally {
            a: (options.a().to_string(), a),
            b: (options.b().to_string(), b),
        })
    }

    /// Connectivity check against the backing store.
    pub async fn ping(&self) -> Result<()> {
        self.kv.ping().await
    }
}

/// Strict decimal digits only: no sign, no whitespace.
fn parse_count(name: &str, raw: &str) -> Result<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VoteError::corrupt(name, raw));
    }
    raw.parse::<u64>().map_err(|_| VoteError::corrupt(name, raw))
}
