//! Key-value store seam.
//!
//! The vote store needs four primitives from its backend: `get`, `set`,
//! atomic `incr_by`, and a connectivity check. Any service offering those is
//! enough. `set_if_absent` has a get-then-set fallback; backends with a native
//! conditional write (Redis `SET NX`) should override it.

use async_trait::async_trait;

use crate::error::Result;

#[async_trait]
pub trait KvStore: Send + Sync {
    /// Raw stored value, `None` when the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Unconditional write.
    async fn set(&self, key: &str, value: i64) -> Result<()>;

    /// Atomically add `delta` and return the new value.
    /// A missing key counts as zero.
    async fn incr_by(&self, key: &str, delta: i64) -> Result<i64>;

    /// Connectivity check.
    async fn ping(&self) -> Result<()>;

    /// Write only when the key is missing. Returns whether the write happened.
    async fn set_if_absent(&self, key: &str, value: i64) -> Result<bool> {
        if self.get(key).await?.is_some() {
            return Ok(false);
        }
        self.set(key, value).await?;
        Ok(true)
    }
}
