//! In-memory `KvStore` for tests and local runs without Redis.
//!
//! Values are stored as strings like Redis does, so corruption (a non-integer
//! value under a counter key) can be reproduced with `put_raw`.
//! `set_connected(false)` makes every call fail with `NotConnected`.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::{Result, VoteError};
use crate::kv::KvStore;

pub struct MemoryStore {
    values: DashMap<String, String>,
    connected: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            values: DashMap::new(),
            connected: AtomicBool::new(true),
        }
    }

    /// Toggle simulated reachability.
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    /// Store an arbitrary raw value, bypassing integer handling.
    pub fn put_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn check(&self) -> Result<()> {
        if self.connected.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(VoteError::NotConnected("memory store disconnected".into()))
        }
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.check()?;
        Ok(self.values.get(key).map(|v| v.value().clone()))
    }

    async fn set(&self, key: &str, value: i64) -> Result<()> {
        self.check()?;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn incr_by(&self, key: &str, delta: i64) -> Result<i64> {
        self.check()?;
        // The entry guard holds the shard lock for the whole read-modify-write.
        let mut entry = self
            .values
            .entry(key.to_string())
            .or_insert_with(|| "0".to_string());
        let current: i64 = entry
            .value()
            .parse()
            .map_err(|_| VoteError::corrupt(key, entry.value().clone()))?;
        let next = current
            .checked_add(delta)
            .ok_or_else(|| VoteError::corrupt(key, entry.value().clone()))?;
        *entry.value_mut() = next.to_string();
        Ok(next)
    }

    async fn ping(&self) -> Result<()> {
        self.check()
    }

    async fn set_if_absent(&self, key: &str, value: i64) -> Result<bool> {
        self.check()?;
        let mut inserted = false;
        self.values.entry(key.to_string()).or_insert_with(|| {
            inserted = true;
            value.to_string()
        });
        Ok(inserted)
    }
}
