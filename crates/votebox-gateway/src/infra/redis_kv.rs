//! Redis-backed `KvStore` (fred connection pool).
//!
//! Counters are plain string keys holding decimal integers: `GET`, `SET`,
//! `SET NX` for lazy materialization, `INCRBY` for votes.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use fred::{
    interfaces::*,
    prelude::*,
    types::{PerformanceConfig, RedisConfig as FredRedisConfig, ReconnectPolicy, SetOptions},
};

use votebox_core::error::{Result, VoteError};
use votebox_core::KvStore;

use crate::config::StoreSettings;

#[derive(Clone)]
pub struct RedisKv {
    pool: RedisPool,
    command_timeout: Duration,
}

impl RedisKv {
    /// Connect and verify with `PING`, bounded by `connect_timeout_ms`.
    /// Any failure is `NotConnected` so startup can fail fast.
    pub async fn connect(settings: &StoreSettings) -> Result<Self> {
        let config = FredRedisConfig::from_url(&settings.url)
            .map_err(|e| VoteError::BadRequest(format!("invalid store url: {e}")))?;
        let command_timeout = Duration::from_millis(settings.command_timeout_ms);
        let perf = PerformanceConfig {
            default_command_timeout: command_timeout,
            ..Default::default()
        };
        let pool = RedisPool::new(
            config,
            Some(perf),
            None,
            Some(ReconnectPolicy::default()),
            settings.pool_size,
        )
        .map_err(store_err)?;

        let timeout = Duration::from_millis(settings.connect_timeout_ms);
        let connect = async {
            pool.init().await.map_err(store_err)?;
            let _: String = pool.ping().await.map_err(store_err)?;
            Ok::<(), VoteError>(())
        };

        match tokio::time::timeout(timeout, connect).await {
            Ok(res) => res?,
            Err(_) => {
                // Stop the reconnect loop before giving up.
                let _ = pool.quit().await;
                return Err(VoteError::NotConnected(format!(
                    "no answer from {} within {}ms",
                    redacted(&settings.url),
                    settings.connect_timeout_ms
                )));
            }
        }

        tracing::info!(url = %redacted(&settings.url), pool_size = settings.pool_size, "connected to redis");
        Ok(Self {
            pool,
            command_timeout,
        })
    }

    pub async fn quit(&self) {
        if let Err(e) = self.pool.quit().await {
            tracing::warn!(error = %e, "redis quit failed");
        }
    }

    /// Caps a command at `command_timeout`. fred enforces the same limit on
    /// queued commands; this also covers a reconnect that never completes.
    async fn bounded<T>(&self, cmd: impl Future<Output = Result<T>>) -> Result<T> {
        match tokio::time::timeout(self.command_timeout, cmd).await {
            Ok(res) => res,
            Err(_) => Err(VoteError::NotConnected(format!(
                "no reply within {}ms",
                self.command_timeout.as_millis()
            ))),
        }
    }
}

#[async_trait]
impl KvStore for RedisKv {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        // Raw bytes, so a non-UTF-8 value surfaces as corruption instead of a
        // client-side parse error.
        let raw: Option<Vec<u8>> = self
            .bounded(async {
                self.pool
                    .get::<Option<Vec<u8>>, _>(key)
                    .await
                    .map_err(|e| value_err(key, e))
            })
            .await?;
        raw.map(|bytes| decode(key, bytes)).transpose()
    }

    async fn set(&self, key: &str, value: i64) -> Result<()> {
        self.bounded(async {
            let _: () = self
                .pool
                .set(key, value, None, None, false)
                .await
                .map_err(store_err)?;
            Ok(())
        })
        .await
    }

    async fn incr_by(&self, key: &str, delta: i64) -> Result<i64> {
        self.bounded(async {
            self.pool
                .incr_by::<i64, _>(key, delta)
                .await
                .map_err(|e| value_err(key, e))
        })
        .await
    }

    async fn ping(&self) -> Result<()> {
        self.bounded(async {
            let _: String = self.pool.ping().await.map_err(store_err)?;
            Ok(())
        })
        .await
    }

    async fn set_if_absent(&self, key: &str, value: i64) -> Result<bool> {
        self.bounded(async {
            // "OK" when written, nil when the key already existed.
            let reply: Option<String> = self
                .pool
                .set(key, value, None, Some(SetOptions::NX), false)
                .await
                .map_err(store_err)?;
            Ok(reply.is_some())
        })
        .await
    }
}

fn decode(key: &str, bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| VoteError::CorruptState {
        key: key.to_string(),
        value: String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

/// Errors from commands that read or modify a counter's value. A key holding
/// something other than an integer string is corruption, not an outage.
fn value_err(key: &str, e: RedisError) -> VoteError {
    if is_not_integer(&e) {
        VoteError::CorruptState {
            key: key.to_string(),
            value: "<non-integer>".into(),
        }
    } else if is_wrong_type(&e) {
        VoteError::CorruptState {
            key: key.to_string(),
            value: "<wrong type>".into(),
        }
    } else {
        store_err(e)
    }
}

/// Connectivity-class failures become `NotConnected`; the rest are internal.
fn store_err(e: RedisError) -> VoteError {
    match e.kind() {
        RedisErrorKind::IO
        | RedisErrorKind::Canceled
        | RedisErrorKind::Timeout
        | RedisErrorKind::Backpressure
        | RedisErrorKind::Cluster
        | RedisErrorKind::Sentinel => VoteError::NotConnected(e.to_string()),
        _ => VoteError::Internal(format!("redis: {e}")),
    }
}

fn is_not_integer(e: &RedisError) -> bool {
    e.details().contains("not an integer")
}

fn is_wrong_type(e: &RedisError) -> bool {
    let details = e.details();
    details.contains("WRONGTYPE") || details.contains("wrong kind of value")
}

/// Drop any password from a redis URL before logging it.
fn redacted(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_string(),
    }
}
