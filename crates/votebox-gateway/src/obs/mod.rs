//! Observability for the vote server.
//!
//! Metrics are in-process atomics rendered by the `/metrics` handler;
//! `ObservedVotes` decorates the vote store with spans and metrics, and the
//! `http` middleware counts requests.

pub mod http;
pub mod metrics;
pub mod observer;

pub use metrics::VoteMetrics;
pub use observer::ObservedVotes;
