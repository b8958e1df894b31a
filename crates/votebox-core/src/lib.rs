//! votebox core: the vote tally, its key-value store seam, and the error surface.
//!
//! This crate owns the only state transition the app has (read two counters,
//! increment one, reset both) and the contract it needs from a key-value store.
//! It carries no HTTP or network client dependencies so the server crate and
//! tests can plug in any `KvStore` (Redis in production, `MemoryStore` in tests).
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `VoteError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod ballot;
pub mod error;
pub mod kv;
pub mod memory;
pub mod vote_store;

/// Shared result type.
pub use error::{Result, VoteError};

pub use ballot::{Ballot, Choice, Tally, VoteOptions, RESET_VALUE};
pub use kv::KvStore;
pub use memory::MemoryStore;
pub use vote_store::VoteStore;
