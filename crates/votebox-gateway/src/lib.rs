//! votebox gateway library entry.
//!
//! This crate wires config resolution, the Redis-backed store, the observed
//! vote store, and the HTTP surface into the vote server. It is consumed by
//! the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod infra;
pub mod obs;
pub mod ops;
pub mod router;
pub mod web;
