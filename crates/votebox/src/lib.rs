//! Top-level facade crate for votebox.
//!
//! Re-exports the vote core and the server library so users can depend on a single crate.

pub mod core {
    pub use votebox_core::*;
}

pub mod gateway {
    pub use votebox_gateway::*;
}
