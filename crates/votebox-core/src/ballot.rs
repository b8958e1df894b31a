//! Vote options, parsed ballots, and tally snapshots.

use crate::error::{Result, VoteError};

/// Form value that zeroes both counters.
pub const RESET_VALUE: &str = "reset";

/// The two configured counter names. Validated once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteOptions {
    a: String,
    b: String,
}

impl VoteOptions {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Result<Self> {
        let a = a.into().trim().to_string();
        let b = b.into().trim().to_string();

        for name in [&a, &b] {
            if name.is_empty() {
                return Err(VoteError::BadRequest("vote option must not be empty".into()));
            }
            if name == RESET_VALUE {
                return Err(VoteError::BadRequest(format!(
                    "vote option must not be {RESET_VALUE:?}"
                )));
            }
        }
        if a == b {
            return Err(VoteError::BadRequest(format!(
                "vote options must be distinct (both are {a:?})"
            )));
        }

        Ok(Self { a, b })
    }

    pub fn a(&self) -> &str {
        &self.a
    }

    pub fn b(&self) -> &str {
        &self.b
    }

    pub fn name(&self, choice: Choice) -> &str {
        match choice {
            Choice::A => &self.a,
            Choice::B => &self.b,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    A,
    B,
}

/// A submitted `vote` form value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ballot {
    Cast(Choice),
    Reset,
}

impl Ballot {
    /// Parse against the configured options. Anything outside the closed set
    /// is rejected; arbitrary keys are never incremented.
    pub fn parse(raw: &str, options: &VoteOptions) -> Result<Self> {
        if raw == RESET_VALUE {
            Ok(Ballot::Reset)
        } else if raw == options.a() {
            Ok(Ballot::Cast(Choice::A))
        } else if raw == options.b() {
            Ok(Ballot::Cast(Choice::B))
        } else {
            Err(VoteError::BadRequest(format!("unknown vote option: {raw:?}")))
        }
    }
}

/// Snapshot of both counters, in option order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    pub a: (String, u64),
    pub b: (String, u64),
}

impl Tally {
    pub fn total(&self) -> u64 {
        self.a.1.saturating_add(self.b.1)
    }
}
