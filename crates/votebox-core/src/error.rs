//! Shared error type across votebox crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed form or config.
    BadRequest,
    /// Key-value store unreachable.
    NotConnected,
    /// Stored counter is not a non-negative integer.
    CorruptState,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in error bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::NotConnected => "NOT_CONNECTED",
            ClientCode::CorruptState => "CORRUPT_STATE",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, VoteError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum VoteError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("store not connected: {0}")]
    NotConnected(String),
    /// Never coerced to zero; the stored value is reported as-is.
    #[error("corrupt counter {key}: stored value {value:?} is not a non-negative integer")]
    CorruptState { key: String, value: String },
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl VoteError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            VoteError::BadRequest(_) => ClientCode::BadRequest,
            VoteError::NotConnected(_) => ClientCode::NotConnected,
            VoteError::CorruptState { .. } => ClientCode::CorruptState,
            VoteError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            VoteError::Internal(_) => ClientCode::Internal,
        }
    }

    pub(crate) fn corrupt(key: &str, value: impl Into<String>) -> Self {
        VoteError::CorruptState {
            key: key.to_string(),
            value: value.into(),
        }
    }
}
