//! HTTP mapping for `VoteError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use votebox_core::VoteError;

/// Handler error: a `VoteError` on its way to becoming a response.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct WebError(#[from] pub VoteError);

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            VoteError::BadRequest(_) => StatusCode::BAD_REQUEST,
            VoteError::NotConnected(_) => StatusCode::SERVICE_UNAVAILABLE,
            VoteError::CorruptState { .. }
            | VoteError::UnsupportedVersion
            | VoteError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = format!("{}: {}", self.0.client_code().as_str(), self.0);
        (status, body).into_response()
    }
}
