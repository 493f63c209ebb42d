//! Error taxonomy for generative-AI requests
//!
//! Every failure propagates unchanged to the caller; there is no retry,
//! backoff or partial-result handling anywhere in this crate.

use crate::auth::AuthError;
use thiserror::Error;

/// Errors that can occur while constructing a client or issuing a request
#[derive(Debug, Error)]
pub enum LlmError {
    /// Credentials were rejected during client construction or by the service
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// Transport-level failure: DNS, connection, TLS
    #[error("network error: {message}")]
    Network { message: String },

    /// The request did not complete within the configured timeout
    #[error("request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// The hosted service rejected the request (non-2xx, quota, bad schema)
    #[error("service error: {message}")]
    RemoteService {
        message: String,
        status_code: Option<u16>,
    },

    /// The service answered but the payload could not be interpreted
    #[error("invalid response from model: {message}")]
    InvalidResponse { message: String },
}

impl From<AuthError> for LlmError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Rejected { status, message } => LlmError::Authentication {
                message: format!("token endpoint answered {status}: {message}"),
            },
            AuthError::Transport(e) => LlmError::Network {
                message: e.to_string(),
            },
        }
    }
}
