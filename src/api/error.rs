//! Error taxonomy returned by the API manager

use thiserror::Error;

use crate::data::PositionId;

/// Errors surfaced by `BreezyApiManager` operations
///
/// Carries only messages, never the remote response body, so the value can
/// be cloned, compared, and shown to operators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BreezyError {
    /// Sign-in failed or the sign-in endpoint was unreachable
    #[error("Authentication failed: {0}")]
    AuthFailure(String),

    /// Network error, timeout or non-success status on a data endpoint
    #[error("Request to Breezy failed: {0}")]
    TransportFailure(String),

    /// Response body was empty, malformed or had an unexpected shape
    #[error("Failed to parse Breezy response: {0}")]
    ParseFailure(String),

    /// The requested position does not exist
    #[error("Position not found: {0}")]
    NotFound(PositionId),
}

impl BreezyError {
    /// True for the "position does not exist" outcome
    pub fn is_not_found(&self) -> bool {
        matches!(self, BreezyError::NotFound(_))
    }
}
