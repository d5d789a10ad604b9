//! Error type for remote collaborator calls.

use thiserror::Error;

/// Errors surfaced by the remote release, work-item, and VCS contracts.
///
/// The transport behind a contract is out of scope here; implementations map
/// whatever their wire layer produces onto these variants.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The remote service answered with a failure status.
    #[error("remote API call failed ({status}): {message}")]
    Api { status: u16, message: String },

    /// The remote answered but the payload could not be decoded.
    #[error("failed to decode remote response: {0}")]
    Decode(String),

    /// The remote service could not be reached.
    #[error("remote service unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for RemoteError {
    fn from(err: serde_json::Error) -> Self {
        RemoteError::Decode(err.to_string())
    }
}

/// Result type for remote contract operations.
pub type RemoteResult<T> = std::result::Result<T, RemoteError>;
