//! Failures of the remote calculator

use thiserror::Error;

/// Why the backend could not price a line
#[derive(Debug, Error)]
pub enum RemotePricingError {
    /// The request never got an HTTP response
    #[error("Request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-success status
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// The body was not the expected JSON
    #[error("Malformed response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl RemotePricingError {
    /// Endpoint the failure happened on
    pub fn endpoint(&self) -> &str {
        match self {
            RemotePricingError::Http { endpoint, .. }
            | RemotePricingError::Status { endpoint, .. }
            | RemotePricingError::Decode { endpoint, .. } => endpoint,
        }
    }
}

impl From<RemotePricingError> for common::Error {
    fn from(err: RemotePricingError) -> Self {
        common::Error::RemoteUnavailable(err.to_string())
    }
}
