//! Error types for the Parley SDK.

use parley_common::CheckError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParleyError {
    /// The HTTP response had a non-2xx status code.
    #[error("API error {status}: {message}")]
    Api {
        status: u16,
        /// Machine-readable code from the error body, e.g. `MISSING_PERMISSION`
        code: Option<String>,
        message: String,
    },

    /// An error from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A request was rejected locally before being sent.
    #[error(transparent)]
    Check(#[from] CheckError),

    /// A generic error string.
    #[error("{0}")]
    Other(String),
}

impl ParleyError {
    /// HTTP status of a remote failure, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ParleyError>;
