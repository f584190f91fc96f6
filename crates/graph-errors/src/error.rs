//! Error types for the graph-errors crate.

use crate::types::ClassifiedError;

/// Errors that can occur when configuring a classifier or reading a response.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading the response body failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid rule table configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Rule table could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The API answered with an error payload.
    #[error(transparent)]
    Response(#[from] ClassifiedError),
}

impl Error {
    /// The classified API error, if this is one.
    pub fn as_classified(&self) -> Option<&ClassifiedError> {
        match self {
            Error::Response(e) => Some(e),
            _ => None,
        }
    }
}
