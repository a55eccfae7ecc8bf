//! Error taxonomy for the network-facing operations.
//!
//! The extractor and the heading tracker never fail; everything here originates
//! in a remote call and is caught by the caller at per-card granularity.

use thiserror::Error;

/// Failure talking to the flashcard store (AnkiConnect).
#[derive(Error, Debug)]
pub enum RemoteStoreError {
    #[error("transport error during {action}: {source}")]
    Transport {
        action: String,
        #[source]
        source: Box<reqwest::Error>,
    },

    #[error("{action} returned HTTP status {status}")]
    Status { action: String, status: u16 },

    #[error("{action} failed: {message}")]
    Api { action: String, message: String },

    #[error("{action} returned no result")]
    MissingResult { action: String },
}

impl RemoteStoreError {
    pub fn transport(action: &str, error: reqwest::Error) -> Self {
        RemoteStoreError::Transport {
            action: action.to_string(),
            source: Box::new(error),
        }
    }

    pub fn api(action: &str, message: impl Into<String>) -> Self {
        RemoteStoreError::Api {
            action: action.to_string(),
            message: message.into(),
        }
    }
}

/// Failure of the optional content-enhancement capability.
///
/// `Configuration` is raised before any network attempt; every other variant is
/// an enhancement failure. Callers recover from both by keeping the original card.
#[derive(Error, Debug)]
pub enum EnhanceError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("enhancement request failed: {0}")]
    Request(Box<reqwest::Error>),

    #[error("enhancement service returned HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed enhancement response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for EnhanceError {
    fn from(error: reqwest::Error) -> Self {
        EnhanceError::Request(Box::new(error))
    }
}

impl EnhanceError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, EnhanceError::Configuration(_))
    }
}
