use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid query '{query}': {reason}")]
    InvalidQuery { query: String, reason: String },

    #[error("No element found for query: {0}")]
    ElementNotFound(String),

    #[error("No candidate elements found for container query: {query}")]
    ExtractionEmpty { query: String },

    #[error("Translation error: {0}")]
    Translation(#[from] ProviderError),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// True for the container-level "nothing to extract" condition.
    pub fn is_extraction_empty(&self) -> bool {
        matches!(self, Error::ExtractionEmpty { .. })
    }
}

/// Failure reported by a translation provider.
///
/// Cloneable so that every caller waiting on the same in-flight request can
/// observe the same outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Provider reported an error: {0}")]
    Api(String),

    #[error("Translation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Translator is not configured: {0}")]
    InvalidConfiguration(String),

    #[error("Could not decode provider response: {0}")]
    Decode(String),
}
