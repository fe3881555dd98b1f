//! Failures of the stream resolution pipeline.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("no player available")]
    NoPlayerAvailable,

    #[error("could not decrypt with any known key")]
    DecryptionExhausted,

    #[error("failed to extract stream url: {0}")]
    ExtractionFailure(String),
}
