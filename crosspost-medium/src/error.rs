//! Error types for crosspost-medium.

use thiserror::Error;

/// All errors that can arise from sink calls.
#[derive(Debug, Error)]
pub enum MediumError {
    /// Transport failure or non-2xx API response.
    #[error("medium API request failed: {0}")]
    Http(#[source] Box<ureq::Error>),

    /// The response body could not be read or was not the expected shape.
    #[error("medium API response was unreadable: {0}")]
    Body(#[source] std::io::Error),
}
