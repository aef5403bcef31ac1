//! Error types for crosspost-engine.
//!
//! Two tiers: [`EngineError`] is fatal and aborts the run;
//! [`PublishError`] is per-item, caught at the publisher boundary, logged,
//! and never propagated upward.

use thiserror::Error;

use crosspost_medium::MediumError;
use crosspost_store::StoreError;

/// Fatal pipeline errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The site index could not be fetched. No retry, no partial index.
    #[error("failed to fetch article index from {url}: {source}")]
    IndexFetch {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    /// The index body was not a JSON array of entries.
    #[error("article index at {url} is not valid JSON: {source}")]
    IndexParse {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// An error from the state store (load or save).
    #[error("state store error: {0}")]
    Store(#[from] StoreError),

    /// A fatal sink error (user resolution; per-post errors stay per-item).
    #[error("medium API error: {0}")]
    Medium(#[from] MediumError),
}

/// Per-item publish failure. The entry stays out of the updated record set
/// and is naturally retried on the next run.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The article payload could not be fetched.
    #[error("failed to fetch article {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    /// The article payload was not the expected JSON shape.
    #[error("article payload at {url} is not valid JSON: {source}")]
    Parse {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// The sink rejected the post.
    #[error("medium rejected the post: {0}")]
    Sink(#[from] MediumError),
}
