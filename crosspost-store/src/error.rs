//! Error types for crosspost-store.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The step of the remote commit protocol that failed.
///
/// The protocol is sequential and non-atomic as a whole; knowing which step
/// aborted is the only recovery context a caller gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitStep {
    BranchLookup,
    BlobCreate,
    TreeCreate,
    CommitCreate,
    RefUpdate,
}

impl fmt::Display for CommitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitStep::BranchLookup => write!(f, "branch lookup"),
            CommitStep::BlobCreate => write!(f, "blob create"),
            CommitStep::TreeCreate => write!(f, "tree create"),
            CommitStep::CommitCreate => write!(f, "commit create"),
            CommitStep::RefUpdate => write!(f, "ref update"),
        }
    }
}

/// All errors that can arise from state store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// State JSON serialization/deserialization error.
    #[error("state JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The remote store could not be read.
    #[error("remote state read failed: {0}")]
    RemoteRead(#[source] Box<ureq::Error>),

    /// A remote response body could not be read or decoded.
    #[error("remote response body was unreadable: {0}")]
    RemoteBody(#[source] std::io::Error),

    /// One step of the remote commit protocol failed; earlier steps may have
    /// left orphaned objects, which the remote garbage-collects.
    #[error("remote state commit failed during {step}: {source}")]
    RemoteCommit {
        step: CommitStep,
        #[source]
        source: Box<ureq::Error>,
    },
}

/// Convenience constructor for [`StoreError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.into(),
        source,
    }
}
