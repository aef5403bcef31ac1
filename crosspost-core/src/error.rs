//! Error types for crosspost-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while building a [`crate::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable was absent or empty.
    #[error("missing required environment variable {name}")]
    MissingVar { name: &'static str },

    /// The env file given on the command line could not be loaded.
    #[error("failed to load env file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}
