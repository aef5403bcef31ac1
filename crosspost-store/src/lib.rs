//! # crosspost-store
//!
//! Durable publish-state storage behind the [`StateStore`] trait.
//!
//! Two interchangeable backends, selected once at startup by configuration:
//! a local JSON file ([`FileStore`]) and a file on the main branch of a
//! GitHub repository ([`GithubStore`]). Both persist the same pretty-printed
//! JSON document so remote history stays human-diffable.

pub mod error;
pub mod file;
pub mod github;

pub use error::{CommitStep, StoreError};
pub use file::FileStore;
pub use github::GithubStore;

use crosspost_core::{types::PublishedRecord, Config, StoreConfig};

/// Read/write access to the persisted set of published records.
///
/// `save` is wholesale: implementations never read back to merge, so the
/// caller must pass the complete desired final state. A concurrent writer's
/// changes are silently lost; one run at a time is assumed.
pub trait StateStore {
    /// Read all previously published records. A store that has never been
    /// written reads as empty, not as an error.
    fn load(&self) -> Result<Vec<PublishedRecord>, StoreError>;

    /// Overwrite the store with the full updated record set.
    fn save(&self, records: &[PublishedRecord]) -> Result<(), StoreError>;
}

/// Build the backend selected by configuration.
pub fn from_config(config: &Config) -> Box<dyn StateStore> {
    match &config.store {
        StoreConfig::File { path } => {
            log::info!("FILE storage type detected. Using local file for status storage");
            Box::new(FileStore::new(path.clone()))
        }
        StoreConfig::Github(github) => Box::new(GithubStore::new(github.clone())),
    }
}
