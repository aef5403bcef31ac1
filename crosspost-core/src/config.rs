//! Immutable run configuration.
//!
//! Built once by [`Config::from_env`] and passed by reference to each
//! component; nothing reads the environment after construction.
//!
//! # Recognized variables
//!
//! ```text
//! MEDIUM_ENDPOINT_PREFIX    sink API root (default https://api.medium.com/v1)
//! MEDIUM_BEARER_TOKEN       sink access token (required)
//! WEBSITE_JSON_INDEX_URL    site article index (required)
//! STORAGE_TYPE              "FILE" selects the file backend; GitHub otherwise
//! STORAGE_FILE_PATH         state file path (required for FILE)
//! GITHUB_PERSONAL_TOKEN     remote store token (required for GitHub)
//! GITHUB_STATUS_REPO_OWNER  remote store repository owner (required for GitHub)
//! GITHUB_STATUS_REPO        remote store repository name (required for GitHub)
//! GITHUB_API_ROOT           remote store API root (default https://api.github.com)
//! ```

use std::env;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_MEDIUM_ENDPOINT: &str = "https://api.medium.com/v1";
pub const DEFAULT_GITHUB_API_ROOT: &str = "https://api.github.com";

/// Settings for the GitHub state backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubConfig {
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub api_root: String,
}

/// Which state backend a run persists to, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// Local JSON file at the given path.
    File { path: PathBuf },
    /// `status.json` on the main branch of a GitHub repository.
    Github(GithubConfig),
}

/// Everything a run needs, resolved from the environment up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub medium_endpoint: String,
    pub medium_token: String,
    pub index_url: String,
    pub store: StoreConfig,
}

impl Config {
    /// Read configuration from the process environment, optionally loading an
    /// env file first. Variables already present in the environment win over
    /// file entries.
    pub fn from_env(env_file: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = env_file {
            dotenvy::from_path(path).map_err(|source| ConfigError::EnvFile {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from an explicit variable lookup. Tests use this with a
    /// map instead of mutating the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let medium_endpoint = non_empty(&lookup, "MEDIUM_ENDPOINT_PREFIX")
            .unwrap_or_else(|| DEFAULT_MEDIUM_ENDPOINT.to_string());
        let medium_token = require(&lookup, "MEDIUM_BEARER_TOKEN")?;
        let index_url = require(&lookup, "WEBSITE_JSON_INDEX_URL")?;

        let store = match non_empty(&lookup, "STORAGE_TYPE").as_deref() {
            Some("FILE") => StoreConfig::File {
                path: PathBuf::from(require(&lookup, "STORAGE_FILE_PATH")?),
            },
            _ => StoreConfig::Github(GithubConfig {
                token: require(&lookup, "GITHUB_PERSONAL_TOKEN")?,
                owner: require(&lookup, "GITHUB_STATUS_REPO_OWNER")?,
                repo: require(&lookup, "GITHUB_STATUS_REPO")?,
                api_root: non_empty(&lookup, "GITHUB_API_ROOT")
                    .unwrap_or_else(|| DEFAULT_GITHUB_API_ROOT.to_string()),
            }),
        };

        Ok(Self {
            medium_endpoint,
            medium_token,
            index_url,
            store,
        })
    }
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).filter(|value| !value.is_empty())
}

fn require(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    non_empty(lookup, name).ok_or(ConfigError::MissingVar { name })
}
