//! GitHub-repository state backend.
//!
//! Stores the record set as `status.json` on the `main` branch of a
//! configured repository. `load` reads the file through the contents API
//! with the raw media type; a 404 is the documented first-run case and
//! yields the empty set.
//!
//! `save` replays the low-level Git commit protocol:
//!
//! 1. look up the branch tip (commit SHA + tree SHA)
//! 2. create a blob from the serialized state
//! 3. create a tree placing the blob at `status.json` over the existing tree
//! 4. create a commit with the branch tip as parent
//! 5. move the branch ref to the new commit
//!
//! Each step is atomic at the API boundary but the sequence is not; a failed
//! step aborts the save and the caller re-runs from scratch.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crosspost_core::types::PublishedRecord;
use crosspost_core::GithubConfig;

use crate::error::{CommitStep, StoreError};
use crate::StateStore;

/// Fixed path of the state file inside the repository.
pub const STATUS_PATH: &str = "status.json";
/// Fixed branch the state lives on.
pub const STATUS_BRANCH: &str = "main";

const COMMIT_MESSAGE: &str = "update the medium content";

/// State store backed by a file in a GitHub repository.
pub struct GithubStore {
    agent: ureq::Agent,
    config: GithubConfig,
}

impl GithubStore {
    pub fn new(config: GithubConfig) -> Self {
        Self {
            agent: ureq::agent(),
            config,
        }
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.config.token)
    }

    fn repo_url(&self, tail: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.config.api_root, self.config.owner, self.config.repo, tail
        )
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str, step: CommitStep) -> Result<T, StoreError> {
        let response = self
            .agent
            .get(url)
            .set("Authorization", &self.auth_header())
            .set("Accept", "application/vnd.github+json")
            .call()
            .map_err(|e| StoreError::RemoteCommit {
                step,
                source: Box::new(e),
            })?;
        response.into_json().map_err(StoreError::RemoteBody)
    }

    fn send_json<T: DeserializeOwned>(
        &self,
        method: &str,
        url: &str,
        body: serde_json::Value,
        step: CommitStep,
    ) -> Result<T, StoreError> {
        let response = self
            .agent
            .request(method, url)
            .set("Authorization", &self.auth_header())
            .set("Accept", "application/vnd.github+json")
            .send_json(body)
            .map_err(|e| StoreError::RemoteCommit {
                step,
                source: Box::new(e),
            })?;
        response.into_json().map_err(StoreError::RemoteBody)
    }
}

impl StateStore for GithubStore {
    fn load(&self) -> Result<Vec<PublishedRecord>, StoreError> {
        log::info!("pulling list of already published articles");
        let url = self.repo_url(&format!("contents/{STATUS_PATH}"));
        let response = self
            .agent
            .get(&url)
            .query("ref", STATUS_BRANCH)
            .set("Authorization", &self.auth_header())
            .set("Accept", "application/vnd.github.v3.raw")
            .call();

        let body = match response {
            Ok(response) => response.into_string().map_err(StoreError::RemoteBody)?,
            Err(ureq::Error::Status(404, _)) => {
                log::info!("no {STATUS_PATH} found. starting from scratch");
                return Ok(Vec::new());
            }
            Err(err) => return Err(StoreError::RemoteRead(Box::new(err))),
        };
        Ok(serde_json::from_str(&body)?)
    }

    fn save(&self, records: &[PublishedRecord]) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(records)?;

        log::info!("fetching {STATUS_BRANCH} branch");
        let branch: Branch = self.get_json(
            &self.repo_url(&format!("branches/{STATUS_BRANCH}")),
            CommitStep::BranchLookup,
        )?;

        log::info!("creating blob");
        let blob: ObjectSha = self.send_json(
            "POST",
            &self.repo_url("git/blobs"),
            json!({ "content": content, "encoding": "utf-8" }),
            CommitStep::BlobCreate,
        )?;

        log::info!("creating tree");
        let tree: ObjectSha = self.send_json(
            "POST",
            &self.repo_url("git/trees"),
            json!({
                "base_tree": branch.commit.commit.tree.sha,
                "tree": [{
                    "path": STATUS_PATH,
                    "mode": "100644",
                    "type": "blob",
                    "sha": blob.sha,
                }],
            }),
            CommitStep::TreeCreate,
        )?;

        log::info!("creating commit");
        let commit: ObjectSha = self.send_json(
            "POST",
            &self.repo_url("git/commits"),
            json!({
                "message": COMMIT_MESSAGE,
                "tree": tree.sha,
                "parents": [branch.commit.sha],
            }),
            CommitStep::CommitCreate,
        )?;

        log::info!("updating ref");
        let _: serde_json::Value = self.send_json(
            "PATCH",
            &self.repo_url(&format!("git/refs/heads/{STATUS_BRANCH}")),
            json!({ "sha": commit.sha, "force": false }),
            CommitStep::RefUpdate,
        )?;

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Response shapes (only the fields the protocol needs)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ObjectSha {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct Branch {
    commit: BranchCommit,
}

#[derive(Debug, Deserialize)]
struct BranchCommit {
    sha: String,
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    tree: ObjectSha,
}
