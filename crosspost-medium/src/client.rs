//! Medium API client.

use serde::{Deserialize, Serialize};

use crosspost_core::types::ContentFormat;

use crate::error::MediumError;

/// Publish state requested for a created post. Only drafts are ever created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    #[default]
    Draft,
}

/// The authenticated Medium user, resolved once per run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MediumUser {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// A post submission, built from a fetched article payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    pub title: String,
    pub content_format: ContentFormat,
    pub content: String,
    pub canonical_url: String,
    pub tags: Vec<String>,
    pub publish_status: PublishStatus,
}

/// Medium responses wrap their payload in a `data` envelope.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Blocking Medium REST client.
pub struct MediumClient {
    agent: ureq::Agent,
    endpoint: String,
    token: String,
}

impl MediumClient {
    /// `endpoint` is the API root, e.g. `https://api.medium.com/v1`.
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            agent: ureq::agent(),
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Resolve the authenticated user. The returned id addresses every
    /// subsequent post submission.
    pub fn me(&self) -> Result<MediumUser, MediumError> {
        let response = self
            .agent
            .get(&format!("{}/me", self.endpoint))
            .set("Authorization", &self.auth_header())
            .set("Accept", "application/json")
            .call()
            .map_err(|e| MediumError::Http(Box::new(e)))?;
        let envelope: Envelope<MediumUser> = response.into_json().map_err(MediumError::Body)?;
        Ok(envelope.data)
    }

    /// Submit a draft post for `user_id`. Returns the sink's post record
    /// verbatim, for the caller to persist.
    pub fn create_post(
        &self,
        user_id: &str,
        post: &PostRequest,
    ) -> Result<serde_json::Value, MediumError> {
        let response = self
            .agent
            .post(&format!("{}/users/{}/posts", self.endpoint, user_id))
            .set("Authorization", &self.auth_header())
            .set("Accept", "application/json")
            .send_json(post)
            .map_err(|e| MediumError::Http(Box::new(e)))?;
        let envelope: Envelope<serde_json::Value> =
            response.into_json().map_err(MediumError::Body)?;
        Ok(envelope.data)
    }
}
