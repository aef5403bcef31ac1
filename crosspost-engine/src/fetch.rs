//! Article index and article payload retrieval.

use crosspost_core::types::{ArticleContent, IndexEntry};

use crate::error::{EngineError, PublishError};

/// Blocking HTTP fetcher for the source site.
pub struct SiteFetcher {
    agent: ureq::Agent,
}

impl SiteFetcher {
    pub fn new() -> Self {
        Self {
            agent: ureq::agent(),
        }
    }

    /// Fetch the site's article index. A network or parse failure here is
    /// fatal to the run; entries missing an id survive the fetch and are
    /// filtered by the reconciler.
    pub fn fetch_index(&self, url: &str) -> Result<Vec<IndexEntry>, EngineError> {
        let response = self.agent.get(url).call().map_err(|e| EngineError::IndexFetch {
            url: url.to_string(),
            source: Box::new(e),
        })?;
        let entries: Vec<IndexEntry> =
            response.into_json().map_err(|source| EngineError::IndexParse {
                url: url.to_string(),
                source,
            })?;
        log::info!("found index containing a total of {} articles", entries.len());
        Ok(entries)
    }

    /// Fetch one article's full payload. Failures here are per-item.
    pub fn fetch_article(&self, url: &str) -> Result<ArticleContent, PublishError> {
        let response = self.agent.get(url).call().map_err(|e| PublishError::Fetch {
            url: url.to_string(),
            source: Box::new(e),
        })?;
        response.into_json().map_err(|source| PublishError::Parse {
            url: url.to_string(),
            source,
        })
    }
}

impl Default for SiteFetcher {
    fn default() -> Self {
        Self::new()
    }
}
