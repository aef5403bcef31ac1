//! Per-article publishing with partial-failure tolerance.
//!
//! The driver walks the work set strictly sequentially, in work-set order.
//! A failed entry is logged and skipped; it stays out of the updated record
//! set, so the next run's reconciliation picks it up again.

use chrono::Utc;

use crosspost_core::types::{ArticleId, IndexEntry, PublishedRecord};
use crosspost_medium::{MediumClient, PostRequest, PublishStatus};

use crate::error::PublishError;
use crate::fetch::SiteFetcher;

/// Outcome of one work-set entry, for run reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// A draft was created and a record will be persisted.
    Published { url: String, id: ArticleId },
    /// Dry-run mode: the entry *would* have been published.
    WouldPublish { url: String, id: ArticleId },
    /// The entry failed; it will be retried on the next run.
    Failed {
        url: String,
        id: ArticleId,
        reason: String,
    },
}

/// What a full drive over the work set produced: the new records to fold
/// onto prior state, plus one outcome per entry.
#[derive(Debug)]
pub struct DriveResult {
    pub published: Vec<PublishedRecord>,
    pub outcomes: Vec<PublishOutcome>,
}

/// Publishes work-set entries one at a time against a resolved sink user.
pub struct Publisher<'a> {
    fetcher: &'a SiteFetcher,
    medium: &'a MediumClient,
    user_id: &'a str,
}

impl<'a> Publisher<'a> {
    pub fn new(fetcher: &'a SiteFetcher, medium: &'a MediumClient, user_id: &'a str) -> Self {
        Self {
            fetcher,
            medium,
            user_id,
        }
    }

    /// Publish a single entry end to end: fetch the payload, submit a draft,
    /// build the record. The record's `url` is the payload's canonical URL,
    /// which is authoritative over the index URL.
    pub fn publish_entry(&self, entry: &IndexEntry) -> Result<PublishedRecord, PublishError> {
        let article = self.fetcher.fetch_article(&entry.url)?;

        log::info!("posting article {} to medium", article.title);
        let request = PostRequest {
            title: article.title,
            content_format: article.content_format,
            content: article.content,
            canonical_url: article.canonical_url.clone(),
            tags: article.tags,
            publish_status: PublishStatus::Draft,
        };
        let response = self.medium.create_post(self.user_id, &request)?;

        Ok(PublishedRecord {
            url: article.canonical_url,
            id: entry.id.clone(),
            publish_timestamp: Utc::now(),
            medium_response: response,
        })
    }

    /// Drive the whole work set. Successes are folded into the result;
    /// failures are logged and reported but never abort the drive.
    pub fn publish_all(&self, work_set: &[IndexEntry]) -> DriveResult {
        let mut published = Vec::new();
        let mut outcomes = Vec::new();

        for entry in work_set {
            match self.publish_entry(entry) {
                Ok(record) => {
                    log::info!("successfully posted {}", record.url);
                    outcomes.push(PublishOutcome::Published {
                        url: record.url.clone(),
                        id: record.id.clone(),
                    });
                    published.push(record);
                }
                Err(err) => {
                    log::warn!("posting error: {err}");
                    outcomes.push(PublishOutcome::Failed {
                        url: entry.url.clone(),
                        id: entry.id.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        DriveResult {
            published,
            outcomes,
        }
    }
}
