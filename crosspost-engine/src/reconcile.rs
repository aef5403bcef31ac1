//! Work-set computation.
//!
//! This is the idempotency core: an article is published at most once as
//! long as its record survives in the store, because reconciliation drops
//! every candidate whose id already has a record.

use std::collections::HashSet;

use crosspost_core::types::{IndexEntry, PublishedRecord};

/// Return the index entries that still need publishing.
///
/// Pure function of its inputs. Entries with an empty id are dropped
/// (malformed, never retried); entries whose id appears in `prior` are
/// dropped; candidate order is preserved for the rest.
pub fn reconcile(prior: &[PublishedRecord], candidates: &[IndexEntry]) -> Vec<IndexEntry> {
    let published: HashSet<&str> = prior.iter().map(|record| record.id.0.as_str()).collect();

    let work_set: Vec<IndexEntry> = candidates
        .iter()
        .filter(|entry| !entry.id.is_empty())
        .filter(|entry| !published.contains(entry.id.0.as_str()))
        .cloned()
        .collect();

    log::info!(
        "after removing duplicates, {} articles will be published to medium",
        work_set.len()
    );
    work_set
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use crosspost_core::types::ArticleId;

    use super::*;

    fn entry(url: &str, id: &str) -> IndexEntry {
        IndexEntry {
            url: url.to_string(),
            id: ArticleId::from(id),
        }
    }

    fn record(id: &str) -> PublishedRecord {
        PublishedRecord {
            url: format!("https://example.com/posts/{id}/"),
            id: ArticleId::from(id),
            publish_timestamp: Utc::now(),
            medium_response: serde_json::Value::Null,
        }
    }

    #[test]
    fn empty_id_entries_are_dropped() {
        let candidates = vec![entry("a", "1"), entry("b", "")];
        let work_set = reconcile(&[], &candidates);
        assert_eq!(work_set, vec![entry("a", "1")]);
    }

    #[test]
    fn already_published_entries_are_dropped() {
        let prior = vec![record("1")];
        let candidates = vec![entry("a", "1"), entry("b", "2")];
        let work_set = reconcile(&prior, &candidates);
        assert_eq!(work_set, vec![entry("b", "2")]);
    }

    #[test]
    fn candidate_order_is_preserved() {
        let prior = vec![record("2"), record("4")];
        let candidates = vec![
            entry("a", "5"),
            entry("b", "2"),
            entry("c", "3"),
            entry("d", "4"),
            entry("e", "1"),
        ];
        let work_set = reconcile(&prior, &candidates);
        assert_eq!(work_set, vec![entry("a", "5"), entry("c", "3"), entry("e", "1")]);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let prior = vec![record("1")];
        let candidates = vec![entry("a", "1"), entry("b", "2"), entry("c", "")];
        let first = reconcile(&prior, &candidates);
        let second = reconcile(&prior, &candidates);
        assert_eq!(first, second);
    }

    #[test]
    fn result_never_overlaps_prior() {
        let prior: Vec<PublishedRecord> = (0..10).map(|i| record(&i.to_string())).collect();
        let candidates: Vec<IndexEntry> = (5..15)
            .map(|i| entry(&format!("u{i}"), &i.to_string()))
            .collect();
        let work_set = reconcile(&prior, &candidates);
        for kept in &work_set {
            assert!(prior.iter().all(|r| r.id != kept.id));
            assert!(!kept.id.is_empty());
        }
        assert_eq!(work_set.len(), 5);
    }

    #[test]
    fn empty_index_yields_empty_work_set() {
        assert!(reconcile(&[record("1")], &[]).is_empty());
    }
}
