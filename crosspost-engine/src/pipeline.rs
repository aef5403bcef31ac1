//! The fixed run pipeline.
//!
//! load state → fetch index → reconcile → publish each → save state.
//!
//! Load and fetch failures abort before any publishing. A save failure after
//! partial publishing is reported as fatal, but the sink-side drafts already
//! exist; since state was never persisted, the next run recomputes the same
//! work set and re-publishes them. Known limitation, left visible rather
//! than silently papered over.

use crosspost_core::Config;
use crosspost_medium::MediumClient;
use crosspost_store::StateStore;

use crate::error::EngineError;
use crate::fetch::SiteFetcher;
use crate::publish::{DriveResult, PublishOutcome, Publisher};
use crate::reconcile::reconcile;

/// Summary of a completed run, for CLI rendering.
#[derive(Debug)]
pub struct RunReport {
    /// Entries the site index announced.
    pub candidates: usize,
    /// Records loaded from the store before the run.
    pub prior: usize,
    /// One outcome per work-set entry, in work-set order.
    pub outcomes: Vec<PublishOutcome>,
}

impl RunReport {
    pub fn published(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, PublishOutcome::Published { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, PublishOutcome::Failed { .. }))
            .count()
    }
}

/// Execute one full run against the injected state store.
///
/// With `dry_run` set, stops after reconciliation: no sink calls, no save.
pub fn run(
    config: &Config,
    store: &dyn StateStore,
    dry_run: bool,
) -> Result<RunReport, EngineError> {
    let prior = store.load()?;
    let prior_count = prior.len();

    let fetcher = SiteFetcher::new();
    let candidates = fetcher.fetch_index(&config.index_url)?;
    let work_set = reconcile(&prior, &candidates);

    if dry_run {
        let outcomes = work_set
            .iter()
            .map(|entry| PublishOutcome::WouldPublish {
                url: entry.url.clone(),
                id: entry.id.clone(),
            })
            .collect();
        return Ok(RunReport {
            candidates: candidates.len(),
            prior: prior_count,
            outcomes,
        });
    }

    let medium = MediumClient::new(&config.medium_endpoint, &config.medium_token);
    let user = medium.me()?;
    let publisher = Publisher::new(&fetcher, &medium, &user.id);
    let DriveResult {
        published,
        outcomes,
    } = publisher.publish_all(&work_set);

    let mut updated = prior;
    updated.extend(published);

    log::info!("updating status of posted articles for next use");
    store.save(&updated)?;

    Ok(RunReport {
        candidates: candidates.len(),
        prior: prior_count,
        outcomes,
    })
}
