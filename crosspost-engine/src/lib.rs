//! # crosspost-engine
//!
//! The reconciliation and publishing pipeline.
//!
//! Call [`pipeline::run`] to execute a full run: load prior state, fetch the
//! site index, reconcile the two into a work set, publish each missing
//! article as a Medium draft, and save the updated state.

pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod publish;
pub mod reconcile;

pub use error::{EngineError, PublishError};
pub use fetch::SiteFetcher;
pub use pipeline::{run, RunReport};
pub use publish::{DriveResult, PublishOutcome, Publisher};
pub use reconcile::reconcile;
