//! # crosspost-medium
//!
//! Minimal client for the Medium REST API, used as the publishing sink.
//!
//! Two calls only: resolve the authenticated user ([`MediumClient::me`]) and
//! create a draft post ([`MediumClient::create_post`]). Posts are always
//! submitted as drafts; auto-publishing is deliberately unsupported.

pub mod client;
pub mod error;

pub use client::{MediumClient, MediumUser, PostRequest, PublishStatus};
pub use error::MediumError;
