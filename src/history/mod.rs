//! Run-history enrichment.
//!
//! - [`repo`] - which repository the workflows belong to
//! - [`auth`] - where the API token comes from
//! - [`client`] - the REST client, a [`crate::scan::DurationSource`]

pub mod auth;
pub mod client;
pub mod repo;

pub use auth::resolve_token;
pub use client::HistoryClient;
pub use repo::RepoInfo;
