//! Static analysis of workflow jobs.
//!
//! - [`shell`] - command names invoked by `run:` scripts
//! - [`setup_actions`] - commands installed by known setup actions
//! - [`missing`] - commands ubuntu-slim does not ship
//! - [`eligibility`] - hard migration criteria
//!
//! Everything here is pure text analysis; no script is ever executed.

pub mod eligibility;
pub mod missing;
pub mod setup_actions;
pub mod shell;

pub use eligibility::{
    classify, has_docker_commands, is_container_action, Eligibility, IneligibleReason,
};
pub use missing::{is_missing_in_slim, missing_commands, MISSING_IN_SLIM};
pub use setup_actions::{commands_for_action, provided_commands, SETUP_ACTIONS};
pub use shell::extract_commands;
