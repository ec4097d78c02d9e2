//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Running `slimify` without a
//! subcommand scans; `slimify fix` rewrites the workflows.

pub mod completions;
pub mod dispatcher;
pub mod display;
pub mod fix;
pub mod scan;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
