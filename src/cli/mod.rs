//! Command-line interface for slimify.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations and report rendering

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, CompletionsArgs, FixArgs, ScanArgs, TargetArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
