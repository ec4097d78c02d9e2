//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct. Running `slimify` without a
//! subcommand scans the targeted workflows.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::scan::Targets;

/// Slimify - find GitHub Actions jobs that can move to ubuntu-slim.
#[derive(Debug, Parser)]
#[command(name = "slimify")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .slimify.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Scan arguments used when no subcommand is given
    #[command(flatten)]
    pub scan: ScanArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Update eligible jobs to run on ubuntu-slim
    Fix(FixArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Workflow selection shared by scan and fix.
#[derive(Debug, Clone, Default, Args)]
pub struct TargetArgs {
    /// Workflow files to process
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Workflow file to process (repeatable)
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Vec<PathBuf>,

    /// Process every workflow in the workflow directory
    #[arg(long)]
    pub all: bool,

    /// Skip fetching job durations from the GitHub API
    #[arg(long, env = "SLIMIFY_SKIP_DURATION")]
    pub skip_duration: bool,
}

impl TargetArgs {
    /// Turn the selection into [`Targets`]. `--all` wins over named files.
    pub fn targets(&self) -> Targets {
        if self.all {
            return Targets::all();
        }
        Targets::files(self.files.iter().chain(self.file.iter()).cloned())
    }
}

/// Arguments for the default scan.
#[derive(Debug, Clone, Default, Args)]
pub struct ScanArgs {
    #[command(flatten)]
    pub targets: TargetArgs,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `fix` command.
#[derive(Debug, Clone, Default, Args)]
pub struct FixArgs {
    #[command(flatten)]
    pub targets: TargetArgs,

    /// Also update jobs that need attention (missing commands or unknown duration)
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
