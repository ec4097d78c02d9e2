//! Error types for slimify operations.
//!
//! This module defines [`SlimifyError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `SlimifyError` for failures the user has to act on (missing files,
//!   broken YAML, a job that vanished before it could be updated)
//! - Use `anyhow::Error` (via `SlimifyError::Other`) for plumbing failures,
//!   mostly from the run-history client
//! - Heuristic misses are never errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for slimify operations.
#[derive(Debug, Error)]
pub enum SlimifyError {
    /// The workflow directory to scan does not exist.
    #[error("workflow directory not found: {path}")]
    WorkflowDirNotFound { path: PathBuf },

    /// A workflow file could not be read.
    #[error("failed to read file {path}: {source}")]
    WorkflowRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A workflow file is not valid YAML.
    #[error("failed to parse YAML {path}: {message}")]
    WorkflowParse { path: PathBuf, message: String },

    /// The job to update is no longer present in the workflow.
    #[error("job '{job}' not found in {path}")]
    JobNotFound { job: String, path: PathBuf },

    /// The job exists but has no `runs-on` entry with the expected label.
    #[error("failed to find runs-on: {label} for job '{job}' in {path}")]
    RunnerNotFound {
        job: String,
        label: String,
        path: PathBuf,
    },

    /// Neither explicit files nor `--all` were given.
    #[error("no workflow files specified")]
    NoTargets,

    /// The project configuration file is invalid.
    #[error("failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// The GitHub repository could not be determined from git.
    #[error("failed to get repository info: {message}")]
    RepoDiscovery { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for slimify operations.
pub type Result<T> = std::result::Result<T, SlimifyError>;
