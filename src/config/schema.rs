//! Configuration schema for `.slimify.yml`.
//!
//! Every field has a default, so an empty or missing file is a valid
//! configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::workflow::DEFAULT_WORKFLOW_DIR;

/// Runner label jobs are migrated to.
pub const DEFAULT_TARGET_RUNNER: &str = "ubuntu-slim";

/// Root configuration structure for `.slimify.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlimifyConfig {
    /// Directory scanned by `--all`, relative to the project root.
    pub workflow_dir: PathBuf,

    /// Runner label written by `fix`.
    pub target_runner: String,

    /// Run-history lookups.
    pub history: HistoryConfig,
}

impl Default for SlimifyConfig {
    fn default() -> Self {
        Self {
            workflow_dir: PathBuf::from(DEFAULT_WORKFLOW_DIR),
            target_runner: DEFAULT_TARGET_RUNNER.to_string(),
            history: HistoryConfig::default(),
        }
    }
}

/// Settings for fetching job durations from the GitHub API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Fetch durations at all.
    pub enabled: bool,

    /// API base URL; derived from the `origin` remote when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Number of recent workflow runs to inspect.
    pub max_runs: u32,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_url: None,
            max_runs: 10,
            timeout_secs: 30,
        }
    }
}
