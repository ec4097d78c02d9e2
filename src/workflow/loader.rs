//! Workflow file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use super::locate::runs_on_line_number;
use super::model::{Job, RawJob, Workflow};
use crate::error::{Result, SlimifyError};

/// Conventional location of workflow files, relative to the repository root.
pub const DEFAULT_WORKFLOW_DIR: &str = ".github/workflows";

/// Whether `path` has a workflow file extension.
pub fn is_workflow_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yml") | Some("yaml")
    )
}

/// Load a single workflow file.
///
/// # Errors
///
/// Returns `WorkflowRead` if the file can't be read and `WorkflowParse`
/// if it isn't valid YAML.
pub fn load_workflow(path: &Path) -> Result<Workflow> {
    let content = fs::read_to_string(path).map_err(|source| SlimifyError::WorkflowRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_workflow(&content, path)
}

/// Parse workflow YAML that was read from `path`.
pub fn parse_workflow(content: &str, path: &Path) -> Result<Workflow> {
    let document: Value =
        serde_yaml::from_str(content).map_err(|e| SlimifyError::WorkflowParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut workflow = Workflow {
        path: path.to_path_buf(),
        jobs: Default::default(),
    };

    let Some(jobs) = document.get("jobs").and_then(Value::as_mapping) else {
        tracing::debug!("{} has no jobs mapping", path.display());
        return Ok(workflow);
    };

    for (key, body) in jobs {
        let Some(id) = key.as_str() else {
            tracing::warn!("skipping non-string job key in {}", path.display());
            continue;
        };
        let raw: RawJob = match serde_yaml::from_value(body.clone()) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("skipping job '{}' in {}: {}", id, path.display(), e);
                continue;
            }
        };
        let mut job = Job::from_raw(id, raw);
        job.source_line = runs_on_line_number(content, id);
        workflow.jobs.insert(id.to_string(), job);
    }

    Ok(workflow)
}

/// Load every workflow file in `dir`.
///
/// Files that fail to load are logged and skipped. The result is sorted
/// by path.
///
/// # Errors
///
/// Returns `WorkflowDirNotFound` if `dir` does not exist.
pub fn load_workflows(dir: &Path) -> Result<Vec<Workflow>> {
    if !dir.is_dir() {
        return Err(SlimifyError::WorkflowDirNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_workflow_file(path))
        .collect();
    paths.sort();

    let mut workflows = Vec::with_capacity(paths.len());
    for path in paths {
        match load_workflow(&path) {
            Ok(workflow) => workflows.push(workflow),
            Err(e) => tracing::warn!("failed to load {}: {}", path.display(), e),
        }
    }

    Ok(workflows)
}
