//! Scan results.

use std::path::PathBuf;
use std::time::Duration;

use crate::analysis::IneligibleReason;
use crate::workflow::{Job, Workflow};

/// A job that passed every hard criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Workflow file the job lives in.
    pub workflow_path: PathBuf,
    /// Key of the job in the `jobs:` mapping.
    pub job_id: String,
    /// Display name (`name:` or the id).
    pub job_name: String,
    /// 1-based line of the job's `runs-on:`, `0` when unknown.
    pub line: usize,
    /// Commands ubuntu-slim may lack, in first-seen order.
    pub missing_commands: Vec<String>,
    /// Duration of the last successful run, when it could be fetched.
    pub duration: Option<Duration>,
}

impl Candidate {
    pub(crate) fn new(workflow: &Workflow, job: &Job, missing_commands: Vec<String>) -> Self {
        Self {
            workflow_path: workflow.path.clone(),
            job_id: job.id.clone(),
            job_name: job.display_name().to_string(),
            line: job.source_line,
            missing_commands,
            duration: None,
        }
    }

    /// Safe to migrate: nothing missing and the last run time is known.
    pub fn is_safe(&self) -> bool {
        self.missing_commands.is_empty() && self.duration.is_some()
    }
}

/// A job that failed at least one hard criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IneligibleJob {
    pub workflow_path: PathBuf,
    pub job_id: String,
    pub job_name: String,
    pub line: usize,
    /// Failed criteria in evaluation order; never empty.
    pub reasons: Vec<IneligibleReason>,
}

impl IneligibleJob {
    pub(crate) fn new(workflow: &Workflow, job: &Job, reasons: Vec<IneligibleReason>) -> Self {
        debug_assert!(!reasons.is_empty());
        Self {
            workflow_path: workflow.path.clone(),
            job_id: job.id.clone(),
            job_name: job.display_name().to_string(),
            line: job.source_line,
            reasons,
        }
    }
}

/// Everything a scan found.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Eligible jobs, safe or needing attention.
    pub candidates: Vec<Candidate>,
    /// Jobs that cannot be migrated.
    pub ineligible: Vec<IneligibleJob>,
    /// Duration lookups that failed, one line each.
    pub warnings: Vec<String>,
}

impl ScanReport {
    /// Candidates that can be migrated without review.
    pub fn safe(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter().filter(|c| c.is_safe())
    }

    /// Candidates with missing commands or an unknown duration.
    pub fn needs_attention(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter().filter(|c| !c.is_safe())
    }

    /// Whether no job was classified at all.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty() && self.ineligible.is_empty()
    }

    /// Workflow paths in first-seen order across candidates and ineligible jobs.
    pub fn workflow_paths(&self) -> Vec<&PathBuf> {
        unique_paths(
            self.candidates
                .iter()
                .map(|c| &c.workflow_path)
                .chain(self.ineligible.iter().map(|j| &j.workflow_path)),
        )
    }
}

/// Distinct paths in first-seen order.
pub fn unique_paths<'a>(paths: impl IntoIterator<Item = &'a PathBuf>) -> Vec<&'a PathBuf> {
    let mut unique: Vec<&PathBuf> = Vec::new();
    for path in paths {
        if !unique.contains(&path) {
            unique.push(path);
        }
    }
    unique
}
