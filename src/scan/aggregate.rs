//! Classification of every job into candidates and ineligible jobs.

use std::path::Path;
use std::time::Duration;

use super::report::{Candidate, IneligibleJob, ScanReport};
use crate::analysis::{classify, missing_commands};
use crate::workflow::Workflow;

/// Where candidate durations come from.
///
/// Implemented by [`crate::history::HistoryClient`]; tests use in-memory
/// sources.
pub trait DurationSource {
    /// Duration of the most recent successful run of a job.
    ///
    /// `job_name` is the display name; implementations may fall back to
    /// `job_id` when matching.
    fn job_duration(
        &self,
        workflow_path: &Path,
        job_id: &str,
        job_name: &str,
    ) -> anyhow::Result<Duration>;
}

/// Classify every job of every workflow.
///
/// Workflows are visited in the given order and jobs in id order. When a
/// duration source is given each candidate is enriched; a failed lookup
/// leaves the duration unknown and adds a line to
/// [`ScanReport::warnings`].
pub fn scan_workflows(workflows: &[Workflow], durations: Option<&dyn DurationSource>) -> ScanReport {
    let mut report = ScanReport::default();

    for workflow in workflows {
        for job in workflow.jobs.values() {
            let eligibility = classify(job);
            if !eligibility.is_eligible() {
                tracing::debug!(
                    "{}: job '{}' is not eligible: {:?}",
                    workflow.path.display(),
                    job.id,
                    eligibility.reasons()
                );
                report
                    .ineligible
                    .push(IneligibleJob::new(workflow, job, eligibility.into_reasons()));
                continue;
            }
            report
                .candidates
                .push(Candidate::new(workflow, job, missing_commands(job)));
        }
    }

    if let Some(source) = durations {
        enrich(&mut report, source);
    }

    report
}

fn enrich(report: &mut ScanReport, source: &dyn DurationSource) {
    for candidate in &mut report.candidates {
        match source.job_duration(&candidate.workflow_path, &candidate.job_id, &candidate.job_name) {
            Ok(duration) => candidate.duration = Some(duration),
            Err(e) => {
                let warning = format!(
                    "failed to get duration for job {} (ID: {}) in {}: {:#}",
                    candidate.job_name,
                    candidate.job_id,
                    candidate.workflow_path.display(),
                    e
                );
                tracing::debug!("{}", warning);
                report.warnings.push(warning);
            }
        }
    }
}
