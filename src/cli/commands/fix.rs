//! The `slimify fix` command.
//!
//! Rescans the targeted workflows and rewrites the `runs-on` of each
//! migratable job in place.

use std::path::{Path, PathBuf};

use crate::analysis::classify;
use crate::cli::args::FixArgs;
use crate::error::{Result, SlimifyError};
use crate::scan::{unique_paths, Candidate};
use crate::ui::{display_path, UserInterface};
use crate::workflow::{load_workflow, update_runs_on};

use super::dispatcher::{Command, CommandResult};
use super::scan::{load_targets, scan_with_history, show_enrichment_warnings};

/// The fix command implementation.
pub struct FixCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: FixArgs,
}

impl FixCommand {
    /// Create a new fix command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: FixArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    /// Split candidates into the ones to update and the number skipped.
    fn select<'a>(&self, candidates: &'a [Candidate]) -> (Vec<&'a Candidate>, usize) {
        if self.args.force {
            return (candidates.iter().collect(), 0);
        }
        let selected: Vec<&Candidate> = candidates.iter().filter(|c| c.is_safe()).collect();
        let skipped = candidates.len() - selected.len();
        (selected, skipped)
    }
}

impl Command for FixCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some((config, workflows)) = load_targets(
            &self.project_root,
            self.config_path.as_deref(),
            &self.args.targets,
            ui,
            "slimify fix",
        )?
        else {
            return Ok(CommandResult::failure(1));
        };
        let runner = config.target_runner.as_str();

        let report = scan_with_history(ui, &self.project_root, &config, &workflows);
        show_enrichment_warnings(ui, &report);

        if report.candidates.is_empty() {
            ui.message(&format!(
                "No jobs found that can be safely migrated to {}.",
                runner
            ));
            return Ok(CommandResult::success());
        }

        let (selected, skipped) = self.select(&report.candidates);
        if selected.is_empty() {
            ui.message(&format!(
                "No safe jobs to update. {} job(s) have warnings and were skipped.",
                skipped
            ));
            ui.show_hint("Use --force to update jobs with warnings.");
            return Ok(CommandResult::success());
        }

        if self.args.force {
            ui.message(&format!(
                "Updating workflows to use {} (including jobs with warnings)...",
                runner
            ));
        } else {
            ui.message(&format!(
                "Updating workflows to use {} (safe jobs only)...",
                runner
            ));
            if skipped > 0 {
                ui.show_hint(&format!(
                    "Skipping {} job(s) with warnings. Use --force to update them.",
                    skipped
                ));
            }
        }

        let mut updated = 0;
        let mut errors = 0;
        for path in unique_paths(selected.iter().map(|c| &c.workflow_path)) {
            ui.show_header(&format!("Updating {}", display_path(path)));
            for candidate in selected.iter().filter(|c| &c.workflow_path == path) {
                match update_candidate(candidate, runner) {
                    Ok(()) => {
                        updated += 1;
                        let line = format!(
                            "Updated job \"{}\" (L{}) → {}",
                            candidate.job_name, candidate.line, runner
                        );
                        if candidate.is_safe() {
                            ui.success(&line);
                        } else {
                            ui.warning(&format!("{} (with warnings)", line));
                        }
                    }
                    Err(e) => {
                        errors += 1;
                        tracing::debug!("Update of {} failed: {:?}", candidate.job_id, e);
                        ui.error(&format!(
                            "Failed to update job \"{}\" (ID: {}): {}",
                            candidate.job_name, candidate.job_id, e
                        ));
                    }
                }
            }
        }

        ui.message("");
        ui.message(&format!(
            "Successfully updated {} job(s) to use {}.",
            updated, runner
        ));
        if errors > 0 {
            ui.error(&format!("Encountered {} error(s) during update.", errors));
            return Ok(CommandResult::failure(1));
        }
        Ok(CommandResult::success())
    }
}

/// Re-read the workflow, check the job is still migratable, then rewrite it.
fn update_candidate(candidate: &Candidate, runner: &str) -> Result<()> {
    let path = &candidate.workflow_path;
    let workflow = load_workflow(path)?;
    let job = workflow
        .job(&candidate.job_id)
        .ok_or_else(|| SlimifyError::JobNotFound {
            job: candidate.job_id.clone(),
            path: path.clone(),
        })?;

    let eligibility = classify(job);
    if !eligibility.is_eligible() {
        let reasons: Vec<&str> = eligibility.reasons().iter().map(|r| r.as_str()).collect();
        return Err(anyhow::anyhow!("job is no longer eligible: {}", reasons.join(", ")).into());
    }

    update_runs_on(path, &candidate.job_id, runner)
}
