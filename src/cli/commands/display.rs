//! Report rendering shared by `scan` and `fix`.
//!
//! The human form groups jobs per workflow file; the JSON form mirrors
//! the same data for tooling.

use serde::Serialize;

use crate::analysis::IneligibleReason;
use crate::error::Result;
use crate::scan::{Candidate, IneligibleJob, ScanReport};
use crate::ui::{display_path, format_duration, format_local_link, UserInterface};

/// Print the report grouped by workflow, followed by the summary.
///
/// Per-job detail is omitted in quiet mode.
pub fn show_report(ui: &mut dyn UserInterface, report: &ScanReport, target_runner: &str) {
    if ui.output_mode().shows_details() {
        for path in report.workflow_paths() {
            let safe: Vec<&Candidate> = report
                .safe()
                .filter(|c| &c.workflow_path == path)
                .collect();
            let attention: Vec<&Candidate> = report
                .needs_attention()
                .filter(|c| &c.workflow_path == path)
                .collect();
            let ineligible: Vec<&IneligibleJob> = report
                .ineligible
                .iter()
                .filter(|j| &j.workflow_path == path)
                .collect();

            ui.show_header(&display_path(path));
            show_safe(ui, &safe);
            show_attention(ui, &attention);
            show_ineligible(ui, &ineligible);
        }
    }
    show_summary(ui, report, target_runner);
}

fn show_safe(ui: &mut dyn UserInterface, jobs: &[&Candidate]) {
    if jobs.is_empty() {
        return;
    }
    ui.message(&format!("  ✅ Safe to migrate ({} job(s)):", jobs.len()));
    for job in jobs {
        let duration = job.duration.map(format_duration).unwrap_or_default();
        ui.message(&format!(
            "     • \"{}\" (L{}) - Last execution time: {}",
            job.job_name, job.line, duration
        ));
        ui.message(&format!(
            "       {}",
            format_local_link(&job.workflow_path, job.line)
        ));
    }
}

fn show_attention(ui: &mut dyn UserInterface, jobs: &[&Candidate]) {
    if jobs.is_empty() {
        return;
    }
    ui.message(&format!(
        "  ⚠️  Can migrate but requires attention ({} job(s)):",
        jobs.len()
    ));
    for job in jobs {
        ui.message(&format!("     • \"{}\" (L{})", job.job_name, job.line));
        ui.message(&format!("       ⚠️  {}", attention_detail(job)));
        if let Some(duration) = job.duration {
            ui.message(&format!(
                "       Last execution time: {}",
                format_duration(duration)
            ));
        }
        ui.message(&format!(
            "       {}",
            format_local_link(&job.workflow_path, job.line)
        ));
    }
}

fn show_ineligible(ui: &mut dyn UserInterface, jobs: &[&IneligibleJob]) {
    if jobs.is_empty() {
        return;
    }
    ui.message(&format!("  ❌ Cannot migrate ({} job(s)):", jobs.len()));
    for job in jobs {
        ui.message(&format!("     • \"{}\" (L{})", job.job_name, job.line));
        ui.message(&format!("       ❌ {}", join_reasons(&job.reasons)));
        ui.message(&format!(
            "       {}",
            format_local_link(&job.workflow_path, job.line)
        ));
    }
}

fn show_summary(ui: &mut dyn UserInterface, report: &ScanReport, target_runner: &str) {
    if report.is_empty() {
        ui.message(&format!(
            "No jobs found that can be safely migrated to {}.",
            target_runner
        ));
        return;
    }

    let safe = report.safe().count();
    let attention = report.needs_attention().count();
    let ineligible = report.ineligible.len();

    ui.message("");
    if safe > 0 {
        ui.message(&format!("✅ {} job(s) can be safely migrated", safe));
    }
    if attention > 0 {
        ui.message(&format!(
            "⚠️  {} job(s) can be migrated but require attention",
            attention
        ));
    }
    if ineligible > 0 {
        ui.message(&format!("❌ {} job(s) cannot be migrated", ineligible));
    }
    ui.message(&format!(
        "📊 Total: {} job(s) eligible for migration",
        safe + attention
    ));
}

/// The warning shown under a job that needs attention.
pub fn attention_detail(candidate: &Candidate) -> String {
    let mut parts = Vec::new();
    if !candidate.missing_commands.is_empty() {
        parts.push(format!(
            "Setup may be required ({})",
            candidate.missing_commands.join(", ")
        ));
    }
    if candidate.duration.is_none() {
        parts.push("Last execution time: unknown".to_string());
    }
    parts.join(", ")
}

fn join_reasons(reasons: &[IneligibleReason]) -> String {
    reasons
        .iter()
        .map(IneligibleReason::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Serialize)]
struct JsonReport {
    candidates: Vec<JsonCandidate>,
    ineligible: Vec<JsonIneligible>,
    summary: JsonSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

#[derive(Serialize)]
struct JsonCandidate {
    workflow: String,
    job_id: String,
    job_name: String,
    line: usize,
    safe: bool,
    missing_commands: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<u64>,
}

#[derive(Serialize)]
struct JsonIneligible {
    workflow: String,
    job_id: String,
    job_name: String,
    line: usize,
    reasons: Vec<IneligibleReason>,
}

#[derive(Serialize)]
struct JsonSummary {
    safe: usize,
    needs_attention: usize,
    ineligible: usize,
    total_eligible: usize,
}

/// Render the report as pretty-printed JSON.
pub fn report_json(report: &ScanReport) -> Result<String> {
    let safe = report.safe().count();
    let needs_attention = report.needs_attention().count();
    let output = JsonReport {
        candidates: report
            .candidates
            .iter()
            .map(|c| JsonCandidate {
                workflow: display_path(&c.workflow_path),
                job_id: c.job_id.clone(),
                job_name: c.job_name.clone(),
                line: c.line,
                safe: c.is_safe(),
                missing_commands: c.missing_commands.clone(),
                duration_secs: c.duration.map(|d| d.as_secs()),
            })
            .collect(),
        ineligible: report
            .ineligible
            .iter()
            .map(|j| JsonIneligible {
                workflow: display_path(&j.workflow_path),
                job_id: j.job_id.clone(),
                job_name: j.job_name.clone(),
                line: j.line,
                reasons: j.reasons.clone(),
            })
            .collect(),
        summary: JsonSummary {
            safe,
            needs_attention,
            ineligible: report.ineligible.len(),
            total_eligible: safe + needs_attention,
        },
        warnings: report.warnings.clone(),
    };
    let json = serde_json::to_string_pretty(&output).map_err(anyhow::Error::from)?;
    Ok(json)
}
