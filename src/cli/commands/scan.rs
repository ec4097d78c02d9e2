//! The default command: report which jobs can move to the slim runner.

use std::path::{Path, PathBuf};

use crate::cli::args::{ScanArgs, TargetArgs};
use crate::config::{load_config, HistoryConfig, SlimifyConfig};
use crate::error::Result;
use crate::history::{HistoryClient, RepoInfo};
use crate::scan::{scan_workflows, ScanReport};
use crate::ui::{SpinnerHandle, UserInterface};
use crate::workflow::Workflow;

use super::dispatcher::{Command, CommandResult};
use super::display::{report_json, show_report};

/// The scan command implementation.
pub struct ScanCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: ScanArgs,
}

impl ScanCommand {
    /// Create a new scan command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: ScanArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }
}

impl Command for ScanCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some((config, workflows)) = load_targets(
            &self.project_root,
            self.config_path.as_deref(),
            &self.args.targets,
            ui,
            "slimify",
        )?
        else {
            return Ok(CommandResult::failure(1));
        };

        let report = scan_with_history(ui, &self.project_root, &config, &workflows);

        if self.args.json {
            ui.message(&report_json(&report)?);
            return Ok(CommandResult::success());
        }

        show_enrichment_warnings(ui, &report);
        show_report(ui, &report, &config.target_runner);
        Ok(CommandResult::success())
    }
}

/// Load the configuration and the targeted workflows.
///
/// Returns `None` after printing usage examples when nothing was targeted.
/// `command` is the invocation shown in those examples.
pub(crate) fn load_targets(
    project_root: &Path,
    config_path: Option<&Path>,
    targets: &TargetArgs,
    ui: &mut dyn UserInterface,
    command: &str,
) -> Result<Option<(SlimifyConfig, Vec<Workflow>)>> {
    let mut config = load_config(project_root, config_path)?;
    if targets.skip_duration {
        config.history.enabled = false;
    }

    let selection = targets.targets();
    if selection.is_empty() {
        ui.error(
            "Error: no workflow files specified. Use --all to scan all workflows, \
             or specify workflow file(s) as arguments or with --file flag.",
        );
        ui.show_hint(&format!("Example: {} --all", command));
        ui.show_hint(&format!(
            "Example: {} .github/workflows/ci.yml",
            command
        ));
        return Ok(None);
    }

    let workflow_dir = project_root.join(&config.workflow_dir);
    let workflows = selection.load(&workflow_dir)?;
    tracing::debug!("Loaded {} workflow file(s)", workflows.len());
    Ok(Some((config, workflows)))
}

/// Scan the workflows, looking up durations when history is enabled.
///
/// When the repository or client can't be set up, every candidate keeps an
/// unknown duration.
pub(crate) fn scan_with_history(
    ui: &mut dyn UserInterface,
    project_root: &Path,
    config: &SlimifyConfig,
    workflows: &[Workflow],
) -> ScanReport {
    if !config.history.enabled {
        return scan_workflows(workflows, None);
    }

    let client = match history_client(project_root, &config.history) {
        Ok(client) => client,
        Err(e) => {
            tracing::debug!("Duration lookup disabled: {:#}", e);
            ui.warning(&format!(
                "Skipping job durations: {}. Use --skip-duration to silence this.",
                e
            ));
            return scan_workflows(workflows, None);
        }
    };

    let mut spinner = ui.start_spinner("Fetching job durations from GitHub...");
    let report = scan_workflows(workflows, Some(&client));
    finish_duration_spinner(spinner.as_mut(), &report);
    report
}

/// Close the lookup spinner with how many candidates got a duration.
fn finish_duration_spinner(spinner: &mut dyn SpinnerHandle, report: &ScanReport) {
    let total = report.candidates.len();
    let found = report
        .candidates
        .iter()
        .filter(|c| c.duration.is_some())
        .count();
    if total == 0 {
        spinner.finish_clear();
    } else if found == 0 {
        spinner.finish_error("Could not fetch any job durations");
    } else {
        spinner.finish_success(&format!(
            "Fetched durations for {} of {} job(s)",
            found, total
        ));
    }
}

fn history_client(project_root: &Path, config: &HistoryConfig) -> anyhow::Result<HistoryClient> {
    let repo = RepoInfo::discover(project_root)?;
    tracing::debug!("Repository: {}/{} on {}", repo.owner, repo.name, repo.host);
    HistoryClient::for_repo(&repo, config)
}

/// Per-job lookup failures, shown in verbose mode.
pub(crate) fn show_enrichment_warnings(ui: &mut dyn UserInterface, report: &ScanReport) {
    if !ui.output_mode().shows_diagnostics() {
        return;
    }
    for warning in &report.warnings {
        ui.warning(warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{MockSpinner, MockUI, OutputMode};
    use std::fs;
    use tempfile::TempDir;

    const CI: &str = "\
name: CI
jobs:
  lint:
    name: Lint
    runs-on: ubuntu-latest
    steps:
      - run: npm ci && npm run lint
  build:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
      - run: go build ./...
  e2e:
    runs-on: ubuntu-latest
    services:
      postgres:
        image: postgres:16
    steps:
      - run: make e2e
";

    fn project() -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".github/workflows");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("ci.yml"), CI).unwrap();
        temp
    }

    fn all_offline() -> ScanArgs {
        ScanArgs {
            targets: TargetArgs {
                all: true,
                skip_duration: true,
                ..Default::default()
            },
            json: false,
        }
    }

    #[test]
    fn scan_reports_groups() {
        let temp = project();
        let cmd = ScanCommand::new(temp.path(), None, all_offline());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("Can migrate but requires attention (2 job(s)):"));
        assert!(ui.has_message("Setup may be required (go), Last execution time: unknown"));
        assert!(ui.has_message("❌ uses service containers"));
        assert!(ui.has_message("📊 Total: 2 job(s) eligible for migration"));
        assert!(ui.spinners().is_empty());
    }

    #[test]
    fn scan_without_targets_fails_with_examples() {
        let temp = project();
        let args = ScanArgs {
            targets: TargetArgs {
                skip_duration: true,
                ..Default::default()
            },
            json: false,
        };
        let cmd = ScanCommand::new(temp.path(), None, args);
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("no workflow files specified"));
        assert!(ui.has_hint("Example: slimify --all"));
    }

    #[test]
    fn scan_named_file() {
        let temp = project();
        let args = ScanArgs {
            targets: TargetArgs {
                files: vec![temp.path().join(".github/workflows/ci.yml")],
                skip_duration: true,
                ..Default::default()
            },
            json: false,
        };
        let cmd = ScanCommand::new(temp.path(), None, args);
        let mut ui = MockUI::new();

        assert!(cmd.execute(&mut ui).unwrap().success);
        assert_eq!(ui.headers().len(), 1);
        assert!(ui.headers()[0].ends_with("ci.yml"));
    }

    #[test]
    fn scan_missing_named_file_is_an_error() {
        let temp = project();
        let args = ScanArgs {
            targets: TargetArgs {
                files: vec![temp.path().join("nope.yml")],
                skip_duration: true,
                ..Default::default()
            },
            json: false,
        };
        let cmd = ScanCommand::new(temp.path(), None, args);
        let mut ui = MockUI::new();

        assert!(cmd.execute(&mut ui).is_err());
    }

    #[test]
    fn scan_json() {
        let temp = project();
        let mut args = all_offline();
        args.json = true;
        let cmd = ScanCommand::new(temp.path(), None, args);
        let mut ui = MockUI::new();

        assert!(cmd.execute(&mut ui).unwrap().success);
        let value: serde_json::Value = serde_json::from_str(&ui.transcript()).unwrap();
        assert_eq!(value["summary"]["needs_attention"], 2);
        assert_eq!(value["summary"]["ineligible"], 1);
    }

    #[test]
    fn config_workflow_dir_is_used() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("ci/workflows");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("ci.yml"), CI).unwrap();
        fs::write(
            temp.path().join(".slimify.yml"),
            "workflow_dir: ci/workflows\n",
        )
        .unwrap();

        let cmd = ScanCommand::new(temp.path(), None, all_offline());
        let mut ui = MockUI::new();

        assert!(cmd.execute(&mut ui).unwrap().success);
        assert!(ui.has_message("📊 Total: 2 job(s)"));
    }

    #[test]
    fn history_disabled_in_config_skips_lookup() {
        let temp = project();
        fs::write(
            temp.path().join(".slimify.yml"),
            "history:\n  enabled: false\n",
        )
        .unwrap();
        let args = ScanArgs {
            targets: TargetArgs {
                all: true,
                ..Default::default()
            },
            json: false,
        };
        let cmd = ScanCommand::new(temp.path(), None, args);
        let mut ui = MockUI::new();

        assert!(cmd.execute(&mut ui).unwrap().success);
        assert!(ui.warnings().is_empty());
        assert!(ui.spinners().is_empty());
    }

    fn candidate(secs: Option<u64>) -> crate::scan::Candidate {
        crate::scan::Candidate {
            workflow_path: PathBuf::from("ci.yml"),
            job_id: "build".to_string(),
            job_name: "build".to_string(),
            line: 3,
            missing_commands: vec![],
            duration: secs.map(std::time::Duration::from_secs),
        }
    }

    #[test]
    fn duration_spinner_reports_found_count() {
        let report = ScanReport {
            candidates: vec![candidate(Some(60)), candidate(None)],
            ..Default::default()
        };
        let mut spinner = MockSpinner::new();
        finish_duration_spinner(&mut spinner, &report);
        assert_eq!(
            spinner.finish_message(),
            Some("Fetched durations for 1 of 2 job(s)")
        );
    }

    #[test]
    fn duration_spinner_reports_total_miss() {
        let report = ScanReport {
            candidates: vec![candidate(None)],
            ..Default::default()
        };
        let mut spinner = MockSpinner::new();
        finish_duration_spinner(&mut spinner, &report);
        assert_eq!(
            spinner.finish_message(),
            Some("Could not fetch any job durations")
        );

        let mut spinner = MockSpinner::new();
        finish_duration_spinner(&mut spinner, &ScanReport::default());
        assert_eq!(spinner.finish_message(), None);
    }

    #[test]
    fn verbose_shows_enrichment_warnings() {
        let report = ScanReport {
            warnings: vec!["failed to get duration for job build".to_string()],
            ..Default::default()
        };
        let mut ui = MockUI::with_mode(OutputMode::Verbose);
        show_enrichment_warnings(&mut ui, &report);
        assert!(ui.has_warning("failed to get duration"));

        let mut ui = MockUI::new();
        show_enrichment_warnings(&mut ui, &report);
        assert!(ui.warnings().is_empty());
    }
}
