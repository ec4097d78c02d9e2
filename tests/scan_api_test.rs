//! Tests of the public library API: loading, classifying and updating
//! workflows on disk.

use std::cell::Cell;
use std::fs;
use std::path::Path;
use std::time::Duration;

use slimify::analysis::{classify, extract_commands, IneligibleReason};
use slimify::scan::{scan_workflows, DurationSource, Targets};
use slimify::workflow::{load_workflow, update_runs_on, RunsOn};
use slimify::SlimifyError;
use tempfile::TempDir;

const WORKFLOW: &str = r#"name: CI
on:
  push:
    branches: [main]

jobs:
  docker:
    runs-on: ubuntu-latest
    steps:
      - run: docker build -t app .
  go:
    name: Go tests
    runs-on: ubuntu-latest
    steps:
      - uses: actions/setup-go@v5
      - run: go test ./...
  matrix:
    runs-on: [ubuntu-22.04, ubuntu-latest]
    steps:
      - run: echo hi
  registry:
    runs-on: ubuntu-latest
    steps:
      - run: echo 'dockerhub.com'
  db:
    runs-on: ubuntu-latest
    services: {}
    steps:
      - run: make test
  windows:
    runs-on: windows-latest
    services:
      redis:
        image: redis
    steps:
      - run: docker ps
"#;

fn write_workflow(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let workflows = dir.join(".github/workflows");
    fs::create_dir_all(&workflows).unwrap();
    let path = workflows.join(name);
    fs::write(&path, content).unwrap();
    path
}

struct CountingSource {
    calls: Cell<usize>,
}

impl DurationSource for CountingSource {
    fn job_duration(
        &self,
        _workflow_path: &Path,
        job_id: &str,
        _job_name: &str,
    ) -> anyhow::Result<Duration> {
        self.calls.set(self.calls.get() + 1);
        if job_id == "registry" {
            anyhow::bail!("no successful run found");
        }
        Ok(Duration::from_secs(90))
    }
}

#[test]
fn classifies_scenarios_from_disk() {
    let temp = TempDir::new().unwrap();
    let path = write_workflow(temp.path(), "ci.yml", WORKFLOW);
    let workflow = load_workflow(&path).unwrap();

    let reasons = |id: &str| classify(workflow.job(id).unwrap()).into_reasons();

    assert_eq!(reasons("docker"), vec![IneligibleReason::DockerCommands]);
    assert!(reasons("go").is_empty());
    assert!(reasons("matrix").is_empty());
    assert!(reasons("registry").is_empty());
    assert_eq!(reasons("db"), vec![IneligibleReason::ServiceContainers]);
    assert_eq!(reasons("windows"), vec![IneligibleReason::NotUbuntuLatest]);
}

#[test]
fn scan_report_with_durations() {
    let temp = TempDir::new().unwrap();
    let path = write_workflow(temp.path(), "ci.yml", WORKFLOW);
    let workflow = load_workflow(&path).unwrap();
    let source = CountingSource {
        calls: Cell::new(0),
    };

    let report = scan_workflows(&[workflow], Some(&source));

    let mut candidates: Vec<&str> = report.candidates.iter().map(|c| c.job_id.as_str()).collect();
    candidates.sort();
    assert_eq!(candidates, vec!["go", "matrix", "registry"]);

    let mut ineligible: Vec<&str> = report.ineligible.iter().map(|j| j.job_id.as_str()).collect();
    ineligible.sort();
    assert_eq!(ineligible, vec!["db", "docker", "windows"]);

    // Only candidates are looked up.
    assert_eq!(source.calls.get(), 3);

    let go = report.candidates.iter().find(|c| c.job_id == "go").unwrap();
    assert_eq!(go.job_name, "Go tests");
    assert!(go.missing_commands.is_empty());
    assert_eq!(go.duration, Some(Duration::from_secs(90)));
    assert!(go.is_safe());

    let registry = report
        .candidates
        .iter()
        .find(|c| c.job_id == "registry")
        .unwrap();
    assert_eq!(registry.duration, None);
    assert!(!registry.is_safe());
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.safe().count(), 2);
    assert_eq!(report.needs_attention().count(), 1);
}

#[test]
fn update_then_reload_changes_only_the_runner() {
    let temp = TempDir::new().unwrap();
    let path = write_workflow(temp.path(), "ci.yml", WORKFLOW);
    let before = load_workflow(&path).unwrap();

    update_runs_on(&path, "go", "ubuntu-slim").unwrap();
    update_runs_on(&path, "matrix", "ubuntu-slim").unwrap();

    let after = load_workflow(&path).unwrap();
    let go = after.job("go").unwrap();
    assert_eq!(go.runs_on, RunsOn::Scalar("ubuntu-slim".to_string()));
    assert_eq!(go.steps, before.job("go").unwrap().steps);
    assert_eq!(
        after.job("matrix").unwrap().runs_on,
        RunsOn::Sequence(vec!["ubuntu-22.04".to_string(), "ubuntu-slim".to_string()])
    );
    assert_eq!(after.job("docker").unwrap(), before.job("docker").unwrap());
    assert_eq!(after.job("db").unwrap(), before.job("db").unwrap());
}

#[test]
fn update_of_missing_job_fails() {
    let temp = TempDir::new().unwrap();
    let path = write_workflow(temp.path(), "ci.yml", WORKFLOW);

    let err = update_runs_on(&path, "deploy", "ubuntu-slim").unwrap_err();
    assert!(matches!(err, SlimifyError::JobNotFound { .. }));
    assert_eq!(fs::read_to_string(&path).unwrap(), WORKFLOW);
}

#[test]
fn targets_all_skips_broken_documents() {
    let temp = TempDir::new().unwrap();
    write_workflow(temp.path(), "ci.yml", WORKFLOW);
    write_workflow(temp.path(), "broken.yaml", "jobs: [unclosed\n");
    write_workflow(temp.path(), "notes.txt", "not a workflow");

    let workflows = Targets::all()
        .load(&temp.path().join(".github/workflows"))
        .unwrap();
    assert_eq!(workflows.len(), 1);
    assert!(workflows[0].path.ends_with("ci.yml"));
}

#[test]
fn targets_named_broken_document_fails() {
    let temp = TempDir::new().unwrap();
    let broken = write_workflow(temp.path(), "broken.yml", "jobs: [unclosed\n");

    let err = Targets::files([broken])
        .load(&temp.path().join(".github/workflows"))
        .unwrap_err();
    assert!(matches!(err, SlimifyError::WorkflowParse { .. }));
}

#[test]
fn extract_commands_ignores_comments_and_assignments() {
    assert!(extract_commands("#!/bin/bash\n# setup\n\nFOO=bar BAZ=1\n").is_empty());
    assert_eq!(extract_commands("go"), vec!["go"]);
}

#[test]
fn job_with_numeric_step_name_is_classified() {
    let yaml = "jobs:\n  build:\n    runs-on: ubuntu-latest\n    steps:\n      - name: 1\n        run: echo hi\n";
    let workflow = slimify::workflow::parse_workflow(yaml, Path::new("ci.yml")).unwrap();

    let report = scan_workflows(&[workflow], None);

    assert_eq!(report.candidates.len(), 1);
    assert!(report.ineligible.is_empty());
    assert_eq!(report.candidates[0].job_id, "build");
}
