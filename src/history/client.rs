//! GitHub Actions run-history client.
//!
//! Looks up how long a job took in the most recent successful run of its
//! workflow.

use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, FixedOffset};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::auth::resolve_token;
use super::repo::RepoInfo;
use crate::config::HistoryConfig;
use crate::scan::DurationSource;

const USER_AGENT: &str = concat!("slimify/", env!("CARGO_PKG_VERSION"));
const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";

/// Fetches job durations from the GitHub REST API.
pub struct HistoryClient {
    client: Client,
    api_url: String,
    owner: String,
    repo: String,
    token: Option<String>,
    max_runs: u32,
}

#[derive(Debug, Deserialize)]
struct WorkflowRuns {
    #[serde(default)]
    workflow_runs: Vec<WorkflowRun>,
}

#[derive(Debug, Deserialize)]
struct WorkflowRun {
    id: u64,
    status: Option<String>,
    conclusion: Option<String>,
}

impl WorkflowRun {
    fn succeeded(&self) -> bool {
        self.status.as_deref() == Some("completed") && self.conclusion.as_deref() == Some("success")
    }
}

#[derive(Debug, Deserialize)]
struct RunJobs {
    #[serde(default)]
    jobs: Vec<RunJob>,
}

#[derive(Debug, Deserialize)]
struct RunJob {
    name: String,
    started_at: Option<String>,
    completed_at: Option<String>,
}

impl RunJob {
    fn duration(&self) -> Result<Duration> {
        let (Some(started), Some(completed)) = (&self.started_at, &self.completed_at) else {
            bail!("job {} has incomplete timing information", self.name);
        };
        let started = parse_timestamp(started).context("failed to parse start time")?;
        let completed = parse_timestamp(completed).context("failed to parse completed time")?;
        (completed - started)
            .to_std()
            .map_err(|_| anyhow!("job {} completed before it started", self.name))
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>> {
    Ok(DateTime::parse_from_rfc3339(value)?)
}

impl HistoryClient {
    /// Create a client for `owner/repo` on the API at `api_url`.
    pub fn new(
        api_url: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            owner: owner.into(),
            repo: repo.into(),
            token: None,
            max_runs: 10,
        })
    }

    /// Create a client for a discovered repository.
    ///
    /// Uses `config.api_url` when set, otherwise the host's API. The token
    /// comes from [`resolve_token`].
    pub fn for_repo(repo: &RepoInfo, config: &HistoryConfig) -> Result<Self> {
        let api_url = config
            .api_url
            .clone()
            .unwrap_or_else(|| repo.api_base_url());
        let client = Self::new(
            api_url,
            &repo.owner,
            &repo.name,
            Duration::from_secs(config.timeout_secs),
        )?
        .with_max_runs(config.max_runs);

        let token = resolve_token(&repo.host);
        if token.is_none() {
            tracing::debug!("No GitHub token found; using unauthenticated requests");
        }
        Ok(client.with_token(token))
    }

    /// Authenticate requests with `token`.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Inspect at most `max_runs` recent runs.
    pub fn with_max_runs(mut self, max_runs: u32) -> Self {
        self.max_runs = max_runs.max(1);
        self
    }

    /// Duration of `job_name` (or `job_id`) in the most recent successful
    /// run of the workflow stored in `workflow_file`.
    pub fn latest_job_duration(
        &self,
        workflow_file: &str,
        job_id: &str,
        job_name: &str,
    ) -> Result<Duration> {
        let runs = self
            .workflow_runs(workflow_file)
            .context("failed to get workflow runs")?;

        if runs.is_empty() {
            bail!("no workflow runs found");
        }

        for run in runs.iter().filter(|run| run.succeeded()) {
            match self.duration_in_run(run.id, job_id, job_name) {
                Ok(duration) => return Ok(duration),
                Err(e) => tracing::debug!("run {}: {:#}", run.id, e),
            }
        }

        bail!("no successful run found with job {} (ID: {})", job_name, job_id)
    }

    fn workflow_runs(&self, workflow_file: &str) -> Result<Vec<WorkflowRun>> {
        let path = format!(
            "/repos/{}/{}/actions/workflows/{}/runs?per_page={}",
            self.owner, self.repo, workflow_file, self.max_runs
        );
        let response: WorkflowRuns = self.get(&path)?;
        Ok(response.workflow_runs)
    }

    fn duration_in_run(&self, run_id: u64, job_id: &str, job_name: &str) -> Result<Duration> {
        let path = format!("/repos/{}/{}/actions/runs/{}/jobs", self.owner, self.repo, run_id);
        let response: RunJobs = self.get(&path).context("failed to fetch jobs")?;

        let job = response
            .jobs
            .iter()
            .find(|job| job.name.eq_ignore_ascii_case(job_name))
            .or_else(|| {
                response
                    .jobs
                    .iter()
                    .find(|job| job.name.eq_ignore_ascii_case(job_id))
            })
            .ok_or_else(|| anyhow!("job {} (ID: {}) not found in run {}", job_name, job_id, run_id))?;

        job.duration()
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.api_url, path);
        tracing::debug!("GET {}", url);

        let mut request = self
            .client
            .get(&url)
            .header("Accept", ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), url);
        }

        response
            .json()
            .with_context(|| format!("Failed to parse response from {}", url))
    }
}

impl DurationSource for HistoryClient {
    fn job_duration(&self, workflow_path: &Path, job_id: &str, job_name: &str) -> Result<Duration> {
        let file_name = workflow_path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow!("invalid workflow path {}", workflow_path.display()))?;
        self.latest_job_duration(file_name, job_id, job_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(server: &MockServer) -> HistoryClient {
        HistoryClient::new(server.base_url(), "octo", "hello", Duration::from_secs(10)).unwrap()
    }

    fn runs_path() -> &'static str {
        "/repos/octo/hello/actions/workflows/ci.yml/runs"
    }

    fn job(name: &str, started: &str, completed: &str) -> serde_json::Value {
        json!({ "name": name, "started_at": started, "completed_at": completed })
    }

    #[test]
    fn default_settings() {
        let client = HistoryClient::new("https://api.github.com/", "o", "r", Duration::from_secs(30)).unwrap();
        assert_eq!(client.api_url, "https://api.github.com");
        assert_eq!(client.max_runs, 10);
    }

    #[test]
    fn returns_duration_from_latest_successful_run() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(runs_path()).query_param("per_page", "10");
            then.status(200).json_body(json!({
                "workflow_runs": [
                    { "id": 3, "status": "in_progress", "conclusion": null },
                    { "id": 2, "status": "completed", "conclusion": "failure" },
                    { "id": 1, "status": "completed", "conclusion": "success" }
                ]
            }));
        });
        let jobs = server.mock(|when, then| {
            when.method(GET).path("/repos/octo/hello/actions/runs/1/jobs");
            then.status(200).json_body(json!({
                "jobs": [
                    job("Build", "2025-01-01T10:00:00Z", "2025-01-01T10:04:30Z"),
                    job("Lint", "2025-01-01T10:00:00Z", "2025-01-01T10:00:45Z")
                ]
            }));
        });

        let duration = client(&server).latest_job_duration("ci.yml", "lint", "Lint").unwrap();
        assert_eq!(duration, Duration::from_secs(45));
        jobs.assert();
    }

    #[test]
    fn display_name_match_is_case_insensitive() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(runs_path());
            then.status(200).json_body(json!({
                "workflow_runs": [{ "id": 7, "status": "completed", "conclusion": "success" }]
            }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/repos/octo/hello/actions/runs/7/jobs");
            then.status(200).json_body(json!({
                "jobs": [job("build and test", "2025-01-01T10:00:00Z", "2025-01-01T11:15:00Z")]
            }));
        });

        let duration = client(&server)
            .latest_job_duration("ci.yml", "build", "Build And Test")
            .unwrap();
        assert_eq!(duration, Duration::from_secs(75 * 60));
    }

    #[test]
    fn falls_back_to_job_id() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(runs_path());
            then.status(200).json_body(json!({
                "workflow_runs": [{ "id": 7, "status": "completed", "conclusion": "success" }]
            }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/repos/octo/hello/actions/runs/7/jobs");
            then.status(200).json_body(json!({
                "jobs": [job("test", "2025-01-01T10:00:00+02:00", "2025-01-01T10:02:00+02:00")]
            }));
        });

        let duration = client(&server).latest_job_duration("ci.yml", "test", "Unit tests").unwrap();
        assert_eq!(duration, Duration::from_secs(120));
    }

    #[test]
    fn skips_runs_without_the_job() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(runs_path());
            then.status(200).json_body(json!({
                "workflow_runs": [
                    { "id": 2, "status": "completed", "conclusion": "success" },
                    { "id": 1, "status": "completed", "conclusion": "success" }
                ]
            }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/repos/octo/hello/actions/runs/2/jobs");
            then.status(200).json_body(json!({ "jobs": [] }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/repos/octo/hello/actions/runs/1/jobs");
            then.status(200).json_body(json!({
                "jobs": [job("deploy", "2025-01-01T10:00:00Z", "2025-01-01T10:00:10Z")]
            }));
        });

        let duration = client(&server).latest_job_duration("ci.yml", "deploy", "deploy").unwrap();
        assert_eq!(duration, Duration::from_secs(10));
    }

    #[test]
    fn no_runs_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(runs_path());
            then.status(200).json_body(json!({ "workflow_runs": [] }));
        });

        let err = client(&server).latest_job_duration("ci.yml", "a", "a").unwrap_err();
        assert!(err.to_string().contains("no workflow runs found"));
    }

    #[test]
    fn no_successful_run_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(runs_path());
            then.status(200).json_body(json!({
                "workflow_runs": [{ "id": 1, "status": "completed", "conclusion": "cancelled" }]
            }));
        });

        let err = client(&server).latest_job_duration("ci.yml", "a", "A").unwrap_err();
        assert!(err.to_string().contains("no successful run found with job A (ID: a)"));
    }

    #[test]
    fn incomplete_timing_is_a_miss() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(runs_path());
            then.status(200).json_body(json!({
                "workflow_runs": [{ "id": 1, "status": "completed", "conclusion": "success" }]
            }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/repos/octo/hello/actions/runs/1/jobs");
            then.status(200).json_body(json!({
                "jobs": [{ "name": "a", "started_at": "2025-01-01T10:00:00Z", "completed_at": null }]
            }));
        });

        assert!(client(&server).latest_job_duration("ci.yml", "a", "a").is_err());
    }

    #[test]
    fn http_error_is_reported() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(runs_path());
            then.status(404).body("Not Found");
        });

        let err = client(&server).latest_job_duration("ci.yml", "a", "a").unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("404"), "Error should mention 404: {}", message);
    }

    #[test]
    fn sends_token_and_headers() {
        let server = MockServer::start();
        let runs = server.mock(|when, then| {
            when.method(GET)
                .path(runs_path())
                .query_param("per_page", "3")
                .header("authorization", "Bearer secret")
                .header("accept", ACCEPT);
            then.status(200).json_body(json!({ "workflow_runs": [] }));
        });

        let client = client(&server)
            .with_token(Some("secret".into()))
            .with_max_runs(3);
        let _ = client.latest_job_duration("ci.yml", "a", "a");
        runs.assert();
    }

    #[test]
    fn duration_source_uses_file_name() {
        let server = MockServer::start();
        let runs = server.mock(|when, then| {
            when.method(GET).path(runs_path());
            then.status(200).json_body(json!({ "workflow_runs": [] }));
        });

        let client = client(&server);
        let source: &dyn DurationSource = &client;
        let _ = source.job_duration(Path::new(".github/workflows/ci.yml"), "a", "a");
        runs.assert();
    }

    #[test]
    fn negative_span_is_rejected() {
        let job = RunJob {
            name: "a".into(),
            started_at: Some("2025-01-01T10:00:10Z".into()),
            completed_at: Some("2025-01-01T10:00:00Z".into()),
        };
        assert!(job.duration().is_err());
    }
}
