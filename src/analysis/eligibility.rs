//! Hard migration criteria.
//!
//! ubuntu-slim runs inside a container and has no Docker daemon, so any job
//! that needs Docker, a service container or a job container cannot move.
//! The runner check short-circuits; the remaining criteria are all
//! evaluated so a job reports every reason it fails.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::workflow::{Job, Step};

/// Patterns for Docker usage in (lower-cased) scripts.
static CONTAINER_COMMAND_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\bdocker[\s-](?:build|run|exec|ps|pull|push|tag|login)\b",
        r"\bdocker-compose\b",
        r"\bdocker\s+compose\b",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("container command pattern must compile"))
    .collect()
});

/// `uses:` prefixes of container-based actions: `docker://image` and the
/// `docker/` organization.
const CONTAINER_ACTION_PREFIXES: &[&str] = &["docker"];

/// Why a job cannot be migrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IneligibleReason {
    /// `runs-on` does not resolve to `ubuntu-latest`.
    NotUbuntuLatest,
    /// A script runs Docker commands.
    DockerCommands,
    /// A step uses a container-based action.
    ContainerActions,
    /// The job declares `services:`.
    ServiceContainers,
    /// The job declares `container:`.
    ContainerSyntax,
}

impl IneligibleReason {
    /// Human-readable reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotUbuntuLatest => "does not run on ubuntu-latest",
            Self::DockerCommands => "uses Docker commands",
            Self::ContainerActions => "uses container-based GitHub Actions",
            Self::ServiceContainers => "uses service containers",
            Self::ContainerSyntax => "uses container syntax",
        }
    }
}

impl fmt::Display for IneligibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for IneligibleReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Outcome of [`classify`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Eligibility {
    reasons: Vec<IneligibleReason>,
}

impl Eligibility {
    /// Whether every criterion passed.
    pub fn is_eligible(&self) -> bool {
        self.reasons.is_empty()
    }

    /// Failed criteria in evaluation order; empty when eligible.
    pub fn reasons(&self) -> &[IneligibleReason] {
        &self.reasons
    }

    /// Consume into the reason list.
    pub fn into_reasons(self) -> Vec<IneligibleReason> {
        self.reasons
    }
}

/// Evaluate a job against the hard migration criteria.
///
/// # Example
///
/// ```
/// use slimify::analysis::{classify, IneligibleReason};
/// use slimify::workflow::{Job, RunsOn, Step};
///
/// let job = Job::new("build", RunsOn::Scalar("ubuntu-latest".into()))
///     .with_steps(vec![Step::run("docker build -t app .")]);
/// assert_eq!(classify(&job).reasons(), &[IneligibleReason::DockerCommands]);
/// ```
pub fn classify(job: &Job) -> Eligibility {
    if !job.is_ubuntu_latest() {
        return Eligibility {
            reasons: vec![IneligibleReason::NotUbuntuLatest],
        };
    }

    let mut reasons = Vec::new();
    if job.steps.iter().any(|s| has_docker_commands(s.script())) {
        reasons.push(IneligibleReason::DockerCommands);
    }
    if job.steps.iter().map(Step::uses_reference).any(is_container_action) {
        reasons.push(IneligibleReason::ContainerActions);
    }
    if job.has_services() {
        reasons.push(IneligibleReason::ServiceContainers);
    }
    if job.has_container() {
        reasons.push(IneligibleReason::ContainerSyntax);
    }

    Eligibility { reasons }
}

/// Whether a script contains Docker commands.
///
/// Matching is case-insensitive and word-bounded: `docker build`,
/// `sudo docker run`, `docker-compose up` and `docker compose up` match,
/// `echo dockerhub.com` does not.
pub fn has_docker_commands(script: &str) -> bool {
    if script.is_empty() {
        return false;
    }
    let lowered = script.to_lowercase();
    CONTAINER_COMMAND_PATTERNS
        .iter()
        .any(|pattern| pattern.is_match(&lowered))
}

/// Whether a `uses:` reference is a container-based action.
pub fn is_container_action(uses: &str) -> bool {
    !uses.is_empty()
        && CONTAINER_ACTION_PREFIXES
            .iter()
            .any(|prefix| uses.starts_with(prefix))
}
