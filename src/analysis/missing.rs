//! Commands that ubuntu-latest ships but ubuntu-slim does not.
//!
//! The slim image only carries a minimal toolset; language runtimes, build
//! toolchains, container tooling and cloud CLIs have to be installed by the
//! job (usually through a setup action).

use std::collections::HashSet;

use super::setup_actions::provided_commands;
use super::shell::extract_commands;
use crate::workflow::Job;

/// Commands preinstalled on ubuntu-latest that ubuntu-slim lacks.
pub const MISSING_IN_SLIM: &[&str] = &[
    // containers and orchestration
    "docker",
    "docker-compose",
    "podman",
    "buildah",
    "skopeo",
    "kubectl",
    "kind",
    "minikube",
    "helm",
    "kustomize",
    // language runtimes and package managers
    "go",
    "gofmt",
    "node",
    "npm",
    "npx",
    "yarn",
    "pnpm",
    "java",
    "javac",
    "mvn",
    "gradle",
    "ant",
    "sbt",
    "kotlin",
    "dotnet",
    "ruby",
    "gem",
    "bundle",
    "bundler",
    "rake",
    "php",
    "composer",
    "rustc",
    "cargo",
    "rustup",
    "rustfmt",
    "swift",
    "julia",
    "ghc",
    "cabal",
    "stack",
    "pip",
    "pip3",
    "pipx",
    "poetry",
    "conda",
    // compilers and build tools
    "gcc",
    "g++",
    "gfortran",
    "clang",
    "clang-format",
    "cmake",
    "ninja",
    // cloud and infrastructure
    "aws",
    "az",
    "azcopy",
    "bicep",
    "gcloud",
    "gsutil",
    "terraform",
    "packer",
    "pulumi",
    "ansible",
    "ansible-playbook",
    "sam",
    "pwsh",
    // browsers and drivers
    "google-chrome",
    "chromium",
    "chromedriver",
    "firefox",
    "geckodriver",
    "xvfb-run",
    // database clients
    "mysql",
    "psql",
    "sqlcmd",
    "mongosh",
    // misc
    "lsof",
    "shellcheck",
    "yamllint",
];

/// Whether `command` is preinstalled on ubuntu-latest but not on ubuntu-slim.
pub fn is_missing_in_slim(command: &str) -> bool {
    MISSING_IN_SLIM.contains(&command)
}

/// Commands the job's scripts invoke that ubuntu-slim won't have.
///
/// Commands provided by a setup action anywhere in the job are excluded.
/// The result is de-duplicated in first-seen order. Jobs that don't run on
/// ubuntu-latest always yield an empty list.
pub fn missing_commands(job: &Job) -> Vec<String> {
    if !job.is_ubuntu_latest() {
        return Vec::new();
    }

    let provided = provided_commands(&job.steps);
    let mut seen = HashSet::new();
    let mut missing = Vec::new();

    for step in &job.steps {
        let script = step.script();
        if script.is_empty() {
            continue;
        }
        for command in extract_commands(script) {
            if provided.contains(command.as_str()) || !is_missing_in_slim(&command) {
                continue;
            }
            if seen.insert(command.clone()) {
                missing.push(command);
            }
        }
    }

    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::{RunsOn, Step};

    fn job(steps: Vec<Step>) -> Job {
        Job::new("test", RunsOn::Scalar("ubuntu-latest".into())).with_steps(steps)
    }

    #[test]
    fn table_has_no_duplicates() {
        let unique: HashSet<_> = MISSING_IN_SLIM.iter().collect();
        assert_eq!(unique.len(), MISSING_IN_SLIM.len());
    }

    #[test]
    fn reports_missing_command() {
        assert_eq!(missing_commands(&job(vec![Step::run("docker ps")])), vec!["docker"]);
    }

    #[test]
    fn reports_in_first_seen_order_without_duplicates() {
        let steps = vec![
            Step::run("lsof -i :8080"),
            Step::run("docker ps\nlsof -i :9090"),
            Step::run("docker images"),
        ];
        assert_eq!(missing_commands(&job(steps)), vec!["lsof", "docker"]);
    }

    #[test]
    fn common_commands_are_not_missing() {
        let steps = vec![Step::run("echo hello\ngrep -r foo . | sort | uniq\ncurl -sSf x")];
        assert!(missing_commands(&job(steps)).is_empty());
    }

    #[test]
    fn non_ubuntu_latest_yields_nothing() {
        let job = Job::new("test", RunsOn::Scalar("ubuntu-22.04".into()))
            .with_steps(vec![Step::run("docker ps")]);
        assert!(missing_commands(&job).is_empty());
    }

    #[test]
    fn setup_go_provides_go() {
        let steps = vec![
            Step::uses("actions/setup-go@v5"),
            Step::run("go fmt ./..."),
            Step::run("go test ./..."),
        ];
        assert!(missing_commands(&job(steps)).is_empty());
    }

    #[test]
    fn go_without_setup_is_missing() {
        assert_eq!(missing_commands(&job(vec![Step::run("go fmt ./...")])), vec!["go"]);
    }

    #[test]
    fn setup_action_later_in_job_still_counts() {
        let steps = vec![Step::run("node -v"), Step::uses("actions/setup-node@v4")];
        assert!(missing_commands(&job(steps)).is_empty());
    }

    #[test]
    fn setup_action_only_covers_its_commands() {
        let steps = vec![
            Step::uses("actions/setup-go@v5"),
            Step::uses("actions/setup-node@v4"),
            Step::run("go build"),
            Step::run("npm install"),
            Step::run("docker ps"),
        ];
        assert_eq!(missing_commands(&job(steps)), vec!["docker"]);
    }

    #[test]
    fn setup_java_provides_build_tools() {
        let steps = vec![
            Step::uses("actions/setup-java@v4"),
            Step::run("java -version\njavac Main.java\nmvn test\ngradle build"),
        ];
        assert!(missing_commands(&job(steps)).is_empty());
    }

    #[test]
    fn sudo_and_paths_are_normalized() {
        let steps = vec![Step::run("sudo /usr/bin/docker ps\nVAR=1 kubectl get pods")];
        assert_eq!(missing_commands(&job(steps)), vec!["docker", "kubectl"]);
    }
}
