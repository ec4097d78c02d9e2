//! In-memory projection of a GitHub Actions workflow.
//!
//! These types are rebuilt from the source file on every invocation and
//! are never written back; mutation goes through [`super::update_runs_on`].

use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The runner label that migration candidates must use today.
pub const UBUNTU_LATEST: &str = "ubuntu-latest";

/// A parsed workflow file.
#[derive(Debug, Clone)]
pub struct Workflow {
    /// Path the workflow was loaded from.
    pub path: PathBuf,
    /// Jobs keyed by job id.
    pub jobs: BTreeMap<String, Job>,
}

impl Workflow {
    /// Look up a job by its id.
    pub fn job(&self, id: &str) -> Option<&Job> {
        self.jobs.get(id)
    }
}

/// The `runs-on` value of a job.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RunsOn {
    /// A single label, e.g. `runs-on: ubuntu-latest`.
    Scalar(String),
    /// A list of labels, e.g. `runs-on: [self-hosted, linux]`.
    Sequence(Vec<String>),
    /// No `runs-on` key, or an explicit null.
    #[default]
    Absent,
    /// Any other shape (runner group mapping, number, ...).
    Unsupported,
}

impl RunsOn {
    /// Build from a raw YAML value.
    ///
    /// Non-string sequence elements are dropped.
    pub fn from_yaml(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => RunsOn::Absent,
            Some(Value::String(label)) => RunsOn::Scalar(label.clone()),
            Some(Value::Sequence(items)) => RunsOn::Sequence(
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(String::from))
                    .collect(),
            ),
            Some(_) => RunsOn::Unsupported,
        }
    }

    /// Whether this resolves to exactly `label`, as the scalar value or as
    /// any element of the sequence.
    pub fn matches(&self, label: &str) -> bool {
        match self {
            RunsOn::Scalar(value) => value == label,
            RunsOn::Sequence(values) => values.iter().any(|v| v == label),
            RunsOn::Absent | RunsOn::Unsupported => false,
        }
    }
}

/// One step of a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Step {
    /// Optional step name.
    #[serde(deserialize_with = "scalar_text")]
    pub name: Option<String>,
    /// Reusable action reference (`owner/name@ref` or `docker://image`).
    #[serde(deserialize_with = "scalar_text")]
    pub uses: Option<String>,
    /// Inline shell script.
    #[serde(deserialize_with = "scalar_text")]
    pub run: Option<String>,
}

impl Step {
    /// A step that runs a script.
    pub fn run(script: impl Into<String>) -> Self {
        Self {
            run: Some(script.into()),
            ..Default::default()
        }
    }

    /// A step that uses an action.
    pub fn uses(reference: impl Into<String>) -> Self {
        Self {
            uses: Some(reference.into()),
            ..Default::default()
        }
    }

    /// The action reference, or `""` for script steps.
    pub fn uses_reference(&self) -> &str {
        self.uses.as_deref().unwrap_or_default()
    }

    /// The script text, or `""` for action steps.
    pub fn script(&self) -> &str {
        self.run.as_deref().unwrap_or_default()
    }
}

/// One job inside a workflow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Job {
    /// Key of the job in the `jobs:` mapping.
    pub id: String,
    /// Explicit `name:` value, if any.
    pub name: Option<String>,
    /// Parsed `runs-on` value.
    pub runs_on: RunsOn,
    /// Steps in declaration order.
    pub steps: Vec<Step>,
    /// Raw `services:` value; any non-null value counts as declared.
    pub services: Option<Value>,
    /// Raw `container:` value; any non-null value counts as declared.
    pub container: Option<Value>,
    /// 1-based line of the job's `runs-on:` key, `0` when not found.
    pub source_line: usize,
}

/// Serde shape of a job body. Loosely typed fields stay as [`Value`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawJob {
    #[serde(deserialize_with = "scalar_text")]
    name: Option<String>,
    #[serde(rename = "runs-on")]
    runs_on: Option<Value>,
    steps: Option<Vec<Step>>,
    services: Option<Value>,
    container: Option<Value>,
}

/// Read any YAML scalar as text, the way GitHub does (`name: 1` is `"1"`).
/// `null` and collections yield `None`.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    fn text(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Tagged(tagged) => text(tagged.value),
            Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
        }
    }
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(text))
}

impl Job {
    /// Create a job with the given id and runner; mostly useful in tests.
    pub fn new(id: impl Into<String>, runs_on: RunsOn) -> Self {
        Self {
            id: id.into(),
            runs_on,
            ..Default::default()
        }
    }

    /// Builder: set the steps.
    pub fn with_steps(mut self, steps: Vec<Step>) -> Self {
        self.steps = steps;
        self
    }

    /// Builder: set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder: set the raw `services:` value.
    pub fn with_services(mut self, services: Value) -> Self {
        self.services = Some(services);
        self
    }

    /// Builder: set the raw `container:` value.
    pub fn with_container(mut self, container: Value) -> Self {
        self.container = Some(container);
        self
    }

    pub(crate) fn from_raw(id: &str, raw: RawJob) -> Self {
        Self {
            id: id.to_string(),
            name: raw.name.filter(|n| !n.is_empty()),
            runs_on: RunsOn::from_yaml(raw.runs_on.as_ref()),
            steps: raw.steps.unwrap_or_default(),
            services: raw.services.filter(|v| !v.is_null()),
            container: raw.container.filter(|v| !v.is_null()),
            source_line: 0,
        }
    }

    /// Name shown in the GitHub UI: `name:` or the job id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Whether the job declares `services:`.
    pub fn has_services(&self) -> bool {
        self.services.is_some()
    }

    /// Whether the job declares `container:`.
    pub fn has_container(&self) -> bool {
        self.container.is_some()
    }

    /// Whether the job targets `ubuntu-latest`.
    pub fn is_ubuntu_latest(&self) -> bool {
        self.runs_on.matches(UBUNTU_LATEST)
    }
}
