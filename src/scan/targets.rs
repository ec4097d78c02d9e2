//! Which workflow files a command operates on.

use std::path::{Path, PathBuf};

use crate::error::{Result, SlimifyError};
use crate::workflow::{load_workflow, load_workflows, Workflow};

/// Files named on the command line, or the whole workflow directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Targets {
    /// Explicitly named workflow files.
    pub files: Vec<PathBuf>,
    /// Scan every workflow in the workflow directory. Takes precedence
    /// over `files`.
    pub all: bool,
}

impl Targets {
    /// Target every workflow in the workflow directory.
    pub fn all() -> Self {
        Self {
            files: Vec::new(),
            all: true,
        }
    }

    /// Target the given files.
    pub fn files(files: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            files: files.into_iter().map(Into::into).collect(),
            all: false,
        }
    }

    /// Whether nothing was selected.
    pub fn is_empty(&self) -> bool {
        !self.all && self.files.is_empty()
    }

    /// Load the targeted workflows.
    ///
    /// With `all`, files in `workflow_dir` that fail to parse are skipped.
    /// A named file that fails to load is an error.
    ///
    /// # Errors
    ///
    /// `NoTargets` when nothing was selected, `WorkflowDirNotFound` when
    /// `workflow_dir` is missing, or the load error of a named file.
    pub fn load(&self, workflow_dir: &Path) -> Result<Vec<Workflow>> {
        if self.all {
            let workflows = load_workflows(workflow_dir)?;
            if workflows.is_empty() {
                tracing::warn!("No workflow files found in {}", workflow_dir.display());
            }
            return Ok(workflows);
        }
        if self.files.is_empty() {
            return Err(SlimifyError::NoTargets);
        }
        self.files.iter().map(|path| load_workflow(path)).collect()
    }
}
