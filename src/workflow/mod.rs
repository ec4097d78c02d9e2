//! GitHub Actions workflow documents.
//!
//! - [`model`] - [`Workflow`], [`Job`], [`Step`] and the [`RunsOn`] variant
//! - [`loader`] - reading one file or a whole workflow directory
//! - [`editor`] - rewriting a job's `runs-on` in place
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use slimify::workflow::parse_workflow;
//!
//! let yaml = "jobs:\n  test:\n    runs-on: ubuntu-latest\n    steps:\n      - run: cargo test\n";
//! let workflow = parse_workflow(yaml, Path::new("ci.yml")).unwrap();
//! let job = workflow.job("test").unwrap();
//! assert!(job.is_ubuntu_latest());
//! assert_eq!(job.source_line, 3);
//! ```

pub mod editor;
pub mod loader;
mod locate;
pub mod model;

pub use editor::update_runs_on;
pub use loader::{
    is_workflow_file, load_workflow, load_workflows, parse_workflow, DEFAULT_WORKFLOW_DIR,
};
pub use locate::runs_on_line_number;
pub use model::{Job, RunsOn, Step, Workflow, UBUNTU_LATEST};
