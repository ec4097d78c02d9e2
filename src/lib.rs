//! Slimify - find GitHub Actions jobs that can move to `ubuntu-slim`.
//!
//! Slimify reads workflow files, decides for every job whether it can run
//! on the lightweight `ubuntu-slim` runner instead of `ubuntu-latest`, and
//! can rewrite the `runs-on` of those jobs in place.
//!
//! # Modules
//!
//! - [`analysis`] - Shell command extraction, setup actions and eligibility rules
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Optional `.slimify.yml` project configuration
//! - [`error`] - Error types and result aliases
//! - [`history`] - Job durations from the GitHub Actions API
//! - [`scan`] - Classification of jobs into candidates and ineligible jobs
//! - [`ui`] - Terminal output, spinners and formatting
//! - [`workflow`] - Workflow model, loading and in-place editing
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use slimify::scan::scan_workflows;
//! use slimify::workflow::parse_workflow;
//!
//! let yaml = "jobs:\n  lint:\n    runs-on: ubuntu-latest\n    steps:\n      - run: cargo clippy\n";
//! let workflow = parse_workflow(yaml, Path::new("ci.yml")).unwrap();
//! let report = scan_workflows(&[workflow], None);
//!
//! assert_eq!(report.candidates.len(), 1);
//! assert_eq!(report.candidates[0].missing_commands, vec!["cargo"]);
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod scan;
pub mod ui;
pub mod workflow;

pub use error::{Result, SlimifyError};
