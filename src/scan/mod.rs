//! Candidate aggregation.
//!
//! Runs the eligibility classifier over loaded workflows, computes missing
//! commands for eligible jobs and optionally enriches them with the
//! duration of their last successful run.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use slimify::scan::scan_workflows;
//! use slimify::workflow::parse_workflow;
//!
//! let yaml = "jobs:\n  test:\n    runs-on: ubuntu-latest\n    steps:\n      - run: lsof -i :8080\n";
//! let workflow = parse_workflow(yaml, Path::new("ci.yml")).unwrap();
//! let report = scan_workflows(&[workflow], None);
//! assert_eq!(report.candidates[0].missing_commands, vec!["lsof"]);
//! assert!(!report.candidates[0].is_safe());
//! ```

mod aggregate;
mod report;
mod targets;

pub use aggregate::{scan_workflows, DurationSource};
pub use report::{unique_paths, Candidate, IneligibleJob, ScanReport};
pub use targets::Targets;
