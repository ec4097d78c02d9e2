//! Project configuration.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use slimify::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".slimify.yml"), "history:\n  max_runs: 5").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.history.max_runs, 5);
//! assert_eq!(config.target_runner, "ubuntu-slim");
//! ```

pub mod loader;
pub mod schema;

pub use loader::{find_project_config, load_config, load_config_file, parse_config, CONFIG_FILE_NAME};
pub use schema::{HistoryConfig, SlimifyConfig, DEFAULT_TARGET_RUNNER};
