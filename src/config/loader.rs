//! Configuration file discovery and loading.

use crate::config::schema::SlimifyConfig;
use crate::error::{Result, SlimifyError};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = ".slimify.yml";

/// Path of the project config for `project_root`, if the file exists.
pub fn find_project_config(project_root: &Path) -> Option<PathBuf> {
    let path = project_root.join(CONFIG_FILE_NAME);
    path.is_file().then_some(path)
}

/// Parse YAML content into [`SlimifyConfig`].
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<SlimifyConfig> {
    if content.trim().is_empty() {
        return Ok(SlimifyConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| SlimifyError::ConfigParse {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigParse` if the file can't be read or isn't valid.
pub fn load_config_file(path: &Path) -> Result<SlimifyConfig> {
    let content = fs::read_to_string(path).map_err(|e| SlimifyError::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_config(&content, path)
}

/// Load config with optional path override.
///
/// An explicit `config_override` must exist. Otherwise `.slimify.yml` in
/// the project root is used when present, and defaults when it isn't.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<SlimifyConfig> {
    if let Some(path) = config_override {
        return load_config_file(path);
    }
    match find_project_config(project_root) {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            load_config_file(&path)
        }
        None => Ok(SlimifyConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_project_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config, SlimifyConfig::default());
    }

    #[test]
    fn project_config_is_loaded() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "target_runner: ubuntu-slim-arm\nhistory:\n  enabled: false\n",
        )
        .unwrap();

        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config.target_runner, "ubuntu-slim-arm");
        assert!(!config.history.enabled);
    }

    #[test]
    fn override_path_wins() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "target_runner: a\n").unwrap();
        let other = temp.path().join("other.yml");
        fs::write(&other, "target_runner: b\n").unwrap();

        let config = load_config(temp.path(), Some(&other)).unwrap();
        assert_eq!(config.target_runner, "b");
    }

    #[test]
    fn missing_override_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = load_config(temp.path(), Some(&temp.path().join("nope.yml")));
        assert!(matches!(result, Err(SlimifyError::ConfigParse { .. })));
    }

    #[test]
    fn invalid_yaml_is_a_parse_error() {
        let result = parse_config("history: [", Path::new("test.yml"));
        assert!(matches!(result, Err(SlimifyError::ConfigParse { .. })));
    }

    #[test]
    fn wrong_type_is_a_parse_error() {
        let result = parse_config("history:\n  max_runs: many\n", Path::new("test.yml"));
        assert!(matches!(result, Err(SlimifyError::ConfigParse { .. })));
    }

    #[test]
    fn empty_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "\n").unwrap();
        assert_eq!(load_config_file(&path).unwrap(), SlimifyConfig::default());
    }
}
