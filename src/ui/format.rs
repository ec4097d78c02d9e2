//! Human-facing formatting of durations and source locations.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Format a job duration.
///
/// Whole seconds below a minute (`45s`), minutes and leftover seconds
/// below an hour (`4m`, `4m30s`), hours and leftover minutes above that
/// (`1h`, `1h15m`). Sub-second precision is dropped.
///
/// ```
/// use std::time::Duration;
/// use slimify::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_secs(270)), "4m30s");
/// ```
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        return format!("{}s", secs);
    }
    if secs < 3600 {
        let (minutes, seconds) = (secs / 60, secs % 60);
        return if seconds == 0 {
            format!("{}m", minutes)
        } else {
            format!("{}m{}s", minutes, seconds)
        };
    }
    let (hours, minutes) = (secs / 3600, (secs % 3600) / 60);
    if minutes == 0 {
        format!("{}h", hours)
    } else {
        format!("{}h{}m", hours, minutes)
    }
}

/// Render `path:line` relative to the current directory.
///
/// Terminals and editors turn this form into a clickable link. Falls back
/// to the path as given when it can't be made relative.
pub fn format_local_link(path: &Path, line: usize) -> String {
    format!("{}:{}", display_path(path), line)
}

/// A workflow path as shown to the user, relative to the current directory
/// when possible.
pub fn display_path(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| relative_to(path, &cwd))
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

fn relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    if path.is_relative() {
        return Some(path.to_path_buf());
    }
    path.strip_prefix(base).ok().map(Path::to_path_buf)
}
