//! In-place `runs-on` rewriting.
//!
//! Edits are line-based so comments, quoting and layout survive; only the
//! line carrying the replaced label changes.

use std::fs;
use std::path::Path;

use super::locate::{find_job, find_runs_on, indent_width, opens_block, split_key};
use super::model::UBUNTU_LATEST;
use crate::error::{Result, SlimifyError};

/// Replace `ubuntu-latest` with `new_runner` in the `runs-on` of `job_id`.
///
/// The file is re-read and the job located by id on every call, so edits
/// made since the scan are respected.
///
/// # Errors
///
/// Returns `JobNotFound` if the job key is missing, `RunnerNotFound` if its
/// `runs-on` has no `ubuntu-latest` label, and `WorkflowRead`/`Io` on
/// filesystem failures.
pub fn update_runs_on(path: &Path, job_id: &str, new_runner: &str) -> Result<()> {
    let content = fs::read_to_string(path).map_err(|source| SlimifyError::WorkflowRead {
        path: path.to_path_buf(),
        source,
    })?;

    let updated = rewrite_runs_on(&content, job_id, UBUNTU_LATEST, new_runner).map_err(
        |missing| match missing {
            Missing::Job => SlimifyError::JobNotFound {
                job: job_id.to_string(),
                path: path.to_path_buf(),
            },
            Missing::Label => SlimifyError::RunnerNotFound {
                job: job_id.to_string(),
                label: UBUNTU_LATEST.to_string(),
                path: path.to_path_buf(),
            },
        },
    )?;

    fs::write(path, updated)?;
    tracing::debug!("updated runs-on of '{}' in {}", job_id, path.display());
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Missing {
    Job,
    Label,
}

fn rewrite_runs_on(
    content: &str,
    job_id: &str,
    from: &str,
    to: &str,
) -> std::result::Result<String, Missing> {
    let mut lines: Vec<String> = content.split('\n').map(String::from).collect();
    let views: Vec<&str> = lines.iter().map(String::as_str).collect();

    let block = find_job(&views, job_id).ok_or(Missing::Job)?;
    let runs_on = find_runs_on(&views, block).ok_or(Missing::Label)?;

    let key_line = views[runs_on.line];
    let inline_value = split_key(key_line.trim()).map(|(_, v)| v).unwrap_or_default();

    let target = if opens_block(inline_value) {
        // Block sequence: `- label` items below the key.
        let mut hit = None;
        for idx in runs_on.line + 1..block.end {
            let line = views[idx];
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            if indent_width(line) < runs_on.indent || !trimmed.starts_with('-') {
                break;
            }
            if let Some(new_line) = replace_in_line(line, 0, from, to) {
                hit = Some((idx, new_line));
                break;
            }
        }
        hit
    } else {
        let value_start = key_line.find(':').map(|i| i + 1).unwrap_or(key_line.len());
        replace_in_line(key_line, value_start, from, to).map(|l| (runs_on.line, l))
    };

    let (idx, new_line) = target.ok_or(Missing::Label)?;
    lines[idx] = new_line;
    Ok(lines.join("\n"))
}

/// Replace whole-label occurrences of `from` after byte offset `start`,
/// ignoring any trailing `# comment`. Keeps a trailing `\r`.
fn replace_in_line(line: &str, start: usize, from: &str, to: &str) -> Option<String> {
    let (body, cr) = match line.strip_suffix('\r') {
        Some(body) => (body, "\r"),
        None => (line, ""),
    };
    let value_end = comment_start(body, start).unwrap_or(body.len());
    let replaced = replace_label(&body[start..value_end], from, to)?;
    Some(format!(
        "{}{}{}{}",
        &body[..start],
        replaced,
        &body[value_end..],
        cr
    ))
}

fn comment_start(line: &str, from: usize) -> Option<usize> {
    let bytes = line.as_bytes();
    (from..bytes.len())
        .find(|&i| bytes[i] == b'#' && (i == 0 || bytes[i - 1] == b' ' || bytes[i - 1] == b'\t'))
}

fn is_label_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

/// Replace occurrences of `from` not embedded in a longer label.
pub(crate) fn replace_label(text: &str, from: &str, to: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut replaced = false;

    for (pos, _) in text.match_indices(from) {
        let before = text[..pos].chars().next_back();
        let after = text[pos + from.len()..].chars().next();
        if before.is_some_and(is_label_char) || after.is_some_and(is_label_char) {
            continue;
        }
        out.push_str(&text[last..pos]);
        out.push_str(to);
        last = pos + from.len();
        replaced = true;
    }

    if !replaced {
        return None;
    }
    out.push_str(&text[last..]);
    Some(out)
}
