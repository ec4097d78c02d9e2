//! Line-oriented navigation of workflow YAML.
//!
//! `serde_yaml` drops source positions, so the loader and the editor both
//! find a job's `runs-on:` line by walking the raw text. Indentation is
//! measured on leading whitespace only, with tabs counted as four columns.

/// Location of one job inside the `jobs:` mapping (0-based line indices).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct JobBlock {
    /// Line holding the job key.
    pub key_line: usize,
    /// First line after the job body.
    pub end: usize,
}

/// Location of a `runs-on:` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RunsOnLine {
    /// Line index.
    pub line: usize,
    /// Indentation of the key.
    pub indent: usize,
}

pub(crate) fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

fn is_ignorable(trimmed: &str) -> bool {
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Whether a mapping value opens a nested block: nothing, or only a comment.
pub(crate) fn opens_block(value: &str) -> bool {
    is_ignorable(value)
}

/// Split a trimmed `key: value` line into key and (trimmed) value.
///
/// Handles single- and double-quoted keys. Returns `None` for lines that
/// are not block mapping entries.
pub(crate) fn split_key(trimmed: &str) -> Option<(&str, &str)> {
    let quote = trimmed.chars().next().filter(|c| *c == '"' || *c == '\'');
    let (key, rest) = match quote {
        Some(q) => {
            let inner = &trimmed[1..];
            let close = inner.find(q)?;
            (&inner[..close], &inner[close + 1..])
        }
        None => {
            let colon = trimmed.find(':')?;
            (trimmed[..colon].trim_end(), &trimmed[colon..])
        }
    };
    let rest = rest.trim_start().strip_prefix(':')?;
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some((key, rest.trim()))
}

/// Find the block of the job whose key is `job_id`.
pub(crate) fn find_job(lines: &[&str], job_id: &str) -> Option<JobBlock> {
    let jobs_line = lines.iter().position(|line| {
        indent_width(line) == 0
            && matches!(split_key(line.trim()), Some(("jobs", value)) if opens_block(value))
    })?;

    let mut job_indent = None;
    let mut found: Option<usize> = None;

    for (idx, line) in lines.iter().enumerate().skip(jobs_line + 1) {
        let trimmed = line.trim();
        if is_ignorable(trimmed) {
            continue;
        }
        let indent = indent_width(line);
        if indent == 0 {
            return found.map(|key_line| JobBlock { key_line, end: idx });
        }
        let expected = *job_indent.get_or_insert(indent);

        if let Some(key_line) = found {
            if indent <= expected {
                return Some(JobBlock { key_line, end: idx });
            }
            continue;
        }

        if indent == expected {
            if let Some((key, _)) = split_key(trimmed) {
                if key == job_id {
                    found = Some(idx);
                }
            }
        }
    }

    found.map(|key_line| JobBlock {
        key_line,
        end: lines.len(),
    })
}

/// Find the `runs-on:` key directly under a job.
pub(crate) fn find_runs_on(lines: &[&str], block: JobBlock) -> Option<RunsOnLine> {
    let mut child_indent = None;
    for idx in block.key_line + 1..block.end {
        let line = lines[idx];
        let trimmed = line.trim();
        if is_ignorable(trimmed) {
            continue;
        }
        let indent = indent_width(line);
        if indent != *child_indent.get_or_insert(indent) {
            continue;
        }
        if let Some(("runs-on", _)) = split_key(trimmed) {
            return Some(RunsOnLine { line: idx, indent });
        }
    }
    None
}

/// 1-based line number of the job's `runs-on:` key, or `0` if not found.
pub fn runs_on_line_number(content: &str, job_id: &str) -> usize {
    let lines: Vec<&str> = content.split('\n').collect();
    find_job(&lines, job_id)
        .and_then(|block| find_runs_on(&lines, block))
        .map(|found| found.line + 1)
        .unwrap_or(0)
}
