//! Lexical command extraction from `run:` scripts.
//!
//! This is an approximation, not a shell parser: quoting, subshells and
//! here-docs are not understood. Each line is cut on control and
//! redirection operators and the first word of every segment is taken
//! as a command.

/// Words that run another command; the word after them is the command.
const COMMAND_PREFIXES: &[&str] = &["sudo", "env", "time", "nohup", "setsid", "stdbuf"];

/// Extract invoked command names from a shell script, in order.
///
/// Blank lines and lines starting with `#` (including shebangs) are
/// ignored. Leading `VAR=value` assignments and wrapper prefixes such as
/// `sudo` are skipped, and path components are stripped, so
/// `sudo /usr/bin/docker ps` yields `docker`.
///
/// # Example
///
/// ```
/// use slimify::analysis::extract_commands;
///
/// let cmds = extract_commands("# build\nCGO_ENABLED=0 go build ./... && ./bin/app | tee out.log");
/// assert_eq!(cmds, vec!["go", "app", "tee"]);
/// ```
pub fn extract_commands(script: &str) -> Vec<String> {
    script
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(split_segments)
        .filter_map(command_of_segment)
        .collect()
}

/// Split a line on `&&`, `||`, `|`, `;`, `>`, `>>`, `<` and `<<`.
fn split_segments(line: &str) -> Vec<&str> {
    line.split("&&")
        .flat_map(|part| part.split(['|', ';', '>', '<']))
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

fn command_of_segment(segment: &str) -> Option<String> {
    let command = segment
        .split_whitespace()
        .skip_while(|word| word.contains('='))
        .find(|word| !COMMAND_PREFIXES.contains(word))?;

    let name = command.rsplit('/').next().unwrap_or(command);
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
