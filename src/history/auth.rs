//! GitHub token discovery.

use std::process::Command;

/// Environment variables checked for a token, in order.
pub const TOKEN_ENV_VARS: &[&str] = &["GH_TOKEN", "GITHUB_TOKEN"];

/// Find an API token for `host`.
///
/// Checks [`TOKEN_ENV_VARS`], then asks the `gh` CLI. Returns `None` when
/// nothing is found; requests then go out unauthenticated.
pub fn resolve_token(host: &str) -> Option<String> {
    token_from_env(|name| std::env::var(name).ok()).or_else(|| token_from_gh(host))
}

fn token_from_env(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    TOKEN_ENV_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .map(|token| token.trim().to_string())
        .find(|token| !token.is_empty())
}

fn token_from_gh(host: &str) -> Option<String> {
    let output = Command::new("gh")
        .args(["auth", "token", "--hostname", host])
        .output()
        .ok()?;
    if !output.status.success() {
        tracing::debug!("gh auth token failed for {}", host);
        return None;
    }
    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!token.is_empty()).then_some(token)
}
