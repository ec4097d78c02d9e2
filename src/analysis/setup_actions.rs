//! Setup actions and the commands they install.
//!
//! Covers the official `actions/setup-*` actions and verified-creator setup
//! actions from the GitHub Marketplace. A step matches an entry when its
//! `uses:` reference starts with the entry's prefix, so any `@ref` suffix
//! is ignored.

use std::collections::HashSet;

use crate::workflow::Step;

/// Action prefix and the commands available after it runs.
pub const SETUP_ACTIONS: &[(&str, &[&str])] = &[
    ("actions/setup-go", &["go"]),
    ("actions/setup-node", &["node", "npm", "npx"]),
    ("actions/setup-python", &["python", "python3", "pip", "pip3"]),
    ("actions/setup-java", &["java", "javac", "mvn", "gradle"]),
    ("actions/setup-dotnet", &["dotnet"]),
    ("actions/setup-ruby", &["ruby", "gem"]),
    ("hashicorp/setup-terraform", &["terraform"]),
    ("hashicorp/setup-packer", &["packer"]),
    ("oven-sh/setup-bun", &["bun"]),
    ("astral-sh/setup-uv", &["uv"]),
    ("erlef/setup-beam", &["erl", "elixir", "mix", "rebar3", "hex"]),
    ("microsoft/setup-msbuild", &["msbuild"]),
    ("denoland/setup-deno", &["deno"]),
    ("jfrog/setup-jfrog-cli", &["jfrog"]),
    ("supabase/setup-cli", &["supabase"]),
    ("aws-actions/setup-sam", &["sam"]),
    ("gruntwork-io/setup-terragrunt", &["terragrunt"]),
    ("pdm-project/setup-pdm", &["pdm"]),
];

/// Commands provided by a single action reference.
pub fn commands_for_action(uses: &str) -> impl Iterator<Item = &'static str> + '_ {
    SETUP_ACTIONS
        .iter()
        .filter(move |(prefix, _)| uses.starts_with(prefix))
        .flat_map(|(_, commands)| commands.iter().copied())
}

/// Union of commands provided by all setup actions among `steps`.
pub fn provided_commands(steps: &[Step]) -> HashSet<&'static str> {
    steps
        .iter()
        .map(Step::uses_reference)
        .filter(|uses| !uses.is_empty())
        .flat_map(commands_for_action)
        .collect()
}
