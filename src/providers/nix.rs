//! Nix profile backend
//!
//! Searches nixpkgs and manages packages in the user's `nix profile`.

use crate::config::BackendTimeouts;
use crate::core::types::{InstalledPackage, Operation, ProviderName, SearchResult};
use crate::error::{MixturaError, Result};
use crate::providers::command_exec::{diagnostic, run_command_with_timeout, run_mutation, run_query};
use crate::providers::traits::Provider;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub const NAME: &str = "nixpkgs";
const BINARY: &str = "nix";

/// nix-command and flakes are still gated on many installs
const FEATURE_ARGS: [&str; 2] = ["--extra-experimental-features", "nix-command flakes"];

/// Nix reports a no-op remove/upgrade on stderr with exit status 0
const FAILURE_MARKERS: &[&str] = &["does not match any packages", "No packages to"];

const STORE_PREFIX: &str = "/nix/store/";
const STORE_HASH_LEN: usize = 32;

pub struct NixProvider {
    timeouts: BackendTimeouts,
}

impl NixProvider {
    pub fn new(timeouts: BackendTimeouts) -> Self {
        Self { timeouts }
    }

    fn argv(&self, args: &[&str]) -> Vec<String> {
        std::iter::once(BINARY)
            .chain(FEATURE_ARGS)
            .chain(args.iter().copied())
            .map(str::to_string)
            .collect()
    }

    fn profile_command(&self, subcommand: &[&str], names: &[String]) -> Vec<String> {
        let mut argv = self.argv(&["profile"]);
        argv.extend(subcommand.iter().map(|s| s.to_string()));
        argv.extend(names.iter().cloned());
        argv
    }
}

impl Provider for NixProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["nix"]
    }

    fn binary(&self) -> &'static str {
        BINARY
    }

    fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let argv = self.argv(&["search", "nixpkgs", query, "--json"]);
        let output = run_command_with_timeout(NAME, &argv, self.timeouts.search)?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            // `nix search` exits non-zero when nothing matches
            if stderr.contains("no results") {
                return Ok(Vec::new());
            }
            return Err(MixturaError::backend(NAME, diagnostic(&stderr, &stdout)));
        }

        parse_search(&stdout)
    }

    fn mutate(&self, operation: Operation, names: &[String]) -> Result<String> {
        let argv = match operation {
            Operation::Add => {
                let targets: Vec<String> = names.iter().map(|n| install_target(n)).collect();
                self.profile_command(&["add", "--impure"], &targets)
            }
            Operation::Remove => self.profile_command(&["remove"], names),
            Operation::Upgrade => self.profile_command(&["upgrade", "--impure"], names),
            Operation::Search => {
                return Err(MixturaError::Other(
                    "search is not a profile operation".to_string(),
                ));
            }
        };
        run_mutation(NAME, &argv, self.timeouts.operation, FAILURE_MARKERS)
    }

    fn upgrade_all(&self) -> Result<String> {
        let argv = self.profile_command(&["upgrade", "--impure", "--all"], &[]);
        run_mutation(NAME, &argv, self.timeouts.operation, &[])
    }

    fn list_installed(&self) -> Result<Vec<InstalledPackage>> {
        let argv = self.argv(&["profile", "list", "--json"]);
        let stdout = run_query(NAME, &argv, self.timeouts.search)?;
        parse_profile_list(&stdout)
    }

    fn garbage_collect(&self) -> Result<Option<String>> {
        let argv = self.argv(&["store", "gc"]);
        run_mutation(NAME, &argv, self.timeouts.operation, &[]).map(Some)
    }
}

/// `git` → `nixpkgs#git`; anything already naming a flake passes through
fn install_target(name: &str) -> String {
    if name.contains('#') {
        name.to_string()
    } else {
        format!("nixpkgs#{}", name)
    }
}

#[derive(Debug, Deserialize)]
struct SearchEntry {
    #[serde(default)]
    version: String,
    #[serde(default)]
    description: String,
}

/// Parse `nix search nixpkgs <q> --json`:
/// `{ "legacyPackages.x86_64-linux.git": { "version": "...", "description": "..." } }`
pub(crate) fn parse_search(stdout: &str) -> Result<Vec<SearchResult>> {
    if stdout.trim().is_empty() {
        return Ok(Vec::new());
    }

    let entries: BTreeMap<String, SearchEntry> = serde_json::from_str(stdout)?;
    let provider = ProviderName::new(NAME);

    Ok(entries
        .into_iter()
        .map(|(key, entry)| {
            let name = attribute_path(&key);
            let mut display_label = name.clone();
            if !entry.version.is_empty() {
                display_label.push_str(&format!(" {}", entry.version));
            }
            if !entry.description.is_empty() {
                display_label.push_str(&format!(" - {}", entry.description));
            }
            SearchResult {
                provider,
                name,
                display_label,
            }
        })
        .collect())
}

/// Strip `legacyPackages.<system>.` (or `packages.<system>.`) from a search key
pub(crate) fn attribute_path(key: &str) -> String {
    for prefix in ["legacyPackages.", "packages."] {
        if let Some(rest) = key.strip_prefix(prefix)
            && let Some((_system, attr)) = rest.split_once('.')
        {
            return attr.to_string();
        }
    }
    key.to_string()
}

/// Parse `nix profile list --json`. Newer nix keys elements by name,
/// older releases emit a list carrying `attrPath`.
pub(crate) fn parse_profile_list(stdout: &str) -> Result<Vec<InstalledPackage>> {
    let json: Value = serde_json::from_str(stdout)?;
    let mut packages = Vec::new();

    match json.get("elements") {
        Some(Value::Object(elements)) => {
            for (name, details) in elements {
                packages.push(InstalledPackage {
                    name: name.clone(),
                    id: name.clone(),
                    version: first_store_path(details).and_then(version_from_store_path),
                });
            }
        }
        Some(Value::Array(elements)) => {
            for details in elements {
                let attr = details
                    .get("attrPath")
                    .or_else(|| details.get("url"))
                    .and_then(Value::as_str)
                    .unwrap_or("unknown");
                let name = attr.rsplit('.').next().unwrap_or(attr).to_string();
                packages.push(InstalledPackage {
                    id: name.clone(),
                    name,
                    version: first_store_path(details).and_then(version_from_store_path),
                });
            }
        }
        _ => {}
    }

    Ok(packages)
}

fn first_store_path(details: &Value) -> Option<&str> {
    details
        .get("storePaths")
        .and_then(Value::as_array)
        .and_then(|paths| paths.first())
        .and_then(Value::as_str)
}

/// `/nix/store/<hash>-bottles-unwrapped-60.1` → `60.1`
pub(crate) fn version_from_store_path(path: &str) -> Option<String> {
    let file = path.strip_prefix(STORE_PREFIX)?;
    let file = file.split('/').next()?;
    let name_ver = file.get(STORE_HASH_LEN + 1..)?;

    let bytes = name_ver.as_bytes();
    bytes
        .windows(2)
        .position(|w| w[0] == b'-' && w[1].is_ascii_digit())
        .map(|idx| name_ver[idx + 1..].to_string())
}
