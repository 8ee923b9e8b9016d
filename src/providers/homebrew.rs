//! Homebrew backend
//!
//! Formulae and casks share one namespace from mixtura's point of view.

use crate::config::BackendTimeouts;
use crate::core::types::{InstalledPackage, Operation, ProviderName, SearchResult};
use crate::error::{MixturaError, Result};
use crate::providers::command_exec::{diagnostic, run_command_with_timeout, run_mutation, run_query};
use crate::providers::traits::Provider;
use std::collections::HashSet;

pub const NAME: &str = "homebrew";
const BINARY: &str = "brew";

/// `brew search` exits 1 with this on stderr when nothing matches
const NO_MATCH_MARKER: &str = "No formulae or casks found";

pub struct HomebrewProvider {
    timeouts: BackendTimeouts,
}

impl HomebrewProvider {
    pub fn new(timeouts: BackendTimeouts) -> Self {
        Self { timeouts }
    }

    fn brew(&self, args: &[&str], names: &[String]) -> Vec<String> {
        std::iter::once(BINARY)
            .chain(args.iter().copied())
            .map(str::to_string)
            .chain(names.iter().cloned())
            .collect()
    }
}

impl Provider for HomebrewProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["brew"]
    }

    fn binary(&self) -> &'static str {
        BINARY
    }

    fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let argv = self.brew(&["search", "--desc", query], &[]);
        let output = run_command_with_timeout(NAME, &argv, self.timeouts.search)?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if is_no_match(&stdout, &stderr) {
                return Ok(Vec::new());
            }
            return Err(MixturaError::backend(NAME, diagnostic(&stderr, &stdout)));
        }

        Ok(parse_search(&stdout))
    }

    fn mutate(&self, operation: Operation, names: &[String]) -> Result<String> {
        let argv = match operation {
            Operation::Add => self.brew(&["install"], names),
            Operation::Remove => self.brew(&["uninstall"], names),
            Operation::Upgrade => self.brew(&["upgrade"], names),
            Operation::Search => {
                return Err(MixturaError::Other(
                    "search is not a brew transaction".to_string(),
                ));
            }
        };
        run_mutation(NAME, &argv, self.timeouts.operation, &[])
    }

    fn upgrade_all(&self) -> Result<String> {
        run_mutation(NAME, &self.brew(&["upgrade"], &[]), self.timeouts.operation, &[])
    }

    fn list_installed(&self) -> Result<Vec<InstalledPackage>> {
        let requested = run_query(
            NAME,
            &self.brew(&["list", "--installed-on-request"], &[]),
            self.timeouts.search,
        )?;
        let versions = run_query(
            NAME,
            &self.brew(&["list", "--versions"], &[]),
            self.timeouts.search,
        )?;
        Ok(parse_list(&requested, &versions))
    }
}

/// A failed search that printed nothing, or said so, found nothing
pub(crate) fn is_no_match(stdout: &str, stderr: &str) -> bool {
    stderr.contains(NO_MATCH_MARKER) || (stdout.trim().is_empty() && stderr.trim().is_empty())
}

/// Parse `brew search --desc <q>`:
///
/// ```text
/// ==> Formulae
/// git: Distributed revision control system
/// ==> Casks
/// gitkraken: Git client focusing on productivity
/// ```
pub(crate) fn parse_search(stdout: &str) -> Vec<SearchResult> {
    let provider = ProviderName::new(NAME);
    let mut kind = "formula";
    let mut results = Vec::new();

    for line in stdout.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("==> Formulae") {
            kind = "formula";
            continue;
        }
        if line.starts_with("==> Casks") {
            kind = "cask";
            continue;
        }
        if line.starts_with("==>") {
            continue;
        }

        let (name, description) = match line.split_once(": ") {
            Some((name, desc)) => (name.trim(), Some(desc.trim())),
            None => (line, None),
        };
        // Casks print `name: (Display Name) description`
        let name = name.split_whitespace().next().unwrap_or(name);

        let display_label = match description {
            Some(desc) if !desc.is_empty() => format!("{} [{}] - {}", name, kind, desc),
            _ => format!("{} [{}]", name, kind),
        };

        results.push(SearchResult {
            provider,
            name: name.to_string(),
            display_label,
        });
    }

    results
}

/// Join `brew list --installed-on-request` with `brew list --versions`
pub(crate) fn parse_list(requested: &str, versions: &str) -> Vec<InstalledPackage> {
    let requested: HashSet<&str> = requested
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    versions
        .lines()
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let name = parts.next()?;
            if !requested.contains(name) {
                return None;
            }
            Some(InstalledPackage {
                name: name.to_string(),
                id: name.to_string(),
                version: parts.next().map(str::to_string),
            })
        })
        .collect()
}
