use crate::config::BackendTimeouts;
use crate::core::types::{InstalledPackage, Operation, ProviderName, SearchResult};
use crate::error::{MixturaError, Result};
use crate::providers::command_exec::{run_mutation, run_query};
use crate::providers::traits::Provider;

pub const NAME: &str = "flatpak";
const BINARY: &str = "flatpak";

pub struct FlatpakProvider {
    timeouts: BackendTimeouts,
}

impl FlatpakProvider {
    pub fn new(timeouts: BackendTimeouts) -> Self {
        Self { timeouts }
    }
}

fn command(args: &[&str], names: &[String]) -> Vec<String> {
    std::iter::once(BINARY)
        .chain(args.iter().copied())
        .map(str::to_string)
        .chain(names.iter().cloned())
        .collect()
}

impl Provider for FlatpakProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn binary(&self) -> &'static str {
        BINARY
    }

    fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let argv = command(
            &["search", query, "--columns=name,application,description,version"],
            &[],
        );
        let stdout = run_query(NAME, &argv, self.timeouts.search)?;
        Ok(parse_search(&stdout))
    }

    fn mutate(&self, operation: Operation, names: &[String]) -> Result<String> {
        // -y: we are the confirmation layer
        let argv = match operation {
            Operation::Add => command(&["install", "-y"], names),
            Operation::Remove => command(&["uninstall", "-y"], names),
            Operation::Upgrade => command(&["update", "-y"], names),
            Operation::Search => {
                return Err(MixturaError::Other(
                    "search is not a flatpak transaction".to_string(),
                ));
            }
        };
        run_mutation(NAME, &argv, self.timeouts.operation, &[])
    }

    fn upgrade_all(&self) -> Result<String> {
        let argv = command(&["update", "-y"], &[]);
        run_mutation(NAME, &argv, self.timeouts.operation, &[])
    }

    fn list_installed(&self) -> Result<Vec<InstalledPackage>> {
        let argv = command(&["list", "--app", "--columns=name,application,version"], &[]);
        let stdout = run_query(NAME, &argv, self.timeouts.search)?;
        Ok(parse_list(&stdout))
    }
}

/// Split a flatpak row. Columns are tab-separated; a TTY-less run without
/// tabs falls back to runs of spaces.
fn split_row(line: &str) -> Vec<&str> {
    if line.contains('\t') {
        return line.split('\t').map(str::trim).collect();
    }
    line.split("  ")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Parse `flatpak search <q> --columns=name,application,description,version`
pub(crate) fn parse_search(stdout: &str) -> Vec<SearchResult> {
    let provider = ProviderName::new(NAME);
    let mut results = Vec::new();

    for line in stdout.lines() {
        if line.trim().is_empty() || line.contains("Application ID") {
            continue;
        }
        let parts = split_row(line);
        if parts.len() < 2 || parts[1].is_empty() {
            continue;
        }

        let (title, app_id) = (parts[0], parts[1]);
        let mut display_label = format!("{} ({})", title, app_id);
        if let Some(version) = parts.get(3).filter(|v| !v.is_empty()) {
            display_label.push_str(&format!(" {}", version));
        }
        if let Some(description) = parts.get(2).filter(|d| !d.is_empty()) {
            display_label.push_str(&format!(" - {}", description));
        }

        results.push(SearchResult {
            provider,
            name: app_id.to_string(),
            display_label,
        });
    }

    results
}

/// Parse `flatpak list --app --columns=name,application,version`
pub(crate) fn parse_list(stdout: &str) -> Vec<InstalledPackage> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.contains("Application ID"))
        .filter_map(|line| {
            let parts = split_row(line);
            if parts.len() < 2 || parts[1].is_empty() {
                return None;
            }
            Some(InstalledPackage {
                name: parts[0].to_string(),
                id: parts[1].to_string(),
                version: parts
                    .get(2)
                    .filter(|v| !v.is_empty())
                    .map(|v| v.to_string()),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests;
