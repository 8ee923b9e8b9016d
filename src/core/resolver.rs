//! Resolution of unqualified specifiers
//!
//! Every unqualified specifier is searched on all available providers at
//! once; the merged candidate list then decides:
//!
//! - no candidate: `PackageNotFound`
//! - one candidate: resolved silently
//! - several: the [`Prompt`] picks one, or the specifier is cancelled
//!
//! Searches for all specifiers of a command run concurrently. Prompts run
//! afterwards, one at a time, in token order.

use crate::core::types::{PackageSpecifier, ProviderName, ResolvedSpecifier, SearchResult};
use crate::error::{MixturaError, Result};
use crate::providers::{Provider, ProviderRegistry};
use crate::ui;
use rayon::prelude::*;
use std::collections::HashSet;

/// Outcome of one disambiguation prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Chosen(usize),
    Cancelled,
}

/// Interactive collaborator that picks one of several candidates
pub trait Prompt {
    fn choose(&self, query: &str, candidates: &[SearchResult]) -> Selection;
}

/// Where candidates come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// Backend repositories (for `add`)
    Repository,
    /// Already installed packages (for `remove` / `upgrade`)
    Installed,
}

/// Merged search results for one query
#[derive(Debug, Default)]
pub struct CandidateSet {
    pub results: Vec<SearchResult>,
    /// Per-provider search failures; they never hide other providers' hits
    pub failures: Vec<MixturaError>,
    /// Providers that were skipped because their backend is missing
    pub skipped: Vec<ProviderName>,
}

/// Search `providers` for `query` concurrently. Results come back in the
/// order of `providers`, each provider's list truncated to `limit` (0 = all),
/// with repeated `(provider, name)` pairs dropped.
pub fn search_providers(
    registry: &ProviderRegistry,
    providers: &[ProviderName],
    query: &str,
    scope: SearchScope,
    limit: usize,
) -> CandidateSet {
    enum PerProvider {
        Hits(Vec<SearchResult>),
        Failed(MixturaError),
        Skipped(ProviderName),
    }

    let per_provider: Vec<PerProvider> = providers
        .par_iter()
        .map(|&name| {
            let Some(adapter) = registry.get(name) else {
                return PerProvider::Failed(MixturaError::Registry(format!(
                    "provider '{}' is not registered",
                    name
                )));
            };
            if !adapter.is_available() {
                return PerProvider::Skipped(name);
            }
            match run_search(adapter, query, scope) {
                Ok(mut hits) => {
                    if limit > 0 {
                        hits.truncate(limit);
                    }
                    PerProvider::Hits(hits)
                }
                Err(e) => PerProvider::Failed(e),
            }
        })
        .collect();

    let mut set = CandidateSet::default();
    let mut seen = HashSet::new();
    for outcome in per_provider {
        match outcome {
            PerProvider::Hits(hits) => {
                for hit in hits {
                    if seen.insert((hit.provider, hit.name.clone())) {
                        set.results.push(hit);
                    }
                }
            }
            PerProvider::Failed(e) => set.failures.push(e),
            PerProvider::Skipped(name) => set.skipped.push(name),
        }
    }
    set
}

fn run_search(adapter: &dyn Provider, query: &str, scope: SearchScope) -> Result<Vec<SearchResult>> {
    match scope {
        SearchScope::Repository => adapter.search(query),
        SearchScope::Installed => adapter.search_installed(query),
    }
}

fn gather(
    registry: &ProviderRegistry,
    query: &str,
    scope: SearchScope,
    limit: usize,
) -> CandidateSet {
    let set = search_providers(registry, &registry.names(), query, scope, limit);
    for name in &set.skipped {
        ui::verbose(&format!("{}: backend not installed, not searched", name));
    }
    for failure in &set.failures {
        ui::warning(&format!("Search for '{}' failed: {}", query, failure));
    }
    set
}

pub struct Resolver<'a> {
    registry: &'a ProviderRegistry,
    prompt: &'a dyn Prompt,
    scope: SearchScope,
    limit: usize,
    assume_yes: bool,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a ProviderRegistry, prompt: &'a dyn Prompt, scope: SearchScope) -> Self {
        Self {
            registry,
            prompt,
            scope,
            limit: 0,
            assume_yes: false,
        }
    }

    /// Keep at most `limit` candidates per provider (0 = all)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Resolve ambiguity without prompting (see [`pick_without_prompt`])
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Search every registered provider for `query`
    pub fn candidates(&self, query: &str) -> CandidateSet {
        gather(self.registry, query, self.scope, self.limit)
    }

    /// Resolve a batch of parsed slots. Output has the same length and order
    /// as the input; failed slots pass through untouched.
    pub fn resolve(&self, slots: Vec<Result<PackageSpecifier>>) -> Vec<Result<ResolvedSpecifier>> {
        let queries: Vec<String> = slots
            .iter()
            .filter_map(|slot| match slot {
                Ok(spec) if !spec.is_qualified() => Some(spec.name.clone()),
                _ => None,
            })
            .collect();

        if !queries.is_empty() {
            ui::step(&format!(
                "Searching for {} across all providers...",
                queries
                    .iter()
                    .map(|q| format!("'{}'", q))
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }

        // The prompt is not shared across threads; only the registry is
        let (registry, scope, limit) = (self.registry, self.scope, self.limit);
        let mut candidate_sets = queries
            .par_iter()
            .map(|query| gather(registry, query, scope, limit))
            .collect::<Vec<_>>()
            .into_iter();

        slots
            .into_iter()
            .map(|slot| {
                let spec = slot?;
                if spec.is_qualified() {
                    return spec.into_resolved().ok_or_else(|| {
                        MixturaError::Other("qualified specifier without provider".to_string())
                    });
                }
                let candidates = candidate_sets.next().unwrap_or_default();
                self.decide(&spec.name, candidates.results)
            })
            .collect()
    }

    fn decide(&self, query: &str, candidates: Vec<SearchResult>) -> Result<ResolvedSpecifier> {
        if ui::is_interrupted() {
            return Err(MixturaError::ResolutionCancelled(query.to_string()));
        }

        let chosen = match candidates.len() {
            0 => return Err(MixturaError::PackageNotFound(query.to_string())),
            1 => 0,
            _ if self.assume_yes => {
                pick_without_prompt(self.registry, query, &candidates).ok_or_else(|| {
                    ui::warning(&format!(
                        "'{}' is ambiguous ({} candidates); qualify it as provider#name",
                        query,
                        candidates.len()
                    ));
                    MixturaError::ResolutionCancelled(query.to_string())
                })?
            }
            _ => match self.prompt.choose(query, &candidates) {
                Selection::Chosen(index) if index < candidates.len() => index,
                _ => return Err(MixturaError::ResolutionCancelled(query.to_string())),
            },
        };

        let Some(hit) = candidates.into_iter().nth(chosen) else {
            return Err(MixturaError::ResolutionCancelled(query.to_string()));
        };
        ui::info(&format!("Selected {} from {}", hit.name, hit.provider));
        Ok(ResolvedSpecifier {
            provider: hit.provider,
            name: hit.name,
            requested: Some(query.to_string()),
        })
    }
}

/// Non-interactive tie-break: the default provider's exact-name match,
/// else the only exact-name match across all providers.
pub fn pick_without_prompt(
    registry: &ProviderRegistry,
    query: &str,
    candidates: &[SearchResult],
) -> Option<usize> {
    let exact: Vec<usize> = candidates
        .iter()
        .enumerate()
        .filter(|(_, c)| c.name.eq_ignore_ascii_case(query))
        .map(|(i, _)| i)
        .collect();

    let default = registry.default_provider();
    if let Some(&index) = exact.iter().find(|&&i| candidates[i].provider == default) {
        return Some(index);
    }
    match exact.as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
