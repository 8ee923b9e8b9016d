//! Package search command
//!
//! Each query token is either qualified (`flatpak#spotify`, one provider)
//! or unqualified (every available provider, concurrently). Results are
//! grouped by provider in registration order.

use crate::commands::Context;
use crate::core::report::{CommandReport, ReportLine, subject_of};
use crate::core::resolver::{CandidateSet, SearchScope, search_providers};
use crate::core::specifier;
use crate::core::types::{Operation, PackageSpecifier, ProviderName, SearchResult};
use crate::error::Result;
use crate::ui;
use colored::Colorize;
use serde::Serialize;

pub struct SearchOptions {
    pub queries: Vec<String>,
    /// Rows kept per provider (0 = all)
    pub limit: usize,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct QueryOut<'a> {
    query: &'a str,
    providers: Vec<ProviderName>,
    results: &'a [SearchResult],
    errors: Vec<String>,
}

pub fn run(ctx: &Context<'_>, options: SearchOptions) -> Result<CommandReport> {
    let mut report = CommandReport::new(Operation::Search);
    let mut searched: Vec<(PackageSpecifier, Vec<ProviderName>, CandidateSet)> = Vec::new();

    for slot in specifier::parse_queries(ctx.registry, &options.queries) {
        let spec = match slot {
            Ok(spec) => spec,
            Err(e) => {
                ui::error(&e.to_string());
                report.push(ReportLine::failed(subject_of(&e), &e));
                continue;
            }
        };

        let providers = match spec.provider {
            Some(provider) => vec![provider],
            None => ctx.registry.names(),
        };
        if !options.json {
            ui::step(&format!(
                "Searching {} for '{}'...",
                describe(&providers, ctx.registry.len()),
                spec.name
            ));
        }
        let set = search_providers(
            ctx.registry,
            &providers,
            &spec.name,
            SearchScope::Repository,
            options.limit,
        );
        searched.push((spec, providers, set));
    }

    let mut json_out = Vec::new();
    for (spec, providers, set) in &searched {
        let line = assess(spec, providers, set);
        if options.json {
            json_out.push(QueryOut {
                query: &spec.name,
                providers: providers.clone(),
                results: &set.results,
                errors: set.failures.iter().map(|e| e.to_string()).collect(),
            });
        } else {
            render(spec, set);
        }
        report.push(line);
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&json_out)?);
    }
    Ok(report)
}

/// A query fails only when every provider it targeted errored or none
/// could be searched at all
fn assess(spec: &PackageSpecifier, providers: &[ProviderName], set: &CandidateSet) -> ReportLine {
    let targeted = providers.len().saturating_sub(set.skipped.len());
    let (succeeded, detail) = if targeted == 0 {
        (false, "no available provider to search".to_string())
    } else if set.failures.len() >= targeted {
        let errors: Vec<String> = set.failures.iter().map(|e| e.to_string()).collect();
        (false, errors.join("; "))
    } else {
        (true, format!("{} result(s)", set.results.len()))
    };
    ReportLine {
        subject: spec.to_string(),
        provider: spec.provider,
        succeeded,
        detail,
    }
}

fn describe(providers: &[ProviderName], registered: usize) -> String {
    match providers {
        [only] if registered > 1 => only.to_string(),
        _ => "all providers".to_string(),
    }
}

fn render(spec: &PackageSpecifier, set: &CandidateSet) {
    for failure in &set.failures {
        ui::error(&format!("Search for '{}' failed: {}", spec.name, failure));
    }
    for provider in &set.skipped {
        ui::verbose(&format!("{}: backend not installed, not searched", provider));
    }

    if set.results.is_empty() {
        if set.failures.is_empty() {
            ui::warning(&format!("No results for '{}'", spec));
        }
        return;
    }

    let mut current: Option<ProviderName> = None;
    for result in &set.results {
        if current != Some(result.provider) {
            current = Some(result.provider);
            println!("{}", format!("{}:", result.provider).cyan().bold());
        }
        println!(
            "  {} {}",
            format!("{}#{}", result.provider, result.name).green(),
            label_rest(result).dimmed()
        );
    }
    println!();
}

/// Label without the leading name, which is already printed
fn label_rest(result: &SearchResult) -> String {
    result
        .display_label
        .strip_prefix(result.name.as_str())
        .unwrap_or(&result.display_label)
        .trim()
        .to_string()
}
