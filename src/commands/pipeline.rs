use crate::commands::Context;
use crate::core::report::CommandReport;
use crate::core::resolver::{Resolver, SearchScope};
use crate::core::types::{Operation, ProviderName, ResolvedSpecifier};
use crate::core::{dispatcher, specifier};
use crate::error::MixturaError;
use crate::ui;

/// parse → resolve → dispatch → report for one mutating command.
///
/// `everything` lists providers that get an upgrade-all request; it is
/// only meaningful for `Operation::Upgrade`.
pub(super) fn run(
    ctx: &Context<'_>,
    operation: Operation,
    tokens: &[String],
    everything: &[ProviderName],
) -> CommandReport {
    let slots = specifier::parse_tokens(ctx.registry, tokens);
    for err in slots.iter().filter_map(|slot| slot.as_ref().err()) {
        ui::error(&err.to_string());
    }

    let scope = match operation {
        Operation::Add | Operation::Search => SearchScope::Repository,
        Operation::Remove | Operation::Upgrade => SearchScope::Installed,
    };
    let resolved = Resolver::new(ctx.registry, ctx.prompt, scope)
        .with_limit(ctx.settings.candidate_limit)
        .assume_yes(ctx.settings.assume_yes)
        .resolve(slots);

    for err in resolved.iter().filter_map(|slot| slot.as_ref().err()) {
        if matches!(
            err,
            MixturaError::PackageNotFound(_) | MixturaError::ResolutionCancelled(_)
        ) {
            ui::warning(&err.to_string());
        }
    }

    let specs: Vec<ResolvedSpecifier> = resolved
        .iter()
        .filter_map(|slot| slot.as_ref().ok().cloned())
        .collect();
    let requests = match operation {
        Operation::Upgrade => dispatcher::plan_upgrade(&specs, everything),
        _ => dispatcher::plan(operation, &specs),
    };

    if requests.is_empty() {
        ui::warning(&format!("Nothing to {}", operation.verb()));
    }
    let outcomes = dispatcher::execute(ctx.registry, &requests);

    let report = CommandReport::assemble(operation, &resolved, &requests, &outcomes);
    super::summary::print(&report);
    report
}
