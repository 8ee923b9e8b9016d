//! Upgrade command
//!
//! - no targets: every registered provider upgrades everything, once
//! - a bare provider name (`flatpak`, `brew`): that provider upgrades everything
//! - anything else is a package specifier resolved against installed packages

use crate::commands::{Context, pipeline};
use crate::core::report::CommandReport;
use crate::core::specifier::PROVIDER_SEPARATOR;
use crate::core::types::{Operation, ProviderName};
use crate::providers::ProviderRegistry;

pub struct UpgradeOptions {
    /// Provider names and/or package specifiers
    pub targets: Vec<String>,
}

/// Split targets into provider-wide upgrades and package tokens
pub(crate) fn split_targets(
    registry: &ProviderRegistry,
    targets: &[String],
) -> (Vec<ProviderName>, Vec<String>) {
    if targets.is_empty() {
        return (registry.names(), Vec::new());
    }

    let mut everything = Vec::new();
    let mut packages = Vec::new();
    for target in targets {
        let provider = if target.contains(PROVIDER_SEPARATOR) {
            None
        } else {
            registry.lookup(target)
        };
        match provider {
            Some(provider) => {
                if !everything.contains(&provider) {
                    everything.push(provider);
                }
            }
            None => packages.push(target.clone()),
        }
    }
    (everything, packages)
}

pub fn run(ctx: &Context<'_>, options: UpgradeOptions) -> CommandReport {
    let (everything, packages) = split_targets(ctx.registry, &options.targets);
    pipeline::run(ctx, Operation::Upgrade, &packages, &everything)
}
