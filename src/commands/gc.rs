//! Backend garbage collection
//!
//! Runs each provider's maintenance step (`nix store gc` for nixpkgs).
//! Providers without one are skipped, or warned about when named.

use crate::commands::Context;
use crate::core::report::{EXIT_FAILURE, EXIT_PARTIAL, EXIT_SUCCESS};
use crate::core::types::ProviderName;
use crate::error::{MixturaError, Result};
use crate::ui;
use colored::Colorize;

pub struct GcOptions {
    /// Provider name or alias; `None` collects on every provider that can
    pub provider: Option<String>,
}

enum Collection {
    Freed(String),
    Unsupported,
    Unavailable,
    Failed(MixturaError),
}

pub fn run(ctx: &Context<'_>, options: GcOptions) -> Result<i32> {
    let providers: Vec<ProviderName> = match &options.provider {
        Some(name) => {
            let provider =
                ctx.registry
                    .lookup(name)
                    .ok_or_else(|| MixturaError::UnknownProvider {
                        token: name.clone(),
                        provider: name.clone(),
                    })?;
            vec![provider]
        }
        None => ctx.registry.names(),
    };
    let explicit = options.provider.is_some();

    let mut freed = 0;
    let mut failed = 0;
    for provider in providers {
        let collection = match ctx.registry.get(provider) {
            None => Collection::Unavailable,
            Some(adapter) if !adapter.is_available() => Collection::Unavailable,
            Some(adapter) => {
                ui::step(&format!("Collecting garbage in {}...", provider));
                match adapter.garbage_collect() {
                    Ok(Some(summary)) => Collection::Freed(summary),
                    Ok(None) => Collection::Unsupported,
                    Err(e) => Collection::Failed(e),
                }
            }
        };

        match collection {
            Collection::Freed(summary) => {
                freed += 1;
                println!(
                    "{} {} {}",
                    "✓".green().bold(),
                    provider,
                    summary.dimmed()
                );
            }
            Collection::Unsupported if explicit => {
                ui::warning(&format!("{} has no garbage collection", provider));
            }
            Collection::Unsupported => {
                ui::verbose(&format!("{}: no garbage collection, skipped", provider));
            }
            Collection::Unavailable if explicit => {
                failed += 1;
                ui::error(&format!("{}: backend not installed", provider));
            }
            Collection::Unavailable => {
                ui::verbose(&format!("{}: backend not installed, skipped", provider));
            }
            Collection::Failed(e) => {
                failed += 1;
                ui::error(&format!("Garbage collection failed: {}", e));
            }
        }
    }

    Ok(match (freed, failed) {
        (_, 0) => EXIT_SUCCESS,
        (0, _) => EXIT_FAILURE,
        _ => EXIT_PARTIAL,
    })
}
