//! List installed packages per provider

use crate::commands::Context;
use crate::core::report::{EXIT_PARTIAL, EXIT_SUCCESS};
use crate::core::types::{InstalledPackage, ProviderName};
use crate::error::{MixturaError, Result};
use crate::ui;
use colored::Colorize;
use rayon::prelude::*;

pub struct ListOptions {
    /// Provider name or alias; `None` lists every provider
    pub provider: Option<String>,
}

enum Listing {
    Packages(Vec<InstalledPackage>),
    Unavailable,
    Failed(MixturaError),
}

pub fn run(ctx: &Context<'_>, options: ListOptions) -> Result<i32> {
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

    let registry = ctx.registry;
    let listings: Vec<(ProviderName, Listing)> = providers
        .par_iter()
        .map(|&provider| {
            let listing = match registry.get(provider) {
                None => Listing::Unavailable,
                Some(adapter) if !adapter.is_available() => Listing::Unavailable,
                Some(adapter) => match adapter.list_installed() {
                    Ok(packages) => Listing::Packages(packages),
                    Err(e) => Listing::Failed(e),
                },
            };
            (provider, listing)
        })
        .collect();

    let explicit = options.provider.is_some();
    let mut failed = false;
    for (provider, listing) in listings {
        match listing {
            Listing::Packages(packages) => print_packages(provider, &packages),
            Listing::Unavailable if explicit => {
                ui::warning(&format!("{}: backend not installed", provider));
            }
            Listing::Unavailable => {
                ui::verbose(&format!("{}: backend not installed, skipped", provider));
            }
            Listing::Failed(e) => {
                failed = true;
                ui::error(&format!("Failed to list {} packages: {}", provider, e));
            }
        }
    }

    Ok(if failed { EXIT_PARTIAL } else { EXIT_SUCCESS })
}

fn print_packages(provider: ProviderName, packages: &[InstalledPackage]) {
    println!(
        "{} {}",
        format!("{}:", provider).cyan().bold(),
        format!("({})", packages.len()).dimmed()
    );
    if packages.is_empty() {
        ui::indent(&"no packages installed".dimmed().to_string(), 1);
    }
    for package in packages {
        let mut line = package.name.green().to_string();
        if let Some(version) = &package.version {
            line.push_str(&format!(" {}", version));
        }
        if package.id != package.name {
            line.push_str(&format!(" {}", format!("({})", package.id).dimmed()));
        }
        ui::indent(&line, 1);
    }
    println!();
}
