//! Command dispatcher
//!
//! Routes CLI commands to their handlers and turns the result into an
//! exit code.

use crate::cli::args::{Cli, Command};
use crate::commands::{self, Context};
use crate::core::report::EXIT_SUCCESS;
use crate::error::Result;

/// Run the parsed command. `Ok` carries the exit code.
pub fn dispatch(args: &Cli, ctx: &Context<'_>) -> Result<i32> {
    match &args.command {
        Command::Add { packages } => Ok(commands::add::run(
            ctx,
            commands::add::AddOptions {
                packages: packages.clone(),
            },
        )
        .exit_code()),

        Command::Remove { packages } => Ok(commands::remove::run(
            ctx,
            commands::remove::RemoveOptions {
                packages: packages.clone(),
            },
        )
        .exit_code()),

        Command::Upgrade { targets } => Ok(commands::upgrade::run(
            ctx,
            commands::upgrade::UpgradeOptions {
                targets: targets.clone(),
            },
        )
        .exit_code()),

        Command::Search {
            queries,
            limit,
            json,
        } => commands::search::run(
            ctx,
            commands::search::SearchOptions {
                queries: queries.clone(),
                limit: limit.unwrap_or(ctx.settings.candidate_limit),
                json: *json,
            },
        )
        .map(|report| report.exit_code()),

        Command::List { provider } => commands::list::run(
            ctx,
            commands::list::ListOptions {
                provider: provider.clone(),
            },
        ),

        Command::Gc { provider } => commands::gc::run(
            ctx,
            commands::gc::GcOptions {
                provider: provider.clone(),
            },
        ),

        Command::Providers => {
            commands::providers::run(ctx);
            Ok(EXIT_SUCCESS)
        }

        Command::Completions { shell } => {
            commands::completions::run(*shell)?;
            Ok(EXIT_SUCCESS)
        }
    }
}
