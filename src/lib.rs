pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod providers;
pub mod ui;
pub mod utils;

use clap::Parser;
use std::process::exit;

/// Run the mixtura CLI entrypoint.
pub fn run_cli() {
    let args = cli::args::Cli::parse();

    // Colours first, everything after may print
    ui::init_colors(args.global.no_color);
    ui::set_quiet(args.global.quiet);
    ui::set_verbose(args.global.verbose);

    // Backend processes get the signal too; we only stop starting new work
    if let Err(e) = ctrlc::set_handler(move || {
        eprintln!();
        ui::mark_interrupted();
        ui::warning("Operation cancelled by user.");
    }) {
        ui::warning(&format!("Could not install Ctrl-C handler: {}", e));
    }

    let settings = config::Settings::from_env(args.global.yes);
    let registry = match providers::init_registry(settings.timeouts) {
        Ok(registry) => registry,
        Err(e) => {
            ui::error(&e.to_string());
            exit(crate::core::report::EXIT_FAILURE);
        }
    };

    let prompt = ui::prompt::TerminalPrompt;
    let ctx = commands::Context {
        registry,
        settings,
        prompt: &prompt,
    };

    match cli::dispatcher::dispatch(&args, &ctx) {
        Ok(code) => exit(code),
        Err(e) => {
            ui::error(&e.to_string());
            exit(crate::core::report::EXIT_PARTIAL);
        }
    }
}
