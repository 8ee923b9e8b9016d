//! Show the provider registry

use crate::commands::Context;
use colored::Colorize;

pub fn run(ctx: &Context<'_>) {
    println!("{}", "Providers (registration order):".bold());
    for entry in ctx.registry.entries() {
        let adapter = entry.adapter.as_ref();
        let status = if adapter.is_available() {
            "✓ installed".green()
        } else {
            "✗ not found".red()
        };

        let mut line = format!("  {}", format!("{:<10}", entry.name).bold());
        if entry.is_default {
            line.push_str(&format!(" {}", "(default)".yellow()));
        }
        if !adapter.aliases().is_empty() {
            line.push_str(&format!(
                " {}",
                format!("aliases: {}", adapter.aliases().join(", ")).dimmed()
            ));
        }
        println!("{}", line);
        println!("    {} {}", format!("{}:", adapter.binary()).dimmed(), status);
    }
}
