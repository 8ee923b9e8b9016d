use crate::core::report::CommandReport;
use crate::ui;
use colored::Colorize;

/// Outcome lines are printed even in quiet mode
pub(super) fn print(report: &CommandReport) {
    if report.lines.is_empty() {
        return;
    }

    ui::header("Summary");
    for line in &report.lines {
        let provider = line
            .provider
            .map(|p| format!(" [{}]", p))
            .unwrap_or_default();
        if line.succeeded {
            println!(
                "{} {}{} {}",
                "✓".green().bold(),
                line.subject,
                provider.dimmed(),
                line.detail.dimmed()
            );
        } else {
            println!(
                "{} {}{}: {}",
                "✗".red().bold(),
                line.subject,
                provider.dimmed(),
                line.detail.red()
            );
        }
    }

    let verb = report.operation.verb();
    match report.failed() {
        0 => ui::success(&format!("{} completed", verb)),
        failed => ui::warning(&format!(
            "{} finished with {} of {} item(s) failed",
            verb,
            failed,
            report.lines.len()
        )),
    }
}
