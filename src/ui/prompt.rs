//! Numbered disambiguation prompt on the terminal

use crate::core::resolver::{Prompt, Selection};
use crate::core::types::SearchResult;
use crate::ui;
use colored::Colorize;
use std::io::{self, BufRead, Write};

const MAX_ATTEMPTS: usize = 3;
const FALLBACK_WIDTH: usize = 100;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Answer {
    /// Zero-based index
    Pick(usize),
    Skip,
    Invalid,
}

/// Interpret one line of input for a list of `count` candidates.
/// Empty input, `s`, `q` and `skip` cancel.
pub(crate) fn parse_answer(input: &str, count: usize) -> Answer {
    let input = input.trim().to_lowercase();
    match input.as_str() {
        "" | "s" | "q" | "skip" | "quit" => Answer::Skip,
        _ => match input.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => Answer::Pick(n - 1),
            _ => Answer::Invalid,
        },
    }
}

/// Reads the selection from stdin
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    fn render(query: &str, candidates: &[SearchResult]) {
        let width = ui::terminal_width().unwrap_or(FALLBACK_WIDTH);
        println!(
            "\n{} Multiple matches for '{}':",
            "?".yellow().bold(),
            query.bold()
        );
        for (i, candidate) in candidates.iter().enumerate() {
            let prefix = format!("{:>4}) [{}] ", i + 1, candidate.provider);
            let room = width.saturating_sub(prefix.chars().count()).max(20);
            println!(
                "{}{}",
                prefix.cyan(),
                ui::truncate(&candidate.display_label, room)
            );
        }
    }
}

impl Prompt for TerminalPrompt {
    fn choose(&self, query: &str, candidates: &[SearchResult]) -> Selection {
        Self::render(query, candidates);

        let stdin = io::stdin();
        for _ in 0..MAX_ATTEMPTS {
            print!("Select [1-{}], or s to skip: ", candidates.len());
            if let Err(e) = io::stdout().flush() {
                ui::warning(&format!("Failed to flush terminal: {}", e));
                return Selection::Cancelled;
            }

            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                // EOF: nobody is there to answer
                Ok(0) => {
                    println!();
                    return Selection::Cancelled;
                }
                Ok(_) => {}
                Err(e) => {
                    ui::warning(&format!("Failed to read input: {}", e));
                    return Selection::Cancelled;
                }
            }
            if ui::is_interrupted() {
                return Selection::Cancelled;
            }

            match parse_answer(&line, candidates.len()) {
                Answer::Pick(index) => return Selection::Chosen(index),
                Answer::Skip => return Selection::Cancelled,
                Answer::Invalid => ui::warning(&format!(
                    "'{}' is not a number between 1 and {}",
                    line.trim(),
                    candidates.len()
                )),
            }
        }
        Selection::Cancelled
    }
}
