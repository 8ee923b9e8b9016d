//! Runtime settings
//!
//! Built once from global CLI flags and `MIXTURA_*` environment variables.

use crate::ui;
use std::time::Duration;

pub const SEARCH_TIMEOUT_ENV: &str = "MIXTURA_SEARCH_TIMEOUT";
pub const OPERATION_TIMEOUT_ENV: &str = "MIXTURA_OPERATION_TIMEOUT";
pub const CANDIDATE_LIMIT_ENV: &str = "MIXTURA_CANDIDATE_LIMIT";

const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 60;
const DEFAULT_OPERATION_TIMEOUT_SECS: u64 = 3600;
const DEFAULT_CANDIDATE_LIMIT: usize = 10;

/// Timeouts handed to every provider adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendTimeouts {
    pub search: Duration,
    pub operation: Duration,
}

impl Default for BackendTimeouts {
    fn default() -> Self {
        Self {
            search: Duration::from_secs(DEFAULT_SEARCH_TIMEOUT_SECS),
            operation: Duration::from_secs(DEFAULT_OPERATION_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub timeouts: BackendTimeouts,
    /// Candidates kept per provider (0 = unlimited)
    pub candidate_limit: usize,
    /// Resolve ambiguity without prompting
    pub assume_yes: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeouts: BackendTimeouts::default(),
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
            assume_yes: false,
        }
    }
}

impl Settings {
    pub fn from_env(assume_yes: bool) -> Self {
        Self::from_lookup(assume_yes, |key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(assume_yes: bool, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let search = parse_number(SEARCH_TIMEOUT_ENV, lookup(SEARCH_TIMEOUT_ENV))
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeouts.search);
        let operation = parse_number(OPERATION_TIMEOUT_ENV, lookup(OPERATION_TIMEOUT_ENV))
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeouts.operation);
        let candidate_limit = parse_number(CANDIDATE_LIMIT_ENV, lookup(CANDIDATE_LIMIT_ENV))
            .map(|n| n as usize)
            .unwrap_or(defaults.candidate_limit);

        Self {
            timeouts: BackendTimeouts { search, operation },
            candidate_limit,
            assume_yes,
        }
    }
}

fn parse_number(key: &str, raw: Option<String>) -> Option<u64> {
    let raw = raw?;
    match raw.trim().parse::<u64>() {
        Ok(n) => Some(n),
        Err(_) => {
            ui::warning(&format!(
                "Ignoring {}='{}': expected a non-negative integer",
                key, raw
            ));
            None
        }
    }
}

#[cfg(test)]
mod tests;
