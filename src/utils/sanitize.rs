//! Input validation for package names and search queries
//!
//! Both end up as argv entries of backend commands. They never pass
//! through a shell, but a leading `-` would still be read as an option.

use crate::error::{MixturaError, Result};
use regex::Regex;
use std::sync::LazyLock;

const MAX_NAME_LEN: usize = 256;

/// Characters that could be dangerous in shell contexts
static SHELL_DANGEROUS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[;`$(){}|&<>\\'"\n\r\t]"#).expect("Invalid regex pattern"));

fn invalid(token: &str, reason: impl Into<String>) -> MixturaError {
    MixturaError::InvalidSpecifier {
        token: token.to_string(),
        reason: reason.into(),
    }
}

/// Checks shared by names and queries: non-empty, bounded, not an option
fn validate_argument(token: &str, text: &str, what: &str) -> Result<()> {
    if text.is_empty() {
        return Err(invalid(token, format!("{} cannot be empty", what)));
    }

    if text.chars().count() > MAX_NAME_LEN {
        return Err(invalid(
            token,
            format!("{} too long (max {} chars)", what, MAX_NAME_LEN),
        ));
    }

    if text.starts_with('-') {
        return Err(invalid(token, format!("{} cannot start with '-'", what)));
    }

    if text.chars().any(char::is_control) {
        return Err(invalid(token, format!("{} contains control characters", what)));
    }

    Ok(())
}

/// Validate one search query taken from `token`. Regex and quote
/// characters are fine here; backends treat the query as a pattern.
pub fn validate_query(token: &str, query: &str) -> Result<()> {
    validate_argument(token, query, "search query")
}

/// Validate one package name taken from `token`
pub fn validate_package_name(token: &str, name: &str) -> Result<()> {
    let reject = |reason: &str| invalid(token, reason);

    validate_argument(token, name, "package name")?;

    if SHELL_DANGEROUS.is_match(name) {
        return Err(reject("package name contains unsafe characters"));
    }

    // Prevent path traversal
    if name.contains("..") {
        return Err(reject("package name cannot contain '..'"));
    }

    Ok(())
}
