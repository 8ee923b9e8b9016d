//! Specifier parsing
//!
//! Turns raw CLI tokens of the form `[provider#]name[,name...]` into
//! [`PackageSpecifier`]s. Pure: no backend is consulted.

use crate::core::types::PackageSpecifier;
use crate::error::{MixturaError, Result};
use crate::providers::ProviderRegistry;
use crate::utils::sanitize;

pub const PROVIDER_SEPARATOR: char = '#';
pub const LIST_SEPARATOR: char = ',';

type Validator = fn(&str, &str) -> Result<()>;

/// Parse one token. A comma list expands to several specifiers that share
/// the token's provider.
pub fn parse_token(registry: &ProviderRegistry, token: &str) -> Result<Vec<PackageSpecifier>> {
    split_token(registry, token, sanitize::validate_package_name)
}

fn split_token(
    registry: &ProviderRegistry,
    token: &str,
    validate: Validator,
) -> Result<Vec<PackageSpecifier>> {
    let (provider, names) = match token.split_once(PROVIDER_SEPARATOR) {
        Some((prefix, rest)) => {
            let provider =
                registry
                    .lookup(prefix)
                    .ok_or_else(|| MixturaError::UnknownProvider {
                        token: token.to_string(),
                        provider: prefix.to_string(),
                    })?;
            (Some(provider), rest)
        }
        None => (None, token),
    };

    let items: Vec<&str> = names
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect();

    if items.is_empty() {
        return Err(MixturaError::InvalidSpecifier {
            token: token.to_string(),
            reason: "package name cannot be empty".to_string(),
        });
    }

    items
        .into_iter()
        .map(|name| {
            validate(token, name)?;
            Ok(PackageSpecifier {
                provider,
                name: name.to_string(),
            })
        })
        .collect()
}

/// Parse every token independently, preserving order. A failing token
/// contributes one `Err` slot; its siblings are unaffected.
pub fn parse_tokens<S: AsRef<str>>(
    registry: &ProviderRegistry,
    tokens: &[S],
) -> Vec<Result<PackageSpecifier>> {
    collect_slots(registry, tokens, sanitize::validate_package_name)
}

/// Like [`parse_tokens`], but the names are free-text search queries and
/// only need to be safe as a single argv entry
pub fn parse_queries<S: AsRef<str>>(
    registry: &ProviderRegistry,
    tokens: &[S],
) -> Vec<Result<PackageSpecifier>> {
    collect_slots(registry, tokens, sanitize::validate_query)
}

fn collect_slots<S: AsRef<str>>(
    registry: &ProviderRegistry,
    tokens: &[S],
    validate: Validator,
) -> Vec<Result<PackageSpecifier>> {
    let mut slots = Vec::with_capacity(tokens.len());
    for token in tokens {
        match split_token(registry, token.as_ref(), validate) {
            Ok(specs) => slots.extend(specs.into_iter().map(Ok)),
            Err(e) => slots.push(Err(e)),
        }
    }
    slots
}
