//! # Provider Registry
//!
//! Process-wide table of provider adapters, built once at startup and
//! read-only afterwards. Registration order is significant: it is the
//! order searches are merged in and candidates are presented.
//!
//! ## Adding a New Backend
//!
//! 1. Create `src/providers/<backend>.rs` implementing [`Provider`]
//! 2. Register it in [`ProviderRegistry::builtin`]
//!
//! Nothing else branches on the backend type.

use crate::config::BackendTimeouts;
use crate::core::types::ProviderName;
use crate::error::{MixturaError, Result};
use crate::providers::flatpak::FlatpakProvider;
use crate::providers::homebrew::HomebrewProvider;
use crate::providers::nix::NixProvider;
use crate::providers::traits::Provider;
use std::collections::HashMap;
use std::sync::OnceLock;

pub struct ProviderEntry {
    pub name: ProviderName,
    pub adapter: Box<dyn Provider>,
    pub is_default: bool,
}

pub struct ProviderRegistry {
    entries: Vec<ProviderEntry>,
    /// name or alias → index into `entries`
    lookup: HashMap<&'static str, usize>,
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| e.name))
            .finish()
    }
}

impl ProviderRegistry {
    /// Build a registry from `(adapter, is_default)` pairs in registration order.
    ///
    /// Fails on duplicate names/aliases or unless exactly one provider is default.
    pub fn new(adapters: Vec<(Box<dyn Provider>, bool)>) -> Result<Self> {
        if adapters.is_empty() {
            return Err(MixturaError::Registry("no providers registered".to_string()));
        }

        let defaults: Vec<&'static str> = adapters
            .iter()
            .filter(|(_, is_default)| *is_default)
            .map(|(adapter, _)| adapter.name())
            .collect();
        match defaults.len() {
            1 => {}
            0 => {
                return Err(MixturaError::Registry(
                    "no default provider configured".to_string(),
                ));
            }
            _ => {
                return Err(MixturaError::Registry(format!(
                    "multiple default providers: {}",
                    defaults.join(", ")
                )));
            }
        }

        let mut entries = Vec::with_capacity(adapters.len());
        let mut lookup = HashMap::new();

        for (index, (adapter, is_default)) in adapters.into_iter().enumerate() {
            let name = adapter.name();
            if name.is_empty() || name.contains('#') {
                return Err(MixturaError::Registry(format!(
                    "invalid provider name '{}'",
                    name
                )));
            }
            for key in std::iter::once(name).chain(adapter.aliases().iter().copied()) {
                if lookup.insert(key, index).is_some() {
                    return Err(MixturaError::Registry(format!(
                        "duplicate provider name or alias '{}'",
                        key
                    )));
                }
            }
            entries.push(ProviderEntry {
                name: ProviderName::new(name),
                adapter,
                is_default,
            });
        }

        Ok(Self { entries, lookup })
    }

    /// Built-in table: nixpkgs (default), flatpak, homebrew
    pub fn builtin(timeouts: BackendTimeouts) -> Result<Self> {
        Self::new(vec![
            (Box::new(NixProvider::new(timeouts)), true),
            (Box::new(FlatpakProvider::new(timeouts)), false),
            (Box::new(HomebrewProvider::new(timeouts)), false),
        ])
    }

    /// Case-sensitive lookup of a provider name or alias
    pub fn lookup(&self, name: &str) -> Option<ProviderName> {
        self.lookup.get(name).map(|&i| self.entries[i].name)
    }

    pub fn get(&self, name: ProviderName) -> Option<&dyn Provider> {
        self.entry(name).map(|e| e.adapter.as_ref())
    }

    pub fn entry(&self, name: ProviderName) -> Option<&ProviderEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Entries in registration order
    pub fn entries(&self) -> &[ProviderEntry] {
        &self.entries
    }

    pub fn names(&self) -> Vec<ProviderName> {
        self.entries.iter().map(|e| e.name).collect()
    }

    pub fn default_provider(&self) -> ProviderName {
        // `new` guarantees exactly one default
        self.entries
            .iter()
            .find(|e| e.is_default)
            .map(|e| e.name)
            .unwrap_or(self.entries[0].name)
    }

    /// Registration index, used to order merged results
    pub fn position(&self, name: ProviderName) -> usize {
        self.entries
            .iter()
            .position(|e| e.name == name)
            .unwrap_or(usize::MAX)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static REGISTRY: OnceLock<ProviderRegistry> = OnceLock::new();

/// Initialise the global registry. Later calls return the first instance.
pub fn init_registry(timeouts: BackendTimeouts) -> Result<&'static ProviderRegistry> {
    if let Some(registry) = REGISTRY.get() {
        return Ok(registry);
    }
    let registry = ProviderRegistry::builtin(timeouts)?;
    Ok(REGISTRY.get_or_init(|| registry))
}

#[cfg(test)]
mod tests;
