use serde::Serialize;
use std::fmt;

/// Interned provider identifier. Only the registry hands these out,
/// so every `ProviderName` in flight names a registered provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ProviderName(&'static str);

impl ProviderName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

// One parsed `[provider#]name` item.
// `provider == None` means the Resolver must pick one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpecifier {
    pub provider: Option<ProviderName>,
    pub name: String,
}

impl PackageSpecifier {
    pub fn qualified(provider: ProviderName, name: impl Into<String>) -> Self {
        Self {
            provider: Some(provider),
            name: name.into(),
        }
    }

    pub fn unqualified(name: impl Into<String>) -> Self {
        Self {
            provider: None,
            name: name.into(),
        }
    }

    pub fn is_qualified(&self) -> bool {
        self.provider.is_some()
    }

    /// Qualified specifiers resolve to themselves
    pub fn into_resolved(self) -> Option<ResolvedSpecifier> {
        let provider = self.provider?;
        Some(ResolvedSpecifier {
            provider,
            name: self.name,
            requested: None,
        })
    }
}

impl fmt::Display for PackageSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.provider {
            Some(provider) => write!(f, "{}#{}", provider, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// A specifier bound to exactly one provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpecifier {
    pub provider: ProviderName,
    pub name: String,
    /// Original unqualified name when the Resolver chose the provider
    pub requested: Option<String>,
}

impl ResolvedSpecifier {
    /// What the user typed, for report lines
    pub fn label(&self) -> String {
        match &self.requested {
            Some(requested) if requested != &self.name => {
                format!("{} → {}#{}", requested, self.provider, self.name)
            }
            _ => format!("{}#{}", self.provider, self.name),
        }
    }
}

/// Search result from one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub provider: ProviderName,
    /// Identifier passed back to the backend (attr path, app ID, formula)
    pub name: String,
    pub display_label: String,
}

/// Installed package as reported by a backend listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstalledPackage {
    pub name: String,
    pub id: String,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Remove,
    Upgrade,
    Search,
}

impl Operation {
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Upgrade => "upgrade",
            Self::Search => "search",
        }
    }

    pub fn progressive(&self) -> &'static str {
        match self {
            Self::Add => "Installing",
            Self::Remove => "Removing",
            Self::Upgrade => "Upgrading",
            Self::Search => "Searching",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// One provider's share of a command.
/// Empty `names` with `Operation::Upgrade` means upgrade everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRequest {
    pub operation: Operation,
    pub provider: ProviderName,
    pub names: Vec<String>,
}

impl OperationRequest {
    pub fn is_upgrade_all(&self) -> bool {
        self.operation == Operation::Upgrade && self.names.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationOutcome {
    pub provider: ProviderName,
    pub succeeded: bool,
    pub detail: String,
}

impl OperationOutcome {
    pub fn success(provider: ProviderName, detail: impl Into<String>) -> Self {
        Self {
            provider,
            succeeded: true,
            detail: detail.into(),
        }
    }

    pub fn failure(provider: ProviderName, detail: impl Into<String>) -> Self {
        Self {
            provider,
            succeeded: false,
            detail: detail.into(),
        }
    }
}
