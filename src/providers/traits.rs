use crate::core::types::{InstalledPackage, Operation, ProviderName, SearchResult};
use crate::error::Result;

/// Capability set of one backend package manager.
///
/// Adapters turn an abstract operation into a backend invocation and
/// parse what comes back. Failures are returned as
/// `MixturaError::Backend`; an adapter never aborts the process.
pub trait Provider: Send + Sync {
    /// Canonical registry name (`nixpkgs`, `flatpak`, ...)
    fn name(&self) -> &'static str;

    /// Extra names accepted as a specifier prefix
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Executable this adapter drives
    fn binary(&self) -> &'static str;

    fn is_available(&self) -> bool {
        which::which(self.binary()).is_ok()
    }

    /// Search the backend's repository
    fn search(&self, query: &str) -> Result<Vec<SearchResult>>;

    /// Apply `operation` to `names`. Returns the backend's summary text.
    fn mutate(&self, operation: Operation, names: &[String]) -> Result<String>;

    /// Upgrade every package this backend manages
    fn upgrade_all(&self) -> Result<String>;

    fn list_installed(&self) -> Result<Vec<InstalledPackage>>;

    /// Reclaim space the backend no longer needs. `None` when the backend
    /// has no such maintenance step.
    fn garbage_collect(&self) -> Result<Option<String>> {
        Ok(None)
    }

    /// Search what is already installed (case-insensitive substring on name or id)
    fn search_installed(&self, query: &str) -> Result<Vec<SearchResult>> {
        let needle = query.to_lowercase();
        let provider = ProviderName::new(self.name());
        Ok(self
            .list_installed()?
            .into_iter()
            .filter(|pkg| {
                pkg.name.to_lowercase().contains(&needle) || pkg.id.to_lowercase().contains(&needle)
            })
            .map(|pkg| {
                let mut display_label = if pkg.name == pkg.id {
                    pkg.name.clone()
                } else {
                    format!("{} ({})", pkg.name, pkg.id)
                };
                if let Some(version) = &pkg.version {
                    display_label.push_str(&format!(" {}", version));
                }
                display_label.push_str(" [installed]");
                SearchResult {
                    provider,
                    name: pkg.id,
                    display_label,
                }
            })
            .collect())
    }
}
