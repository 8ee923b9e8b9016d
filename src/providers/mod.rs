//! # Provider Adapters
//!
//! One module per backend package manager. Every adapter implements the
//! [`Provider`] trait:
//! - `search()` - query the backend repository
//! - `mutate()` - add / remove / upgrade named packages
//! - `upgrade_all()` - upgrade everything the backend manages
//! - `list_installed()` - installed packages
//!
//! Adapters shell out through `command_exec`, which captures output,
//! enforces timeouts and maps failures to `MixturaError::Backend`.

pub(crate) mod command_exec;
pub mod flatpak;
pub mod homebrew;
pub mod nix;
pub mod registry;
pub mod traits;

#[cfg(test)]
pub(crate) mod fake;

pub use registry::{ProviderEntry, ProviderRegistry, init_registry};
pub use traits::Provider;
