//! Command handlers
//!
//! `add`, `remove` and `upgrade` share one pipeline (see [`pipeline`]):
//! parse tokens, resolve unqualified names, dispatch per provider, then
//! print the summary.

pub mod add;
pub mod completions;
pub mod gc;
pub mod list;
pub mod providers;
pub mod remove;
pub mod search;
pub mod upgrade;

mod pipeline;
mod summary;

use crate::config::Settings;
use crate::core::resolver::Prompt;
use crate::providers::ProviderRegistry;

/// Everything a command needs besides its own options
pub struct Context<'a> {
    pub registry: &'a ProviderRegistry,
    pub settings: Settings,
    pub prompt: &'a dyn Prompt,
}
