//! Add command
//!
//! Installs packages. Unqualified names are searched across every
//! provider's repository.

use crate::commands::{Context, pipeline};
use crate::core::report::CommandReport;
use crate::core::types::Operation;

pub struct AddOptions {
    /// Raw `[provider#]name[,name...]` tokens
    pub packages: Vec<String>,
}

pub fn run(ctx: &Context<'_>, options: AddOptions) -> CommandReport {
    pipeline::run(ctx, Operation::Add, &options.packages, &[])
}
