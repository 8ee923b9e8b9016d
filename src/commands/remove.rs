//! Remove command
//!
//! Unqualified names are matched against what each provider has installed.

use crate::commands::{Context, pipeline};
use crate::core::report::CommandReport;
use crate::core::types::Operation;

pub struct RemoveOptions {
    pub packages: Vec<String>,
}

pub fn run(ctx: &Context<'_>, options: RemoveOptions) -> CommandReport {
    pipeline::run(ctx, Operation::Remove, &options.packages, &[])
}
