//! Core pipeline: parse → resolve → dispatch → report

pub mod dispatcher;
pub mod report;
pub mod resolver;
pub mod specifier;
pub mod types;
