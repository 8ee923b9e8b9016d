//! Aggregated command outcome
//!
//! One line per specifier in token order, then one line per provider-wide
//! upgrade. The exit status is derived from the lines alone.

use crate::core::types::{
    Operation, OperationOutcome, OperationRequest, ProviderName, ResolvedSpecifier,
};
use crate::error::{MixturaError, Result};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_PARTIAL: i32 = 1;
pub const EXIT_FAILURE: i32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    /// What the user asked for (`git`, `flatpak#Spotify`, `nixpkgs (all packages)`)
    pub subject: String,
    pub provider: Option<ProviderName>,
    pub succeeded: bool,
    pub detail: String,
}

impl ReportLine {
    pub fn failed(subject: impl Into<String>, err: &MixturaError) -> Self {
        Self {
            subject: subject.into(),
            provider: None,
            succeeded: false,
            detail: err.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommandReport {
    pub operation: Operation,
    pub lines: Vec<ReportLine>,
}

impl CommandReport {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            lines: Vec::new(),
        }
    }

    /// Join resolution slots with dispatch outcomes. `outcomes` must be
    /// aligned with `requests` (as returned by `dispatcher::execute`).
    pub fn assemble(
        operation: Operation,
        slots: &[Result<ResolvedSpecifier>],
        requests: &[OperationRequest],
        outcomes: &[OperationOutcome],
    ) -> Self {
        let outcome_for = |provider: ProviderName| {
            requests
                .iter()
                .position(|r| r.provider == provider)
                .and_then(|i| outcomes.get(i))
        };

        let mut report = Self::new(operation);
        for slot in slots {
            let line = match slot {
                Err(e) => ReportLine::failed(subject_of(e), e),
                Ok(spec) => match outcome_for(spec.provider) {
                    Some(outcome) => ReportLine {
                        subject: spec.label(),
                        provider: Some(spec.provider),
                        succeeded: outcome.succeeded,
                        detail: outcome.detail.clone(),
                    },
                    None => ReportLine {
                        subject: spec.label(),
                        provider: Some(spec.provider),
                        succeeded: false,
                        detail: "not dispatched".to_string(),
                    },
                },
            };
            report.lines.push(line);
        }

        for (request, outcome) in requests.iter().zip(outcomes) {
            if request.is_upgrade_all() {
                report.lines.push(ReportLine {
                    subject: format!("{} (all packages)", request.provider),
                    provider: Some(request.provider),
                    succeeded: outcome.succeeded,
                    detail: outcome.detail.clone(),
                });
            }
        }
        report
    }

    pub fn push(&mut self, line: ReportLine) {
        self.lines.push(line);
    }

    pub fn succeeded(&self) -> usize {
        self.lines.iter().filter(|l| l.succeeded).count()
    }

    pub fn failed(&self) -> usize {
        self.lines.len() - self.succeeded()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    /// 0 everything succeeded, 1 partial failure, 2 nothing succeeded
    pub fn exit_code(&self) -> i32 {
        match (self.succeeded(), self.failed()) {
            (_, 0) => EXIT_SUCCESS,
            (0, _) => EXIT_FAILURE,
            _ => EXIT_PARTIAL,
        }
    }
}

/// The token or name an error is about
pub fn subject_of(err: &MixturaError) -> String {
    match err {
        MixturaError::UnknownProvider { token, .. } | MixturaError::InvalidSpecifier { token, .. } => {
            token.clone()
        }
        MixturaError::PackageNotFound(name) | MixturaError::ResolutionCancelled(name) => {
            name.clone()
        }
        MixturaError::Backend { provider, .. } => provider.clone(),
        _ => "-".to_string(),
    }
}
