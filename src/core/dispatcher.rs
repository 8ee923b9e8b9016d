//! Dispatch of resolved specifiers to provider adapters
//!
//! Resolved specifiers are grouped by provider (first appearance order) and
//! every group becomes one [`OperationRequest`]. Requests run concurrently;
//! each one yields exactly one [`OperationOutcome`] no matter how the others
//! fare.

use crate::core::types::{
    Operation, OperationOutcome, OperationRequest, ProviderName, ResolvedSpecifier,
};
use crate::error::MixturaError;
use crate::providers::ProviderRegistry;
use crate::ui;
use rayon::prelude::*;

/// Group `specs` into one request per provider. Repeated names inside a
/// group are sent once.
pub fn plan(operation: Operation, specs: &[ResolvedSpecifier]) -> Vec<OperationRequest> {
    let mut requests: Vec<OperationRequest> = Vec::new();
    for spec in specs {
        match requests.iter_mut().find(|r| r.provider == spec.provider) {
            Some(request) => {
                if !request.names.contains(&spec.name) {
                    request.names.push(spec.name.clone());
                }
            }
            None => requests.push(OperationRequest {
                operation,
                provider: spec.provider,
                names: vec![spec.name.clone()],
            }),
        }
    }
    requests
}

/// Plan an upgrade. Providers in `everything` get an upgrade-all request,
/// which absorbs any named packages for the same provider.
pub fn plan_upgrade(
    specs: &[ResolvedSpecifier],
    everything: &[ProviderName],
) -> Vec<OperationRequest> {
    let mut requests = plan(Operation::Upgrade, specs);
    for request in &mut requests {
        if everything.contains(&request.provider) {
            request.names.clear();
        }
    }
    for &provider in everything {
        if !requests.iter().any(|r| r.provider == provider) {
            requests.push(OperationRequest {
                operation: Operation::Upgrade,
                provider,
                names: Vec::new(),
            });
        }
    }
    requests
}

/// Run every request concurrently. The result is aligned with `requests`.
pub fn execute(registry: &ProviderRegistry, requests: &[OperationRequest]) -> Vec<OperationOutcome> {
    requests
        .par_iter()
        .map(|request| run_request(registry, request))
        .collect()
}

fn run_request(registry: &ProviderRegistry, request: &OperationRequest) -> OperationOutcome {
    let provider = request.provider;

    if ui::is_interrupted() {
        return OperationOutcome::failure(provider, MixturaError::Interrupted.to_string());
    }

    let Some(adapter) = registry.get(provider) else {
        return OperationOutcome::failure(
            provider,
            MixturaError::Registry(format!("provider '{}' is not registered", provider))
                .to_string(),
        );
    };

    if !adapter.is_available() {
        if request.is_upgrade_all() {
            ui::verbose(&format!("{}: backend not installed, skipping", provider));
            return OperationOutcome::success(provider, "skipped (backend not installed)");
        }
        return OperationOutcome::failure(
            provider,
            format!("'{}' is not installed or not on PATH", adapter.binary()),
        );
    }

    let result = if request.is_upgrade_all() {
        ui::step(&format!("Upgrading all {} packages...", provider));
        adapter.upgrade_all()
    } else {
        ui::step(&format!(
            "{} {} with {}...",
            request.operation.progressive(),
            request.names.join(", "),
            provider
        ));
        adapter.mutate(request.operation, &request.names)
    };

    match result {
        Ok(detail) => OperationOutcome::success(provider, detail),
        Err(e) => {
            let detail = match e {
                MixturaError::Backend { detail, .. } => detail,
                other => other.to_string(),
            };
            ui::verbose(&format!("{} failed: {}", provider, detail));
            OperationOutcome::failure(provider, detail)
        }
    }
}
