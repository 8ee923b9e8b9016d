use super::*;
use std::collections::HashMap;

fn settings_with(vars: &[(&str, &str)]) -> Settings {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Settings::from_lookup(false, |key| map.get(key).cloned())
}

#[test]
fn defaults_apply_without_environment() {
    assert_eq!(settings_with(&[]), Settings::default());
}

#[test]
fn environment_overrides_timeouts_and_limit() {
    let settings = settings_with(&[
        (SEARCH_TIMEOUT_ENV, "5"),
        (OPERATION_TIMEOUT_ENV, "90"),
        (CANDIDATE_LIMIT_ENV, "0"),
    ]);
    assert_eq!(settings.timeouts.search, Duration::from_secs(5));
    assert_eq!(settings.timeouts.operation, Duration::from_secs(90));
    assert_eq!(settings.candidate_limit, 0);
}

#[test]
fn garbage_values_fall_back_to_defaults() {
    let settings = settings_with(&[(SEARCH_TIMEOUT_ENV, "soon"), (CANDIDATE_LIMIT_ENV, "-3")]);
    assert_eq!(settings.timeouts.search, BackendTimeouts::default().search);
    assert_eq!(settings.candidate_limit, Settings::default().candidate_limit);
}
