use super::*;
use crate::providers::fake::FakeProvider;

fn boxed(provider: FakeProvider) -> Box<dyn Provider> {
    Box::new(provider)
}

#[test]
fn builtin_registry_order_and_default() {
    let registry = ProviderRegistry::builtin(BackendTimeouts::default()).unwrap();
    let names: Vec<_> = registry.names().iter().map(|n| n.as_str()).collect();
    assert_eq!(names, vec!["nixpkgs", "flatpak", "homebrew"]);
    assert_eq!(registry.default_provider().as_str(), "nixpkgs");
}

#[test]
fn aliases_resolve_to_canonical_name() {
    let registry = ProviderRegistry::builtin(BackendTimeouts::default()).unwrap();
    assert_eq!(registry.lookup("nix").map(|n| n.as_str()), Some("nixpkgs"));
    assert_eq!(registry.lookup("brew").map(|n| n.as_str()), Some("homebrew"));
    assert_eq!(registry.lookup("flatpak").map(|n| n.as_str()), Some("flatpak"));
}

#[test]
fn lookup_is_case_sensitive() {
    let registry = ProviderRegistry::builtin(BackendTimeouts::default()).unwrap();
    assert!(registry.lookup("Flatpak").is_none());
    assert!(registry.lookup("snap").is_none());
}

#[test]
fn missing_default_is_fatal() {
    let err = ProviderRegistry::new(vec![
        (boxed(FakeProvider::new("a")), false),
        (boxed(FakeProvider::new("b")), false),
    ])
    .unwrap_err();
    assert!(matches!(err, MixturaError::Registry(_)));
}

#[test]
fn multiple_defaults_are_fatal() {
    let err = ProviderRegistry::new(vec![
        (boxed(FakeProvider::new("a")), true),
        (boxed(FakeProvider::new("b")), true),
    ])
    .unwrap_err();
    assert!(err.to_string().contains("multiple default providers"));
}

#[test]
fn duplicate_alias_is_fatal() {
    let err = ProviderRegistry::new(vec![
        (boxed(FakeProvider::new("a")), true),
        (boxed(FakeProvider::new("b").with_aliases(&["a"])), false),
    ])
    .unwrap_err();
    assert!(err.to_string().contains("duplicate provider name or alias 'a'"));
}

#[test]
fn empty_registry_is_fatal() {
    assert!(ProviderRegistry::new(Vec::new()).is_err());
}

#[test]
fn position_follows_registration_order() {
    let registry = ProviderRegistry::new(vec![
        (boxed(FakeProvider::new("first")), false),
        (boxed(FakeProvider::new("second")), true),
    ])
    .unwrap();
    let second = registry.lookup("second").unwrap();
    assert_eq!(registry.position(second), 1);
    assert_eq!(registry.default_provider(), second);
    assert_eq!(registry.len(), 2);
}
