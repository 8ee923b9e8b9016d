use super::*;
use crate::providers::fake::{Call, FakeProvider};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Prompt that replays canned answers and records what it was shown
#[derive(Default)]
struct ScriptedPrompt {
    answers: RefCell<VecDeque<Selection>>,
    shown: RefCell<Vec<(String, Vec<String>)>>,
}

impl ScriptedPrompt {
    fn answering(answers: &[Selection]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().copied().collect()),
            shown: RefCell::new(Vec::new()),
        }
    }

    fn shown(&self) -> Vec<(String, Vec<String>)> {
        self.shown.borrow().clone()
    }
}

impl Prompt for ScriptedPrompt {
    fn choose(&self, query: &str, candidates: &[SearchResult]) -> Selection {
        self.shown.borrow_mut().push((
            query.to_string(),
            candidates
                .iter()
                .map(|c| format!("{}#{}", c.provider, c.name))
                .collect(),
        ));
        self.answers
            .borrow_mut()
            .pop_front()
            .unwrap_or(Selection::Cancelled)
    }
}

fn registry(providers: Vec<FakeProvider>) -> ProviderRegistry {
    ProviderRegistry::new(
        providers
            .into_iter()
            .enumerate()
            .map(|(i, p)| (Box::new(p) as Box<dyn Provider>, i == 0))
            .collect(),
    )
    .unwrap()
}

fn unqualified(names: &[&str]) -> Vec<Result<PackageSpecifier>> {
    names
        .iter()
        .map(|n| Ok(PackageSpecifier::unqualified(*n)))
        .collect()
}

#[test]
fn qualified_specifiers_bypass_search() {
    let nix = FakeProvider::new("nix").hits("vim", &["vim"]);
    let log = nix.log();
    let registry = registry(vec![nix, FakeProvider::new("flatpak")]);
    let prompt = ScriptedPrompt::default();
    let resolver = Resolver::new(&registry, &prompt, SearchScope::Repository);

    let provider = registry.lookup("nix").unwrap();
    let resolved = resolver.resolve(vec![Ok(PackageSpecifier::qualified(provider, "vim"))]);

    let spec = resolved[0].as_ref().unwrap();
    assert_eq!(spec.provider, provider);
    assert_eq!(spec.name, "vim");
    assert_eq!(spec.requested, None);
    assert!(log.calls().is_empty());
    assert!(prompt.shown().is_empty());
}

#[test]
fn single_candidate_resolves_without_prompt() {
    let registry = registry(vec![
        FakeProvider::new("nix"),
        FakeProvider::new("flatpak").hits("spotify", &["com.spotify.Client"]),
    ]);
    let prompt = ScriptedPrompt::default();
    let resolver = Resolver::new(&registry, &prompt, SearchScope::Repository);

    let resolved = resolver.resolve(unqualified(&["spotify"]));
    let spec = resolved[0].as_ref().unwrap();
    assert_eq!(spec.provider.as_str(), "flatpak");
    assert_eq!(spec.name, "com.spotify.Client");
    assert_eq!(spec.requested.as_deref(), Some("spotify"));
    assert!(prompt.shown().is_empty());
}

#[test]
fn zero_candidates_fail_only_that_specifier() {
    let registry = registry(vec![
        FakeProvider::new("nix").hits("git", &["git"]),
        FakeProvider::new("flatpak"),
    ]);
    let prompt = ScriptedPrompt::default();
    let resolver = Resolver::new(&registry, &prompt, SearchScope::Repository);

    let resolved = resolver.resolve(unqualified(&["nosuchthing", "git"]));
    assert!(matches!(
        &resolved[0],
        Err(MixturaError::PackageNotFound(name)) if name == "nosuchthing"
    ));
    assert_eq!(resolved[1].as_ref().unwrap().name, "git");
}

#[test]
fn multiple_candidates_are_prompted_in_registration_order() {
    let registry = registry(vec![
        FakeProvider::new("nix").hits("firefox", &["firefox", "firefox-esr"]),
        FakeProvider::new("flatpak").hits("firefox", &["org.mozilla.firefox"]),
    ]);
    let prompt = ScriptedPrompt::answering(&[Selection::Chosen(2)]);
    let resolver = Resolver::new(&registry, &prompt, SearchScope::Repository);

    let resolved = resolver.resolve(unqualified(&["firefox"]));
    assert_eq!(
        prompt.shown(),
        vec![(
            "firefox".to_string(),
            vec![
                "nix#firefox".to_string(),
                "nix#firefox-esr".to_string(),
                "flatpak#org.mozilla.firefox".to_string(),
            ]
        )]
    );
    let spec = resolved[0].as_ref().unwrap();
    assert_eq!(spec.provider.as_str(), "flatpak");
    assert_eq!(spec.name, "org.mozilla.firefox");
}

#[test]
fn cancelling_one_prompt_keeps_siblings() {
    let registry = registry(vec![
        FakeProvider::new("nix")
            .hits("a", &["a1", "a2"])
            .hits("b", &["b1", "b2"])
            .hits("c", &["c1", "c2"]),
        FakeProvider::new("flatpak"),
    ]);
    let prompt = ScriptedPrompt::answering(&[
        Selection::Chosen(0),
        Selection::Cancelled,
        Selection::Chosen(1),
    ]);
    let resolver = Resolver::new(&registry, &prompt, SearchScope::Repository);

    let resolved = resolver.resolve(unqualified(&["a", "b", "c"]));
    assert_eq!(resolved[0].as_ref().unwrap().name, "a1");
    assert!(matches!(
        &resolved[1],
        Err(MixturaError::ResolutionCancelled(name)) if name == "b"
    ));
    assert_eq!(resolved[2].as_ref().unwrap().name, "c2");
    assert_eq!(prompt.shown().len(), 3);
}

#[test]
fn out_of_range_selection_counts_as_cancellation() {
    let registry = registry(vec![FakeProvider::new("nix").hits("x", &["x1", "x2"])]);
    let prompt = ScriptedPrompt::answering(&[Selection::Chosen(7)]);
    let resolver = Resolver::new(&registry, &prompt, SearchScope::Repository);

    let resolved = resolver.resolve(unqualified(&["x"]));
    assert!(matches!(resolved[0], Err(MixturaError::ResolutionCancelled(_))));
}

#[test]
fn failing_provider_does_not_hide_other_hits() {
    let registry = registry(vec![
        FakeProvider::new("nix").search_error("spotify"),
        FakeProvider::new("flatpak").hits("spotify", &["com.spotify.Client"]),
    ]);
    let prompt = ScriptedPrompt::default();
    let resolver = Resolver::new(&registry, &prompt, SearchScope::Repository);

    let set = resolver.candidates("spotify");
    assert_eq!(set.results.len(), 1);
    assert_eq!(set.failures.len(), 1);

    let resolved = resolver.resolve(unqualified(&["spotify"]));
    assert_eq!(resolved[0].as_ref().unwrap().provider.as_str(), "flatpak");
}

#[test]
fn search_failure_everywhere_is_not_found() {
    let registry = registry(vec![FakeProvider::new("nix").search_error("git")]);
    let prompt = ScriptedPrompt::default();
    let resolver = Resolver::new(&registry, &prompt, SearchScope::Repository);

    let resolved = resolver.resolve(unqualified(&["git"]));
    assert!(matches!(resolved[0], Err(MixturaError::PackageNotFound(_))));
}

#[test]
fn unavailable_providers_are_not_searched() {
    let brew = FakeProvider::new("brew").hits("git", &["git"]).unavailable();
    let log = brew.log();
    let registry = registry(vec![FakeProvider::new("nix").hits("git", &["git"]), brew]);
    let prompt = ScriptedPrompt::default();
    let resolver = Resolver::new(&registry, &prompt, SearchScope::Repository);

    let set = resolver.candidates("git");
    assert_eq!(set.results.len(), 1);
    assert_eq!(set.skipped.len(), 1);
    assert!(log.calls().is_empty());
}

#[test]
fn limit_truncates_per_provider() {
    let registry = registry(vec![
        FakeProvider::new("nix").hits("py", &["py1", "py2", "py3"]),
        FakeProvider::new("flatpak").hits("py", &["org.py.One", "org.py.Two"]),
    ]);
    let prompt = ScriptedPrompt::default();
    let resolver = Resolver::new(&registry, &prompt, SearchScope::Repository).with_limit(1);

    let names: Vec<_> = resolver
        .candidates("py")
        .results
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["py1", "org.py.One"]);
}

#[test]
fn duplicate_hits_are_merged() {
    let registry = registry(vec![FakeProvider::new("nix").hits("git", &["git", "git"])]);
    let prompt = ScriptedPrompt::default();
    let resolver = Resolver::new(&registry, &prompt, SearchScope::Repository);

    let resolved = resolver.resolve(unqualified(&["git"]));
    assert_eq!(resolved[0].as_ref().unwrap().name, "git");
    assert!(prompt.shown().is_empty());
}

#[test]
fn assume_yes_prefers_default_provider_exact_match() {
    let registry = registry(vec![
        FakeProvider::new("nix").hits("git", &["gitui", "git"]),
        FakeProvider::new("brew").hits("git", &["git"]),
    ]);
    let prompt = ScriptedPrompt::default();
    let resolver = Resolver::new(&registry, &prompt, SearchScope::Repository).assume_yes(true);

    let resolved = resolver.resolve(unqualified(&["git"]));
    let spec = resolved[0].as_ref().unwrap();
    assert_eq!(spec.provider.as_str(), "nix");
    assert_eq!(spec.name, "git");
    assert!(prompt.shown().is_empty());
}

#[test]
fn assume_yes_without_exact_match_is_cancelled() {
    let registry = registry(vec![
        FakeProvider::new("nix").hits("fire", &["firefox"]),
        FakeProvider::new("flatpak").hits("fire", &["org.mozilla.firefox"]),
    ]);
    let prompt = ScriptedPrompt::default();
    let resolver = Resolver::new(&registry, &prompt, SearchScope::Repository).assume_yes(true);

    let resolved = resolver.resolve(unqualified(&["fire"]));
    assert!(matches!(resolved[0], Err(MixturaError::ResolutionCancelled(_))));
    assert!(prompt.shown().is_empty());
}

#[test]
fn pick_without_prompt_accepts_unique_exact_match_elsewhere() {
    let registry = registry(vec![
        FakeProvider::new("nix"),
        FakeProvider::new("flatpak"),
    ]);
    let flatpak = registry.lookup("flatpak").unwrap();
    let nix = registry.lookup("nix").unwrap();
    let candidates = vec![
        SearchResult {
            provider: nix,
            name: "spotify-tui".to_string(),
            display_label: String::new(),
        },
        SearchResult {
            provider: flatpak,
            name: "Spotify".to_string(),
            display_label: String::new(),
        },
    ];
    assert_eq!(pick_without_prompt(&registry, "spotify", &candidates), Some(1));
}

#[test]
fn installed_scope_searches_installed_packages() {
    let nix = FakeProvider::new("nix").hits("git", &["git", "gitui"]).installed("git");
    let log = nix.log();
    let registry = registry(vec![nix, FakeProvider::new("flatpak").installed("org.gnome.Gitg")]);
    let prompt = ScriptedPrompt::default();
    let resolver = Resolver::new(&registry, &prompt, SearchScope::Installed);

    let set = resolver.candidates("GIT");
    let names: Vec<_> = set.results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["git", "org.gnome.Gitg"]);
    assert!(set.results[0].display_label.ends_with("[installed]"));
    assert!(!log.calls().contains(&Call::Search("GIT".to_string())));
}
