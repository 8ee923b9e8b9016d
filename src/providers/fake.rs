//! In-memory provider used by unit tests

use crate::core::types::{InstalledPackage, Operation, ProviderName, SearchResult};
use crate::error::{MixturaError, Result};
use crate::providers::traits::Provider;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Search(String),
    Mutate(Operation, Vec<String>),
    UpgradeAll,
    GarbageCollect,
}

/// How a `FakeProvider` answers `garbage_collect`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collector {
    Unsupported,
    Frees,
    Fails,
}

pub struct FakeProvider {
    name: &'static str,
    aliases: &'static [&'static str],
    available: bool,
    hits: HashMap<String, Vec<&'static str>>,
    search_errors: HashSet<String>,
    failing: HashSet<String>,
    installed: Vec<InstalledPackage>,
    delay: Duration,
    collector: Collector,
    calls: CallLog,
}

/// Shared view of the calls a `FakeProvider` received, usable after the
/// provider has been moved into a registry
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn push(&self, call: Call) {
        if let Ok(mut calls) = self.0.lock() {
            calls.push(call);
        }
    }
}

impl FakeProvider {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            aliases: &[],
            available: true,
            hits: HashMap::new(),
            search_errors: HashSet::new(),
            failing: HashSet::new(),
            installed: Vec::new(),
            delay: Duration::ZERO,
            collector: Collector::Unsupported,
            calls: CallLog::default(),
        }
    }

    pub fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// `query` returns these package names
    pub fn hits(mut self, query: &str, names: &[&'static str]) -> Self {
        self.hits.insert(query.to_string(), names.to_vec());
        self
    }

    pub fn search_error(mut self, query: &str) -> Self {
        self.search_errors.insert(query.to_string());
        self
    }

    /// Any mutation touching `name` fails
    pub fn failing(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    pub fn installed(mut self, name: &str) -> Self {
        self.installed.push(InstalledPackage {
            name: name.to_string(),
            id: name.to_string(),
            version: Some("1.0".to_string()),
        });
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn collector(mut self, collector: Collector) -> Self {
        self.collector = collector;
        self
    }

    pub fn log(&self) -> CallLog {
        self.calls.clone()
    }

    fn record(&self, call: Call) {
        self.calls.push(call);
    }
}

impl Provider for FakeProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn aliases(&self) -> &'static [&'static str] {
        self.aliases
    }

    fn binary(&self) -> &'static str {
        self.name
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.record(Call::Search(query.to_string()));
        thread::sleep(self.delay);
        if self.search_errors.contains(query) {
            return Err(MixturaError::backend(self.name, "search exploded"));
        }
        let provider = ProviderName::new(self.name);
        Ok(self
            .hits
            .get(query)
            .map(|names| {
                names
                    .iter()
                    .map(|n| SearchResult {
                        provider,
                        name: n.to_string(),
                        display_label: format!("{} ({})", n, self.name),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    fn mutate(&self, operation: Operation, names: &[String]) -> Result<String> {
        self.record(Call::Mutate(operation, names.to_vec()));
        thread::sleep(self.delay);
        if let Some(bad) = names.iter().find(|n| self.failing.contains(*n)) {
            return Err(MixturaError::backend(
                self.name,
                format!("{} does not match any packages", bad),
            ));
        }
        Ok(format!("{} {} package(s)", operation, names.len()))
    }

    fn upgrade_all(&self) -> Result<String> {
        self.record(Call::UpgradeAll);
        thread::sleep(self.delay);
        Ok("everything upgraded".to_string())
    }

    fn list_installed(&self) -> Result<Vec<InstalledPackage>> {
        Ok(self.installed.clone())
    }

    fn garbage_collect(&self) -> Result<Option<String>> {
        match self.collector {
            Collector::Unsupported => Ok(None),
            Collector::Frees => {
                self.record(Call::GarbageCollect);
                Ok(Some("12 store paths deleted".to_string()))
            }
            Collector::Fails => {
                self.record(Call::GarbageCollect);
                Err(MixturaError::backend(self.name, "store is locked"))
            }
        }
    }
}
