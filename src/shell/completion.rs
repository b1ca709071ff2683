//! Tab-completion candidates supplied by the dispatcher.

use parking_lot::RwLock;

/// Source of the current completion candidates.
pub trait CompletionProvider: Send + Sync {
    fn candidates(&self) -> Vec<String>;
}

impl<F> CompletionProvider for F
where
    F: Fn() -> Vec<String> + Send + Sync,
{
    fn candidates(&self) -> Vec<String> {
        self()
    }
}

/// Candidate list the dispatcher can replace at runtime.
#[derive(Debug, Default)]
pub struct StaticCompletions {
    candidates: RwLock<Vec<String>>,
}

impl StaticCompletions {
    pub fn new(candidates: Vec<String>) -> Self {
        Self {
            candidates: RwLock::new(candidates),
        }
    }

    pub fn set(&self, candidates: Vec<String>) {
        *self.candidates.write() = candidates;
    }
}

impl CompletionProvider for StaticCompletions {
    fn candidates(&self) -> Vec<String> {
        self.candidates.read().clone()
    }
}

/// Result of completing a prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    /// Sorted, de-duplicated candidates starting with the prefix.
    pub matches: Vec<String>,
    /// Longest prefix shared by every match (the prefix itself when none match).
    pub common_prefix: String,
}

/// Filter `provider`'s candidates by `prefix`.
pub fn complete(provider: &dyn CompletionProvider, prefix: &str) -> Completion {
    let mut matches: Vec<String> = provider
        .candidates()
        .into_iter()
        .filter(|c| c.starts_with(prefix))
        .collect();
    matches.sort();
    matches.dedup();

    let common_prefix = match matches.split_first() {
        Some((first, rest)) => rest.iter().fold(first.clone(), |acc, m| shared_prefix(&acc, m)),
        None => prefix.to_string(),
    };

    Completion {
        matches,
        common_prefix,
    }
}

fn shared_prefix(a: &str, b: &str) -> String {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x)
        .collect()
}
