//! Candidate universe
//!
//! The tokens eligible as substitutes: the known vocabulary minus the
//! context's own ingredients, the targets, and every excluded token.
//! Exclusion is by exact string match only.

use crate::context::ContextDescriptor;
use ahash::AHashSet;

/// Tokens that must never be suggested: stopwords plus explicit exclusions
#[derive(Debug, Clone, Default)]
pub struct Exclusions {
    tokens: AHashSet<String>,
}

impl Exclusions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for token in tokens {
            self.tokens.insert(token.as_ref().to_string());
        }
    }

    #[must_use]
    pub fn with<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extend(tokens);
        self
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }
}

/// Filter `vocabulary` down to the eligible candidates.
/// Output keeps vocabulary order.
pub fn candidates<'v>(
    vocabulary: &'v [String],
    context: &ContextDescriptor,
    targets: &[&str],
    exclusions: &Exclusions,
) -> Vec<&'v str> {
    vocabulary
        .iter()
        .map(String::as_str)
        .filter(|token| {
            !context.contains(token) && !targets.contains(token) && !exclusions.contains(token)
        })
        .collect()
}
