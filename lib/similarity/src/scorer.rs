//! Weighted similarity scorer
//!
//! Combines the word, document, method and category signals for each
//! candidate into one score. Per-target state (the target's word vector and
//! the unmodified context's document vector) is computed once and reused
//! for every candidate.

use crate::context::ContextDescriptor;
use crate::resources::Resources;
use crate::signal::{document_similarity, label_match, word_similarity, Signals};
use crate::weights::Weights;
use rayon::prelude::*;
use std::cmp::Ordering;
use subx_core::Vector;

/// A scored candidate with its signal breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub ingredient: String,
    /// Weighted aggregate score, always finite
    pub score: f32,
    /// Unweighted signal values
    pub signals: Signals,
}

/// Descending score, then ascending token
pub fn rank_order(a: &RankedCandidate, b: &RankedCandidate) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.ingredient.cmp(&b.ingredient))
}

/// Scorer bound to one context and one weight vector
pub struct WeightedScorer<'a> {
    resources: &'a Resources,
    context: &'a ContextDescriptor,
    weights: Weights,
    base_doc: Option<Vector>,
}

impl<'a> WeightedScorer<'a> {
    pub fn new(resources: &'a Resources, context: &'a ContextDescriptor, weights: Weights) -> Self {
        let base_doc = if context.is_empty() {
            None
        } else {
            resources.docs.infer(&context.tokens())
        };
        Self {
            resources,
            context,
            weights: weights.sanitized(),
            base_doc,
        }
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Score one candidate as a replacement for `target`
    pub fn score(&self, target: &str, candidate: &str) -> RankedCandidate {
        let target_vec = self.resources.words.vector(target);
        self.score_with(target, target_vec, candidate)
    }

    fn score_with(&self, target: &str, target_vec: Option<&Vector>, candidate: &str) -> RankedCandidate {
        let words = self.resources.words.as_ref();
        let docs = self.resources.docs.as_ref();

        let w2v = word_similarity(words, target_vec, candidate);

        let substituted = self.context.substituted(target, candidate);
        let d2v = document_similarity(docs, self.base_doc.as_ref(), &substituted);

        let profile = self.resources.catalog.profile(candidate);
        let method = label_match(
            self.context.method.as_deref(),
            profile.and_then(|p| p.top_method.as_deref()),
        );
        let category = label_match(
            self.context.category.as_deref(),
            profile.and_then(|p| p.top_category.as_deref()),
        );

        let signals = Signals { w2v, d2v, method, category }.sanitized();
        RankedCandidate {
            ingredient: candidate.to_string(),
            score: signals.weighted(&self.weights),
            signals,
        }
    }

    /// Score every candidate and sort them by [`rank_order`]
    pub fn rank(&self, target: &str, candidates: &[&str]) -> Vec<RankedCandidate> {
        let target_vec = self.resources.words.vector(target);
        if target_vec.is_none() {
            tracing::debug!(ingredient = target, "Target has no word vector, w2v signal is 0");
        }

        let mut ranked: Vec<RankedCandidate> = candidates
            .par_iter()
            .map(|candidate| self.score_with(target, target_vec, candidate))
            .collect();
        ranked.sort_by(rank_order);
        ranked
    }
}
