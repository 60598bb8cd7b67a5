//! The four similarity signals
//!
//! Embedding signals are cosine similarities in [-1, 1]; label signals are
//! match indicators in {0, 1}. A signal that cannot be computed (missing
//! vector, missing label) is 0, never an error.

use crate::weights::Weights;
use serde::Serialize;
use subx_core::{DocumentEmbedding, Vector, WordEmbedding};

/// Coerce NaN/infinite values (and negative zero) to a plain finite number
#[inline]
pub fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() && value != 0.0 {
        value
    } else {
        0.0
    }
}

/// Unweighted per-signal values for one candidate
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Signals {
    pub w2v: f32,
    pub d2v: f32,
    pub method: f32,
    pub category: f32,
}

impl Signals {
    /// Weighted sum. No normalization by the weight total.
    pub fn weighted(&self, weights: &Weights) -> f32 {
        finite_or_zero(
            weights.w2v * self.w2v
                + weights.d2v * self.d2v
                + weights.method * self.method
                + weights.category * self.category,
        )
    }

    /// Name of the signal with the largest weighted contribution
    pub fn dominant(&self, weights: &Weights) -> Option<&'static str> {
        [
            ("w2v", weights.w2v * self.w2v),
            ("d2v", weights.d2v * self.d2v),
            ("method", weights.method * self.method),
            ("category", weights.category * self.category),
        ]
        .into_iter()
        .filter(|(_, v)| *v > 0.0)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(name, _)| name)
    }

    pub(crate) fn sanitized(self) -> Self {
        Self {
            w2v: finite_or_zero(self.w2v),
            d2v: finite_or_zero(self.d2v),
            method: finite_or_zero(self.method),
            category: finite_or_zero(self.category),
        }
    }
}

/// Word-embedding signal between the target's vector and the candidate's
#[inline]
pub fn word_similarity(
    words: &dyn WordEmbedding,
    target: Option<&Vector>,
    candidate: &str,
) -> f32 {
    match (target, words.vector(candidate)) {
        (Some(t), Some(c)) => finite_or_zero(t.cosine_similarity(c)),
        _ => 0.0,
    }
}

/// Document-embedding signal: how close the context with the substitution
/// applied stays to the unmodified context
#[inline]
pub fn document_similarity(
    docs: &dyn DocumentEmbedding,
    base: Option<&Vector>,
    substituted: &[&str],
) -> f32 {
    let Some(base) = base else {
        return 0.0;
    };
    match docs.infer(substituted) {
        Some(v) => finite_or_zero(v.cosine_similarity(base)),
        None => 0.0,
    }
}

/// 1 when both labels exist and are equal, 0 otherwise
#[inline]
pub fn label_match(context_label: Option<&str>, candidate_label: Option<&str>) -> f32 {
    match (context_label, candidate_label) {
        (Some(a), Some(b)) if a == b => 1.0,
        _ => 0.0,
    }
}
