//! Serializable result shapes
//!
//! Flattens ranked candidates into the records returned to callers, with the
//! unweighted per-signal breakdown next to the aggregate score.

use crate::scorer::RankedCandidate;
use crate::weights::Weights;
use serde::Serialize;

/// A substitute with its aggregate score and signal breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplainedSubstitute {
    pub ingredient: String,
    pub score: f32,
    pub w2v: f32,
    pub d2v: f32,
    pub method: f32,
    pub category: f32,
}

impl ExplainedSubstitute {
    pub fn from_ranked(ranked: RankedCandidate) -> Self {
        Self {
            ingredient: ranked.ingredient,
            score: ranked.score,
            w2v: ranked.signals.w2v,
            d2v: ranked.signals.d2v,
            method: ranked.signals.method,
            category: ranked.signals.category,
        }
    }

    pub fn from_ranked_list(ranked_list: Vec<RankedCandidate>) -> Vec<Self> {
        ranked_list.into_iter().map(Self::from_ranked).collect()
    }
}

/// Summary of one single-target request, for logging
#[derive(Debug, Clone, Serialize)]
pub struct SubstitutionStats {
    /// Size of the candidate universe after filtering
    pub candidates_count: usize,
    pub results_count: usize,
    pub best_score: f32,
    pub avg_score: f32,
    /// Signal with the largest weighted contribution to the best result
    pub top_signal: Option<&'static str>,
}

impl SubstitutionStats {
    /// Compute stats from sorted results
    pub fn compute(results: &[RankedCandidate], candidates_count: usize, weights: &Weights) -> Self {
        let Some(best) = results.first() else {
            return Self {
                candidates_count,
                results_count: 0,
                best_score: 0.0,
                avg_score: 0.0,
                top_signal: None,
            };
        };

        let avg_score = results.iter().map(|r| r.score).sum::<f32>() / results.len() as f32;
        Self {
            candidates_count,
            results_count: results.len(),
            best_score: best.score,
            avg_score,
            top_signal: best.signals.dominant(weights),
        }
    }
}
