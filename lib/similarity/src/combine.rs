//! Multi-target combination search
//!
//! Each target gets an independent top-K shortlist; combinations are the
//! cartesian product of those shortlists with repeated substitutes removed.
//! A combination's score is the mean of its members' scores so results stay
//! comparable across different numbers of targets.

use crate::scorer::RankedCandidate;
use serde::Serialize;
use std::cmp::Ordering;

/// One substitute per target, in target order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Combination {
    pub substitutes: Vec<String>,
    /// Mean of the per-target aggregate scores
    pub score: f32,
    pub saving_score: u32,
}

/// Descending score, then ascending substitute list
pub fn combination_order(a: &Combination, b: &Combination) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.substitutes.cmp(&b.substitutes))
}

/// Enumerate every assignment that picks one candidate per shortlist with
/// no candidate used twice. Returns candidate indices per shortlist.
pub fn distinct_assignments(shortlists: &[Vec<RankedCandidate>]) -> Vec<Vec<usize>> {
    fn walk(
        shortlists: &[Vec<RankedCandidate>],
        depth: usize,
        current: &mut Vec<usize>,
        out: &mut Vec<Vec<usize>>,
    ) {
        if depth == shortlists.len() {
            out.push(current.clone());
            return;
        }
        for (i, candidate) in shortlists[depth].iter().enumerate() {
            let taken = current
                .iter()
                .enumerate()
                .any(|(d, &j)| shortlists[d][j].ingredient == candidate.ingredient);
            if taken {
                continue;
            }
            current.push(i);
            walk(shortlists, depth + 1, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    if shortlists.is_empty() || shortlists.iter().any(Vec::is_empty) {
        return out;
    }
    walk(shortlists, 0, &mut Vec::with_capacity(shortlists.len()), &mut out);
    out
}

/// Build, score and rank combinations from per-target shortlists.
/// `saving` computes the saving score for a substitute list.
pub fn combine<F>(shortlists: &[Vec<RankedCandidate>], top_n: usize, saving: F) -> Vec<Combination>
where
    F: Fn(&[&str]) -> u32,
{
    let mut combinations: Vec<Combination> = distinct_assignments(shortlists)
        .into_iter()
        .map(|picks| {
            let chosen: Vec<&RankedCandidate> = picks
                .iter()
                .enumerate()
                .map(|(d, &i)| &shortlists[d][i])
                .collect();
            let names: Vec<&str> = chosen.iter().map(|c| c.ingredient.as_str()).collect();
            let mean = chosen.iter().map(|c| c.score).sum::<f32>() / chosen.len() as f32;
            Combination {
                saving_score: saving(&names),
                substitutes: names.into_iter().map(str::to_string).collect(),
                score: crate::signal::finite_or_zero(mean),
            }
        })
        .collect();

    combinations.sort_by(combination_order);
    combinations.truncate(top_n);
    combinations
}
