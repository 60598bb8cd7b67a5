//! Saving score for substitution combinations.
//!
//! Counts how many targets are replaced by an ingredient that more corpus
//! recipes use than the target itself, i.e. a scarcer ingredient swapped for
//! a more available one. Informational only; never used for ranking.

use crate::resources::Resources;

pub fn saving_score(resources: &Resources, targets: &[&str], substitutes: &[&str]) -> u32 {
    targets
        .iter()
        .zip(substitutes)
        .filter(|(target, substitute)| resources.frequency(substitute) > resources.frequency(target))
        .count() as u32
}
