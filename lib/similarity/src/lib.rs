//! # subx Similarity
//!
//! The substitution scoring and selection engine.
//!
//! Given a target ingredient, a context (an existing recipe or an explicit
//! ingredient list) and per-request weights, the engine ranks substitutes by
//! combining four signals:
//!
//! - **w2v**: word-embedding cosine similarity between target and candidate
//! - **d2v**: document-embedding cosine similarity between the context with the
//!   substitution applied and the unmodified context
//! - **method**: whether the candidate's most common cooking method matches the recipe's
//! - **category**: whether the candidate's most common category matches the recipe's
//!
//! For several targets at once it shortlists each target independently and
//! searches the combinations of those shortlists.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Context   │────>│  Candidate  │────>│  Weighted   │
//! │  Resolver   │     │  Universe   │     │   Scorer    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                          ┌─────────────────────┴───────┐
//!                          │                             │
//!                   ┌─────────────┐              ┌─────────────┐
//!                   │   Single    │              │ Combination │
//!                   │  Selector   │              │   Search    │
//!                   └─────────────┘              └─────────────┘
//! ```

pub mod weights;
pub mod signal;
pub mod context;
pub mod universe;
pub mod resources;
pub mod scorer;
pub mod combine;
pub mod saving;
pub mod explain;
pub mod config;
pub mod engine;

// Re-export main types for convenience
pub use weights::Weights;
pub use signal::Signals;
pub use context::{ContextDescriptor, ContextSource};
pub use universe::Exclusions;
pub use resources::Resources;
pub use scorer::{RankedCandidate, WeightedScorer};
pub use combine::Combination;
pub use explain::{ExplainedSubstitute, SubstitutionStats};
pub use config::EngineConfig;
pub use engine::SubstitutionEngine;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::Resources;
    use subx_core::{KeyedVectors, MeanPoolingDocModel, Recipe, RecipeCatalog, Vector};

    fn recipe(id: u64, name: &str, ings: &[&str], method: &str, category: &str) -> Recipe {
        Recipe::new(id, name, ings.iter().map(|s| s.to_string()).collect())
            .with_method(method)
            .with_category(category)
    }

    pub fn vectors() -> KeyedVectors {
        [
            ("돼지고기", [1.0, 0.1, 0.0]),
            ("소고기", [0.95, 0.15, 0.0]),
            ("닭고기", [0.8, 0.3, 0.1]),
            ("두부", [0.5, 0.5, 0.2]),
            ("양파", [0.1, 1.0, 0.0]),
            ("대파", [0.15, 0.9, 0.1]),
            ("간장", [0.0, 0.2, 1.0]),
            ("설탕", [-0.2, 0.1, 0.9]),
            ("꿀", [-0.1, 0.1, 0.95]),
            ("소금", [0.0, 0.3, 0.8]),
            // Known to the model but never used in a recipe
            ("트러플", [0.9, 0.2, 0.0]),
        ]
        .into_iter()
        .map(|(token, v)| (token.to_string(), Vector::new(v.to_vec())))
        .collect()
    }

    /// Small corpus: 돼지고기 is rare, 소고기 is common and mostly stir-fried
    pub fn fixture() -> Resources {
        let catalog = RecipeCatalog::from_recipes(vec![
            recipe(1, "제육볶음", &["돼지고기", "양파", "간장"], "볶음", "메인반찬"),
            recipe(2, "소불고기", &["소고기", "양파", "간장", "설탕"], "볶음", "메인반찬"),
            recipe(3, "소고기무국", &["소고기", "대파", "소금"], "끓이기", "국/탕"),
            recipe(4, "소고기볶음", &["소고기", "대파"], "볶음", "메인반찬"),
            recipe(5, "닭볶음탕", &["닭고기", "양파", "대파"], "찜", "메인반찬"),
            recipe(6, "두부조림", &["두부", "간장", "꿀"], "조림", "밑반찬"),
            recipe(7, "꿀떡", &["꿀", "설탕"], "찜", "간식"),
        ])
        .expect("fixture recipes have unique ids");

        Resources::new(
            catalog,
            Box::new(vectors()),
            Box::new(MeanPoolingDocModel::new(vectors())),
            ["소금".to_string()].into_iter().collect(),
        )
    }
}
