//! # subx
//!
//! Ingredient substitution recommendations for recipes.
//!
//! subx ranks substitute ingredients by combining four signals into one
//! weighted score: word-embedding similarity to the replaced ingredient,
//! document-embedding similarity of the modified recipe to the original,
//! and agreement of the candidate's usual cooking method and dish category
//! with the recipe's. Several ingredients can be replaced at once; the
//! engine then searches combinations of per-ingredient shortlists.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! subx --data-dir ./data --http-port 8000
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use subx::prelude::*;
//!
//! let manager = ResourceManager::new("./data");
//! manager.load()?;
//!
//! let engine = manager.engine(EngineConfig::default())?;
//! let ranked = engine.substitute_single(
//!     1,
//!     "돼지고기",
//!     &[],
//!     Weights::new(0.5, 0.5, 0.0, 0.0),
//! )?;
//! for r in ranked {
//!     println!("{} {:.3}", r.ingredient, r.score);
//! }
//! # Ok::<(), subx::Error>(())
//! ```
//!
//! ## Crate Structure
//!
//! - `subx-core` - Vectors, recipes, catalog statistics, embedding models
//! - `subx-similarity` - Weighted scoring, single and multi-target selection
//! - `subx-storage` - Data directory loading, bundle cache, readiness
//! - `subx-api` - REST API

// Re-export core types
pub use subx_core::{
    DocumentEmbedding, Error, IngredientProfile, KeyedVectors, MeanPoolingDocModel, Recipe,
    RecipeCatalog, RecipeId, Result, Vector, WordEmbedding,
};

// Re-export engine
pub use subx_similarity::{
    Combination, ContextDescriptor, ContextSource, EngineConfig, ExplainedSubstitute,
    RankedCandidate, Resources, Signals, SubstitutionEngine, Weights,
};

// Re-export storage
pub use subx_storage::{ReadinessState, ResourceManager};

// Re-export API
pub use subx_api::{ApiSettings, RestApi};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Combination, ContextSource, EngineConfig, Error, RankedCandidate, Recipe,
        RecipeCatalog, ResourceManager, Resources, Result, SubstitutionEngine, Vector, Weights,
    };
}
