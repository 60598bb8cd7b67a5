//! # subx Core
//!
//! Core data structures for the subx ingredient substitution engine.
//!
//! - [`Vector`] - Dense embedding vector with cosine similarity
//! - [`Recipe`] - A recipe record from the corpus
//! - [`RecipeCatalog`] - Indexed recipe collection with per-ingredient corpus statistics
//! - [`WordEmbedding`] / [`DocumentEmbedding`] - Embedding model interfaces
//! - [`KeyedVectors`] / [`MeanPoolingDocModel`] - In-memory model implementations
//!
//! ## Example
//!
//! ```rust
//! use subx_core::{KeyedVectors, Recipe, RecipeCatalog, Vector, WordEmbedding};
//!
//! let catalog = RecipeCatalog::from_recipes(vec![
//!     Recipe::new(1, "제육볶음", vec!["돼지고기".to_string(), "양파".to_string()])
//!         .with_method("볶음"),
//! ]).unwrap();
//! assert_eq!(catalog.profile("양파").unwrap().frequency, 1);
//!
//! let words: KeyedVectors = vec![
//!     ("돼지고기".to_string(), Vector::new(vec![1.0, 0.0])),
//!     ("소고기".to_string(), Vector::new(vec![0.9, 0.1])),
//! ].into_iter().collect();
//! assert!(words.similarity("돼지고기", "소고기").unwrap() > 0.9);
//! ```

pub mod vector;
pub mod error;
pub mod recipe;
pub mod catalog;
pub mod text_index;
pub mod embedding;

pub use vector::Vector;
pub use error::{Error, Result};
pub use recipe::{Recipe, RecipeId};
pub use catalog::{IngredientProfile, RecipeCatalog};
pub use text_index::NameIndex;
pub use embedding::{DocumentEmbedding, KeyedVectors, MeanPoolingDocModel, WordEmbedding};
