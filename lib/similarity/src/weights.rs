//! Per-request signal weights
//!
//! Weights are relative importances of the four similarity signals.
//! They are used as given: no normalization to a unit sum is applied, and an
//! all-zero vector is valid (every candidate then scores exactly 0).

use serde::{Deserialize, Serialize};

/// Weight vector `(w_w2v, w_d2v, w_method, w_cat)`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Weights {
    /// Word-embedding similarity weight
    #[serde(default = "default_embedding_weight")]
    pub w2v: f32,

    /// Document-embedding similarity weight
    #[serde(default = "default_embedding_weight")]
    pub d2v: f32,

    /// Cooking-method compatibility weight
    #[serde(default)]
    pub method: f32,

    /// Category compatibility weight
    #[serde(default)]
    pub category: f32,
}

fn default_embedding_weight() -> f32 {
    0.5
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            w2v: default_embedding_weight(),
            d2v: default_embedding_weight(),
            method: 0.0,
            category: 0.0,
        }
    }
}

impl Weights {
    /// Create a weight vector, replacing negative or non-finite entries with 0
    pub fn new(w2v: f32, d2v: f32, method: f32, category: f32) -> Self {
        Self {
            w2v,
            d2v,
            method,
            category,
        }
        .sanitized()
    }

    /// Embedding-only weights, used for contexts without method/category labels
    pub fn embeddings_only(w2v: f32, d2v: f32) -> Self {
        Self::new(w2v, d2v, 0.0, 0.0)
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Clamp every entry to a finite, non-negative value
    pub fn sanitized(self) -> Self {
        fn clean(name: &str, w: f32) -> f32 {
            if w.is_finite() && w >= 0.0 {
                w
            } else {
                tracing::warn!(weight = name, value = w, "Invalid weight replaced with 0");
                0.0
            }
        }

        Self {
            w2v: clean("w2v", self.w2v),
            d2v: clean("d2v", self.d2v),
            method: clean("method", self.method),
            category: clean("category", self.category),
        }
    }
}
