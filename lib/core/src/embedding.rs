//! Embedding model interfaces
//!
//! Word-level models map a single ingredient token to a vector.
//! Document-level models map a whole ingredient list to one vector.
//! Both are read-only after load and shared freely across requests.

use crate::{Error, Result, Vector};
use ahash::AHashMap;

/// Word-level embedding lookup
pub trait WordEmbedding: Send + Sync {
    /// Vector for `token`, or `None` when the token is out of vocabulary
    fn vector(&self, token: &str) -> Option<&Vector>;

    fn dim(&self) -> usize;

    /// All tokens known to the model, in no particular order
    fn tokens(&self) -> Vec<&str>;

    fn contains(&self, token: &str) -> bool {
        self.vector(token).is_some()
    }

    /// Cosine similarity between two tokens, `None` if either is unknown
    fn similarity(&self, a: &str, b: &str) -> Option<f32> {
        let va = self.vector(a)?;
        let vb = self.vector(b)?;
        Some(va.cosine_similarity(vb))
    }
}

/// Document-level embedding over an ingredient list
pub trait DocumentEmbedding: Send + Sync {
    /// Infer a vector for the given tokens.
    /// Returns `None` for an empty list or when no token is known.
    fn infer(&self, tokens: &[&str]) -> Option<Vector>;

    fn dim(&self) -> usize;
}

/// Token to vector table with a fixed dimension
#[derive(Debug, Clone, Default)]
pub struct KeyedVectors {
    dim: usize,
    vectors: AHashMap<String, Vector>,
}

impl KeyedVectors {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            vectors: AHashMap::new(),
        }
    }

    /// Insert or replace a token's vector
    pub fn insert(&mut self, token: impl Into<String>, vector: Vector) -> Result<()> {
        if vector.dim() != self.dim {
            return Err(Error::InvalidDimension {
                expected: self.dim,
                actual: vector.dim(),
            });
        }
        self.vectors.insert(token.into(), vector);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vector)> {
        self.vectors.iter()
    }
}

impl FromIterator<(String, Vector)> for KeyedVectors {
    /// Dimension is taken from the first row; rows that disagree are dropped
    fn from_iter<I: IntoIterator<Item = (String, Vector)>>(iter: I) -> Self {
        let mut kv = KeyedVectors::default();
        for (token, vector) in iter {
            if kv.vectors.is_empty() {
                kv.dim = vector.dim();
            }
            if let Err(e) = kv.insert(token, vector) {
                tracing::warn!("Skipping embedding row: {}", e);
            }
        }
        kv
    }
}

impl WordEmbedding for KeyedVectors {
    fn vector(&self, token: &str) -> Option<&Vector> {
        self.vectors.get(token)
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn tokens(&self) -> Vec<&str> {
        self.vectors.keys().map(String::as_str).collect()
    }
}

/// Document model that averages per-token document vectors
#[derive(Debug, Clone, Default)]
pub struct MeanPoolingDocModel {
    vectors: KeyedVectors,
}

impl MeanPoolingDocModel {
    pub fn new(vectors: KeyedVectors) -> Self {
        Self { vectors }
    }

    pub fn vectors(&self) -> &KeyedVectors {
        &self.vectors
    }
}

impl DocumentEmbedding for MeanPoolingDocModel {
    fn infer(&self, tokens: &[&str]) -> Option<Vector> {
        let mut sum = Vector::zeros(self.vectors.dim());
        let mut known = 0usize;
        for token in tokens {
            if let Some(v) = self.vectors.vector(token) {
                sum.add_assign(v);
                known += 1;
            }
        }
        if known == 0 {
            return None;
        }
        sum.scale(1.0 / known as f32);
        Some(sum)
    }

    fn dim(&self) -> usize {
        self.vectors.dim()
    }
}
