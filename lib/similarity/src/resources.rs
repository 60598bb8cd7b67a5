//! Loaded models and corpus shared by every request

use ahash::AHashSet;
use subx_core::{DocumentEmbedding, RecipeCatalog, WordEmbedding};

/// Everything the engine reads. Immutable once built.
pub struct Resources {
    pub catalog: RecipeCatalog,
    pub words: Box<dyn WordEmbedding>,
    pub docs: Box<dyn DocumentEmbedding>,
    /// Global stopwords, merged into every request's exclusions
    pub stopwords: AHashSet<String>,
    vocabulary: Vec<String>,
}

impl Resources {
    /// Build the resource set. The candidate vocabulary is every word-model
    /// token that also occurs in at least one recipe, sorted.
    pub fn new(
        catalog: RecipeCatalog,
        words: Box<dyn WordEmbedding>,
        docs: Box<dyn DocumentEmbedding>,
        stopwords: AHashSet<String>,
    ) -> Self {
        let mut vocabulary: Vec<String> = words
            .tokens()
            .into_iter()
            .filter(|token| catalog.knows(token))
            .map(str::to_string)
            .collect();
        vocabulary.sort();

        tracing::info!(
            recipes = catalog.len(),
            vocabulary = vocabulary.len(),
            stopwords = stopwords.len(),
            "Resources assembled"
        );

        Self {
            catalog,
            words,
            docs,
            stopwords,
            vocabulary,
        }
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Corpus frequency of a token, 0 when unseen
    pub fn frequency(&self, token: &str) -> usize {
        self.catalog.profile(token).map(|p| p.frequency).unwrap_or(0)
    }
}

impl std::fmt::Debug for Resources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resources")
            .field("recipes", &self.catalog.len())
            .field("vocabulary", &self.vocabulary.len())
            .field("word_dim", &self.words.dim())
            .field("doc_dim", &self.docs.dim())
            .field("stopwords", &self.stopwords.len())
            .finish()
    }
}
