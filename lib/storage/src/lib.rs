//! # subx Storage
//!
//! Loads the recipe corpus and embedding models from a data directory and
//! publishes them to request handlers once they are complete.
//!
//! ```text
//! data_dir/
//!   recipes.json        recipe records
//!   word_vectors.txt    word model, word2vec text format
//!   doc_vectors.txt     document model token vectors, same format
//!   stopwords.txt       optional global stopwords
//!   resources.bundle    bincode cache written after the first parse
//! ```

pub mod loader;
pub mod bundle;
pub mod manager;

pub use loader::{DataFiles, SourceData};
pub use bundle::{BundleCache, BundleDescription, ResourceBundle};
pub use manager::{load_resources, ReadinessState, ResourceManager};
