// Compiled resource bundle: a bincode image of the parsed sources
use crate::loader::{DataFiles, SourceData};
use ahash::AHashSet;
use anyhow::{anyhow, Result};
use atomicwrites::{AllowOverwrite, AtomicFile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use subx_core::{KeyedVectors, MeanPoolingDocModel, Recipe, RecipeCatalog, Vector, WordEmbedding};
use subx_similarity::Resources;

pub const BUNDLE_FILE: &str = "resources.bundle";

/// Bundle description for logs and status output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleDescription {
    pub path: PathBuf,
    pub created_at: DateTime<Utc>,
    pub size: u64,
    pub fingerprint: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VectorTable {
    pub dim: usize,
    pub rows: Vec<(String, Vec<f32>)>,
}

impl VectorTable {
    fn from_keyed(kv: &KeyedVectors) -> Self {
        let mut rows: Vec<(String, Vec<f32>)> = kv
            .iter()
            .map(|(token, v)| (token.clone(), v.as_slice().to_vec()))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));
        Self { dim: kv.dim(), rows }
    }

    fn into_keyed(self) -> Result<KeyedVectors> {
        let mut kv = KeyedVectors::new(self.dim);
        for (token, data) in self.rows {
            kv.insert(token, Vector::new(data))?;
        }
        Ok(kv)
    }
}

/// Everything needed to rebuild [`Resources`] without reparsing text files
#[derive(Debug, Serialize, Deserialize)]
pub struct ResourceBundle {
    /// sha256 over the source files this bundle was built from
    pub fingerprint: String,
    pub created_at: DateTime<Utc>,
    pub recipes: Vec<Recipe>,
    pub word_vectors: VectorTable,
    pub doc_vectors: VectorTable,
    pub stopwords: Vec<String>,
}

impl ResourceBundle {
    pub fn from_sources(fingerprint: String, sources: &SourceData) -> Self {
        let mut stopwords: Vec<String> = sources.stopwords.iter().cloned().collect();
        stopwords.sort();
        Self {
            fingerprint,
            created_at: Utc::now(),
            recipes: sources.recipes.clone(),
            word_vectors: VectorTable::from_keyed(&sources.word_vectors),
            doc_vectors: VectorTable::from_keyed(&sources.doc_vectors),
            stopwords,
        }
    }

    pub fn into_sources(self) -> Result<SourceData> {
        Ok(SourceData {
            recipes: self.recipes,
            word_vectors: self.word_vectors.into_keyed()?,
            doc_vectors: self.doc_vectors.into_keyed()?,
            stopwords: self.stopwords.into_iter().collect::<AHashSet<String>>(),
        })
    }
}

/// Index parsed sources into the immutable engine resources
pub fn build_resources(sources: SourceData) -> Result<Resources> {
    let catalog = RecipeCatalog::from_recipes(sources.recipes)?;
    Ok(Resources::new(
        catalog,
        Box::new(sources.word_vectors),
        Box::new(MeanPoolingDocModel::new(sources.doc_vectors)),
        sources.stopwords,
    ))
}

/// Hash of the source files' names and contents. An absent optional file
/// hashes as a marker so adding it later changes the fingerprint.
pub fn fingerprint(files: &DataFiles) -> Result<String> {
    let mut hasher = Sha256::new();
    for path in files.sources() {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        hasher.update(name.as_bytes());
        if path.exists() {
            let data = fs::read(path)?;
            hasher.update((data.len() as u64).to_le_bytes());
            hasher.update(&data);
        } else {
            hasher.update(b"<absent>");
        }
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Reads and writes the bundle file next to the sources
pub struct BundleCache {
    path: PathBuf,
}

impl BundleCache {
    pub fn in_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            path: data_dir.as_ref().join(BUNDLE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the bundle if it exists and was built from the same sources.
    /// A stale or unreadable bundle is reported as absent.
    pub fn load(&self, expected_fingerprint: &str) -> Result<Option<ResourceBundle>> {
        if !self.path.exists() {
            return Ok(None);
        }

        // Decoding from memory bounds every length prefix by the file size
        let data = fs::read(&self.path)?;
        let bundle: ResourceBundle = match bincode::deserialize(&data) {
            Ok(bundle) => bundle,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Ignoring unreadable bundle: {}", e);
                return Ok(None);
            }
        };

        if bundle.fingerprint != expected_fingerprint {
            tracing::info!(path = %self.path.display(), "Bundle is stale, sources changed");
            return Ok(None);
        }
        Ok(Some(bundle))
    }

    /// Write the bundle atomically, replacing any previous one
    pub fn store(&self, bundle: &ResourceBundle) -> Result<BundleDescription> {
        AtomicFile::new(&self.path, AllowOverwrite)
            .write(|f| {
                let mut writer = BufWriter::new(f);
                bincode::serialize_into(&mut writer, bundle)?;
                writer.flush().map_err(bincode::Error::from)
            })
            .map_err(|e| anyhow!("Failed to write bundle {}: {}", self.path.display(), e))?;

        let metadata = fs::metadata(&self.path)?;
        Ok(BundleDescription {
            path: self.path.clone(),
            created_at: bundle.created_at,
            size: metadata.len(),
            fingerprint: bundle.fingerprint.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::read_sources;

    fn write_sources(dir: &Path) -> DataFiles {
        let files = DataFiles::in_dir(dir);
        fs::write(
            &files.recipes,
            r#"[{"id": 1, "name": "제육볶음", "ingredients": ["돼지고기", "양파"], "method": "볶음", "category": "메인반찬"}]"#,
        )
        .unwrap();
        fs::write(&files.word_vectors, "2 2\n돼지고기 1 0\n양파 0 1\n").unwrap();
        fs::write(&files.doc_vectors, "돼지고기 1 0\n양파 0 1\n").unwrap();
        files
    }

    #[test]
    fn test_store_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let files = write_sources(dir.path());
        let fp = fingerprint(&files).unwrap();
        let sources = read_sources(&files).unwrap();

        let cache = BundleCache::in_dir(dir.path());
        let desc = cache.store(&ResourceBundle::from_sources(fp.clone(), &sources)).unwrap();
        assert!(desc.size > 0);

        let loaded = cache.load(&fp).unwrap().unwrap();
        let restored = build_resources(loaded.into_sources().unwrap()).unwrap();
        assert_eq!(restored.catalog.len(), 1);
        assert_eq!(restored.vocabulary(), &["돼지고기".to_string(), "양파".to_string()]);
    }

    #[test]
    fn test_fingerprint_tracks_sources() {
        let dir = tempfile::tempdir().unwrap();
        let files = write_sources(dir.path());
        let before = fingerprint(&files).unwrap();
        assert_eq!(before, fingerprint(&files).unwrap());

        fs::write(&files.stopwords, "양파\n").unwrap();
        let after = fingerprint(&files).unwrap();
        assert_ne!(before, after);

        let cache = BundleCache::in_dir(dir.path());
        let sources = read_sources(&files).unwrap();
        cache.store(&ResourceBundle::from_sources(before.clone(), &sources)).unwrap();
        assert!(cache.load(&after).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_bundle_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let cache = BundleCache::in_dir(dir.path());
        fs::write(cache.path(), b"not a bundle").unwrap();
        assert!(cache.load("anything").unwrap().is_none());
    }

    #[test]
    fn test_truncated_bundle_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let files = write_sources(dir.path());
        let fp = fingerprint(&files).unwrap();
        let sources = read_sources(&files).unwrap();

        let cache = BundleCache::in_dir(dir.path());
        cache.store(&ResourceBundle::from_sources(fp.clone(), &sources)).unwrap();
        let data = fs::read(cache.path()).unwrap();
        for cut in [data.len() - 1, data.len() / 2, 8, 1] {
            fs::write(cache.path(), &data[..cut]).unwrap();
            assert!(cache.load(&fp).unwrap().is_none(), "cut at {}", cut);
        }

        // A huge length prefix fails instead of allocating
        let mut bogus = (u64::MAX / 2).to_le_bytes().to_vec();
        bogus.extend_from_slice(b"tail");
        fs::write(cache.path(), &bogus).unwrap();
        assert!(cache.load(&fp).unwrap().is_none());
    }
}
