use crate::bundle::{build_resources, fingerprint, BundleCache, ResourceBundle};
use crate::loader::{read_sources, DataFiles};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;
use subx_core::{Error, Result};
use subx_similarity::{EngineConfig, Resources, SubstitutionEngine};

/// Readiness of the shared resources
#[derive(Debug, Clone)]
pub enum ReadinessState {
    Loading,
    Ready(Arc<Resources>),
    Failed(String),
}

impl ReadinessState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadinessState::Loading => "loading",
            ReadinessState::Ready(_) => "ok",
            ReadinessState::Failed(_) => "failed",
        }
    }
}

/// Owns the loaded resources and their readiness state.
///
/// Readers only ever observe `Loading`, `Failed` or a fully built
/// `Ready` instance; a reload builds the replacement before swapping.
pub struct ResourceManager {
    state: Arc<RwLock<ReadinessState>>,
    data_dir: PathBuf,
    use_bundle: bool,
}

impl ResourceManager {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            state: Arc::new(RwLock::new(ReadinessState::Loading)),
            data_dir: data_dir.as_ref().to_path_buf(),
            use_bundle: true,
        }
    }

    /// Manager that is ready immediately with pre-built resources
    pub fn with_resources(resources: Resources) -> Self {
        Self {
            state: Arc::new(RwLock::new(ReadinessState::Ready(Arc::new(resources)))),
            data_dir: PathBuf::new(),
            use_bundle: false,
        }
    }

    /// Enable or disable reading and writing the bundle cache
    pub fn bundle_cache(mut self, enabled: bool) -> Self {
        self.use_bundle = enabled;
        self
    }

    #[inline]
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load synchronously and publish the result
    pub fn load(&self) -> Result<Arc<Resources>> {
        Self::load_into(&self.state, &self.data_dir, self.use_bundle)
    }

    /// Start loading on a named thread; requests see `NotReady` until it finishes
    pub fn load_in_background(&self) -> Result<JoinHandle<()>> {
        let state = self.state.clone();
        let data_dir = self.data_dir.clone();
        let use_bundle = self.use_bundle;

        std::thread::Builder::new()
            .name("subx-loader".to_string())
            .spawn(move || {
                // Outcome is published to the state slot
                let _ = Self::load_into(&state, &data_dir, use_bundle);
            })
            .map_err(Error::Io)
    }

    fn load_into(state: &RwLock<ReadinessState>, data_dir: &Path, use_bundle: bool) -> Result<Arc<Resources>> {
        match load_resources(data_dir, use_bundle) {
            Ok(resources) => {
                let resources = Arc::new(resources);
                *state.write() = ReadinessState::Ready(resources.clone());
                Ok(resources)
            }
            Err(e) => {
                let message = format!("{e:#}");
                tracing::error!(data_dir = %data_dir.display(), "Resource loading failed: {}", message);
                *state.write() = ReadinessState::Failed(message.clone());
                Err(Error::LoadFailed(message))
            }
        }
    }

    /// Rebuild from the data directory. The current resources keep serving
    /// until the new set is complete; on failure they stay in place.
    pub fn reload(&self) -> Result<Arc<Resources>> {
        match load_resources(&self.data_dir, self.use_bundle) {
            Ok(resources) => {
                let resources = Arc::new(resources);
                *self.state.write() = ReadinessState::Ready(resources.clone());
                tracing::info!("Resources reloaded");
                Ok(resources)
            }
            Err(e) => {
                let message = format!("{e:#}");
                tracing::error!("Reload failed, keeping current resources: {}", message);
                let mut state = self.state.write();
                if !matches!(*state, ReadinessState::Ready(_)) {
                    *state = ReadinessState::Failed(message.clone());
                }
                Err(Error::LoadFailed(message))
            }
        }
    }

    /// The loaded resources, or `NotReady` while loading
    pub fn ready(&self) -> Result<Arc<Resources>> {
        match &*self.state.read() {
            ReadinessState::Ready(resources) => Ok(resources.clone()),
            ReadinessState::Loading => Err(Error::NotReady),
            ReadinessState::Failed(message) => Err(Error::LoadFailed(message.clone())),
        }
    }

    /// An engine over the current resources
    pub fn engine(&self, config: EngineConfig) -> Result<SubstitutionEngine> {
        Ok(SubstitutionEngine::new(self.ready()?, config))
    }

    #[inline]
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(*self.state.read(), ReadinessState::Ready(_))
    }

    pub fn state(&self) -> ReadinessState {
        self.state.read().clone()
    }
}

/// Load resources from a data directory, through the bundle cache when enabled
pub fn load_resources(data_dir: &Path, use_bundle: bool) -> anyhow::Result<Resources> {
    let started = Instant::now();
    let files = DataFiles::in_dir(data_dir);

    if !use_bundle {
        let resources = build_resources(read_sources(&files)?)?;
        tracing::info!(elapsed_ms = started.elapsed().as_millis() as u64, "Resources loaded from sources");
        return Ok(resources);
    }

    let fp = fingerprint(&files)?;
    let cache = BundleCache::in_dir(data_dir);

    if let Some(bundle) = cache.load(&fp)? {
        let resources = build_resources(bundle.into_sources()?)?;
        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            bundle = %cache.path().display(),
            "Resources loaded from bundle"
        );
        return Ok(resources);
    }

    let sources = read_sources(&files)?;
    // Bundle write failures only cost the next startup a reparse
    match cache.store(&ResourceBundle::from_sources(fp, &sources)) {
        Ok(desc) => tracing::info!(size = desc.size, path = %desc.path.display(), "Bundle written"),
        Err(e) => tracing::warn!("Could not write bundle: {:#}", e),
    }

    let resources = build_resources(sources)?;
    tracing::info!(elapsed_ms = started.elapsed().as_millis() as u64, "Resources loaded from sources");
    Ok(resources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::BUNDLE_FILE;
    use crate::loader::{DOC_VECTORS_FILE, RECIPES_FILE, WORD_VECTORS_FILE};
    use std::fs;

    fn write_data_dir(dir: &Path) {
        fs::write(
            dir.join(RECIPES_FILE),
            r#"[
                {"id": 1, "name": "제육볶음", "ingredients": ["돼지고기", "양파"], "method": "볶음", "category": "메인반찬"},
                {"id": 2, "name": "소불고기", "ingredients": ["소고기", "양파"], "method": "볶음", "category": "메인반찬"}
            ]"#,
        )
        .unwrap();
        let vectors = "돼지고기 1 0.1\n소고기 0.9 0.2\n양파 0.1 1\n";
        fs::write(dir.join(WORD_VECTORS_FILE), vectors).unwrap();
        fs::write(dir.join(DOC_VECTORS_FILE), vectors).unwrap();
    }

    #[test]
    fn test_not_ready_before_load() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ResourceManager::new(dir.path());
        assert!(!manager.is_ready());
        assert!(matches!(manager.ready(), Err(Error::NotReady)));
        assert!(matches!(manager.engine(EngineConfig::default()), Err(Error::NotReady)));
        assert_eq!(manager.state().as_str(), "loading");
    }

    #[test]
    fn test_load_writes_bundle() {
        let dir = tempfile::tempdir().unwrap();
        write_data_dir(dir.path());
        let manager = ResourceManager::new(dir.path());
        let resources = manager.load().unwrap();
        assert_eq!(resources.catalog.len(), 2);
        assert!(manager.is_ready());
        assert!(dir.path().join(BUNDLE_FILE).exists());

        // Second load goes through the bundle
        let again = load_resources(dir.path(), true).unwrap();
        assert_eq!(again.vocabulary(), resources.vocabulary());
    }

    #[test]
    fn test_background_load() {
        let dir = tempfile::tempdir().unwrap();
        write_data_dir(dir.path());
        let manager = ResourceManager::new(dir.path()).bundle_cache(false);
        manager.load_in_background().unwrap().join().unwrap();
        let engine = manager.engine(EngineConfig::default()).unwrap();
        assert_eq!(engine.resources().catalog.len(), 2);
        assert!(!dir.path().join(BUNDLE_FILE).exists());
    }

    #[test]
    fn test_failed_load() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ResourceManager::new(dir.path());
        assert!(matches!(manager.load(), Err(Error::LoadFailed(_))));
        assert_eq!(manager.state().as_str(), "failed");
        assert!(matches!(manager.ready(), Err(Error::LoadFailed(_))));
    }

    #[test]
    fn test_failed_reload_keeps_current() {
        let dir = tempfile::tempdir().unwrap();
        write_data_dir(dir.path());
        let manager = ResourceManager::new(dir.path());
        let first = manager.load().unwrap();

        fs::write(dir.path().join(RECIPES_FILE), "not json").unwrap();
        assert!(manager.reload().is_err());
        let current = manager.ready().unwrap();
        assert!(Arc::ptr_eq(&first, &current));
    }
}
