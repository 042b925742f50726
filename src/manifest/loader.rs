//! Stack manifest loader with support for a base directory, an environment
//! variable search root and an LRU cache of parsed manifests.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use super::{ComponentRegistry, ManifestError, StackManifest};
use crate::stack::ProviderStack;

/// Environment variable naming the fallback manifest directory.
pub const STACK_DIR_ENV: &str = "PROVIDER_STACK_DIR";

const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Extensions tried for a stack id, in order of preference.
const EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Loads [`StackManifest`]s by id (`<dir>/<id>.json|yaml|yml`) or by path.
pub struct StackLoader {
    base_path: Option<PathBuf>,
    use_env: bool,
    cache: Mutex<LruCache<String, Arc<StackManifest>>>,
}

impl StackLoader {
    pub fn new() -> Self {
        Self {
            base_path: None,
            use_env: true,
            cache: Mutex::new(LruCache::new(cache_capacity(DEFAULT_CACHE_CAPACITY))),
        }
    }

    /// Set base path for manifest files
    pub fn with_base_path(mut self, path: impl AsRef<Path>) -> Self {
        self.base_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Whether [`STACK_DIR_ENV`] is consulted after the base path (default: yes).
    pub fn with_env_lookup(mut self, enable: bool) -> Self {
        self.use_env = enable;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache = Mutex::new(LruCache::new(cache_capacity(capacity)));
        self
    }

    /// Directories searched for stack ids, in order.
    pub fn search_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        if let Some(ref base) = self.base_path {
            dirs.push(base.clone());
        }
        if self.use_env {
            if let Ok(dir) = std::env::var(STACK_DIR_ENV) {
                let dir = dir.trim();
                if !dir.is_empty() {
                    dirs.push(PathBuf::from(dir));
                }
            }
        }
        dirs
    }

    /// Load a stack manifest by id, consulting the cache first.
    pub fn load(&self, id: &str) -> Result<Arc<StackManifest>, ManifestError> {
        {
            let mut cache = self.lock_cache()?;
            if let Some(manifest) = cache.get(id) {
                debug!(id, "stack manifest cache hit");
                return Ok(Arc::clone(manifest));
            }
        }

        let dirs = self.search_dirs();
        let path = dirs
            .iter()
            .filter(|dir| {
                let exists = dir.is_dir();
                if !exists {
                    warn!(dir = %dir.display(), "skipping missing stack manifest directory");
                }
                exists
            })
            .flat_map(|dir| EXTENSIONS.iter().map(move |ext| dir.join(format!("{}.{}", id, ext))))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| {
                let searched: Vec<String> = dirs.iter().map(|d| d.display().to_string()).collect();
                let hint = if searched.is_empty() {
                    format!("Set a base path or the {} environment variable", STACK_DIR_ENV)
                } else {
                    format!("Searched: {}", searched.join(", "))
                };
                ManifestError::NotFound {
                    id: id.to_string(),
                    hint: None,
                }
                .with_hint(hint)
            })?;

        let manifest = Arc::new(self.load_path(&path)?);
        self.lock_cache()?.put(id.to_string(), Arc::clone(&manifest));
        Ok(manifest)
    }

    /// Load a stack by id and resolve its components against `registry`.
    pub fn load_stack<C: Clone>(
        &self,
        id: &str,
        registry: &ComponentRegistry<C>,
    ) -> crate::Result<ProviderStack<C>> {
        let manifest = self.load(id)?;
        manifest.resolve(registry)
    }

    /// Load and parse a manifest file. JSON is chosen by the `.json`
    /// extension, anything else is parsed as YAML. Not cached.
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<StackManifest, ManifestError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading stack manifest");
        let content = std::fs::read_to_string(path).map_err(|e| ManifestError::LoadError {
            path: path.display().to_string(),
            reason: e.to_string(),
            hint: None,
        })?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let parsed = if is_json {
            StackManifest::from_json_str(&content)
        } else {
            StackManifest::from_yaml_str(&content)
        };
        parsed.map_err(|e| match e {
            ManifestError::YamlError(_) | ManifestError::JsonError(_) => ManifestError::LoadError {
                path: path.display().to_string(),
                reason: e.to_string(),
                hint: None,
            },
            other => other,
        })
    }

    pub fn cached_len(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn clear_cache(&self) -> Result<(), ManifestError> {
        self.lock_cache()?.clear();
        Ok(())
    }

    fn lock_cache(&self) -> Result<std::sync::MutexGuard<'_, LruCache<String, Arc<StackManifest>>>, ManifestError> {
        self.cache
            .lock()
            .map_err(|e| ManifestError::Internal(format!("stack manifest cache lock poisoned: {}", e)))
    }
}

impl Default for StackLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn cache_capacity(capacity: usize) -> NonZeroUsize {
    NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)
}
