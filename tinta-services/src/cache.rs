//! LRU cache for extracted palettes.
//!
//! Theming an image that was already extracted, for example when it is shown
//! twice or scrolls back into view, reuses the cached palette instead of
//! decoding and quantizing the file again. A refresh drops the entry first.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use lru::LruCache;
use tinta_theme::palette::Palette;

/// Default number of palettes kept.
pub const DEFAULT_CACHE_CAPACITY: usize = 128;

/// Bounded, thread-safe palette cache keyed by image path.
pub struct PaletteCache {
    cache: Mutex<LruCache<PathBuf, Palette>>,
}

impl PaletteCache {
    /// Create a cache holding at most `capacity` palettes.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Get the cached palette for `path`, marking it recently used.
    pub fn get(&self, path: &Path) -> Option<Palette> {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.get(path).copied()
    }

    /// Store the palette for `path`.
    pub fn put(&self, path: PathBuf, palette: Palette) {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.put(path, palette);
    }

    /// Drop the cached palette for `path`, if any.
    pub fn invalidate(&self, path: &Path) -> Option<Palette> {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.pop(path)
    }

    /// Clear the cache.
    pub fn clear(&self) {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.clear();
    }

    /// Get the number of cached palettes.
    pub fn len(&self) -> usize {
        let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PaletteCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
