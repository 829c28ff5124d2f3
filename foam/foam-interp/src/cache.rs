//! Memoization of the last interpolation result.

use foam_types::DataMode;

/// Value key for one interpolation result.
///
/// Keys carry the mesh identity token rather than a mesh reference, so a
/// reloaded case (new token) can never hit a stale entry even when the
/// field key is identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    /// Token of the mesh the result was computed for.
    pub mesh_token: u64,
    /// Field identifier, including the timestep (e.g. `0.5/p`).
    pub field_key: String,
    /// Data mode the result serves.
    pub mode: DataMode,
}

/// Single-entry cache for the last computed interpolation.
///
/// Purely a performance device: dropping or clearing it never affects
/// correctness. Owned by the session driving the pipeline, not shared.
///
/// # Example
///
/// ```
/// use foam_interp::{CacheKey, InterpCache};
/// use foam_types::DataMode;
///
/// let mut cache = InterpCache::new();
/// let key = CacheKey {
///     mesh_token: 1,
///     field_key: "0/p".into(),
///     mode: DataMode::Point,
/// };
/// assert!(cache.get(&key).is_none());
///
/// cache.store(key.clone(), vec![1.0, 2.0]);
/// assert_eq!(cache.get(&key), Some(&[1.0, 2.0][..]));
/// ```
#[derive(Debug, Default)]
pub struct InterpCache {
    entry: Option<(CacheKey, Vec<f64>)>,
}

impl InterpCache {
    /// Create an empty cache.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { entry: None }
    }

    /// Look up the cached values for a key.
    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<&[f64]> {
        self.entry
            .as_ref()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
    }

    /// Store values for a key, replacing any previous entry.
    pub fn store(&mut self, key: CacheKey, values: Vec<f64>) {
        self.entry = Some((key, values));
    }

    /// Drop the cached entry.
    pub fn clear(&mut self) {
        self.entry = None;
    }
}
