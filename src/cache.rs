//! Bounded least-recently-used cache of compiled formats.
//!
//! Compilation is pure, so a format seen before is served from the cache.
//! The process-wide instance sits behind one mutex; lookup, compilation and
//! insertion happen while it is held.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::code::CompiledFormat;
use crate::error::Result;

/// Maximum number of distinct `(format, collapse_whitespace)` keys kept.
pub const CACHE_CAPACITY: usize = 1000;

static GLOBAL: LazyLock<Mutex<FormatCache>> =
    LazyLock::new(|| Mutex::new(FormatCache::new(CACHE_CAPACITY)));

/// Compile through the process-wide cache.
pub(crate) fn get_or_compile(
    format: &str,
    collapse_whitespace: bool,
) -> Result<Arc<CompiledFormat>> {
    GLOBAL
        .lock()
        .get_or_try_insert_with(format, collapse_whitespace, || {
            CompiledFormat::new(format, collapse_whitespace)
        })
}

struct Entry {
    compiled: Arc<CompiledFormat>,
    last_used: u64,
}

pub struct FormatCache {
    capacity: usize,
    entries: HashMap<(String, bool), Entry>,
    clock: u64,
}

impl FormatCache {
    /// A cache holding at most `capacity` formats (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            clock: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, format: &str, collapse_whitespace: bool) -> bool {
        self.entries.contains_key(&(format.to_string(), collapse_whitespace))
    }

    /// Return the cached entry for the key, or build, store and return it.
    ///
    /// Failed compilations are not cached.
    pub fn get_or_try_insert_with<F>(
        &mut self,
        format: &str,
        collapse_whitespace: bool,
        compile: F,
    ) -> Result<Arc<CompiledFormat>>
    where
        F: FnOnce() -> Result<CompiledFormat>,
    {
        self.clock += 1;
        let key = (format.to_string(), collapse_whitespace);

        if let Some(entry) = self.entries.get_mut(&key) {
            trace!(format, collapse_whitespace, "format cache hit");
            entry.last_used = self.clock;
            return Ok(Arc::clone(&entry.compiled));
        }

        let compiled = Arc::new(compile()?);
        if self.entries.len() >= self.capacity {
            self.evict_least_recent();
        }
        self.entries.insert(key, Entry {
            compiled: Arc::clone(&compiled),
            last_used: self.clock,
        });
        Ok(compiled)
    }

    fn evict_least_recent(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            debug!(format = key.0.as_str(), collapse_whitespace = key.1, "evicting cached format");
            self.entries.remove(&key);
        }
    }
}
