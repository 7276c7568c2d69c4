// src/watch/hash.rs

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Hash an in-memory buffer.
pub fn compute_content_hash(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

/// Last successfully applied content hash per file, kept in memory.
///
/// Editors often emit several events for one save; comparing hashes lets
/// the runtime skip reloads whose bytes did not actually change.
#[derive(Debug, Default)]
pub struct ContentHashCache {
    hashes: HashMap<PathBuf, String>,
}

impl ContentHashCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// True unless `hash` is exactly what was last recorded for `path`.
    pub fn changed(&self, path: &Path, hash: &str) -> bool {
        match self.hashes.get(path) {
            Some(previous) => previous != hash,
            None => true,
        }
    }

    pub fn record(&mut self, path: impl Into<PathBuf>, hash: impl Into<String>) {
        let path = path.into();
        let hash = hash.into();
        debug!(path = ?path, hash = %hash, "stored content hash");
        self.hashes.insert(path, hash);
    }

    pub fn get(&self, path: &Path) -> Option<&str> {
        self.hashes.get(path).map(String::as_str)
    }
}
