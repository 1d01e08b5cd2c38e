//! Artwork disk cache.
//!
//! Caches downloaded artwork to avoid repeated network requests.
//! Files are named by the SHA-256 of the image URL.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// Artwork disk cache.
#[derive(Debug, Clone)]
pub struct DiskCache {
    cache_dir: PathBuf,
}

impl DiskCache {
    /// Create a new cache in the specified directory.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        let cache_dir = cache_dir.into();
        if let Err(e) = fs::create_dir_all(&cache_dir) {
            tracing::warn!(target: "artwork", "Cannot create {}: {}", cache_dir.display(), e);
        }
        Self { cache_dir }
    }

    /// Default location under the user cache directory.
    pub fn default_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from(".cache"))
            .join("pocket-player")
            .join("artwork")
    }

    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Get cached bytes for an image URL.
    pub fn get(&self, url: &str) -> Option<Vec<u8>> {
        fs::read(self.cache_path(url)).ok()
    }

    /// Store image bytes for a URL.
    pub fn put(&self, url: &str, data: &[u8]) -> io::Result<PathBuf> {
        let path = self.cache_path(url);
        // Write to a temp file first so readers never see a partial image
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, data)?;
        fs::rename(&temp_path, &path)?;
        Ok(path)
    }

    #[cfg(test)]
    pub fn contains(&self, url: &str) -> bool {
        self.cache_path(url).exists()
    }

    /// Remove all cached images.
    pub fn clear(&self) -> io::Result<()> {
        if self.cache_dir.exists() {
            for entry in fs::read_dir(&self.cache_dir)? {
                let entry = entry?;
                if entry.file_type()?.is_file() {
                    fs::remove_file(entry.path())?;
                }
            }
        }
        Ok(())
    }

    fn cache_path(&self, url: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.img", cache_key(url)))
    }
}

/// Hex SHA-256 of the URL.
fn cache_key(url: &str) -> String {
    format!("{:x}", Sha256::digest(url.as_bytes()))
}
