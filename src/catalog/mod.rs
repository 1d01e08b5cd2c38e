//! Song catalog: the data source for browsing.
//!
//! A catalog is a JSON document listing [`Song`] records. One is bundled with
//! the binary; users can point at their own with `--catalog` or the
//! `library.catalog` config key.
//!
//! ```json
//! { "songs": [ { "id": "...", "title": "...", "display_name": "...",
//!                "image_large_url": "...", "audio_url": "...",
//!                "song_type": "jazz" } ] }
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ResultExt;
use crate::model::{Song, SongType};

/// Catalog shipped with the binary.
const BUNDLED_CATALOG: &str = include_str!("default_catalog.json");

/// Catalog loading errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate song id in catalog: {0}")]
    DuplicateId(String),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    songs: Vec<Song>,
}

/// An ordered, id-unique collection of songs.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    songs: Vec<Song>,
}

impl Catalog {
    /// Build a catalog from songs, rejecting duplicate ids.
    pub fn new(songs: Vec<Song>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(songs.len());
        for song in &songs {
            if !seen.insert(song.id.as_str()) {
                return Err(CatalogError::DuplicateId(song.id.clone()));
            }
        }
        Ok(Self { songs })
    }

    /// Parse a catalog from JSON text.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.songs)
    }

    /// Load a catalog file from disk.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| CatalogError::Read(path.to_path_buf(), e))?;
        let catalog = Self::from_json(&contents)?;
        tracing::info!("Loaded {} songs from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    /// The catalog embedded in the binary.
    pub fn bundled() -> Self {
        match Self::from_json(BUNDLED_CATALOG) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::error!("Bundled catalog is invalid: {}", e);
                Self::default()
            }
        }
    }

    /// The catalog at `path`, or the bundled one when no path is given.
    pub fn resolve(path: Option<&Path>) -> crate::error::Result<Self> {
        match path {
            Some(path) => {
                Self::load(path).with_context(format!("loading catalog {}", path.display()))
            }
            None => Ok(Self::bundled()),
        }
    }

    /// All songs in catalog order.
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Songs of one category, in catalog order.
    pub fn songs_of(&self, song_type: SongType) -> impl Iterator<Item = &Song> {
        self.songs.iter().filter(move |s| s.song_type == song_type)
    }

    /// Number of songs in a category.
    pub fn count_of(&self, song_type: SongType) -> usize {
        self.songs_of(song_type).count()
    }

    /// Look a song up by id.
    pub fn find(&self, id: &str) -> Option<&Song> {
        self.songs.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}
