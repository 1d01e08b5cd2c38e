//! Core data models for the player.
//!
//! Defines the primary entities: [`Song`] and the [`SongType`] used to group
//! songs for browsing. Both are plain values read by the UI; they are
//! produced by the [`catalog`](crate::catalog) module.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A playable song.
///
/// Identity is the `id`: two songs with the same id compare equal even if
/// their display fields differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    /// Stable identifier (unique within a catalog)
    pub id: String,
    /// Song title
    pub title: String,
    /// Artist or subtitle line
    pub display_name: String,
    /// Artwork URL (large variant, also used for thumbnails)
    pub image_large_url: String,
    /// Audio resource URL (http(s), file:// or a plain path)
    pub audio_url: String,
    /// Category used for browsing
    pub song_type: SongType,
}

impl PartialEq for Song {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Song {}

impl Hash for Song {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Fixed set of song categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SongType {
    Pop,
    Rock,
    HipHop,
    Jazz,
    Electronic,
    Ambient,
}

impl SongType {
    /// Every category, in browsing order.
    pub const ALL: [SongType; 6] = [
        SongType::Pop,
        SongType::Rock,
        SongType::HipHop,
        SongType::Jazz,
        SongType::Electronic,
        SongType::Ambient,
    ];

    /// Title shown on tiles and headers.
    pub fn title(self) -> &'static str {
        match self {
            SongType::Pop => "Pop",
            SongType::Rock => "Rock",
            SongType::HipHop => "Hip-Hop",
            SongType::Jazz => "Jazz",
            SongType::Electronic => "Electronic",
            SongType::Ambient => "Ambient",
        }
    }

    /// Snake-case key, matches the catalog JSON.
    pub fn key(self) -> &'static str {
        match self {
            SongType::Pop => "pop",
            SongType::Rock => "rock",
            SongType::HipHop => "hip_hop",
            SongType::Jazz => "jazz",
            SongType::Electronic => "electronic",
            SongType::Ambient => "ambient",
        }
    }

    /// Tile tint as RGB.
    pub fn tint(self) -> [f32; 3] {
        match self {
            SongType::Pop => [0.85, 0.30, 0.55],
            SongType::Rock => [0.75, 0.22, 0.20],
            SongType::HipHop => [0.90, 0.60, 0.15],
            SongType::Jazz => [0.20, 0.45, 0.75],
            SongType::Electronic => [0.45, 0.25, 0.85],
            SongType::Ambient => [0.20, 0.60, 0.55],
        }
    }
}

impl fmt::Display for SongType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Error returned when a string names no [`SongType`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown song type: {0}")]
pub struct UnknownSongType(pub String);

impl FromStr for SongType {
    type Err = UnknownSongType;

    /// Accepts the title or the key, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        SongType::ALL
            .into_iter()
            .find(|t| t.title().eq_ignore_ascii_case(needle) || t.key().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownSongType(s.to_string()))
    }
}
