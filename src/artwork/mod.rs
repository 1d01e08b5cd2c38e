//! Song artwork: fetch, validate and cache images by URL.
//!
//! ```text
//! request(url) ──► first time? ──► load_artwork (async)
//!                                     │  disk cache hit ──► bytes
//!                                     │  miss ──► ImageFetcher ──► disk cache
//!                                     ▼
//!                             resolve(url, result) ──► Ready { handle, tint } | Failed
//! ```
//!
//! Views render a placeholder for anything that is not `Ready`. The tint is
//! the average colour of the image and backs the now-playing panel.

mod cache;
mod fetch;

use std::collections::HashMap;
use std::sync::Arc;

use iced::widget::image;

pub use cache::DiskCache;
pub use fetch::{HttpImageFetcher, ImageFetcher};

/// Artwork errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ArtworkError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Not an image")]
    NotAnImage,

    #[error("Artwork cache error: {0}")]
    Cache(String),

    #[error("Artwork task failed: {0}")]
    Task(String),
}

/// Validated artwork bytes and their average colour.
#[derive(Debug, Clone)]
pub struct ArtworkData {
    pub bytes: Vec<u8>,
    /// `None` when the bytes could not be decoded
    pub tint: Option<[u8; 3]>,
}

/// Load state of one artwork URL.
#[derive(Debug, Clone)]
pub enum Artwork {
    Pending,
    Ready {
        handle: image::Handle,
        tint: Option<[u8; 3]>,
    },
    Failed,
}

/// In-memory artwork map keyed by URL.
#[derive(Debug, Default)]
pub struct ArtworkCache {
    entries: HashMap<String, Artwork>,
}

impl ArtworkCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `url` as wanted. Returns true only the first time, when the
    /// caller should start a fetch.
    pub fn request(&mut self, url: &str) -> bool {
        if url.is_empty() || self.entries.contains_key(url) {
            return false;
        }
        self.entries.insert(url.to_string(), Artwork::Pending);
        true
    }

    /// Record the outcome of a fetch.
    pub fn resolve(&mut self, url: &str, result: Result<ArtworkData, ArtworkError>) {
        let artwork = match result {
            Ok(data) => Artwork::Ready {
                handle: image::Handle::from_bytes(data.bytes),
                tint: data.tint,
            },
            Err(e) => {
                tracing::debug!(target: "artwork", url, "Artwork unavailable: {}", e);
                Artwork::Failed
            }
        };
        self.entries.insert(url.to_string(), artwork);
    }

    pub fn get(&self, url: &str) -> Option<&Artwork> {
        self.entries.get(url)
    }

    /// Image handle when the artwork is ready.
    pub fn handle(&self, url: &str) -> Option<image::Handle> {
        match self.entries.get(url) {
            Some(Artwork::Ready { handle, .. }) => Some(handle.clone()),
            _ => None,
        }
    }

    /// Average colour of the artwork, once loaded and decodable.
    pub fn tint(&self, url: &str) -> Option<[u8; 3]> {
        match self.entries.get(url) {
            Some(Artwork::Ready { tint, .. }) => *tint,
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fetch artwork, consulting the disk cache first, and compute its tint.
///
/// Successful downloads are written back to the disk cache. Bytes that are
/// not a recognisable image fail with [`ArtworkError::NotAnImage`].
pub async fn load_artwork(
    fetcher: Arc<dyn ImageFetcher>,
    disk: Option<DiskCache>,
    url: String,
) -> Result<ArtworkData, ArtworkError> {
    let bytes = load_bytes(fetcher, disk, url).await?;
    tokio::task::spawn_blocking(move || {
        let tint = average_color(&bytes);
        ArtworkData { bytes, tint }
    })
    .await
    .map_err(|e| ArtworkError::Task(e.to_string()))
}

/// Mean RGB of the image, sampled from a small thumbnail.
pub fn average_color(bytes: &[u8]) -> Option<[u8; 3]> {
    let thumb = ::image::load_from_memory(bytes)
        .ok()?
        .thumbnail(16, 16)
        .into_rgb8();
    let count = u64::from(thumb.width()) * u64::from(thumb.height());
    if count == 0 {
        return None;
    }

    let mut sum = [0u64; 3];
    for pixel in thumb.pixels() {
        for (total, channel) in sum.iter_mut().zip(pixel.0) {
            *total += u64::from(channel);
        }
    }
    Some(sum.map(|total| (total / count) as u8))
}

async fn load_bytes(
    fetcher: Arc<dyn ImageFetcher>,
    disk: Option<DiskCache>,
    url: String,
) -> Result<Vec<u8>, ArtworkError> {
    if let Some(ref disk) = disk {
        let cached = {
            let disk = disk.clone();
            let url = url.clone();
            tokio::task::spawn_blocking(move || disk.get(&url))
                .await
                .map_err(|e| ArtworkError::Cache(e.to_string()))?
        };
        if let Some(bytes) = cached {
            if ::image::guess_format(&bytes).is_ok() {
                return Ok(bytes);
            }
            tracing::warn!(target: "artwork", url, "Ignoring corrupt cached artwork");
        }
    }

    let bytes = fetcher.fetch(&url).await?;
    ::image::guess_format(&bytes).map_err(|_| ArtworkError::NotAnImage)?;

    if let Some(disk) = disk {
        let data = bytes.clone();
        let result = tokio::task::spawn_blocking(move || disk.put(&url, &data))
            .await
            .map_err(|e| ArtworkError::Cache(e.to_string()))?;
        if let Err(e) = result {
            tracing::warn!(target: "artwork", "Failed to cache artwork: {}", e);
        }
    }

    Ok(bytes)
}
