//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`, while
//! CLI/main uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level application error enum
//! - Module-specific errors ([`PlayerError`], [`ArtworkError`],
//!   [`CatalogError`], [`ConfigError`]) for detailed handling
//!
//! # Example
//!
//! ```ignore
//! use pocket_player::error::{Result, ResultExt};
//!
//! fn open(path: &Path) -> Result<Catalog> {
//!     Catalog::load(path).with_context("loading song catalog")
//! }
//! ```

use crate::artwork::ArtworkError;
use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::player::PlayerError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Song catalog error
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Audio playback error
    #[error("Playback error: {0}")]
    Playback(#[from] PlayerError),

    /// Artwork fetch/cache error
    #[error("Artwork error: {0}")]
    Artwork(#[from] ArtworkError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_display() {
        let err: Error = PlayerError::FileNotFound("/path/to/file.mp3".to_string()).into();
        assert!(err.to_string().contains("/path/to/file.mp3"));
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::from(PlayerError::ChannelClosed).context("while playing track");
        let msg = err.to_string();
        assert!(msg.contains("while playing track"));
        assert!(msg.contains("Audio channel closed"));
    }

    #[test]
    fn test_catalog_error_converts() {
        let err: Error = CatalogError::DuplicateId("song-1".to_string()).into();
        assert!(matches!(err, Error::Catalog(_)));
        assert!(err.to_string().contains("song-1"));
    }

    #[test]
    fn test_result_ext() {
        let result: std::result::Result<(), ConfigError> = Err(ConfigError::Write(
            PathBuf::from("/etc/x"),
            std::io::Error::other("denied"),
        ));
        let with_ctx = result.with_context("additional context");
        assert!(with_ctx.unwrap_err().to_string().contains("additional context"));
    }
}
