//! HTTP image fetching.

use async_trait::async_trait;

use super::ArtworkError;

/// Source of raw image bytes.
///
/// Implement this trait to create mock implementations for testing.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ArtworkError>;
}

/// reqwest-backed fetcher.
pub struct HttpImageFetcher {
    http_client: reqwest::Client,
}

impl HttpImageFetcher {
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpImageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ArtworkError> {
        let response = self
            .http_client
            .get(url)
            .header("Accept", "image/*")
            .send()
            .await
            .map_err(|e| ArtworkError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArtworkError::Status(status.as_u16()));
        }

        let data = response
            .bytes()
            .await
            .map_err(|e| ArtworkError::Network(e.to_string()))?
            .to_vec();

        tracing::debug!(target: "artwork", url, bytes = data.len(), "Fetched artwork");
        Ok(data)
    }
}
