//! Fetching encoded audio for the decoder.
//!
//! Remote songs are downloaded whole over HTTP(S); `file://` URLs and plain
//! paths are read from disk on the blocking pool.

use std::path::PathBuf;
use std::sync::Arc;

use super::PlayerError;
use super::state::AudioData;

/// Fetch the resource at `url`.
pub async fn fetch_audio(url: &str) -> Result<AudioData, PlayerError> {
    let extension = extension_hint(url);

    if url.starts_with("http://") || url.starts_with("https://") {
        let (bytes, content_type) = download(url).await?;
        return Ok(AudioData {
            bytes: Arc::from(bytes),
            extension: extension.or_else(|| content_type.as_deref().and_then(mime_extension)),
        });
    }

    let path = PathBuf::from(url.strip_prefix("file://").unwrap_or(url));
    let bytes = tokio::task::spawn_blocking(move || {
        std::fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => PlayerError::FileNotFound(path.display().to_string()),
            _ => PlayerError::Fetch(format!("{}: {}", path.display(), e)),
        })
    })
    .await
    .map_err(|e| PlayerError::Fetch(e.to_string()))??;

    Ok(AudioData {
        bytes: Arc::from(bytes),
        extension,
    })
}

async fn download(url: &str) -> Result<(Vec<u8>, Option<String>), PlayerError> {
    tracing::debug!(target: "player::source", url, "Downloading audio");

    let response = reqwest::get(url)
        .await
        .map_err(|e| PlayerError::Fetch(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(PlayerError::Fetch(format!(
            "HTTP {}: {}",
            status,
            status.canonical_reason().unwrap_or("Unknown")
        )));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let bytes = response
        .bytes()
        .await
        .map_err(|e| PlayerError::Fetch(e.to_string()))?
        .to_vec();

    tracing::debug!(target: "player::source", url, bytes = bytes.len(), "Downloaded audio");
    Ok((bytes, content_type))
}

/// File extension of the last path segment, ignoring query and fragment.
fn extension_hint(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let segment = path.rsplit('/').next()?;
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || ext.len() > 5 {
        return None;
    }
    if !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

fn mime_extension(content_type: &str) -> Option<String> {
    let mime = content_type.split(';').next()?.trim();
    let ext = match mime {
        "audio/mpeg" | "audio/mp3" => "mp3",
        "audio/flac" | "audio/x-flac" => "flac",
        "audio/ogg" | "audio/vorbis" => "ogg",
        "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
        "audio/mp4" | "audio/aac" | "audio/x-m4a" => "m4a",
        _ => return None,
    };
    Some(ext.to_string())
}
