//! Catalog HTTP client
//!
//! REST wrapper over the content service's album and artist endpoints.
//! List and fetch calls hand back loosely-typed JSON, matching what the
//! service serves; the two binary download flows persist the payload into
//! a download directory and return the final path, preferring the server's
//! `Content-Disposition` filename over the metadata-derived fallback.

pub mod download;

pub use download::AudioFormat;

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::header::CONTENT_DISPOSITION;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ClientError, Result};

use download::{content_disposition_filename, sanitize_filename};

/// Request timeout for multipart album uploads, which carry audio files.
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the content-service catalog API.
pub struct CatalogClient {
    http_client: reqwest::Client,
    album_base: String,
    artist_base: String,
    download_dir: PathBuf,
}

impl CatalogClient {
    /// Create a client against a service base URL.
    ///
    /// # Arguments
    /// * `base_url` - Service root, e.g. `http://localhost:5001`
    /// * `download_dir` - Directory receiving downloaded tracks/archives
    pub fn new(base_url: &str, download_dir: impl Into<PathBuf>) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            http_client: reqwest::Client::new(),
            album_base: format!("{base}/api/albums"),
            artist_base: format!("{base}/api/artists"),
            download_dir: download_dir.into(),
        }
    }

    /// List all albums.
    pub async fn fetch_albums(&self) -> Result<Value> {
        self.get_json(&self.album_base).await
    }

    /// List all artists.
    ///
    /// The artist endpoint sometimes wraps its payload in a `results`
    /// envelope; either shape is accepted.
    pub async fn fetch_artists_list(&self) -> Result<Value> {
        let data = self.get_json(&self.artist_base).await?;
        Ok(unwrap_results_envelope(data))
    }

    /// Fetch one album by id.
    pub async fn fetch_album_by_id(&self, album_id: &str) -> Result<Value> {
        self.get_json(&format!("{}/{album_id}", self.album_base)).await
    }

    /// Fetch an album's track list.
    ///
    /// Tracks are part of the album document, not a separate endpoint; an
    /// album without tracks yields an empty list.
    pub async fn fetch_tracklist(&self, album_id: &str) -> Result<Vec<Value>> {
        let album = self.fetch_album_by_id(album_id).await?;
        Ok(album
            .get("tracks")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }

    /// Create an album from a multipart form (metadata plus audio files).
    ///
    /// Uploads get an extended timeout; a server-reported error body is
    /// surfaced as [`ClientError::Api`] with the server's own text.
    pub async fn create_album(&self, form: reqwest::multipart::Form) -> Result<Value> {
        let response = self
            .http_client
            .post(&self.album_base)
            .multipart(form)
            .timeout(UPLOAD_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        if !status.is_success() {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("server error")
                .to_string();
            return Err(ClientError::Api(message).into());
        }

        Ok(body)
    }

    /// Download one track of an album, returning the saved file's path.
    pub async fn download_track(
        &self,
        track_id: &str,
        album_id: &str,
        format: AudioFormat,
    ) -> Result<PathBuf> {
        // Fetch the track title first so a missing disposition header still
        // produces a sensible name.
        let fallback = match self.fetch_album_by_id(album_id).await {
            Ok(album) => track_title(&album, track_id)
                .map(|title| sanitize_filename(&title))
                .unwrap_or_else(|| format!("track-{track_id}")),
            Err(e) => {
                warn!("Could not fetch track metadata, using id as name: {e}");
                format!("track-{track_id}")
            }
        };
        let fallback = format!("{fallback}.{}", format.extension());

        let url = format!("{}/{album_id}/download", self.album_base);
        let response = self
            .http_client
            .get(&url)
            .query(&[("trackId", track_id), ("format", format.extension())])
            .header("Accept", "*/*")
            .send()
            .await?;

        self.save_download(response, fallback, format.mime_type())
            .await
    }

    /// Download a whole album as a zip archive, returning the saved path.
    pub async fn download_album(&self, album_id: &str, format: AudioFormat) -> Result<PathBuf> {
        let fallback = match self.fetch_album_by_id(album_id).await {
            Ok(album) => album
                .get("title")
                .and_then(Value::as_str)
                .map(sanitize_filename)
                .unwrap_or_else(|| format!("album-{album_id}")),
            Err(e) => {
                warn!("Could not fetch album metadata, using id as name: {e}");
                format!("album-{album_id}")
            }
        };
        let fallback = format!("{fallback}.zip");

        let url = format!("{}/{album_id}/download-album", self.album_base);
        let response = self
            .http_client
            .get(&url)
            .query(&[("format", format.extension())])
            .header("Accept", "*/*")
            .send()
            .await?;

        self.save_download(response, fallback, "application/zip").await
    }

    /// Resolve the final filename and persist a binary response body.
    async fn save_download(
        &self,
        response: reqwest::Response,
        fallback: String,
        mime_type: &str,
    ) -> Result<PathBuf> {
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: response.url().to_string(),
            }
            .into());
        }

        let filename = match response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(content_disposition_filename)
        {
            Some(name) => name,
            None => {
                warn!("No usable Content-Disposition header, using fallback name");
                fallback
            }
        };

        let bytes = response.bytes().await?;
        debug!("Saving {} byte {mime_type} payload as {filename}", bytes.len());

        tokio::fs::create_dir_all(&self.download_dir).await?;
        let path = self.download_dir.join(filename);
        tokio::fs::write(&path, &bytes).await?;

        Ok(path)
    }

    /// Shared GET-and-decode for the JSON endpoints.
    async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self
            .http_client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            }
            .into());
        }

        Ok(response.json().await?)
    }

    /// Directory downloads are saved into.
    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }
}

/// Unwrap a `{results: [...]}` envelope, passing anything else through.
fn unwrap_results_envelope(data: Value) -> Value {
    match data {
        Value::Object(mut map) if map.contains_key("results") => {
            map.remove("results").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Find a track's title in an album document by stringly-compared id.
///
/// Track ids arrive as numbers or strings depending on who wrote the
/// record, so both sides compare through their string form.
fn track_title(album: &Value, track_id: &str) -> Option<String> {
    album
        .get("tracks")?
        .as_array()?
        .iter()
        .find(|track| match track.get("id") {
            Some(Value::String(s)) => s == track_id,
            Some(Value::Number(n)) => n.to_string() == track_id,
            _ => false,
        })?
        .get("title")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_results_envelope() {
        let enveloped = json!({ "results": [{ "name": "The Tides" }] });
        assert_eq!(
            unwrap_results_envelope(enveloped),
            json!([{ "name": "The Tides" }])
        );

        let bare = json!([{ "name": "The Tides" }]);
        assert_eq!(unwrap_results_envelope(bare.clone()), bare);
    }

    #[test]
    fn test_track_title_matches_numeric_and_string_ids() {
        let album = json!({
            "tracks": [
                { "id": 1, "title": "First Light" },
                { "id": "t-2", "title": "Undertow" },
            ]
        });

        assert_eq!(track_title(&album, "1"), Some("First Light".to_string()));
        assert_eq!(track_title(&album, "t-2"), Some("Undertow".to_string()));
        assert_eq!(track_title(&album, "3"), None);
    }

    #[test]
    fn test_track_title_without_tracks() {
        assert_eq!(track_title(&json!({}), "1"), None);
        assert_eq!(track_title(&json!({ "tracks": "none" }), "1"), None);
    }

    #[test]
    fn test_base_urls_are_derived_from_root() {
        let client = CatalogClient::new("http://localhost:5001/", "downloads");
        assert_eq!(client.album_base, "http://localhost:5001/api/albums");
        assert_eq!(client.artist_base, "http://localhost:5001/api/artists");
        assert_eq!(client.download_dir(), Path::new("downloads"));
    }
}
