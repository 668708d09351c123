//! Google Drive v3 storage implementation
//!
//! Uploads use the resumable protocol: a `POST` opens a session and returns
//! its URI in the `Location` header, then each chunk is `PUT` to that URI with
//! a `Content-Range` header. The provider answers `308 Resume Incomplete`
//! (with the acknowledged `Range`) until the last chunk, which returns the
//! created file resource.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, CONTENT_RANGE, LOCATION, RANGE};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tgdrive_core::UploadResult;
use tokio::io::AsyncReadExt;

use crate::auth::TokenSource;
use crate::traits::{
    ContentSource, FileMetadata, Storage, StorageError, StorageQuota, StorageResult,
    UploadSession, UploadStep,
};

/// Status Drive uses for an acknowledged, still incomplete upload.
const RESUME_INCOMPLETE: u16 = 308;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFile {
    id: String,
    #[serde(default)]
    web_view_link: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AboutResponse {
    storage_quota: DriveQuota,
}

#[derive(Debug, Deserialize)]
struct DriveQuota {
    #[serde(default)]
    limit: Option<String>,
    #[serde(default)]
    usage: Option<String>,
}

/// Google Drive storage implementation
#[derive(Clone)]
pub struct GoogleDriveStorage {
    http_client: Client,
    api_base_url: String,
    token_source: Arc<dyn TokenSource>,
}

impl GoogleDriveStorage {
    /// Create a new GoogleDriveStorage instance
    ///
    /// # Arguments
    /// * `http_client` - Shared HTTP client
    /// * `api_base_url` - API root, e.g. "https://www.googleapis.com"
    /// * `token_source` - Supplies bearer tokens
    pub fn new(
        http_client: Client,
        api_base_url: impl Into<String>,
        token_source: Arc<dyn TokenSource>,
    ) -> Self {
        Self {
            http_client,
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            token_source,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}

/// Turn a non-success response into the error text shown to users.
async fn provider_error(response: Response) -> StorageError {
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    StorageError::UploadFailed(format!("HTTP {}: {}", status, body.trim()))
}

/// Parse a `Range: bytes=0-N` header into the number of acknowledged bytes.
fn acknowledged_bytes(response: &Response) -> StorageResult<u64> {
    let Some(value) = response.headers().get(RANGE) else {
        return Ok(0);
    };

    let raw = value
        .to_str()
        .map_err(|_| StorageError::BackendError("Range header is not ASCII".to_string()))?;
    let last = raw
        .trim()
        .strip_prefix("bytes=")
        .and_then(|range| range.split('-').nth(1))
        .and_then(|end| end.parse::<u64>().ok())
        .ok_or_else(|| StorageError::BackendError(format!("Malformed Range header: {}", raw)))?;

    Ok(last + 1)
}

#[async_trait]
impl Storage for GoogleDriveStorage {
    async fn create_resumable_upload(
        &self,
        metadata: FileMetadata,
        source: ContentSource,
        content_length: u64,
        chunk_size: usize,
    ) -> StorageResult<Box<dyn UploadSession>> {
        if chunk_size == 0 {
            return Err(StorageError::ConfigError(
                "Upload chunk size cannot be 0".to_string(),
            ));
        }

        let token = self.token_source.access_token().await?;

        let mut body = json!({ "name": metadata.name });
        if let Some(parent) = &metadata.parent_folder {
            body["parents"] = json!([parent]);
        }

        let response = self
            .http_client
            .post(self.url("/upload/drive/v3/files"))
            .query(&[
                ("uploadType", "resumable"),
                ("fields", "id,webViewLink,size"),
                ("supportsAllDrives", "true"),
            ])
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header("X-Upload-Content-Type", "application/octet-stream")
            .header("X-Upload-Content-Length", content_length.to_string())
            .json(&body)
            .send()
            .await
            .map_err(|e| StorageError::UploadFailed(format!("Failed to start upload: {}", e)))?;

        if !response.status().is_success() {
            return Err(provider_error(response).await);
        }

        let session_uri = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(String::from)
            .ok_or_else(|| {
                StorageError::UploadFailed(
                    "Upload session response did not include a Location header".to_string(),
                )
            })?;

        tracing::debug!(
            file_name = %metadata.name,
            content_length = content_length,
            "Opened resumable upload session"
        );

        Ok(Box::new(DriveUploadSession {
            http_client: self.http_client.clone(),
            token_source: self.token_source.clone(),
            session_uri,
            source,
            total: content_length,
            acknowledged: 0,
            pending: Vec::with_capacity(chunk_size),
            chunk_size,
            finished: false,
        }))
    }

    async fn storage_quota(&self) -> StorageResult<StorageQuota> {
        let token = self.token_source.access_token().await?;

        let response = self
            .http_client
            .get(self.url("/drive/v3/about"))
            .query(&[("fields", "storageQuota")])
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| StorageError::BackendError(format!("Quota request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(StorageError::BackendError(format!(
                "HTTP {}: {}",
                status,
                error_text.trim()
            )));
        }

        let about: AboutResponse = response
            .json()
            .await
            .map_err(|e| StorageError::BackendError(format!("Failed to parse quota: {}", e)))?;

        Ok(StorageQuota {
            usage_bytes: about
                .storage_quota
                .usage
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            limit_bytes: about.storage_quota.limit.and_then(|v| v.parse().ok()),
        })
    }
}

/// One open resumable upload.
///
/// `pending` always holds the bytes starting at offset `acknowledged` that
/// were read from `source` but not yet confirmed by the provider.
struct DriveUploadSession {
    http_client: Client,
    token_source: Arc<dyn TokenSource>,
    session_uri: String,
    source: ContentSource,
    total: u64,
    acknowledged: u64,
    pending: Vec<u8>,
    chunk_size: usize,
    finished: bool,
}

impl DriveUploadSession {
    async fn fill_pending(&mut self) -> StorageResult<()> {
        let mut filled = self.pending.len();
        self.pending.resize(self.chunk_size, 0);
        while filled < self.chunk_size {
            let n = self.source.read(&mut self.pending[filled..]).await?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        self.pending.truncate(filled);
        Ok(())
    }

    fn content_range(&self) -> String {
        if self.total == 0 {
            return "bytes */0".to_string();
        }
        let start = self.acknowledged;
        let end = start + self.pending.len() as u64 - 1;
        format!("bytes {}-{}/{}", start, end, self.total)
    }

    fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        (self.acknowledged as f64 / self.total as f64).min(1.0)
    }
}

#[async_trait]
impl UploadSession for DriveUploadSession {
    async fn advance(&mut self) -> StorageResult<UploadStep> {
        if self.finished {
            return Err(StorageError::UploadFailed(
                "Upload session already completed".to_string(),
            ));
        }

        self.fill_pending().await?;
        if self.pending.is_empty() && self.total > 0 {
            return Err(StorageError::UploadFailed(format!(
                "Content ended after {} of {} bytes",
                self.acknowledged, self.total
            )));
        }

        let token = self.token_source.access_token().await?;
        let sent = self.pending.len();

        let response = self
            .http_client
            .put(&self.session_uri)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(CONTENT_RANGE, self.content_range())
            .body(Bytes::copy_from_slice(&self.pending))
            .send()
            .await
            .map_err(|e| StorageError::UploadFailed(format!("Chunk upload failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::OK || status == StatusCode::CREATED {
            let file: DriveFile = response.json().await.map_err(|e| {
                StorageError::UploadFailed(format!("Failed to parse upload response: {}", e))
            })?;
            self.finished = true;
            self.acknowledged = self.total;
            self.pending.clear();
            return Ok(UploadStep::Complete(UploadResult {
                file_id: file.id,
                web_view_link: file.web_view_link,
            }));
        }

        if status.as_u16() == RESUME_INCOMPLETE {
            let acknowledged = acknowledged_bytes(&response)?;
            if acknowledged < self.acknowledged || acknowledged > self.acknowledged + sent as u64 {
                return Err(StorageError::UploadFailed(format!(
                    "Provider acknowledged {} bytes, outside the submitted range",
                    acknowledged
                )));
            }
            let consumed = (acknowledged - self.acknowledged) as usize;
            self.pending.drain(..consumed);
            self.acknowledged = acknowledged;
            return Ok(UploadStep::InProgress {
                fraction: self.fraction(),
            });
        }

        Err(provider_error(response).await)
    }
}
