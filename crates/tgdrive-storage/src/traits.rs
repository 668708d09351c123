//! Storage abstraction trait
//!
//! This module defines the traits the transfer pipeline uploads through.

use async_trait::async_trait;
use std::pin::Pin;
use tgdrive_core::UploadResult;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// The provider rejected an upload request. The text is shown to users as-is.
    #[error("{0}")]
    UploadFailed(String),

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Readable content handed to an upload session. Consumed once, front to back.
pub type ContentSource = Pin<Box<dyn AsyncRead + Send + Unpin>>;

/// Metadata attached to a new file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub name: String,
    /// Containing folder; `None` uploads to the provider's default location.
    pub parent_folder: Option<String>,
}

/// Outcome of one [`UploadSession::advance`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadStep {
    /// The provider acknowledged part of the content. `fraction` is in `0.0..=1.0`.
    InProgress { fraction: f64 },
    /// The provider committed the file.
    Complete(UploadResult),
}

/// Storage usage reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageQuota {
    pub usage_bytes: u64,
    /// `None` when the account has no fixed limit.
    pub limit_bytes: Option<u64>,
}

const GB: f64 = 1024.0 * 1024.0 * 1024.0;

impl StorageQuota {
    pub fn usage_gb(&self) -> f64 {
        self.usage_bytes as f64 / GB
    }

    /// Total capacity in GB, only when the provider reports a positive limit.
    pub fn limit_gb(&self) -> Option<f64> {
        self.limit_bytes
            .filter(|limit| *limit > 0)
            .map(|limit| limit as f64 / GB)
    }

    pub fn usage_percent(&self) -> Option<f64> {
        self.limit_bytes
            .filter(|limit| *limit > 0)
            .map(|limit| self.usage_bytes as f64 / limit as f64 * 100.0)
    }
}

/// An open resumable upload.
#[async_trait]
pub trait UploadSession: Send {
    /// Submit the next chunk and report how far the provider has got.
    ///
    /// Calling `advance` again after [`UploadStep::Complete`] is an error.
    async fn advance(&mut self) -> StorageResult<UploadStep>;
}

/// Storage abstraction trait
///
/// The pipeline only ever talks to the provider through this trait, which
/// keeps it testable with in-memory fakes.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Open a resumable upload session for `content_length` bytes read from `source`.
    ///
    /// # Arguments
    /// * `metadata` - File name and optional parent folder
    /// * `source` - Content, read sequentially as chunks are submitted
    /// * `content_length` - Exact number of bytes `source` will yield
    /// * `chunk_size` - Bytes submitted per `advance` call
    async fn create_resumable_upload(
        &self,
        metadata: FileMetadata,
        source: ContentSource,
        content_length: u64,
        chunk_size: usize,
    ) -> StorageResult<Box<dyn UploadSession>>;

    /// Report used and total capacity.
    async fn storage_quota(&self) -> StorageResult<StorageQuota>;
}
