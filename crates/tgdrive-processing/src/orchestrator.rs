//! Transfer orchestrator
//!
//! Moves one file from the chat transport to the storage provider:
//! size guard → scoped temp file → chunked download → resumable upload →
//! final status. Every exit path removes the temp file exactly once, and
//! every failure becomes a chat message instead of an error for the caller
//! to handle.

use futures::StreamExt;
use std::path::PathBuf;
use std::sync::Arc;
use tgdrive_core::constants::{
    DOWNLOAD_CHUNK_SIZE, DOWNLOAD_PROGRESS_STEP, MAX_FILE_SIZE_BYTES, UPLOAD_CHUNK_SIZE,
    UPLOAD_PROGRESS_STEP,
};
use tgdrive_core::{IncomingFile, LogLevel, ReplyTarget, TransferError, UploadResult};
use tgdrive_storage::{FileMetadata, Storage, StorageError, UploadStep};
use tgdrive_telegram::{ChatTransport, RemoteFile};
use tokio::io::AsyncWriteExt;

use crate::messages;
use crate::progress::{download_progress, upload_progress, ProgressThrottle};
use crate::status::StatusMessage;
use crate::temp_file::ScopedTempFile;

/// Per-process transfer settings.
#[derive(Debug, Clone)]
pub struct TransferOptions {
    /// Destination folder; `None` uploads to the provider's default location.
    pub parent_folder: Option<String>,
    /// Where temp files are created.
    pub temp_dir: PathBuf,
}

pub struct TransferOrchestrator {
    transport: Arc<dyn ChatTransport>,
    storage: Arc<dyn Storage>,
    options: TransferOptions,
}

fn download_error(e: impl std::fmt::Display) -> TransferError {
    TransferError::Download(e.to_string())
}

fn upload_error(e: StorageError) -> TransferError {
    match e {
        StorageError::UploadFailed(_) | StorageError::BackendError(_) => {
            TransferError::Upload(e.to_string())
        }
        StorageError::AuthFailed(_) | StorageError::IoError(_) | StorageError::ConfigError(_) => {
            TransferError::Unexpected(e.to_string())
        }
    }
}

impl TransferOrchestrator {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        storage: Arc<dyn Storage>,
        options: TransferOptions,
    ) -> Self {
        Self {
            transport,
            storage,
            options,
        }
    }

    /// Run the whole pipeline for one file and report the outcome in chat.
    ///
    /// The returned error is informational; the user has already been told.
    #[tracing::instrument(
        skip(self, reply_to, file),
        fields(
            chat_id = reply_to.chat_id,
            file_name = %file.file_name,
            size_bytes = file.file_size
        )
    )]
    pub async fn run(
        &self,
        reply_to: ReplyTarget,
        file: &IncomingFile,
    ) -> Result<UploadResult, TransferError> {
        let (file, remote) = match self.resolve_size(file).await {
            Ok(resolved) => resolved,
            Err(err) => {
                log_failure(&err);
                self.reply(&reply_to, &messages::error_processing(file, &err.detail()))
                    .await;
                return Err(err);
            }
        };
        let file = &file;

        if file.file_size > MAX_FILE_SIZE_BYTES {
            let err = TransferError::FileTooLarge {
                size: file.file_size,
                limit: MAX_FILE_SIZE_BYTES,
            };
            tracing::warn!(error = %err, "Rejected file above size limit");
            self.reply(&reply_to, &messages::file_too_large(file)).await;
            return Err(err);
        }

        self.reply(&reply_to, &messages::file_received(file)).await;
        let status =
            StatusMessage::open(self.transport.clone(), reply_to, messages::PREPARING_DOWNLOAD)
                .await;

        let outcome = self.transfer(file, remote, &status).await;

        match &outcome {
            Ok(result) => {
                tracing::info!(drive_file_id = %result.file_id, "Upload completed");
                status.finish(&messages::upload_successful(file, result)).await;
            }
            Err(err) => {
                log_failure(err);
                match err {
                    TransferError::Upload(detail) => {
                        status.finish(&messages::upload_failed(file, detail)).await;
                    }
                    _ => {
                        self.reply(&reply_to, &messages::error_processing(file, &err.detail()))
                            .await;
                    }
                }
            }
        }

        outcome
    }

    /// Fill in a size the update did not declare from the transport's metadata.
    ///
    /// Returns the metadata when it was fetched so the download can reuse it.
    async fn resolve_size(
        &self,
        file: &IncomingFile,
    ) -> Result<(IncomingFile, Option<RemoteFile>), TransferError> {
        if file.file_size > 0 {
            return Ok((file.clone(), None));
        }

        let remote = self
            .transport
            .fetch_file_metadata(&file.file_id)
            .await
            .map_err(download_error)?;
        let mut resolved = file.clone();
        resolved.file_size = remote.file_size.unwrap_or(0);
        tracing::debug!(size_bytes = resolved.file_size, "Resolved undeclared file size");
        Ok((resolved, Some(remote)))
    }

    async fn transfer(
        &self,
        file: &IncomingFile,
        remote: Option<RemoteFile>,
        status: &StatusMessage,
    ) -> Result<UploadResult, TransferError> {
        let mut buffer = ScopedTempFile::create_in(&self.options.temp_dir)?;

        let outcome = match self.download(file, remote, &buffer, status).await {
            Ok(downloaded) => {
                status.update(&messages::download_complete(file)).await;
                self.upload(file, &buffer, downloaded, status).await
            }
            Err(e) => Err(e),
        };

        if let Err(e) = buffer.release() {
            tracing::warn!(
                path = %buffer.path().display(),
                error = %e,
                "Failed to remove temporary file"
            );
        }

        outcome
    }

    /// Pull the content into `buffer`; returns the number of bytes written.
    async fn download(
        &self,
        file: &IncomingFile,
        remote: Option<RemoteFile>,
        buffer: &ScopedTempFile,
        status: &StatusMessage,
    ) -> Result<u64, TransferError> {
        let remote = match remote {
            Some(remote) => remote,
            None => self
                .transport
                .fetch_file_metadata(&file.file_id)
                .await
                .map_err(download_error)?,
        };
        let mut chunks = self
            .transport
            .fetch_content_chunked(&remote, DOWNLOAD_CHUNK_SIZE)
            .await
            .map_err(download_error)?;

        let mut out = tokio::fs::File::create(buffer.path())
            .await
            .map_err(download_error)?;
        let mut downloaded: u64 = 0;
        let mut throttle = ProgressThrottle::new(DOWNLOAD_PROGRESS_STEP);

        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.map_err(download_error)?;
            out.write_all(&chunk).await.map_err(download_error)?;
            downloaded += chunk.len() as u64;

            let progress = download_progress(downloaded, file.file_size);
            if throttle.should_push(progress) {
                status
                    .update(&messages::downloading(progress, downloaded, file.file_size))
                    .await;
            }
        }

        out.flush().await.map_err(download_error)?;
        tracing::debug!(downloaded_bytes = downloaded, "Download finished");
        Ok(downloaded)
    }

    async fn upload(
        &self,
        file: &IncomingFile,
        buffer: &ScopedTempFile,
        content_length: u64,
        status: &StatusMessage,
    ) -> Result<UploadResult, TransferError> {
        let source = tokio::fs::File::open(buffer.path()).await?;
        let metadata = FileMetadata {
            name: file.file_name.clone(),
            parent_folder: self.options.parent_folder.clone(),
        };

        let mut session = self
            .storage
            .create_resumable_upload(
                metadata,
                Box::pin(source),
                content_length,
                UPLOAD_CHUNK_SIZE,
            )
            .await
            .map_err(upload_error)?;
        let mut throttle = ProgressThrottle::new(UPLOAD_PROGRESS_STEP);

        loop {
            match session.advance().await.map_err(upload_error)? {
                UploadStep::InProgress { fraction } => {
                    let progress = upload_progress(fraction);
                    if throttle.should_push(progress) {
                        let uploaded =
                            (file.file_size as f64 * fraction.clamp(0.0, 1.0)) as u64;
                        status
                            .update(&messages::uploading(progress, uploaded, file))
                            .await;
                    }
                }
                UploadStep::Complete(result) => return Ok(result),
            }
        }
    }

    async fn reply(&self, reply_to: &ReplyTarget, text: &str) {
        if let Err(e) = self.transport.send_message(reply_to, text).await {
            tracing::warn!(chat_id = reply_to.chat_id, error = %e, "Failed to send message");
        }
    }
}

fn log_failure(err: &TransferError) {
    match err.log_level() {
        LogLevel::Error => tracing::error!(
            error = %err,
            error_code = err.error_code(),
            recoverable = err.is_recoverable(),
            "Transfer failed"
        ),
        LogLevel::Warn => {
            tracing::warn!(error = %err, error_code = err.error_code(), "Transfer rejected")
        }
        LogLevel::Debug => {
            tracing::debug!(error = %err, error_code = err.error_code(), "Transfer stopped")
        }
    }
}
