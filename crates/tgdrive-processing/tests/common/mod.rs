//! In-memory fakes for the chat transport and the storage provider.

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use futures::{future, stream, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tgdrive_core::{MessageHandle, ReplyTarget, UploadResult};
use tgdrive_storage::{
    ContentSource, FileMetadata, Storage, StorageError, StorageQuota, StorageResult,
    UploadSession, UploadStep,
};
use tgdrive_telegram::{ChatTransport, ChunkStream, RemoteFile, TelegramError, TelegramResult};
use tokio::io::AsyncReadExt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCall {
    Send { chat_id: i64, text: String },
    Edit { message_id: i64, text: String },
}

impl ChatCall {
    pub fn text(&self) -> &str {
        match self {
            ChatCall::Send { text, .. } | ChatCall::Edit { text, .. } => text,
        }
    }

    pub fn is_send(&self) -> bool {
        matches!(self, ChatCall::Send { .. })
    }
}

#[derive(Default)]
pub struct FakeTransport {
    pub content: Vec<u8>,
    /// Fail the content stream after this many chunks.
    pub fail_after_chunks: Option<usize>,
    pub fail_edits: bool,
    /// Overrides the size `fetch_file_metadata` reports; `Some(None)` means unknown.
    pub metadata_size: Option<Option<u64>>,
    /// Emptied once the content stream has yielded its last chunk.
    pub clear_dir_after_content: Option<PathBuf>,
    pub calls: Mutex<Vec<ChatCall>>,
    pub metadata_calls: Mutex<usize>,
    pub next_message_id: Mutex<i64>,
}

impl FakeTransport {
    pub fn with_content(content: Vec<u8>) -> Self {
        Self {
            content,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<ChatCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn metadata_calls(&self) -> usize {
        *self.metadata_calls.lock().unwrap()
    }
}

#[async_trait]
impl ChatTransport for FakeTransport {
    async fn fetch_file_metadata(&self, file_id: &str) -> TelegramResult<RemoteFile> {
        *self.metadata_calls.lock().unwrap() += 1;
        Ok(RemoteFile {
            file_id: file_id.to_string(),
            file_path: Some(format!("documents/{}", file_id)),
            file_size: self
                .metadata_size
                .unwrap_or(Some(self.content.len() as u64)),
        })
    }

    async fn fetch_content_chunked(
        &self,
        _file: &RemoteFile,
        chunk_size: usize,
    ) -> TelegramResult<ChunkStream> {
        let mut items: Vec<TelegramResult<Bytes>> = self
            .content
            .chunks(chunk_size)
            .map(|c| Ok(Bytes::copy_from_slice(c)))
            .collect();
        if let Some(n) = self.fail_after_chunks {
            items.truncate(n);
            items.push(Err(TelegramError::Http("connection reset by peer".to_string())));
        }
        let dir = self.clear_dir_after_content.clone();
        let tail = stream::once(async move {
            if let Some(dir) = dir {
                for entry in std::fs::read_dir(&dir).unwrap() {
                    std::fs::remove_file(entry.unwrap().path()).unwrap();
                }
            }
        })
        .filter_map(|()| future::ready(None::<TelegramResult<Bytes>>));
        Ok(Box::pin(stream::iter(items).chain(tail)))
    }

    async fn send_message(
        &self,
        target: &ReplyTarget,
        text: &str,
    ) -> TelegramResult<MessageHandle> {
        self.calls.lock().unwrap().push(ChatCall::Send {
            chat_id: target.chat_id,
            text: text.to_string(),
        });
        let mut id = self.next_message_id.lock().unwrap();
        *id += 1;
        Ok(MessageHandle {
            chat_id: target.chat_id,
            message_id: 1000 + *id,
        })
    }

    async fn edit_message(&self, message: &MessageHandle, text: &str) -> TelegramResult<()> {
        self.calls.lock().unwrap().push(ChatCall::Edit {
            message_id: message.message_id,
            text: text.to_string(),
        });
        if self.fail_edits {
            return Err(TelegramError::Api {
                code: 429,
                description: "Too Many Requests: retry after 3".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CreatedUpload {
    pub metadata: FileMetadata,
    pub content_length: u64,
    pub chunk_size: usize,
}

#[derive(Default)]
pub struct FakeStorage {
    /// When set, the first `advance` fails with this provider text.
    pub fail_with: Option<String>,
    pub web_view_link: Option<String>,
    pub quota: Option<StorageQuota>,
    pub quota_calls: Mutex<usize>,
    pub created: Mutex<Vec<CreatedUpload>>,
    pub received: Arc<Mutex<Vec<u8>>>,
}

impl FakeStorage {
    pub fn created(&self) -> Vec<CreatedUpload> {
        self.created.lock().unwrap().clone()
    }

    pub fn received(&self) -> Vec<u8> {
        self.received.lock().unwrap().clone()
    }

    pub fn quota_calls(&self) -> usize {
        *self.quota_calls.lock().unwrap()
    }
}

struct FakeSession {
    source: ContentSource,
    total: u64,
    acknowledged: u64,
    chunk_size: usize,
    fail_with: Option<String>,
    web_view_link: Option<String>,
    received: Arc<Mutex<Vec<u8>>>,
}

#[async_trait]
impl UploadSession for FakeSession {
    async fn advance(&mut self) -> StorageResult<UploadStep> {
        if let Some(text) = self.fail_with.take() {
            return Err(StorageError::UploadFailed(text));
        }

        let mut chunk = vec![0u8; self.chunk_size];
        let mut filled = 0;
        while filled < self.chunk_size {
            let n = self.source.read(&mut chunk[filled..]).await?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        self.received.lock().unwrap().extend_from_slice(&chunk[..filled]);
        self.acknowledged += filled as u64;

        if self.acknowledged >= self.total {
            return Ok(UploadStep::Complete(UploadResult {
                file_id: "drive-file-1".to_string(),
                web_view_link: self.web_view_link.clone(),
            }));
        }
        Ok(UploadStep::InProgress {
            fraction: self.acknowledged as f64 / self.total as f64,
        })
    }
}

#[async_trait]
impl Storage for FakeStorage {
    async fn create_resumable_upload(
        &self,
        metadata: FileMetadata,
        source: ContentSource,
        content_length: u64,
        chunk_size: usize,
    ) -> StorageResult<Box<dyn UploadSession>> {
        self.created.lock().unwrap().push(CreatedUpload {
            metadata,
            content_length,
            chunk_size,
        });
        Ok(Box::new(FakeSession {
            source,
            total: content_length,
            acknowledged: 0,
            chunk_size,
            fail_with: self.fail_with.clone(),
            web_view_link: self.web_view_link.clone(),
            received: self.received.clone(),
        }))
    }

    async fn storage_quota(&self) -> StorageResult<StorageQuota> {
        *self.quota_calls.lock().unwrap() += 1;
        self.quota.ok_or_else(|| {
            StorageError::BackendError("HTTP 401 Unauthorized: invalid_grant".to_string())
        })
    }
}

pub fn reply_target() -> ReplyTarget {
    ReplyTarget {
        chat_id: 500,
        message_id: 42,
    }
}

pub fn dir_is_empty(path: &Path) -> bool {
    std::fs::read_dir(path).unwrap().next().is_none()
}
