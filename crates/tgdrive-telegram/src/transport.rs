//! The chat-transport operations the transfer pipeline consumes.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use tgdrive_core::{MessageHandle, ReplyTarget};

use crate::error::TelegramResult;

/// Lazy, finite, non-restartable sequence of content chunks.
pub type ChunkStream = Pin<Box<dyn Stream<Item = TelegramResult<Bytes>> + Send>>;

/// Where a file's content can be fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub file_id: String,
    pub file_path: Option<String>,
    pub file_size: Option<u64>,
}

/// Chat transport abstraction
///
/// Implemented by [`crate::TelegramClient`] and by in-memory fakes in tests.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Resolve a file handle into a downloadable location.
    async fn fetch_file_metadata(&self, file_id: &str) -> TelegramResult<RemoteFile>;

    /// Stream the content of a resolved file in chunks of `chunk_size` bytes.
    async fn fetch_content_chunked(
        &self,
        file: &RemoteFile,
        chunk_size: usize,
    ) -> TelegramResult<ChunkStream>;

    async fn send_message(&self, target: &ReplyTarget, text: &str) -> TelegramResult<MessageHandle>;

    async fn edit_message(&self, message: &MessageHandle, text: &str) -> TelegramResult<()>;
}
