//! Telegram Bot API client
//!
//! Every method is an HTTPS call to `{base}/bot{token}/{method}`; file
//! content is served from `{base}/file/bot{token}/{file_path}`. The base URL
//! is configurable so a self-hosted Bot API server can be used.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;
use tgdrive_core::{MessageHandle, ReplyTarget, Secret};

use crate::chunked::rechunk;
use crate::error::{TelegramError, TelegramResult};
use crate::transport::{ChatTransport, ChunkStream, RemoteFile};
use crate::types::{ApiResponse, BotUser, File, SentMessage, Update};

/// Extra time allowed on top of the long-poll timeout before giving up on `getUpdates`.
const POLL_GRACE_SECS: u64 = 10;

#[derive(Clone)]
pub struct TelegramClient {
    http_client: Client,
    api_base_url: String,
    token: Secret,
}

impl Debug for TelegramClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("TelegramClient")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl TelegramClient {
    pub fn new(http_client: Client, api_base_url: impl Into<String>, token: Secret) -> Self {
        Self {
            http_client,
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base_url, self.token.expose(), method)
    }

    fn file_url(&self, file_path: &str) -> String {
        format!(
            "{}/file/bot{}/{}",
            self.api_base_url,
            self.token.expose(),
            file_path.trim_start_matches('/')
        )
    }

    async fn call<P, T>(
        &self,
        method: &str,
        params: &P,
        timeout: Option<Duration>,
    ) -> TelegramResult<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.http_client.post(self.method_url(method)).json(params);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        let body: ApiResponse<T> = response.json().await.map_err(|e| {
            TelegramError::Decode(format!("{} returned {}: {}", method, status, e.without_url()))
        })?;

        if !body.ok {
            return Err(TelegramError::Api {
                code: body.error_code.unwrap_or_else(|| i64::from(status.as_u16())),
                description: body
                    .description
                    .unwrap_or_else(|| "Unknown error".to_string()),
            });
        }

        body.result
            .ok_or_else(|| TelegramError::Decode(format!("{} returned no result", method)))
    }

    /// Identify the bot. Used at startup to check the token.
    pub async fn get_me(&self) -> TelegramResult<BotUser> {
        self.call("getMe", &json!({}), None).await
    }

    pub async fn get_file(&self, file_id: &str) -> TelegramResult<File> {
        self.call("getFile", &json!({ "file_id": file_id }), None).await
    }

    /// Long-poll for new updates starting at `offset`.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> TelegramResult<Vec<Update>> {
        let mut params = json!({
            "timeout": timeout_secs,
            "allowed_updates": ["message"],
        });
        if let Some(offset) = offset {
            params["offset"] = json!(offset);
        }
        let http_timeout = Duration::from_secs(timeout_secs + POLL_GRACE_SECS);
        self.call("getUpdates", &params, Some(http_timeout)).await
    }

    pub async fn set_webhook(&self, url: &str) -> TelegramResult<bool> {
        self.call(
            "setWebhook",
            &json!({ "url": url, "allowed_updates": ["message"] }),
            None,
        )
        .await
    }

    pub async fn delete_webhook(&self) -> TelegramResult<bool> {
        self.call("deleteWebhook", &json!({}), None).await
    }

    /// Send a plain-text message, quoting `target` when it still exists.
    pub async fn send_text(
        &self,
        target: &ReplyTarget,
        text: &str,
    ) -> TelegramResult<MessageHandle> {
        let sent: SentMessage = self
            .call(
                "sendMessage",
                &json!({
                    "chat_id": target.chat_id,
                    "text": text,
                    "reply_parameters": {
                        "message_id": target.message_id,
                        "allow_sending_without_reply": true,
                    },
                }),
                None,
            )
            .await?;

        Ok(MessageHandle {
            chat_id: sent.chat.id,
            message_id: sent.message_id,
        })
    }

    pub async fn edit_text(&self, message: &MessageHandle, text: &str) -> TelegramResult<()> {
        // The result is the edited Message, or `true` for inline messages.
        let _: serde_json::Value = self
            .call(
                "editMessageText",
                &json!({
                    "chat_id": message.chat_id,
                    "message_id": message.message_id,
                    "text": text,
                }),
                None,
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ChatTransport for TelegramClient {
    async fn fetch_file_metadata(&self, file_id: &str) -> TelegramResult<RemoteFile> {
        let file = self.get_file(file_id).await?;
        Ok(RemoteFile {
            file_id: file.file_id,
            file_path: file.file_path,
            file_size: file.file_size,
        })
    }

    async fn fetch_content_chunked(
        &self,
        file: &RemoteFile,
        chunk_size: usize,
    ) -> TelegramResult<ChunkStream> {
        let file_path = file
            .file_path
            .as_deref()
            .ok_or_else(|| TelegramError::FileUnavailable(file.file_id.clone()))?;

        let response = self.http_client.get(self.file_url(file_path)).send().await?;
        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TelegramError::Api {
                code: i64::from(status.as_u16()),
                description: error_text,
            });
        }

        let bytes = response.bytes_stream().map(|item| item.map_err(TelegramError::from));
        Ok(Box::pin(rechunk(bytes, chunk_size)))
    }

    async fn send_message(
        &self,
        target: &ReplyTarget,
        text: &str,
    ) -> TelegramResult<MessageHandle> {
        self.send_text(target, text).await
    }

    async fn edit_message(&self, message: &MessageHandle, text: &str) -> TelegramResult<()> {
        self.edit_text(message, text).await
    }
}
