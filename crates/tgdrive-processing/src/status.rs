//! Best-effort status message.

use std::sync::Arc;
use tgdrive_core::{MessageHandle, ReplyTarget};
use tgdrive_telegram::ChatTransport;

/// The message a transfer keeps editing to show its progress.
///
/// Every push is best-effort: failures are logged and never abort the
/// transfer. Only [`StatusMessage::finish`] falls back to a new message when
/// there is nothing to edit or the edit is rejected.
pub struct StatusMessage {
    transport: Arc<dyn ChatTransport>,
    reply_to: ReplyTarget,
    handle: Option<MessageHandle>,
}

impl StatusMessage {
    /// Send `initial_text` as a reply to `reply_to` and keep its handle.
    pub async fn open(
        transport: Arc<dyn ChatTransport>,
        reply_to: ReplyTarget,
        initial_text: &str,
    ) -> Self {
        let handle = match transport.send_message(&reply_to, initial_text).await {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!(
                    chat_id = reply_to.chat_id,
                    error = %e,
                    "Failed to send status message; progress will not be shown"
                );
                None
            }
        };

        Self {
            transport,
            reply_to,
            handle,
        }
    }

    /// Replace the status text.
    pub async fn update(&self, text: &str) {
        self.edit(text).await;
    }

    /// Show a terminal text.
    ///
    /// The outcome must reach the user, so a missing status message or a
    /// rejected edit falls back to a new reply.
    pub async fn finish(&self, text: &str) {
        if self.edit(text).await {
            return;
        }
        if let Err(e) = self.transport.send_message(&self.reply_to, text).await {
            tracing::warn!(
                chat_id = self.reply_to.chat_id,
                error = %e,
                "Failed to send final status"
            );
        }
    }

    /// Returns whether the edit was applied.
    async fn edit(&self, text: &str) -> bool {
        let Some(handle) = &self.handle else {
            return false;
        };
        match self.transport.edit_message(handle, text).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    chat_id = handle.chat_id,
                    message_id = handle.message_id,
                    error = %e,
                    "Failed to update status message"
                );
                false
            }
        }
    }
}
