//! Webhook ingestion
//!
//! Telegram POSTs each update to `/webhook/{token}`. The handler only parses
//! and enqueues; processing happens on the dispatcher so the request returns
//! immediately and Telegram does not redeliver long-running transfers.

use axum::extract::{Path, State};
use bytes::Bytes;
use tgdrive_core::AppError;
use tgdrive_telegram::{inbound_event, Update};
use tokio::sync::mpsc::error::TrySendError;

use crate::error::HttpAppError;
use crate::state::AppState;

pub async fn receive_update(
    State(state): State<AppState>,
    Path(token): Path<String>,
    body: Bytes,
) -> Result<&'static str, HttpAppError> {
    if token != state.config.telegram_bot_token().expose() {
        return Err(AppError::NotFound("Not found".to_string()).into());
    }

    let update: Update = serde_json::from_slice(&body).map_err(AppError::from)?;
    let update_id = update.update_id;

    let Some(event) = inbound_event(update) else {
        tracing::debug!(update_id, "Ignoring update without a usable message");
        return Ok("OK");
    };

    match state.events.try_send(event) {
        Ok(()) => {
            tracing::debug!(update_id, "Update queued");
            Ok("OK")
        }
        // Telegram redelivers on non-2xx, so refusing is safe.
        Err(TrySendError::Full(_)) => {
            Err(AppError::Unavailable("Event queue is full".to_string()).into())
        }
        Err(TrySendError::Closed(_)) => {
            Err(AppError::Unavailable("Bot is shutting down".to_string()).into())
        }
    }
}
