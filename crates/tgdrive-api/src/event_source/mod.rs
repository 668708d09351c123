//! Event sources
//!
//! Both modes feed the same dispatcher queue. Polling owns a background task;
//! webhook mode only registers the callback URL and lets the HTTP route push
//! updates.

pub mod polling;
pub mod webhook;

use anyhow::Result;
use tgdrive_core::{BotMode, Config, InboundEvent};
use tgdrive_telegram::TelegramClient;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub use polling::PollingSource;

/// Start the event source selected by `BOT_MODE`.
///
/// Returns the polling task handle in polling mode and `None` in webhook mode.
pub async fn start(
    config: &Config,
    client: TelegramClient,
    events: mpsc::Sender<InboundEvent>,
    shutdown: CancellationToken,
) -> Result<Option<JoinHandle<()>>> {
    match config.bot_mode() {
        BotMode::Polling => {
            let source = PollingSource::new(client, config.poll_timeout_secs(), events);
            tracing::info!(
                timeout_secs = config.poll_timeout_secs(),
                "Starting long polling"
            );
            Ok(Some(tokio::spawn(source.run(shutdown))))
        }
        BotMode::Webhook => {
            webhook::register(&client, config).await?;
            Ok(None)
        }
    }
}
