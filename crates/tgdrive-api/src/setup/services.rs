//! Service construction: Telegram client, storage backend and the dispatcher.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tgdrive_core::Config;
use tgdrive_processing::{Dispatcher, TransferOptions, TransferOrchestrator};
use tgdrive_storage::create_storage;
use tgdrive_telegram::{ChatTransport, TelegramClient};

const TELEGRAM_CONNECT_TIMEOUT_SECS: u64 = 30;

pub struct Services {
    pub telegram: TelegramClient,
    pub dispatcher: Arc<Dispatcher>,
}

pub async fn initialize_services(config: &Config) -> Result<Services> {
    let http_client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(TELEGRAM_CONNECT_TIMEOUT_SECS))
        .build()
        .context("Failed to create HTTP client")?;

    let telegram = TelegramClient::new(
        http_client,
        config.telegram_api_url(),
        config.telegram_bot_token().clone(),
    );

    let me = telegram
        .get_me()
        .await
        .context("Failed to reach the Telegram Bot API (check TELEGRAM_BOT_TOKEN)")?;
    tracing::info!(
        bot_id = me.id,
        username = me.username.as_deref().unwrap_or(""),
        "Connected to Telegram"
    );

    let storage = create_storage(config).context("Failed to initialize Google Drive storage")?;

    let transport: Arc<dyn ChatTransport> = Arc::new(telegram.clone());
    let orchestrator = TransferOrchestrator::new(
        transport.clone(),
        storage.clone(),
        TransferOptions {
            parent_folder: config.drive_folder_id().map(str::to_string),
            temp_dir: config.temp_dir(),
        },
    );
    let dispatcher = Dispatcher::new(
        transport,
        storage,
        config.authorized_users().clone(),
        orchestrator,
    );

    tracing::info!(
        authorized_users = config.authorized_users().len(),
        temp_dir = %config.temp_dir().display(),
        "Services initialized"
    );

    Ok(Services {
        telegram,
        dispatcher: Arc::new(dispatcher),
    })
}
