use anyhow::{Context, Result};
use tgdrive_core::Config;
use tgdrive_telegram::TelegramClient;

/// Callback URL Telegram should POST updates to.
///
/// The bot token in the path keeps strangers from injecting updates.
pub fn webhook_url(base_url: &str, token: &str) -> String {
    format!("{}/webhook/{}", base_url.trim_end_matches('/'), token)
}

/// Register the callback URL with Telegram.
pub async fn register(client: &TelegramClient, config: &Config) -> Result<()> {
    let base_url = config
        .webhook_base_url()
        .context("Webhook mode requires WEBHOOK_BASE_URL")?;
    let url = webhook_url(base_url, config.telegram_bot_token().expose());

    client
        .set_webhook(&url)
        .await
        .context("Failed to register webhook with Telegram")?;

    tracing::info!(base_url = base_url, "Webhook registered");
    Ok(())
}
