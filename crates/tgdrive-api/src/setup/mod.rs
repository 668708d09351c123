//! Application setup and initialization
//!
//! Builds every long-lived component from the configuration. Nothing here
//! starts background work; see [`server::run`].

pub mod routes;
pub mod server;
pub mod services;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use tgdrive_core::{Config, InboundEvent};
use tgdrive_infra::LogFormat;
use tgdrive_processing::Dispatcher;
use tgdrive_telegram::TelegramClient;
use tokio::sync::mpsc;

/// Bound on queued updates. Webhook deliveries beyond it get 503 and are retried.
const EVENT_QUEUE_CAPACITY: usize = 256;

/// Everything `server::run` needs to drive the bot.
pub struct Application {
    pub state: AppState,
    pub router: axum::Router,
    pub telegram: TelegramClient,
    pub dispatcher: Arc<Dispatcher>,
    pub events_rx: mpsc::Receiver<InboundEvent>,
}

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<Application> {
    validation::validate_config(&config).context("Configuration validation failed")?;

    let log_format: LogFormat = config
        .log_format()
        .parse()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;
    tgdrive_infra::init_telemetry(log_format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    crate::error::set_hide_error_details(config.is_production());

    tracing::info!(
        environment = config.environment(),
        bot_mode = %config.bot_mode(),
        "Configuration loaded and validated successfully"
    );

    let services = services::initialize_services(&config).await?;

    let (events_tx, events_rx) = mpsc::channel(EVENT_QUEUE_CAPACITY);
    let state = AppState::new(Arc::new(config), events_tx);
    let router = routes::setup_routes(state.clone());

    Ok(Application {
        state,
        router,
        telegram: services.telegram,
        dispatcher: services.dispatcher,
        events_rx,
    })
}
