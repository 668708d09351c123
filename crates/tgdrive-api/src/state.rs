//! Shared state for HTTP handlers.

use std::sync::Arc;
use tgdrive_core::{Config, InboundEvent};
use tokio::sync::mpsc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Queue consumed by the dispatcher.
    pub events: mpsc::Sender<InboundEvent>,
}

impl AppState {
    pub fn new(config: Arc<Config>, events: mpsc::Sender<InboundEvent>) -> Self {
        Self { config, events }
    }
}
