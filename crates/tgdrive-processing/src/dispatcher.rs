//! Dispatcher
//!
//! Consumes [`InboundEvent`]s from whichever event source is active and routes
//! each one to its handler on its own task. Sessions never share state, so
//! there is no locking between them.

use std::sync::Arc;
use tgdrive_core::{AuthorizationPolicy, Authorization, Command, InboundEvent, ReplyTarget};
use tgdrive_storage::Storage;
use tgdrive_telegram::ChatTransport;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::authorization::enforce;
use crate::messages;
use crate::orchestrator::TransferOrchestrator;

pub struct Dispatcher {
    transport: Arc<dyn ChatTransport>,
    storage: Arc<dyn Storage>,
    policy: AuthorizationPolicy,
    orchestrator: TransferOrchestrator,
}

impl Dispatcher {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        storage: Arc<dyn Storage>,
        policy: AuthorizationPolicy,
        orchestrator: TransferOrchestrator,
    ) -> Self {
        Self {
            transport,
            storage,
            policy,
            orchestrator,
        }
    }

    /// Handle one event to completion.
    pub async fn handle(&self, event: InboundEvent) {
        let reply_to = event.reply_to();
        let decision = enforce(
            self.transport.as_ref(),
            &self.policy,
            event.sender(),
            &reply_to,
        )
        .await;
        if decision == Authorization::Denied {
            return;
        }

        tracing::debug!(kind = event.kind(), sender_id = event.sender(), "Handling event");

        match event {
            InboundEvent::Command { command, .. } => self.handle_command(&reply_to, command).await,
            InboundEvent::Text { .. } => self.reply(&reply_to, &messages::greeting()).await,
            InboundEvent::File { file, .. } => {
                // Outcome is already reported to the sender and logged.
                let _ = self.orchestrator.run(reply_to, &file).await;
            }
            InboundEvent::Unsupported { .. } => {
                self.reply(&reply_to, messages::UNSUPPORTED_MESSAGE).await
            }
        }
    }

    async fn handle_command(&self, reply_to: &ReplyTarget, command: Command) {
        let text = match command {
            Command::Start => messages::welcome(),
            Command::Help => messages::help(),
            Command::Status => {
                let quota = self.storage.storage_quota().await.map_err(|e| {
                    tracing::warn!(error = %e, "Storage quota check failed");
                    e.to_string()
                });
                messages::status_report(quota)
            }
            Command::Unknown(name) => {
                tracing::debug!(command = %name, "Unknown command");
                messages::greeting()
            }
        };
        self.reply(reply_to, &text).await;
    }

    async fn reply(&self, reply_to: &ReplyTarget, text: &str) {
        if let Err(e) = self.transport.send_message(reply_to, text).await {
            tracing::warn!(chat_id = reply_to.chat_id, error = %e, "Failed to send reply");
        }
    }

    /// Consume events until the channel closes or `shutdown` fires.
    ///
    /// Each event runs on its own task; this loop never waits for one to finish.
    pub async fn run(
        self: Arc<Self>,
        mut events: mpsc::Receiver<InboundEvent>,
        shutdown: CancellationToken,
    ) {
        tracing::info!("Dispatcher started");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Dispatcher shutting down");
                    break;
                }
                event = events.recv() => {
                    let Some(event) = event else {
                        tracing::info!("Event channel closed");
                        break;
                    };
                    let dispatcher = self.clone();
                    tokio::spawn(async move {
                        dispatcher.handle(event).await;
                    });
                }
            }
        }
    }
}
