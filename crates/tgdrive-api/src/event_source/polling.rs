use std::time::Duration;
use tgdrive_core::InboundEvent;
use tgdrive_telegram::{inbound_event, TelegramClient};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Long-polling loop over `getUpdates`.
pub struct PollingSource {
    client: TelegramClient,
    timeout_secs: u64,
    events: mpsc::Sender<InboundEvent>,
}

impl PollingSource {
    pub fn new(
        client: TelegramClient,
        timeout_secs: u64,
        events: mpsc::Sender<InboundEvent>,
    ) -> Self {
        Self {
            client,
            timeout_secs,
            events,
        }
    }

    /// Poll until `shutdown` is cancelled or the dispatcher queue closes.
    pub async fn run(self, shutdown: CancellationToken) {
        // getUpdates is rejected while a webhook is registered.
        if let Err(e) = self.client.delete_webhook().await {
            tracing::warn!(error = %e, "Failed to delete webhook before polling");
        }

        let mut offset: Option<i64> = None;

        loop {
            let result = tokio::select! {
                _ = shutdown.cancelled() => break,
                result = self.client.get_updates(offset, self.timeout_secs) => result,
            };

            match result {
                Ok(updates) => {
                    for update in updates {
                        offset = Some(update.update_id + 1);
                        let Some(event) = inbound_event(update) else {
                            continue;
                        };
                        let sent = tokio::select! {
                            _ = shutdown.cancelled() => return,
                            sent = self.events.send(event) => sent,
                        };
                        if sent.is_err() {
                            tracing::info!("Event queue closed, stopping polling");
                            return;
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        retry_in_secs = RETRY_DELAY.as_secs(),
                        "getUpdates failed"
                    );
                    tokio::select! {
                        _ = shutdown.cancelled() => break,
                        _ = tokio::time::sleep(RETRY_DELAY) => {}
                    }
                }
            }
        }

        tracing::info!("Polling stopped");
    }
}
