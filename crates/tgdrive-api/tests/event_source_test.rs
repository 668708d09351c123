//! Event source tests against a mocked Bot API.

mod helpers;

use helpers::{webhook_config, BOT_TOKEN};
use mockito::Matcher;
use serde_json::json;
use std::time::Duration;
use tgdrive_api::event_source::{webhook, PollingSource};
use tgdrive_core::{Command, InboundEvent, Secret};
use tgdrive_telegram::TelegramClient;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

fn client(server: &mockito::ServerGuard) -> TelegramClient {
    TelegramClient::new(reqwest::Client::new(), server.url(), Secret::new(BOT_TOKEN))
}

#[tokio::test]
async fn test_polling_delivers_updates_and_stops_on_shutdown() {
    let mut server = mockito::Server::new_async().await;
    let delete = server
        .mock("POST", format!("/bot{}/deleteWebhook", BOT_TOKEN).as_str())
        .with_status(200)
        .with_body(r#"{"ok":true,"result":true}"#)
        .create_async()
        .await;
    server
        .mock("POST", format!("/bot{}/getUpdates", BOT_TOKEN).as_str())
        .with_status(200)
        .with_body(
            json!({
                "ok": true,
                "result": [{
                    "update_id": 7,
                    "message": {
                        "message_id": 1,
                        "from": { "id": 9 },
                        "chat": { "id": 9, "type": "private" },
                        "text": "/help"
                    }
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let (tx, mut rx) = mpsc::channel(1);
    let shutdown = CancellationToken::new();
    let source = PollingSource::new(client(&server), 1, tx);
    let handle = tokio::spawn(source.run(shutdown.clone()));

    let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("event within timeout")
        .expect("channel open");
    match event {
        InboundEvent::Command { sender, command, .. } => {
            assert_eq!(sender, 9);
            assert_eq!(command, Command::Help);
        }
        other => panic!("unexpected event: {:?}", other),
    }

    shutdown.cancel();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("polling stops after cancel")
        .expect("task did not panic");
    delete.assert_async().await;
}

#[tokio::test]
async fn test_polling_survives_api_errors_until_cancelled() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", format!("/bot{}/deleteWebhook", BOT_TOKEN).as_str())
        .with_status(200)
        .with_body(r#"{"ok":true,"result":true}"#)
        .create_async()
        .await;
    server
        .mock("POST", format!("/bot{}/getUpdates", BOT_TOKEN).as_str())
        .with_status(409)
        .with_body(r#"{"ok":false,"error_code":409,"description":"Conflict"}"#)
        .create_async()
        .await;

    let (tx, mut rx) = mpsc::channel(1);
    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(PollingSource::new(client(&server), 1, tx).run(shutdown.clone()));

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!handle.is_finished());
    assert!(rx.try_recv().is_err());

    shutdown.cancel();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("polling stops during backoff")
        .expect("task did not panic");
}

#[tokio::test]
async fn test_webhook_registration_uses_token_path() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", format!("/bot{}/setWebhook", BOT_TOKEN).as_str())
        .match_body(Matcher::PartialJson(json!({
            "url": format!("https://bot.example.com/webhook/{}", BOT_TOKEN)
        })))
        .with_status(200)
        .with_body(r#"{"ok":true,"result":true}"#)
        .create_async()
        .await;

    webhook::register(&client(&server), &webhook_config())
        .await
        .expect("registration succeeds");

    mock.assert_async().await;
}

#[tokio::test]
async fn test_webhook_registration_failure_is_reported() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", format!("/bot{}/setWebhook", BOT_TOKEN).as_str())
        .with_status(400)
        .with_body(r#"{"ok":false,"error_code":400,"description":"Bad Request: bad webhook"}"#)
        .create_async()
        .await;

    let err = webhook::register(&client(&server), &webhook_config())
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Failed to register webhook"));
}
