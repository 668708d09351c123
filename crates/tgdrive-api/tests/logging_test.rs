//! Request logging must never carry the bot token from the webhook URI.

mod helpers;

use helpers::{setup_test_app, webhook_config, webhook_path, BOT_TOKEN};
use serde_json::json;
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test(flavor = "current_thread")]
async fn test_webhook_request_logs_route_template_not_token() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(logs.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let app = setup_test_app(webhook_config(), 8);
    let response = app
        .server
        .post(&webhook_path(BOT_TOKEN))
        .json(&json!({ "update_id": 7 }))
        .await;
    assert_eq!(response.status_code(), 200);

    let output = logs.contents();
    assert!(output.contains("/webhook/{token}"), "{}", output);
    assert!(!output.contains(BOT_TOKEN), "{}", output);
}

#[tokio::test(flavor = "current_thread")]
async fn test_unknown_path_is_logged_without_uri() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(logs.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let app = setup_test_app(webhook_config(), 8);
    let response = app.server.post("/webhook/wrong/extra").await;
    assert_eq!(response.status_code(), 404);

    assert!(!logs.contents().contains("wrong"));
}
