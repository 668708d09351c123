use axum::{response::IntoResponse, Json};
use serde_json::json;

pub async fn home() -> &'static str {
    "🤖 Telegram Bot is running! ✅"
}

/// Liveness probe for the hosting platform. Never touches Telegram or Drive.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "bot": "running"
    }))
}
