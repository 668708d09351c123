//! Route setup

mod health;
mod webhook;

use axum::{
    extract::{MatchedPath, Request},
    routing::{get, post},
    Router,
};
use tgdrive_core::BotMode;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::state::AppState;

/// Updates are small JSON documents; file content never flows through here.
const MAX_UPDATE_BODY_BYTES: usize = 1024 * 1024;

pub fn setup_routes(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(health::home))
        .route("/health", get(health::health_check));

    if state.config.bot_mode() == BotMode::Webhook {
        router = router.route("/webhook/{token}", post(webhook::receive_update));
    }

    router
        .layer(RequestBodyLimitLayer::new(MAX_UPDATE_BODY_BYTES))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .with_state(state)
}

/// The webhook URI carries the bot token, so spans record the route template.
fn request_span(request: &Request) -> tracing::Span {
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(MatchedPath::as_str)
        .unwrap_or("unmatched");
    tracing::info_span!("request", method = %request.method(), path = %path)
}
