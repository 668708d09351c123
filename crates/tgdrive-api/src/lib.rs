//! tgdrive API Library
//!
//! Process wiring for the bot: configuration validation, the HTTP surface
//! (health checks and the webhook route), the two event sources and graceful
//! shutdown.

pub mod error;
pub mod event_source;
pub mod setup;
pub mod state;

pub use error::HttpAppError;
pub use state::AppState;
