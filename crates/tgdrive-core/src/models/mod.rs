//! Data models for the application
//!
//! Everything here is transient and scoped to a single inbound event or to the
//! process lifetime (configuration-derived policy); nothing is persisted.

mod authorization;
mod event;
mod file;
mod secret;
mod service_account;

pub use authorization::{Authorization, AuthorizationPolicy};
pub use event::{ChatId, Command, InboundEvent, MessageHandle, ReplyTarget, SenderId};
pub use file::{IncomingFile, UploadResult};
pub use secret::Secret;
pub use service_account::ServiceAccountKey;
