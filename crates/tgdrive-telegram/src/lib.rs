//! tgdrive Telegram Library
//!
//! Chat-transport collaborator: a thin Telegram Bot API client, the
//! [`ChatTransport`] trait the transfer pipeline talks through, and the
//! conversion from raw updates into [`tgdrive_core::InboundEvent`]s.

pub mod chunked;
pub mod client;
pub mod convert;
pub mod error;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use chunked::rechunk;
pub use client::TelegramClient;
pub use convert::inbound_event;
pub use error::{TelegramError, TelegramResult};
pub use transport::{ChatTransport, ChunkStream, RemoteFile};
pub use types::{BotUser, Update};
