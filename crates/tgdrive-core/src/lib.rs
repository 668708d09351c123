//! tgdrive Core Library
//!
//! This crate provides the configuration, error taxonomy and domain models
//! shared by every tgdrive component: the storage provider client, the chat
//! transport client, the transfer pipeline and the HTTP host.

pub mod bot_mode;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use bot_mode::BotMode;
pub use config::{BaseConfig, BotConfig, Config};
pub use error::{AppError, ErrorMetadata, LogLevel, TransferError};
pub use models::{
    AuthorizationPolicy, Authorization, ChatId, Command, InboundEvent, IncomingFile,
    MessageHandle, ReplyTarget, Secret, SenderId, ServiceAccountKey, UploadResult,
};
