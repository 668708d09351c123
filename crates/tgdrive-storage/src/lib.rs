//! tgdrive Storage Library
//!
//! This crate provides the storage-provider abstraction used by the transfer
//! pipeline and its Google Drive v3 implementation.
//!
//! # Upload model
//!
//! Uploads are resumable sessions. The caller creates a session with
//! [`Storage::create_resumable_upload`] and then calls
//! [`UploadSession::advance`] until it yields [`UploadStep::Complete`]. Each
//! call submits at most one chunk and reports the fraction the provider has
//! acknowledged so far.

pub mod auth;
pub mod drive;
pub mod factory;
pub mod traits;

// Re-export commonly used types
pub use auth::{ServiceAccountTokenSource, StaticTokenSource, TokenSource};
pub use drive::GoogleDriveStorage;
pub use factory::create_storage;
pub use traits::{
    ContentSource, FileMetadata, Storage, StorageError, StorageQuota, StorageResult,
    UploadSession, UploadStep,
};
