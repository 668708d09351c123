//! Fixed limits of the transfer pipeline.

/// Hard ceiling on the declared size of a single file (6 GiB).
pub const MAX_FILE_SIZE_BYTES: u64 = 6 * 1024 * 1024 * 1024;

/// Chunk size used when pulling content from the chat transport (1 MiB).
pub const DOWNLOAD_CHUNK_SIZE: usize = 1024 * 1024;

/// Chunk size used for resumable uploads to the storage provider (2 MiB).
///
/// Must stay a multiple of 256 KiB for the Drive resumable protocol.
pub const UPLOAD_CHUNK_SIZE: usize = 2 * 1024 * 1024;

/// Minimum percentage advance between two download status edits.
pub const DOWNLOAD_PROGRESS_STEP: i64 = 3;

/// Minimum percentage advance between two upload status edits.
pub const UPLOAD_PROGRESS_STEP: i64 = 5;

/// Width, in cells, of the rendered progress bar.
pub const PROGRESS_BAR_WIDTH: usize = 20;

/// Display name used when the chat transport does not supply one.
pub const DEFAULT_FILE_NAME: &str = "unnamed_file";

/// OAuth scope requested for the storage provider.
pub const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";

pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_DRIVE_API_URL: &str = "https://www.googleapis.com";
