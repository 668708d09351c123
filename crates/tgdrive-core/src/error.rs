//! Error types module
//!
//! `AppError` covers failures of the process surface (HTTP routes, startup).
//! `TransferError` is the taxonomy of a single file transfer; every variant is
//! turned into a user-visible chat message by the pipeline and never crashes
//! the process.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues and rejected requests
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata describing how an error should be presented and logged.
pub trait ErrorMetadata {
    /// HTTP status code to return when surfaced over HTTP
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "UPLOAD_FAILED")
    fn error_code(&self) -> &'static str;

    /// Whether retrying the same operation could succeed
    fn is_recoverable(&self) -> bool;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::NotFound(_) => "NotFound",
            AppError::Unavailable(_) => "Unavailable",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        match self {
            AppError::InvalidInput(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::Unavailable(_) => 503,
            AppError::Internal(_) | AppError::InternalWithSource { .. } => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Unavailable(_) => "SERVICE_UNAVAILABLE",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "INTERNAL_ERROR",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Unavailable(_) | AppError::Internal(_) | AppError::InternalWithSource { .. }
        )
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Unavailable(msg) => msg.clone(),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Internal server error".to_string()
            }
        }
    }

    fn is_sensitive(&self) -> bool {
        matches!(
            self,
            AppError::Internal(_) | AppError::InternalWithSource { .. }
        )
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::InvalidInput(_) | AppError::NotFound(_) => LogLevel::Debug,
            AppError::Unavailable(_) => LogLevel::Warn,
            AppError::Internal(_) | AppError::InternalWithSource { .. } => LogLevel::Error,
        }
    }
}

/// Why a file transfer ended without an upload result.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("File too large: {size} bytes exceeds limit of {limit} bytes")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Download failed: {0}")]
    Download(String),

    /// Carries the storage provider's error text verbatim.
    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Unexpected failure: {0}")]
    Unexpected(String),
}

impl TransferError {
    /// The text shown to the sender, without the variant prefix.
    pub fn detail(&self) -> String {
        match self {
            TransferError::FileTooLarge { size, limit } => {
                format!("{} bytes exceeds {} bytes", size, limit)
            }
            TransferError::Download(msg)
            | TransferError::Upload(msg)
            | TransferError::Unexpected(msg) => msg.clone(),
        }
    }

    /// Machine-readable code for structured logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            TransferError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            TransferError::Download(_) => "DOWNLOAD_FAILED",
            TransferError::Upload(_) => "UPLOAD_FAILED",
            TransferError::Unexpected(_) => "UNEXPECTED_FAILURE",
        }
    }

    /// Whether sending the same file again could succeed.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, TransferError::FileTooLarge { .. })
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            TransferError::FileTooLarge { .. } => LogLevel::Warn,
            TransferError::Download(_)
            | TransferError::Upload(_)
            | TransferError::Unexpected(_) => LogLevel::Error,
        }
    }
}

impl From<io::Error> for TransferError {
    fn from(err: io::Error) -> Self {
        TransferError::Unexpected(err.to_string())
    }
}
