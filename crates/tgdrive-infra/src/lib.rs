//! tgdrive Infrastructure Library
//!
//! Shared infrastructure for the tgdrive binary:
//! - Telemetry initialization (tracing-subscriber)
//! - The JSON body returned for HTTP errors

pub mod error;
pub mod telemetry;

// Re-export commonly used types
pub use error::ErrorResponse;
pub use telemetry::{init_telemetry, LogFormat};
