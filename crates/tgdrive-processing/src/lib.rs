//! tgdrive Processing Library
//!
//! The transfer pipeline: authorization gate, progress reporting, the
//! download-then-upload orchestrator and the dispatcher that routes inbound
//! events to handlers. Everything here talks to the outside world only through
//! the [`tgdrive_telegram::ChatTransport`] and [`tgdrive_storage::Storage`]
//! traits.

pub mod authorization;
pub mod dispatcher;
pub mod messages;
pub mod orchestrator;
pub mod progress;
pub mod status;
pub mod temp_file;

pub use authorization::{authorize, enforce};
pub use dispatcher::Dispatcher;
pub use orchestrator::{TransferOptions, TransferOrchestrator};
pub use progress::{humanize_size, render_bar, ProgressThrottle};
pub use status::StatusMessage;
pub use temp_file::ScopedTempFile;
