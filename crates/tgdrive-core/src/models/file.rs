use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_FILE_NAME;

/// A file announced by the chat transport.
///
/// `file_size` is the size declared by the sender. It drives progress math and
/// the size ceiling only; actual byte counts are never checked against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingFile {
    /// Opaque handle used to retrieve the content from the chat transport.
    pub file_id: String,
    pub file_name: String,
    pub file_size: u64,
}

impl IncomingFile {
    pub fn new(file_id: impl Into<String>, file_name: Option<String>, file_size: u64) -> Self {
        let file_name = file_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());

        Self {
            file_id: file_id.into(),
            file_name,
            file_size,
        }
    }
}

/// What the storage provider assigned to a completed upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    pub file_id: String,
    pub web_view_link: Option<String>,
}

impl UploadResult {
    pub fn link_or_default(&self) -> &str {
        self.web_view_link.as_deref().unwrap_or("Link not available")
    }
}
