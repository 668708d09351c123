//! User-facing message texts. All messages are sent as plain text.

use tgdrive_core::{IncomingFile, UploadResult};
use tgdrive_storage::StorageQuota;

use crate::progress::{humanize_size, progress_bar};

pub const UNAUTHORIZED: &str = "❌ You are not authorized to use this bot.";

pub const UNSUPPORTED_MESSAGE: &str = "❌ Please send a file document.";

pub const PREPARING_DOWNLOAD: &str = "📥 Preparing download...";

pub fn welcome() -> String {
    "🚀 Welcome to Telegram to Google Drive Bot!\n\n\
     📁 Send me any file and I'll upload it to your Google Drive\n\
     💾 I can handle files up to 6GB in size\n\
     📊 You'll see progress updates during upload\n\n\
     Use /help to see all available commands."
        .to_string()
}

pub fn help() -> String {
    "📖 Available Commands:\n\n\
     🏁 /start - Start the bot\n\
     ❓ /help - Show this help message\n\
     📊 /status - Check bot and Drive status\n\n\
     📤 To upload files:\n\
     Just send me any file and I'll upload it to Google Drive automatically!"
        .to_string()
}

pub fn greeting() -> String {
    "👋 Hello! I'm ready to help you upload files to Google Drive.\n\n\
     📤 To upload a file:\n\
     Simply send me any document, video, photo, or file!\n\n\
     ❓ Need help? Use /help to see all commands."
        .to_string()
}

/// `/status` report. `quota` is the provider's answer or its error text.
pub fn status_report(quota: Result<StorageQuota, String>) -> String {
    let mut text = String::from("🤖 Bot Status Report:\n\n✅ Bot is running smoothly\n");
    match quota {
        Ok(quota) => {
            text.push_str("✅ Google Drive connected successfully\n");
            text.push_str(&format!("💾 Storage used: {:.2}GB", quota.usage_gb()));
            if let (Some(total), Some(percent)) = (quota.limit_gb(), quota.usage_percent()) {
                text.push_str(&format!(" of {:.2}GB ({:.1}%)", total, percent));
            }
        }
        Err(error) => {
            text.push_str(&format!("❌ Google Drive connection error:\n{}", error));
        }
    }
    text
}

pub fn file_too_large(file: &IncomingFile) -> String {
    format!(
        "❌ File too large!\n\n\
         📁 File: {}\n\
         📏 Size: {}\n\
         🚫 Maximum allowed: 6GB\n\n\
         Please send a smaller file.",
        file.file_name,
        humanize_size(file.file_size)
    )
}

pub fn file_received(file: &IncomingFile) -> String {
    format!(
        "📥 File Received!\n\n\
         📁 Name: {}\n\
         📏 Size: {}\n\n\
         ⏳ Starting download from Telegram...",
        file.file_name,
        humanize_size(file.file_size)
    )
}

pub fn downloading(progress: u8, downloaded: u64, total: u64) -> String {
    format!(
        "📥 Downloading from Telegram\n\n\
         {}\n\n\
         📊 Progress: {} / {}\n\
         ⚡ Status: {}% complete",
        progress_bar(progress),
        humanize_size(downloaded),
        humanize_size(total),
        progress
    )
}

pub fn download_complete(file: &IncomingFile) -> String {
    format!(
        "✅ Download Complete!\n\n\
         ☁️ Starting upload to Google Drive...\n\
         📁 File: {}",
        file.file_name
    )
}

pub fn uploading(progress: u8, uploaded: u64, file: &IncomingFile) -> String {
    format!(
        "☁️ Uploading to Google Drive\n\n\
         {}\n\n\
         📊 Progress: {} / {}\n\
         ⚡ Status: {}% complete\n\
         📁 File: {}",
        progress_bar(progress),
        humanize_size(uploaded),
        humanize_size(file.file_size),
        progress,
        file.file_name
    )
}

pub fn upload_successful(file: &IncomingFile, result: &UploadResult) -> String {
    format!(
        "🎉 Upload Successful!\n\n\
         📁 File: {}\n\
         📏 Size: {}\n\
         🆔 Drive ID: {}\n\n\
         🔗 Open in Google Drive: {}\n\n\
         ✅ Your file is now safely stored in Google Drive!",
        file.file_name,
        humanize_size(file.file_size),
        result.file_id,
        result.link_or_default()
    )
}

/// Provider error bodies can be long; Telegram rejects texts over 4096 characters.
const MAX_ERROR_CHARS: usize = 1000;

fn clip(error: &str) -> String {
    if error.chars().count() <= MAX_ERROR_CHARS {
        return error.to_string();
    }
    let mut clipped: String = error.chars().take(MAX_ERROR_CHARS).collect();
    clipped.push_str("...");
    clipped
}

pub fn upload_failed(file: &IncomingFile, error: &str) -> String {
    format!(
        "❌ Google Drive Upload Failed\n\n\
         📁 File: {}\n\
         🚫 Error: {}\n\n\
         Please try again or contact support.",
        file.file_name,
        clip(error)
    )
}

pub fn error_processing(file: &IncomingFile, error: &str) -> String {
    format!(
        "❌ Error Processing File\n\n\
         📁 File: {}\n\
         🚫 Error: {}\n\n\
         Please try again or send a different file.",
        file.file_name,
        clip(error)
    )
}
