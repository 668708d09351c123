use thiserror::Error;

/// Chat transport errors
#[derive(Debug, Error)]
pub enum TelegramError {
    /// Network or protocol failure. Never includes the request URL, which embeds the bot token.
    #[error("Request failed: {0}")]
    Http(String),

    #[error("Telegram API error {code}: {description}")]
    Api { code: i64, description: String },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("File is not available for download: {0}")]
    FileUnavailable(String),
}

pub type TelegramResult<T> = Result<T, TelegramError>;

impl From<reqwest::Error> for TelegramError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TelegramError::Decode(err.without_url().to_string())
        } else {
            TelegramError::Http(err.without_url().to_string())
        }
    }
}
