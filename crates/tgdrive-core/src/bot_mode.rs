use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// How inbound chat events reach the process.
///
/// Both modes feed the same dispatcher; only the event source differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotMode {
    /// Background long-polling of the chat transport.
    #[default]
    Polling,
    /// Push delivery to an HTTP route registered with the chat transport.
    Webhook,
}

impl FromStr for BotMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "polling" | "poll" => Ok(BotMode::Polling),
            "webhook" => Ok(BotMode::Webhook),
            _ => Err(anyhow::anyhow!("Invalid bot mode: {}", s)),
        }
    }
}

impl Display for BotMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            BotMode::Polling => write!(f, "polling"),
            BotMode::Webhook => write!(f, "webhook"),
        }
    }
}
