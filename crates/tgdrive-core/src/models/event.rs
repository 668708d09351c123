//! Inbound events, independent of how they were delivered.

use serde::{Deserialize, Serialize};

use super::file::IncomingFile;

pub type ChatId = i64;
pub type SenderId = i64;

/// Where a reply to an inbound message should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyTarget {
    pub chat_id: ChatId,
    pub message_id: i64,
}

/// A message the bot sent and may edit later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageHandle {
    pub chat_id: ChatId,
    pub message_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Status,
    Unknown(String),
}

impl Command {
    /// Parse the leading `/command` of a message, ignoring a `@botname` suffix
    /// and any arguments. Returns `None` for text that is not a command.
    pub fn parse(text: &str) -> Option<Command> {
        let first = text.trim_start().split_whitespace().next()?;
        let name = first.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name).to_lowercase();
        if name.is_empty() {
            return None;
        }

        Some(match name.as_str() {
            "start" => Command::Start,
            "help" => Command::Help,
            "status" => Command::Status,
            _ => Command::Unknown(name),
        })
    }
}

/// One inbound chat event as consumed by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Command {
        sender: SenderId,
        reply_to: ReplyTarget,
        command: Command,
    },
    Text {
        sender: SenderId,
        reply_to: ReplyTarget,
        text: String,
    },
    File {
        sender: SenderId,
        reply_to: ReplyTarget,
        file: IncomingFile,
    },
    /// A message kind the bot has no handler for (stickers, locations, ...).
    Unsupported {
        sender: SenderId,
        reply_to: ReplyTarget,
    },
}

impl InboundEvent {
    pub fn sender(&self) -> SenderId {
        match self {
            InboundEvent::Command { sender, .. }
            | InboundEvent::Text { sender, .. }
            | InboundEvent::File { sender, .. }
            | InboundEvent::Unsupported { sender, .. } => *sender,
        }
    }

    pub fn reply_to(&self) -> ReplyTarget {
        match self {
            InboundEvent::Command { reply_to, .. }
            | InboundEvent::Text { reply_to, .. }
            | InboundEvent::File { reply_to, .. }
            | InboundEvent::Unsupported { reply_to, .. } => *reply_to,
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            InboundEvent::Command { .. } => "command",
            InboundEvent::Text { .. } => "text",
            InboundEvent::File { .. } => "file",
            InboundEvent::Unsupported { .. } => "unsupported",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_commands() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("/help@drive_relay_bot"), Some(Command::Help));
        assert_eq!(Command::parse("  /STATUS now"), Some(Command::Status));
    }

    #[test]
    fn test_parse_unknown_and_plain_text() {
        assert_eq!(
            Command::parse("/upload x"),
            Some(Command::Unknown("upload".to_string()))
        );
        assert_eq!(Command::parse("hello /start"), None);
        assert_eq!(Command::parse("/"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn test_event_accessors() {
        let reply_to = ReplyTarget {
            chat_id: 5,
            message_id: 9,
        };
        let event = InboundEvent::Text {
            sender: 7,
            reply_to,
            text: "hi".to_string(),
        };
        assert_eq!(event.sender(), 7);
        assert_eq!(event.reply_to(), reply_to);
        assert_eq!(event.kind(), "text");
    }
}
