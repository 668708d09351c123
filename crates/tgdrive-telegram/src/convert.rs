//! Update → InboundEvent conversion.

use tgdrive_core::{Command, InboundEvent, IncomingFile, ReplyTarget};

use crate::types::{Message, Update};

/// Convert a raw update into the event the dispatcher consumes.
///
/// Returns `None` for updates that carry no message or no sender (channel
/// posts, service updates); those are ignored.
pub fn inbound_event(update: Update) -> Option<InboundEvent> {
    let message = update.message?;
    let sender = message.from.as_ref()?.id;
    let reply_to = ReplyTarget {
        chat_id: message.chat.id,
        message_id: message.message_id,
    };

    if let Some(file) = attachment(&message) {
        return Some(InboundEvent::File {
            sender,
            reply_to,
            file,
        });
    }

    match message.text {
        Some(text) => match Command::parse(&text) {
            Some(command) => Some(InboundEvent::Command {
                sender,
                reply_to,
                command,
            }),
            None => Some(InboundEvent::Text {
                sender,
                reply_to,
                text,
            }),
        },
        None => Some(InboundEvent::Unsupported { sender, reply_to }),
    }
}

fn attachment(message: &Message) -> Option<IncomingFile> {
    if let Some(doc) = &message.document {
        return Some(IncomingFile::new(
            doc.file_id.clone(),
            doc.file_name.clone(),
            doc.file_size.unwrap_or(0),
        ));
    }
    if let Some(video) = &message.video {
        return Some(IncomingFile::new(
            video.file_id.clone(),
            video.file_name.clone(),
            video.file_size.unwrap_or(0),
        ));
    }
    if let Some(audio) = &message.audio {
        return Some(IncomingFile::new(
            audio.file_id.clone(),
            audio.file_name.clone(),
            audio.file_size.unwrap_or(0),
        ));
    }
    if let Some(animation) = &message.animation {
        return Some(IncomingFile::new(
            animation.file_id.clone(),
            animation.file_name.clone(),
            animation.file_size.unwrap_or(0),
        ));
    }
    if let Some(voice) = &message.voice {
        return Some(IncomingFile::new(
            voice.file_id.clone(),
            None,
            voice.file_size.unwrap_or(0),
        ));
    }
    // Photos arrive as several sizes; keep the largest.
    message
        .photo
        .iter()
        .max_by_key(|p| (u64::from(p.width) * u64::from(p.height), p.file_size))
        .map(|p| IncomingFile::new(p.file_id.clone(), None, p.file_size.unwrap_or(0)))
}
