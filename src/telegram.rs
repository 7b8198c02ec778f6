//! Read-only view of the Telegram message fields this adapter consumes:
//! text, caption, entity annotations and the optional reply parent.

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Message {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub entities: Vec<MessageEntity>,
    #[serde(default)]
    pub caption_entities: Vec<MessageEntity>,
    #[serde(default)]
    pub reply_to_message: Option<Box<Message>>,
}

/// A typed span annotation on message text or caption. Offsets and lengths
/// count code points, not bytes.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageEntity {
    #[serde(flatten)]
    pub kind: MessageEntityKind,
    pub offset: usize,
    pub length: usize,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageEntityKind {
    Url,
    TextLink { url: String },
    #[serde(other)]
    Other,
}

/// Scans the message, then its reply parent, for the first URL. A plain
/// URL entity yields the covered substring of the text (or caption); a
/// message without plain entities falls back to the first text-link
/// caption entity and yields its embedded URL. `None` when neither
/// message carries a qualifying entity.
pub fn first_url(message: &Message) -> Option<String> {
    let mut messages = vec![message];
    if let Some(reply) = message.reply_to_message.as_deref() {
        messages.push(reply);
    }

    for message in messages {
        if !message.entities.is_empty() {
            for entity in &message.entities {
                if entity.kind == MessageEntityKind::Url {
                    let text = message.text.as_deref().or(message.caption.as_deref())?;
                    return slice_entity(text, entity);
                }
            }
        } else {
            for entity in &message.caption_entities {
                if let MessageEntityKind::TextLink { url } = &entity.kind {
                    return Some(url.clone());
                }
            }
        }
    }
    None
}

fn slice_entity(text: &str, entity: &MessageEntity) -> Option<String> {
    let covered: String = text
        .chars()
        .skip(entity.offset)
        .take(entity.length)
        .collect();
    (!covered.is_empty()).then_some(covered)
}
