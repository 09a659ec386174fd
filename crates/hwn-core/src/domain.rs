use std::fmt;

/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Where notifications go: a numeric chat or a public `@channelusername`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Recipient {
    Id(ChatId),
    ChannelUsername(String),
}

impl Recipient {
    /// Parse a chat identifier as Telegram accepts it; `None` for anything else.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(id) = raw.parse::<i64>() {
            return Some(Recipient::Id(ChatId(id)));
        }
        match raw.strip_prefix('@') {
            Some(name) if !name.is_empty() && !name.contains(char::is_whitespace) => {
                Some(Recipient::ChannelUsername(raw.to_string()))
            }
            _ => None,
        }
    }
}

impl From<ChatId> for Recipient {
    fn from(id: ChatId) -> Self {
        Recipient::Id(id)
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recipient::Id(id) => write!(f, "{}", id.0),
            Recipient::ChannelUsername(name) => f.write_str(name),
        }
    }
}

/// Unix seconds used as the `from_date` cursor of review queries.
pub type Timestamp = i64;

/// Current wall-clock time as unix seconds.
pub fn now_timestamp() -> Timestamp {
    chrono::Utc::now().timestamp()
}

/// Telegram message id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub i32);

/// A stable reference to a delivered message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}
