use serde::{Deserialize, Serialize};

/// Telegram chat categories the bot cares about. Anything the API adds
/// later lands in `Unknown` instead of failing deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
    #[serde(other)]
    Unknown,
}

impl ChatKind {
    pub fn is_group(self) -> bool {
        matches!(self, ChatKind::Group | ChatKind::Supergroup)
    }
}

/// Identity tag carried by every inbound event: which chat, which user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatContext {
    pub chat_id: i64,
    pub kind: ChatKind,
    pub title: Option<String>,
    pub user_id: i64,
    pub username: Option<String>,
}

impl ChatContext {
    pub fn session_key(&self) -> SessionKey {
        SessionKey {
            chat_id: self.chat_id,
            user_id: self.user_id,
        }
    }
}

/// A form in progress belongs to exactly one (chat, user) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub chat_id: i64,
    pub user_id: i64,
}

/// Outgoing text plus the rendering mode the transport should use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub markdown: bool,
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Reply {
        Reply {
            text: text.into(),
            markdown: false,
        }
    }

    pub fn markdown(text: impl Into<String>) -> Reply {
        Reply {
            text: text.into(),
            markdown: true,
        }
    }
}
