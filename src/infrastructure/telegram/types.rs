//! Wire types for the slice of the Telegram Bot API the bot uses.
//!
//! Incoming structs only carry the fields the dispatcher reads; everything
//! else in the payload is ignored on deserialization.

use serde::{Deserialize, Serialize};

use crate::domain::chat::{ChatKind, Reply};

/// Standard response envelope wrapping every Bot API result.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
    pub reply_to_message: Option<Box<Message>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ChatKind,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GetUpdatesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    pub timeout: u64,
    pub allowed_updates: [&'static str; 1],
}

#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest {
    pub chat_id: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_web_page_preview: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl SendMessageRequest {
    pub fn new(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            parse_mode: None,
            disable_web_page_preview: None,
            reply_markup: None,
        }
    }

    pub fn from_reply(chat_id: i64, reply: Reply) -> Self {
        let request = Self::new(chat_id, reply.text);
        if reply.markdown {
            request.markdown()
        } else {
            request
        }
    }

    pub fn markdown(mut self) -> Self {
        self.parse_mode = Some("Markdown");
        self
    }

    pub fn without_preview(mut self) -> Self {
        self.disable_web_page_preview = Some(true);
        self
    }

    pub fn with_keyboard(mut self, keyboard: InlineKeyboardMarkup) -> Self {
        self.reply_markup = Some(keyboard);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    /// One button per row, the layout every link list uses.
    pub fn single_column(buttons: Vec<InlineKeyboardButton>) -> Self {
        Self {
            inline_keyboard: buttons.into_iter().map(|b| vec![b]).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub url: String,
}

impl InlineKeyboardButton {
    pub fn url(text: &str, url: &str) -> Self {
        Self {
            text: text.to_string(),
            url: url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_envelope_deserializes() {
        let payload = r#"{
            "ok": true,
            "result": [{
                "update_id": 10,
                "message": {
                    "message_id": 99,
                    "from": {"id": 7, "is_bot": false, "first_name": "Ana", "username": "ana_dev"},
                    "chat": {"id": -100500, "type": "supergroup", "title": "Grupo DevOps"},
                    "text": "/form"
                }
            }]
        }"#;
        let envelope: ApiResponse<Vec<Update>> = serde_json::from_str(payload).unwrap();
        assert!(envelope.ok);
        let updates = envelope.result.unwrap();
        assert_eq!(updates.len(), 1);
        let message = updates[0].message.as_ref().unwrap();
        assert_eq!(message.chat.id, -100500);
        assert_eq!(message.chat.kind, ChatKind::Supergroup);
        assert_eq!(message.from.as_ref().unwrap().username.as_deref(), Some("ana_dev"));
        assert_eq!(message.text.as_deref(), Some("/form"));
        assert!(message.reply_to_message.is_none());
    }

    #[test]
    fn test_failure_envelope_carries_description() {
        let payload = r#"{"ok": false, "description": "Unauthorized"}"#;
        let envelope: ApiResponse<Vec<Update>> = serde_json::from_str(payload).unwrap();
        assert!(!envelope.ok);
        assert_eq!(envelope.description.as_deref(), Some("Unauthorized"));
        assert!(envelope.result.is_none());
    }

    #[test]
    fn test_send_request_skips_unset_fields() {
        let request = SendMessageRequest::new(42, "oi");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["chat_id"], 42);
        assert_eq!(json["text"], "oi");
        assert!(json.get("parse_mode").is_none());
        assert!(json.get("disable_web_page_preview").is_none());
        assert!(json.get("reply_markup").is_none());
    }

    #[test]
    fn test_markdown_reply_sets_parse_mode() {
        let request = SendMessageRequest::from_reply(42, Reply::markdown("*oi*"));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["parse_mode"], "Markdown");

        let request = SendMessageRequest::from_reply(42, Reply::plain("oi"));
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("parse_mode").is_none());
    }

    #[test]
    fn test_single_column_keyboard_layout() {
        let keyboard = InlineKeyboardMarkup::single_column(vec![
            InlineKeyboardButton::url("Docs", "https://example.com/a"),
            InlineKeyboardButton::url("Mais", "https://example.com/b"),
        ]);
        assert_eq!(keyboard.inline_keyboard.len(), 2);
        assert_eq!(keyboard.inline_keyboard[0].len(), 1);
        let json = serde_json::to_value(&keyboard).unwrap();
        assert_eq!(json["inline_keyboard"][1][0]["url"], "https://example.com/b");
    }
}
