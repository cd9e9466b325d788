use chrono::{DateTime, Utc};

use crate::domain::chat::ChatContext;
use crate::domain::score::Rating;
use crate::domain::session::CompletedForm;
use crate::domain::topics::TOPICS;

/// Identity columns preceding the per-topic rating columns.
pub const FIXED_COLUMNS: [&str; 7] = [
    "timestamp",
    "chat_id",
    "chat_title",
    "user_id",
    "username",
    "name",
    "email",
];

/// One completed form, frozen for persistence. Written once, never mutated.
#[derive(Debug, Clone)]
pub struct SubmissionRecord {
    pub timestamp: DateTime<Utc>,
    pub chat_id: i64,
    pub chat_title: String,
    pub user_id: i64,
    pub username: String,
    pub name: String,
    pub email: String,
    /// One slot per topic in catalog order. Only a catalog change between
    /// sessions can leave a slot empty.
    pub ratings: Vec<Option<Rating>>,
}

impl SubmissionRecord {
    pub fn new(form: CompletedForm, ctx: &ChatContext, timestamp: DateTime<Utc>) -> Self {
        let ratings = TOPICS.iter().map(|t| form.ratings.get(t).copied()).collect();
        SubmissionRecord {
            timestamp,
            chat_id: ctx.chat_id,
            chat_title: ctx.title.clone().unwrap_or_default(),
            user_id: ctx.user_id,
            username: ctx.username.clone().unwrap_or_default(),
            name: form.name,
            email: form.email,
            ratings,
        }
    }

    /// Column names, identity columns first, then one per topic.
    pub fn header() -> Vec<String> {
        FIXED_COLUMNS
            .iter()
            .chain(TOPICS.iter())
            .map(|s| s.to_string())
            .collect()
    }

    /// Values in header order, ready for the CSV writer.
    pub fn to_row(&self) -> Vec<String> {
        let mut row = vec![
            self.timestamp.to_rfc3339(),
            self.chat_id.to_string(),
            self.chat_title.clone(),
            self.user_id.to_string(),
            self.username.clone(),
            self.name.clone(),
            self.email.clone(),
        ];
        row.extend(
            self.ratings
                .iter()
                .map(|r| r.map(|r| r.to_string()).unwrap_or_default()),
        );
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chat::ChatKind;
    use std::collections::HashMap;

    fn group_ctx() -> ChatContext {
        ChatContext {
            chat_id: -100200300,
            kind: ChatKind::Supergroup,
            title: Some("Grupo DevOps".to_string()),
            user_id: 7,
            username: Some("ana_dev".to_string()),
        }
    }

    fn completed_form() -> CompletedForm {
        let mut ratings = HashMap::new();
        for (i, topic) in TOPICS.iter().enumerate() {
            ratings.insert(*topic, Rating::new((i % 6) as u8).unwrap());
        }
        CompletedForm {
            name: "Ana Silva".to_string(),
            email: "ana@example.com".to_string(),
            ratings,
        }
    }

    #[test]
    fn test_header_has_identity_then_topic_columns() {
        let header = SubmissionRecord::header();
        assert_eq!(header.len(), FIXED_COLUMNS.len() + TOPICS.len());
        assert_eq!(header[0], "timestamp");
        assert_eq!(header[6], "email");
        assert_eq!(header[7], TOPICS[0]);
        assert_eq!(header[header.len() - 1], TOPICS[TOPICS.len() - 1]);
    }

    #[test]
    fn test_row_matches_header_order() {
        let record = SubmissionRecord::new(completed_form(), &group_ctx(), Utc::now());
        let row = record.to_row();
        assert_eq!(row.len(), SubmissionRecord::header().len());
        assert_eq!(row[1], "-100200300");
        assert_eq!(row[2], "Grupo DevOps");
        assert_eq!(row[3], "7");
        assert_eq!(row[4], "ana_dev");
        assert_eq!(row[5], "Ana Silva");
        assert_eq!(row[6], "ana@example.com");
        for (i, value) in row[FIXED_COLUMNS.len()..].iter().enumerate() {
            assert_eq!(value, &(i % 6).to_string());
        }
    }

    #[test]
    fn test_missing_chat_metadata_becomes_empty_columns() {
        let ctx = ChatContext {
            chat_id: 42,
            kind: ChatKind::Private,
            title: None,
            user_id: 42,
            username: None,
        };
        let record = SubmissionRecord::new(completed_form(), &ctx, Utc::now());
        let row = record.to_row();
        assert_eq!(row[2], "");
        assert_eq!(row[4], "");
    }

    #[test]
    fn test_unrated_topic_renders_empty() {
        let mut form = completed_form();
        form.ratings.remove(TOPICS[3]);
        let record = SubmissionRecord::new(form, &group_ctx(), Utc::now());
        let row = record.to_row();
        assert_eq!(row[FIXED_COLUMNS.len() + 3], "");
    }
}
