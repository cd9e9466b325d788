//! Chat allow-listing.
//!
//! Group chats are gated by an allow-list of chat ids; an empty list means
//! every group is welcome. Direct chats are never gated. Denied chats get
//! no reply at all, so the bot stays invisible where it is not wanted.

use std::collections::HashSet;

use crate::domain::chat::ChatContext;

#[derive(Debug, Clone)]
pub struct AccessGate {
    allowed_group_ids: HashSet<i64>,
}

impl AccessGate {
    pub fn new(allowed_group_ids: HashSet<i64>) -> Self {
        Self { allowed_group_ids }
    }

    /// Unrestricted gate: every chat passes.
    pub fn open() -> Self {
        Self::new(HashSet::new())
    }

    pub fn is_allowed(&self, ctx: &ChatContext) -> bool {
        if !ctx.kind.is_group() {
            return true;
        }
        self.allowed_group_ids.is_empty() || self.allowed_group_ids.contains(&ctx.chat_id)
    }
}
