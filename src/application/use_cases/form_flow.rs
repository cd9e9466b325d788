//! Form conversation flow across all chats.
//!
//! Owns the registry of live sessions keyed by (chat, user) and the
//! completion write. The record is appended before the confirmation is
//! emitted; a failed append produces a retry notice instead. Sessions stay
//! in the registry until completed, cancelled, or restarted; abandoned ones
//! are never evicted.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{error, info};

use crate::domain::chat::{ChatContext, Reply, SessionKey};
use crate::domain::session::{FormSession, StepOutcome};
use crate::domain::submission::SubmissionRecord;
use crate::infrastructure::record_store::RecordStore;

const SUBMITTED: &str =
    "✅ Formulário enviado! Obrigado. Usaremos esses dados para os encontros quinzenais. 🚀";
const SUBMIT_FAILED: &str =
    "Não consegui salvar suas respostas agora. Tente novamente mais tarde com /form.";

pub struct FormFlow {
    store: Arc<RecordStore>,
    sessions: Mutex<HashMap<SessionKey, FormSession>>,
}

impl FormFlow {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self {
            store,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Entry point for /form. An in-progress session for the same key is
    /// discarded without warning and a fresh one begins.
    pub fn start(&self, ctx: &ChatContext) -> Reply {
        let (session, prompt) = FormSession::start();
        let mut sessions = self.sessions.lock().unwrap();
        if sessions.insert(ctx.session_key(), session).is_some() {
            info!(
                chat_id = ctx.chat_id,
                user_id = ctx.user_id,
                "form restarted, previous answers discarded"
            );
        }
        prompt
    }

    /// Entry point for /cancel. `None` when there is nothing to cancel, and
    /// in that case no reply is sent at all.
    pub fn cancel(&self, ctx: &ChatContext) -> Option<Reply> {
        let session = self.sessions.lock().unwrap().remove(&ctx.session_key())?;
        Some(session.cancel())
    }

    pub fn has_session(&self, ctx: &ChatContext) -> bool {
        self.sessions.lock().unwrap().contains_key(&ctx.session_key())
    }

    /// Feeds a plain-text answer to the session owning this key. `None`
    /// when no form is in progress, so the text can fall through to other
    /// handlers.
    pub fn on_text(&self, ctx: &ChatContext, text: &str) -> Option<Reply> {
        let key = ctx.session_key();
        let outcome = {
            let mut sessions = self.sessions.lock().unwrap();
            let session = sessions.get_mut(&key)?;
            let outcome = session.on_text(text);
            if !matches!(outcome, StepOutcome::Prompt(_)) {
                sessions.remove(&key);
            }
            outcome
        };

        match outcome {
            StepOutcome::Prompt(reply) => Some(reply),
            StepOutcome::Discard(reply) => Some(reply),
            StepOutcome::Submit(form) => {
                let record = SubmissionRecord::new(form, ctx, Utc::now());
                match self.store.append(&record) {
                    Ok(()) => {
                        info!(
                            chat_id = ctx.chat_id,
                            user_id = ctx.user_id,
                            "form submission stored"
                        );
                        Some(Reply::plain(SUBMITTED))
                    }
                    Err(err) => {
                        error!(
                            chat_id = ctx.chat_id,
                            user_id = ctx.user_id,
                            error = %err,
                            "failed to store form submission"
                        );
                        Some(Reply::plain(SUBMIT_FAILED))
                    }
                }
            }
        }
    }
}
