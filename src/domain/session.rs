//! Per-user form conversation, modeled as an explicit state machine.
//!
//! One `FormSession` exists per (chat, user) key while a form is in
//! progress. Every inbound text produces exactly one outcome: a reply that
//! keeps the session alive, a reply that ends it, or a completed snapshot
//! ready to be persisted.

use std::collections::HashMap;

use crate::domain::chat::Reply;
use crate::domain::contact::Contact;
use crate::domain::error::AppError;
use crate::domain::score::{parse_score, Rating};
use crate::domain::topics::{SCALE_TEXT, TOPICS};

const NAME_PROMPT: &str = "Vamos lá! Qual é o *seu nome completo*?";
const EMAIL_PROMPT: &str = "Perfeito. Qual é o *seu e-mail*?";
const SCORE_NUDGE: &str = "Por favor, responda com um número de *0 a 5*.";
const CANCELLED: &str = "Formulário cancelado. Pode iniciar novamente com /form.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormState {
    AwaitingName,
    AwaitingEmail,
    AwaitingRating,
}

/// Result of feeding one text answer into the machine.
#[derive(Debug)]
pub enum StepOutcome {
    /// Session stays alive; send this reply.
    Prompt(Reply),
    /// Session is over without a submission; send this reply and drop it.
    Discard(Reply),
    /// Every topic is rated. The caller persists the snapshot, confirms on
    /// success, and drops the session either way.
    Submit(CompletedForm),
}

/// Snapshot of a fully answered form, detached from conversation state.
#[derive(Debug)]
pub struct CompletedForm {
    pub name: String,
    pub email: String,
    pub ratings: HashMap<&'static str, Rating>,
}

#[derive(Debug)]
pub struct FormSession {
    state: FormState,
    name: Option<String>,
    email: Option<String>,
    ratings: HashMap<&'static str, Rating>,
    cursor: usize,
    last_prompted: Option<&'static str>,
}

impl FormSession {
    /// Opens a fresh session and returns the first prompt.
    pub fn start() -> (FormSession, Reply) {
        let session = FormSession {
            state: FormState::AwaitingName,
            name: None,
            email: None,
            ratings: HashMap::new(),
            cursor: 0,
            last_prompted: None,
        };
        (session, Reply::markdown(NAME_PROMPT))
    }

    /// Feeds one user answer into the machine. Commands must be filtered
    /// out by the caller; this only ever sees plain text.
    pub fn on_text(&mut self, text: &str) -> StepOutcome {
        match self.state {
            FormState::AwaitingName => self.on_name(text),
            FormState::AwaitingEmail => self.on_email(text),
            FormState::AwaitingRating => self.on_rating(text),
        }
    }

    /// Abandons the form. Consumes the session; nothing is persisted.
    pub fn cancel(self) -> Reply {
        Reply::plain(CANCELLED)
    }

    fn on_name(&mut self, text: &str) -> StepOutcome {
        self.name = Some(text.trim().to_string());
        self.state = FormState::AwaitingEmail;
        StepOutcome::Prompt(Reply::markdown(EMAIL_PROMPT))
    }

    fn on_email(&mut self, text: &str) -> StepOutcome {
        let name = self.name.as_deref().unwrap_or("");
        match Contact::new(name, text) {
            Ok(contact) => {
                self.name = Some(contact.name);
                self.email = Some(contact.email);
                self.last_prompted = Some(TOPICS[0]);
                self.cursor = 1;
                self.state = FormState::AwaitingRating;
                StepOutcome::Prompt(Reply::markdown(topic_prompt(TOPICS[0])))
            }
            Err(err) => StepOutcome::Discard(Reply::plain(contact_rejected(&err))),
        }
    }

    fn on_rating(&mut self, text: &str) -> StepOutcome {
        let score = match parse_score(text) {
            Ok(score) => score,
            // No retry limit: the user can keep answering until a digit lands.
            Err(_) => return StepOutcome::Prompt(Reply::markdown(SCORE_NUDGE)),
        };
        if let Some(topic) = self.last_prompted {
            self.ratings.insert(topic, score);
        }

        if self.cursor >= TOPICS.len() {
            return StepOutcome::Submit(CompletedForm {
                name: self.name.take().unwrap_or_default(),
                email: self.email.take().unwrap_or_default(),
                ratings: std::mem::take(&mut self.ratings),
            });
        }

        let topic = TOPICS[self.cursor];
        self.last_prompted = Some(topic);
        self.cursor += 1;
        StepOutcome::Prompt(Reply::markdown(topic_prompt(topic)))
    }
}

fn topic_prompt(topic: &str) -> String {
    format!(
        "*{}*\n{}\n\nResponda com um número de 0 a 5.",
        topic, SCALE_TEXT
    )
}

fn contact_rejected(err: &AppError) -> String {
    let detail = match err {
        AppError::InvalidContact(detail) => detail.clone(),
        other => other.to_string(),
    };
    format!(
        "Algum dado parece inválido:\n{}\n\nVamos tentar novamente com /form.",
        detail
    )
}
