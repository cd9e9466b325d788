//! Update routing: long-polls the Bot API and walks each message through
//! the gate, the command table, the form flow, and the group mention hint,
//! in that order. The first handler that claims a message wins.

use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, error, info, warn};

use crate::application::{AccessGate, FormFlow};
use crate::domain::chat::ChatContext;
use crate::domain::error::Result;
use crate::infrastructure::telegram::types::{Message, SendMessageRequest, Update};
use crate::infrastructure::telegram::BotApi;
use crate::interfaces::commands;

static COMMAND_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/([A-Za-z0-9_]+)(?:@(\w+))?(?:\s|$)").unwrap());

const POLL_TIMEOUT_SECS: u64 = 50;
const RETRY_DELAY_SECS: u64 = 5;

/// What the bot knows about itself. Either side may be missing when getMe
/// fails at startup; routing degrades instead of stopping.
#[derive(Debug, Clone, Default)]
struct BotIdentity {
    id: Option<i64>,
    username: Option<String>,
}

/// A `/command` line, with the optional `@target` addressing suffix used
/// in group chats.
#[derive(Debug, PartialEq, Eq)]
struct Command {
    name: String,
    target: Option<String>,
}

fn parse_command(text: &str) -> Option<Command> {
    let caps = COMMAND_PATTERN.captures(text.trim())?;
    Some(Command {
        name: caps[1].to_lowercase(),
        target: caps.get(2).map(|m| m.as_str().to_string()),
    })
}

pub struct Dispatcher {
    api: Arc<dyn BotApi + Send + Sync>,
    gate: AccessGate,
    flow: FormFlow,
    identity: BotIdentity,
}

impl Dispatcher {
    pub fn new(
        api: Arc<dyn BotApi + Send + Sync>,
        gate: AccessGate,
        flow: FormFlow,
        configured_username: Option<String>,
    ) -> Self {
        Self {
            api,
            gate,
            flow,
            identity: BotIdentity {
                id: None,
                username: configured_username,
            },
        }
    }

    /// Learns the bot's id and username from getMe. A configured username
    /// wins over the wire one; on failure the loop still runs, with mention
    /// detection limited to whatever is already known.
    async fn resolve_identity(&mut self) {
        match self.api.get_me().await {
            Ok(me) => {
                info!(bot_id = me.id, username = ?me.username, "bot identity resolved");
                self.identity.id = Some(me.id);
                if self.identity.username.is_none() {
                    self.identity.username = me.username;
                }
            }
            Err(err) => {
                warn!(error = %err, "getMe failed, mention detection degraded");
            }
        }
    }

    /// Polls until interrupted. Failed polls back off a few seconds so a
    /// flaky network does not turn into a hot loop.
    pub async fn run(mut self) -> Result<()> {
        self.resolve_identity().await;
        info!("update loop started");

        let mut offset: Option<i64> = None;
        loop {
            let polled = tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("shutdown signal received");
                    return Ok(());
                }
                result = self.api.get_updates(offset, POLL_TIMEOUT_SECS) => result,
            };

            match polled {
                Ok(updates) => {
                    for update in updates {
                        offset = Some(match offset {
                            Some(current) => current.max(update.update_id + 1),
                            None => update.update_id + 1,
                        });
                        self.handle_update(update).await;
                    }
                }
                Err(err) => {
                    error!(error = %err, "getUpdates failed, backing off");
                    tokio::time::sleep(Duration::from_secs(RETRY_DELAY_SECS)).await;
                }
            }
        }
    }

    async fn handle_update(&self, update: Update) {
        let Some(message) = update.message else {
            return;
        };
        // Media and service messages carry no text and are skipped outright.
        let Some(text) = message.text.as_deref() else {
            return;
        };
        let Some(from) = message.from.as_ref() else {
            return;
        };

        let ctx = ChatContext {
            chat_id: message.chat.id,
            kind: message.chat.kind,
            title: message.chat.title.clone(),
            user_id: from.id,
            username: from.username.clone(),
        };

        if !self.gate.is_allowed(&ctx) {
            debug!(chat_id = ctx.chat_id, "chat not allow-listed, ignoring");
            return;
        }

        if let Some(command) = parse_command(text) {
            self.handle_command(&ctx, command).await;
            return;
        }

        if let Some(reply) = self.flow.on_text(&ctx, text) {
            self.send(SendMessageRequest::from_reply(ctx.chat_id, reply))
                .await;
            return;
        }

        if ctx.kind.is_group() && self.is_mentioned(&message) {
            self.send(commands::mention_hint(ctx.chat_id)).await;
        }
    }

    async fn handle_command(&self, ctx: &ChatContext, command: Command) {
        if let Some(target) = command.target.as_deref() {
            let ours = self
                .identity
                .username
                .as_deref()
                .is_some_and(|name| name.eq_ignore_ascii_case(target));
            if !ours {
                debug!(
                    command = %command.name,
                    addressed_to = target,
                    "command addressed to another bot"
                );
                return;
            }
        }

        match command.name.as_str() {
            "start" => self.send(commands::welcome(ctx.chat_id)).await,
            "help" => self.send(commands::help(ctx.chat_id)).await,
            "material" => self.send(commands::material(ctx.chat_id)).await,
            "certifications" => self.send(commands::certifications(ctx.chat_id)).await,
            "form" => {
                let prompt = self.flow.start(ctx);
                self.send(SendMessageRequest::from_reply(ctx.chat_id, prompt))
                    .await;
            }
            "cancel" => {
                if let Some(reply) = self.flow.cancel(ctx) {
                    self.send(SendMessageRequest::from_reply(ctx.chat_id, reply))
                        .await;
                }
            }
            other => {
                debug!(command = other, "unknown command ignored");
            }
        }
    }

    /// True when the message replies to the bot or names it with `@`.
    fn is_mentioned(&self, message: &Message) -> bool {
        if let (Some(bot_id), Some(replied)) =
            (self.identity.id, message.reply_to_message.as_deref())
        {
            if replied.from.as_ref().is_some_and(|from| from.id == bot_id) {
                return true;
            }
        }
        let Some(username) = self.identity.username.as_deref() else {
            return false;
        };
        let needle = format!("@{}", username.to_lowercase());
        message
            .text
            .as_deref()
            .is_some_and(|text| text.to_lowercase().contains(&needle))
    }

    async fn send(&self, request: SendMessageRequest) {
        if let Err(err) = self.api.send_message(&request).await {
            error!(chat_id = request.chat_id, error = %err, "sendMessage failed");
        }
    }
}
