pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

use std::sync::Arc;

use tracing::{error, info};

use crate::application::{AccessGate, FormFlow};
use crate::domain::error::Result;
use crate::infrastructure::config::Settings;
use crate::infrastructure::record_store::RecordStore;
use crate::infrastructure::telegram::TelegramClient;
use crate::interfaces::dispatcher::Dispatcher;

/// Wires configuration, store, gate, flow and transport together, then
/// hands control to the update loop until shutdown.
pub async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let settings = Settings::load().map_err(|err| {
        error!(error = %err, "Failed to load settings");
        err
    })?;

    let store = Arc::new(RecordStore::new(settings.forms_csv_path()));
    store.ensure_initialized().map_err(|err| {
        error!(error = %err, "Failed to initialize the forms store");
        err
    })?;
    info!(path = %store.path().display(), "forms store ready");

    let gate = AccessGate::new(settings.allowed_group_ids()?);
    let flow = FormFlow::new(store);
    let api = Arc::new(TelegramClient::new(
        &settings.api_base_url,
        &settings.bot_token,
    ));

    Dispatcher::new(api, gate, flow, settings.bot_username().map(str::to_string))
        .run()
        .await
}
