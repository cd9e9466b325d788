pub mod config;
pub mod record_store;
pub mod telegram;
