pub mod commands;
pub mod dispatcher;
