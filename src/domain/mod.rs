pub mod chat;
pub mod contact;
pub mod error;
pub mod score;
pub mod session;
pub mod submission;
pub mod topics;
