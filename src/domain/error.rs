use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    Config(String),
    Telegram(String),
    InvalidScore,
    InvalidContact(String),
    StoreWrite(String),
    IoError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Config error: {}", msg),
            AppError::Telegram(msg) => write!(f, "Telegram API error: {}", msg),
            AppError::InvalidScore => write!(f, "Invalid score: expected an integer from 0 to 5"),
            AppError::InvalidContact(msg) => write!(f, "Invalid contact: {}", msg),
            AppError::StoreWrite(msg) => write!(f, "Store write failed: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
