use crate::domain::error::{AppError, Result};

/// A validated self-assessment rating. Values outside 0..=5 are not
/// representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Rating> {
        if value <= Self::MAX {
            Some(Rating(value))
        } else {
            None
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses a rating answer. Accepts the text iff, after trimming, it is made
/// of decimal digits only and the value falls in 0..=5. Leading zeros are
/// accepted ("05" parses to 5).
pub fn parse_score(text: &str) -> Result<Rating> {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::InvalidScore);
    }
    let value: u8 = trimmed.parse().map_err(|_| AppError::InvalidScore)?;
    Rating::new(value).ok_or(AppError::InvalidScore)
}
