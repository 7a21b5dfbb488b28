//! Month-of-year resolution

use std::fmt;

use crate::error::{AppError, AppResult};

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Calendar month (1-12), independent of the year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Month(u32);

impl Month {
    /// Build a month from its number
    pub fn new(number: u32) -> Option<Self> {
        (1..=12).contains(&number).then_some(Self(number))
    }

    /// Resolve a month token: a full English name, a three letter
    /// abbreviation (both case-insensitive) or a numeral between 1 and 12.
    pub fn resolve(token: &str) -> AppResult<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::InvalidQuery("month must not be empty".to_string()));
        }

        if token.bytes().all(|b| b.is_ascii_digit()) {
            return token
                .parse::<u32>()
                .ok()
                .and_then(Self::new)
                .ok_or_else(|| {
                    AppError::InvalidQuery(format!("month number '{}' is not within 1-12", token))
                });
        }

        let lower = token.to_lowercase();
        MONTH_NAMES
            .iter()
            .position(|name| *name == lower || (lower.len() == 3 && name.starts_with(&lower)))
            .map(|idx| Self(idx as u32 + 1))
            .ok_or_else(|| AppError::InvalidQuery(format!("unknown month '{}'", token)))
    }

    /// Month number, 1-12
    pub fn number(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MONTH_NAMES[(self.0 - 1) as usize])
    }
}
