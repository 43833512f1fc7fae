//! Phone number value object.

use thiserror::Error;

use crate::config::{MAX_PHONE_NUMBER_DIGITS, MIN_PHONE_NUMBER_DIGITS, PHONE_NUMBER_FILLER};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PhoneNumberError {
    #[error("phone number must be entirely numeric")]
    NotNumeric,
    #[error("phone number must be between 9 and 12 digits long")]
    InvalidLength,
}

/// Normalized phone number: 9 to 12 ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Strip filler characters from `raw` and validate what remains.
    pub fn parse(raw: &str) -> Result<Self, PhoneNumberError> {
        let normalized: String = raw.chars().filter(|c| *c != PHONE_NUMBER_FILLER).collect();

        if normalized.is_empty() || !normalized.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneNumberError::NotNumeric);
        }

        // all ASCII, so byte length == digit count
        if !(MIN_PHONE_NUMBER_DIGITS..=MAX_PHONE_NUMBER_DIGITS).contains(&normalized.len()) {
            return Err(PhoneNumberError::InvalidLength);
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
