//! Password value object and strength policy.
//!
//! Plaintext only ever passes through here on its way to an Argon2 hash.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

use crate::config::{is_common_password, MIN_PASSWORD_LENGTH};
use crate::errors::{AppError, AppResult};

/// Reason a password was rejected by the strength policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordWeakness {
    #[error("password must be at least 5 characters long")]
    TooShort,
    #[error("password cannot be entirely numeric")]
    EntirelyNumeric,
    #[error("password is too common")]
    TooCommon,
    #[error("password must contain both letters and numbers")]
    MissingLetterOrDigit,
}

/// Check a plaintext password against the strength policy.
///
/// Rules are applied in order: minimum length, not all digits, not a
/// well-known password, and at least one ASCII letter plus one ASCII digit.
pub fn validate_password(password: &str) -> Result<(), PasswordWeakness> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordWeakness::TooShort);
    }

    let (mut has_letter, mut has_digit, mut all_digits) = (false, false, true);
    for c in password.chars() {
        if c.is_ascii_digit() {
            has_digit = true;
        } else {
            all_digits = false;
            if c.is_ascii_alphabetic() {
                has_letter = true;
            }
        }
    }

    if all_digits {
        return Err(PasswordWeakness::EntirelyNumeric);
    }
    if is_common_password(password) {
        return Err(PasswordWeakness::TooCommon);
    }
    if !(has_letter && has_digit) {
        return Err(PasswordWeakness::MissingLetterOrDigit);
    }

    Ok(())
}

/// Hash a plaintext password with Argon2id and a fresh random salt.
pub fn hash_password(plain_text: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2()
        .hash_password(plain_text.as_bytes(), &salt)
        .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC hash string.
///
/// Malformed hashes never verify.
pub fn verify_password(plain_text: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => argon2()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!("Stored password hash could not be parsed: {}", e);
            false
        }
    }
}

#[inline]
fn argon2() -> Argon2<'static> {
    Argon2::default()
}

/// Hashed password as stored on a user.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Validate the plaintext against the strength policy, then hash it.
    ///
    /// # Errors
    /// `Validation` if the password is weak, `Internal` if hashing fails.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        validate_password(plain_text)?;
        let hash = hash_password(plain_text)?;
        Ok(Self { hash })
    }

    /// Wrap a hash loaded from the database.
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    pub fn into_string(self) -> String {
        self.hash
    }

    pub fn verify(&self, plain_text: &str) -> bool {
        verify_password(plain_text, &self.hash)
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}
