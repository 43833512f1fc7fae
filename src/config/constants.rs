//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Credential Policy
// =============================================================================

/// Minimum password length (in characters)
pub const MIN_PASSWORD_LENGTH: usize = 5;

/// Passwords rejected outright regardless of their character mix
pub const COMMON_PASSWORDS: &[&str] = &["123456", "password", "123456789", "qwerty", "abc123"];

/// Character stripped from phone numbers before validation
pub const PHONE_NUMBER_FILLER: char = 'i';

/// Minimum digits in a normalized phone number
pub const MIN_PHONE_NUMBER_DIGITS: usize = 9;

/// Maximum digits in a normalized phone number
pub const MAX_PHONE_NUMBER_DIGITS: usize = 12;

/// Check if a password is in the common password list
pub fn is_common_password(password: &str) -> bool {
    COMMON_PASSWORDS.contains(&password)
}

// =============================================================================
// Profiles
// =============================================================================

/// Default role assigned to new profiles
pub const ROLE_USER: &str = "user";

/// Maximum length of a profile image reference
pub const MAX_IMAGE_LENGTH: u64 = 255;

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// Database
// =============================================================================

pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_DB_USER: &str = "postgres";
pub const DEFAULT_DB_PASSWORD: &str = "admin";
pub const DEFAULT_DB_NAME: &str = "user_registry";
