//! Domain layer - Core business entities and credential policy
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod metadata;
pub mod password;
pub mod phone;
pub mod profile;
pub mod user;

pub use metadata::Metadata;
pub use password::{hash_password, validate_password, verify_password, Password, PasswordWeakness};
pub use phone::{PhoneNumber, PhoneNumberError};
pub use profile::{NewProfile, Profile, ProfileChanges, ProfileResponse};
pub use user::{NewUser, User, UserResponse, UserWithProfile};
