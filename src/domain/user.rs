//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::{Metadata, Password, PhoneNumber, Profile, ProfileResponse};

/// User domain entity
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    /// Normalized digits, as validated by [`PhoneNumber`]
    pub phone_number: String,
    pub password: Password,
    pub meta: Metadata,
}

impl User {
    /// Check a plaintext password against the stored hash.
    pub fn check_password(&self, plain_text: &str) -> bool {
        self.password.verify(plain_text)
    }
}

/// A validated user ready to be inserted.
///
/// Holding a [`Password`] guarantees only a hash reaches the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub phone_number: PhoneNumber,
    pub password: Password,
}

/// User together with its profile, if one was created.
#[derive(Debug, Clone)]
pub struct UserWithProfile {
    pub user: User,
    pub profile: Option<Profile>,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "jdoe")]
    pub username: String,
    #[schema(example = "254712345678")]
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Present when fetching a single user that has a profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileResponse>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            phone_number: user.phone_number,
            created_at: user.meta.created_at,
            updated_at: user.meta.updated_at,
            profile: None,
        }
    }
}

impl From<UserWithProfile> for UserResponse {
    fn from(found: UserWithProfile) -> Self {
        Self {
            profile: found.profile.map(ProfileResponse::from),
            ..Self::from(found.user)
        }
    }
}
