//! Profile domain entity: one optional profile per user.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::Metadata;

/// Profile domain entity
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: i32,
    pub user_id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub is_email_verified: bool,
    pub role: String,
    /// Avatar reference (URL or storage key)
    pub image: String,
    pub bio: String,
    pub meta: Metadata,
}

/// Profile creation data
#[derive(Debug, Clone, Default)]
pub struct NewProfile {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub is_email_verified: bool,
    /// Falls back to the default role when `None`
    pub role: Option<String>,
    pub image: String,
    pub bio: String,
}

/// Partial profile update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileChanges {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: Option<bool>,
    pub is_email_verified: Option<bool>,
    pub role: Option<String>,
    pub image: Option<String>,
    pub bio: Option<String>,
}

/// Profile response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 1)]
    pub user_id: i32,
    #[schema(example = "jdoe@example.com")]
    pub email: String,
    #[schema(example = "Jane")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    pub is_active: bool,
    pub is_email_verified: bool,
    #[schema(example = "user")]
    pub role: String,
    pub image: String,
    pub bio: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            user_id: profile.user_id,
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            is_active: profile.is_active,
            is_email_verified: profile.is_email_verified,
            role: profile.role,
            image: profile.image,
            bio: profile.bio,
            created_at: profile.meta.created_at,
            updated_at: profile.meta.updated_at,
        }
    }
}
