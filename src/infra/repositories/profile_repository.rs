//! Profile repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{self, NotSet, Unchanged},
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};

use super::entities::profile::{self, ActiveModel, Entity as ProfileEntity};
use crate::config::ROLE_USER;
use crate::domain::{NewProfile, Profile, ProfileChanges};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

pub const EMAIL_IN_USE_MESSAGE: &str = "email is already in use";

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find the profile owned by a user
    async fn find_by_user_id(&self, user_id: i32) -> AppResult<Option<Profile>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Profile>>;

    /// Insert a profile for `user_id`
    async fn create(&self, user_id: i32, profile: NewProfile) -> AppResult<Profile>;

    /// Write only the provided fields of profile `id`, refreshing `updated_at`
    async fn update(&self, id: i32, changes: ProfileChanges) -> AppResult<Profile>;
}

/// SeaORM-backed profile repository
pub struct ProfileStore {
    db: DatabaseConnection,
}

impl ProfileStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn set_if_some<V>(value: Option<V>) -> ActiveValue<V>
where
    V: Into<sea_orm::Value>,
{
    value.map(Set).unwrap_or(NotSet)
}

/// Active model whose only `Set` columns are the provided changes and `updated_at`.
fn changes_to_active_model(id: i32, changes: ProfileChanges) -> ActiveModel {
    ActiveModel {
        id: Unchanged(id),
        email: set_if_some(changes.email),
        first_name: set_if_some(changes.first_name),
        last_name: set_if_some(changes.last_name),
        is_email_verified: set_if_some(changes.is_email_verified),
        is_active: set_if_some(changes.is_active),
        user_role: set_if_some(changes.role),
        image: set_if_some(changes.image),
        bio: set_if_some(changes.bio),
        updated_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
}

fn map_write_error(err: DbErr) -> AppError {
    match err {
        DbErr::RecordNotUpdated => AppError::NotFound("Profile"),
        other => AppError::from_unique_violation(other, AppError::conflict(EMAIL_IN_USE_MESSAGE)),
    }
}

#[async_trait]
impl ProfileRepository for ProfileStore {
    async fn find_by_user_id(&self, user_id: i32) -> AppResult<Option<Profile>> {
        let result = ProfileEntity::find()
            .filter(profile::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        Ok(result.map(Profile::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Profile>> {
        let result = ProfileEntity::find()
            .filter(profile::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(result.map(Profile::from))
    }

    async fn create(&self, user_id: i32, new_profile: NewProfile) -> AppResult<Profile> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            user_id: Set(user_id),
            email: Set(new_profile.email),
            first_name: Set(new_profile.first_name),
            last_name: Set(new_profile.last_name),
            is_email_verified: Set(new_profile.is_email_verified),
            is_active: Set(new_profile.is_active),
            user_role: Set(new_profile.role.unwrap_or_else(|| ROLE_USER.to_string())),
            image: Set(new_profile.image),
            bio: Set(new_profile.bio),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(map_write_error)?;
        Ok(Profile::from(model))
    }

    async fn update(&self, id: i32, changes: ProfileChanges) -> AppResult<Profile> {
        let model = changes_to_active_model(id, changes)
            .update(&self.db)
            .await
            .map_err(map_write_error)?;
        Ok(Profile::from(model))
    }
}
