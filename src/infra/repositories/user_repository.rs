//! User repository: lookups, registration insert and cascading delete.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::entities::profile::{self, Entity as ProfileEntity};
use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, User, UserWithProfile};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Raised when the store's unique constraint catches a registration race.
pub const DUPLICATE_USER_MESSAGE: &str = "username or phone number is already registered";

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by primary key
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Find user and its profile (if any)
    async fn find_with_profile(&self, id: i32) -> AppResult<Option<UserWithProfile>>;

    /// Find the first user whose username OR phone number matches
    async fn find_by_identifier(
        &self,
        username: &str,
        phone_number: &str,
    ) -> AppResult<Option<User>>;

    async fn username_exists(&self, username: &str) -> AppResult<bool>;

    async fn phone_number_exists(&self, phone_number: &str) -> AppResult<bool>;

    /// Insert a validated user
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// List all users
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Delete the user and its profile atomically
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// SeaORM-backed user repository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(User::from))
    }

    async fn find_with_profile(&self, id: i32) -> AppResult<Option<UserWithProfile>> {
        let result = UserEntity::find_by_id(id)
            .find_also_related(ProfileEntity)
            .one(&self.db)
            .await?;

        Ok(result.map(|(user, profile)| UserWithProfile {
            user: user.into(),
            profile: profile.map(Into::into),
        }))
    }

    async fn find_by_identifier(
        &self,
        username: &str,
        phone_number: &str,
    ) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(
                Condition::any()
                    .add(user::Column::Username.eq(username))
                    .add(user::Column::PhoneNumber.eq(phone_number)),
            )
            .order_by_asc(user::Column::Id)
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn username_exists(&self, username: &str) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn phone_number_exists(&self, phone_number: &str) -> AppResult<bool> {
        let count = UserEntity::find()
            .filter(user::Column::PhoneNumber.eq(phone_number))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            username: Set(new_user.username),
            phone_number: Set(new_user.phone_number.into_string()),
            password_hash: Set(new_user.password.into_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_unique_violation(e, AppError::duplicate(DUPLICATE_USER_MESSAGE)))?;

        Ok(User::from(model))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        // Dropping `txn` without commit rolls back
        let txn = self.db.begin().await?;

        let found = UserEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_not_found("User")?;

        let profiles = ProfileEntity::delete_many()
            .filter(profile::Column::UserId.eq(found.id))
            .exec(&txn)
            .await?;
        UserEntity::delete_by_id(found.id).exec(&txn).await?;

        txn.commit().await?;

        tracing::debug!(
            user_id = id,
            profiles_removed = profiles.rows_affected,
            "User deleted"
        );
        Ok(())
    }
}
