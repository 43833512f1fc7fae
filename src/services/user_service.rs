//! User service - listing, lookup and deletion.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{User, UserWithProfile};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Get a user and its profile by ID
    async fn get_user(&self, id: i32) -> AppResult<UserWithProfile>;

    /// Delete a user together with its profile
    async fn delete_user(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.uow.users().list().await
    }

    async fn get_user(&self, id: i32) -> AppResult<UserWithProfile> {
        self.uow
            .users()
            .find_with_profile(id)
            .await?
            .ok_or_not_found("User")
    }

    async fn delete_user(&self, id: i32) -> AppResult<()> {
        self.uow.users().delete(id).await?;
        tracing::info!(user_id = id, "User and profile deleted");
        Ok(())
    }
}
