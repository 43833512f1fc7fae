//! Profile service - create and partially update a user's profile.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{NewProfile, Profile, ProfileChanges};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::repositories::EMAIL_IN_USE_MESSAGE;
use crate::infra::UnitOfWork;

#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Create the profile for `user_id`.
    ///
    /// Fails with `ProfileExists` (carrying the stored profile) when the user
    /// already has one; nothing is overwritten.
    async fn create_profile(&self, user_id: i32, profile: NewProfile) -> AppResult<Profile>;

    /// Merge `changes` onto the existing profile of `user_id`.
    async fn update_profile(&self, user_id: i32, changes: ProfileChanges) -> AppResult<Profile>;
}

pub struct ProfileManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ProfileManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn ensure_user_exists(&self, user_id: i32) -> AppResult<()> {
        self.uow
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_not_found("User")
            .map(|_| ())
    }

    /// Reject `email` if another user's profile already uses it.
    async fn ensure_email_available(&self, email: &str, user_id: i32) -> AppResult<()> {
        match self.uow.profiles().find_by_email(email).await? {
            Some(other) if other.user_id != user_id => Err(AppError::conflict(EMAIL_IN_USE_MESSAGE)),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> ProfileService for ProfileManager<U> {
    async fn create_profile(&self, user_id: i32, profile: NewProfile) -> AppResult<Profile> {
        self.ensure_user_exists(user_id).await?;

        let profiles = self.uow.profiles();
        if let Some(existing) = profiles.find_by_user_id(user_id).await? {
            return Err(AppError::ProfileExists(Box::new(existing)));
        }
        self.ensure_email_available(&profile.email, user_id).await?;

        let created = match profiles.create(user_id, profile).await {
            Ok(created) => created,
            // A concurrent create for this user can win the unique user_id
            // constraint after the check above.
            Err(AppError::Conflict(message)) => {
                return Err(match profiles.find_by_user_id(user_id).await? {
                    Some(existing) => AppError::ProfileExists(Box::new(existing)),
                    None => AppError::Conflict(message),
                });
            }
            Err(e) => return Err(e),
        };
        tracing::info!(user_id, profile_id = created.id, "Profile created");
        Ok(created)
    }

    async fn update_profile(&self, user_id: i32, changes: ProfileChanges) -> AppResult<Profile> {
        self.ensure_user_exists(user_id).await?;

        let profiles = self.uow.profiles();
        let profile = profiles
            .find_by_user_id(user_id)
            .await?
            .ok_or_not_found("Profile")?;

        if let Some(email) = changes.email.as_deref() {
            if email != profile.email {
                self.ensure_email_available(email, user_id).await?;
            }
        }

        profiles.update(profile.id, changes).await
    }
}
