//! Unit of Work - centralized repository access.
//!
//! Services receive a `UnitOfWork` rather than a database handle, so tests
//! can swap in any repository implementation.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{ProfileRepository, ProfileStore, UserRepository, UserStore};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get profile repository
    fn profiles(&self) -> Arc<dyn ProfileRepository>;
}

/// Concrete implementation of UnitOfWork over a SeaORM connection pool
pub struct Persistence {
    user_repo: Arc<UserStore>,
    profile_repo: Arc<ProfileStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            profile_repo: Arc::new(ProfileStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn profiles(&self) -> Arc<dyn ProfileRepository> {
        self.profile_repo.clone()
    }
}
