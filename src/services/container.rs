//! Service Container - Centralized service access.
//!
//! Services are built once over a shared `UnitOfWork` and handed to the
//! HTTP layer as trait objects.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, ProfileManager, ProfileService, UserManager, UserService,
};
use crate::infra::{Persistence, UnitOfWork};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn profiles(&self) -> Arc<dyn ProfileService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    profile_service: Arc<dyn ProfileService>,
}

impl Services {
    /// Build every service over one unit of work
    pub fn from_unit_of_work<U>(uow: Arc<U>) -> Self
    where
        U: UnitOfWork + 'static,
    {
        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone())),
            user_service: Arc::new(UserManager::new(uow.clone())),
            profile_service: Arc::new(ProfileManager::new(uow)),
        }
    }

    /// Create service container from a database connection
    pub fn from_connection(db: sea_orm::DatabaseConnection) -> Self {
        Self::from_unit_of_work(Arc::new(Persistence::new(db)))
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn profiles(&self) -> Arc<dyn ProfileService> {
        self.profile_service.clone()
    }
}
