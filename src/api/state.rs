//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{AuthService, ProfileService, ServiceContainer, Services, UserService};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub profile_service: Arc<dyn ProfileService>,
    /// Present when backed by a real database (used by the health check)
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Create application state backed by a database connection.
    pub fn from_database(database: Arc<Database>) -> Self {
        let services = Services::from_connection(database.get_connection());
        Self {
            database: Some(database),
            ..Self::new(&services)
        }
    }

    /// Create application state from any service container (e.g. test doubles).
    pub fn new(services: &dyn ServiceContainer) -> Self {
        Self {
            auth_service: services.auth(),
            user_service: services.users(),
            profile_service: services.profiles(),
            database: None,
        }
    }
}
