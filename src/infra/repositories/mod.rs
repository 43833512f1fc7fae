//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;
mod profile_repository;
mod user_repository;

pub use profile_repository::{ProfileRepository, ProfileStore, EMAIL_IN_USE_MESSAGE};
pub use user_repository::{UserRepository, UserStore, DUPLICATE_USER_MESSAGE};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use profile_repository::MockProfileRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
