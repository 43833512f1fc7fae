//! Authentication service - registration and credential checks.
//!
//! Password and phone rules live in the domain layer; this service applies
//! them in order and consults the repositories for uniqueness.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::domain::{hash_password, verify_password, NewUser, Password, PhoneNumber, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Hash verified when the identifier matches nobody, so unknown and known
/// identifiers cost the same.
static DUMMY_HASH: Lazy<Option<String>> = Lazy::new(|| hash_password("dummy-password-0").ok());

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Validate and persist a new user
    async fn register(
        &self,
        username: String,
        phone_number: String,
        password: String,
    ) -> AppResult<User>;

    /// Check credentials; `identifier` is a username or a phone number
    async fn login(&self, identifier: String, password: String) -> AppResult<User>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(
        &self,
        username: String,
        phone_number: String,
        password: String,
    ) -> AppResult<User> {
        if username.is_empty() || phone_number.is_empty() || password.is_empty() {
            return Err(AppError::validation("all fields are required"));
        }

        let phone_number = PhoneNumber::parse(&phone_number)?;

        let users = self.uow.users();
        if users.phone_number_exists(phone_number.as_str()).await? {
            return Err(AppError::duplicate("phone number is already registered"));
        }
        if users.username_exists(&username).await? {
            return Err(AppError::duplicate("username is already taken"));
        }

        // Validates strength, then hashes
        let password = Password::new(&password)?;

        // The unique constraints still apply here if a concurrent
        // registration slipped in after the checks above.
        let user = users
            .create(NewUser {
                username,
                phone_number,
                password,
            })
            .await?;

        tracing::info!(user_id = user.id, "User registered");
        Ok(user)
    }

    async fn login(&self, identifier: String, password: String) -> AppResult<User> {
        let phone_form = PhoneNumber::parse(&identifier)
            .map(PhoneNumber::into_string)
            .unwrap_or_else(|_| identifier.clone());

        let found = self
            .uow
            .users()
            .find_by_identifier(&identifier, &phone_form)
            .await?;

        match found {
            Some(user) if user.check_password(&password) => Ok(user),
            Some(user) => {
                tracing::debug!(user_id = user.id, "Login rejected: password mismatch");
                Err(AppError::InvalidCredentials)
            }
            None => {
                if let Some(hash) = DUMMY_HASH.as_deref() {
                    let _ = verify_password(&password, hash);
                }
                tracing::debug!("Login rejected: unknown identifier");
                Err(AppError::InvalidCredentials)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Metadata;
    use crate::infra::repositories::DUPLICATE_USER_MESSAGE;
    use crate::infra::{MockProfileRepository, MockUserRepository, ProfileRepository, UserRepository};
    use axum::http::StatusCode;

    struct TestUnitOfWork {
        users: Arc<MockUserRepository>,
        profiles: Arc<MockProfileRepository>,
    }

    impl UnitOfWork for TestUnitOfWork {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.users.clone()
        }

        fn profiles(&self) -> Arc<dyn ProfileRepository> {
            self.profiles.clone()
        }
    }

    fn service(users: MockUserRepository) -> Authenticator<TestUnitOfWork> {
        Authenticator::new(Arc::new(TestUnitOfWork {
            users: Arc::new(users),
            profiles: Arc::new(MockProfileRepository::new()),
        }))
    }

    fn stored_user(password: &str) -> User {
        User {
            id: 1,
            username: "jdoe".to_string(),
            phone_number: "1234567890".to_string(),
            password: Password::new(password).unwrap(),
            meta: Metadata::now(),
        }
    }

    async fn register(
        svc: &Authenticator<TestUnitOfWork>,
        username: &str,
        phone: &str,
        password: &str,
    ) -> AppResult<User> {
        svc.register(username.to_string(), phone.to_string(), password.to_string())
            .await
    }

    #[tokio::test]
    async fn test_register_success_stores_normalized_phone_and_hash() {
        let mut repo = MockUserRepository::new();
        repo.expect_phone_number_exists()
            .withf(|phone| phone == "1234567890")
            .returning(|_| Ok(false));
        repo.expect_username_exists().returning(|_| Ok(false));
        repo.expect_create()
            .withf(|new_user| {
                new_user.phone_number.as_str() == "1234567890"
                    && new_user.password.as_str() != "Abc12"
                    && new_user.password.verify("Abc12")
            })
            .times(1)
            .returning(|new_user| {
                Ok(User {
                    id: 1,
                    username: new_user.username,
                    phone_number: new_user.phone_number.into_string(),
                    password: new_user.password,
                    meta: Metadata::now(),
                })
            });

        let user = register(&service(repo), "jdoe", "12i34567890", "Abc12")
            .await
            .unwrap();

        assert_eq!(user.username, "jdoe");
        assert_eq!(user.phone_number, "1234567890");
    }

    #[tokio::test]
    async fn test_register_requires_all_fields() {
        // no expectations: any repository call fails the test
        let svc = service(MockUserRepository::new());

        for (u, ph, pw) in [("", "123456789", "Abc12"), ("jdoe", "", "Abc12"), ("jdoe", "123456789", "")] {
            let err = register(&svc, u, ph, pw).await.unwrap_err();
            assert_eq!(err.to_string(), "all fields are required");
        }
    }

    #[tokio::test]
    async fn test_register_rejects_bad_phone_before_lookup() {
        let svc = service(MockUserRepository::new());

        let err = register(&svc, "jdoe", "12345678", "Abc12").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.to_string(), "phone number must be between 9 and 12 digits long");
    }

    #[tokio::test]
    async fn test_register_duplicate_phone() {
        let mut repo = MockUserRepository::new();
        repo.expect_phone_number_exists().returning(|_| Ok(true));
        repo.expect_create().never();

        let err = register(&service(repo), "jdoe", "123456789", "Abc12")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Duplicate(_)));
        assert_eq!(err.to_string(), "phone number is already registered");
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let mut repo = MockUserRepository::new();
        repo.expect_phone_number_exists().returning(|_| Ok(false));
        repo.expect_username_exists().returning(|_| Ok(true));
        repo.expect_create().never();

        let err = register(&service(repo), "jdoe", "123456789", "Abc12")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "username is already taken");
    }

    #[tokio::test]
    async fn test_register_race_caught_by_unique_constraint() {
        let mut repo = MockUserRepository::new();
        repo.expect_phone_number_exists().returning(|_| Ok(false));
        repo.expect_username_exists().returning(|_| Ok(false));
        // another registration committed the same phone number in between
        repo.expect_create()
            .times(1)
            .returning(|_| Err(AppError::duplicate(DUPLICATE_USER_MESSAGE)));

        let err = register(&service(repo), "jdoe", "123456789", "Abc12")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Duplicate(_)));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "DUPLICATE");
        assert_eq!(err.to_string(), "username or phone number is already registered");
    }

    #[tokio::test]
    async fn test_register_weak_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_phone_number_exists().returning(|_| Ok(false));
        repo.expect_username_exists().returning(|_| Ok(false));
        repo.expect_create().never();

        let err = register(&service(repo), "jdoe", "123456789", "1234567")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "password cannot be entirely numeric");
    }

    #[tokio::test]
    async fn test_login_success_by_username() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_identifier()
            .withf(|username, phone| username == "jdoe" && phone == "jdoe")
            .returning(|_, _| Ok(Some(stored_user("Abc12"))));

        let user = service(repo)
            .login("jdoe".to_string(), "Abc12".to_string())
            .await
            .unwrap();

        assert_eq!(user.id, 1);
    }

    #[tokio::test]
    async fn test_login_normalizes_phone_identifier() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_identifier()
            .withf(|username, phone| username == "12i34567890" && phone == "1234567890")
            .returning(|_, _| Ok(Some(stored_user("Abc12"))));

        let result = service(repo)
            .login("12i34567890".to_string(), "Abc12".to_string())
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let mut wrong_password = MockUserRepository::new();
        wrong_password
            .expect_find_by_identifier()
            .returning(|_, _| Ok(Some(stored_user("Abc12"))));
        let mut unknown_user = MockUserRepository::new();
        unknown_user
            .expect_find_by_identifier()
            .returning(|_, _| Ok(None));

        let first = service(wrong_password)
            .login("jdoe".to_string(), "Wrong99".to_string())
            .await
            .unwrap_err();
        let second = service(unknown_user)
            .login("ghost".to_string(), "Abc12".to_string())
            .await
            .unwrap_err();

        assert!(matches!(first, AppError::InvalidCredentials));
        assert!(matches!(second, AppError::InvalidCredentials));
        assert_eq!(first.to_string(), second.to_string());
    }
}
