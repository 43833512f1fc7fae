//! In-memory storage double for driving the router without a database.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use user_registry::api::{create_router, AppState};
use user_registry::config::ROLE_USER;
use chrono::Utc;
use user_registry::domain::{
    Metadata, NewProfile, NewUser, Profile, ProfileChanges, User, UserWithProfile,
};
use user_registry::errors::{AppError, AppResult};
use user_registry::infra::repositories::{DUPLICATE_USER_MESSAGE, EMAIL_IN_USE_MESSAGE};
use user_registry::infra::{ProfileRepository, UnitOfWork, UserRepository};
use user_registry::services::Services;

#[derive(Default)]
pub struct Tables {
    pub users: Vec<User>,
    pub profiles: Vec<Profile>,
    next_user_id: i32,
    next_profile_id: i32,
}

/// Both repositories over one set of tables, with the same uniqueness rules
/// as the real schema.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        Ok(self.tables().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_with_profile(&self, id: i32) -> AppResult<Option<UserWithProfile>> {
        let tables = self.tables();
        Ok(tables.users.iter().find(|u| u.id == id).map(|user| UserWithProfile {
            user: user.clone(),
            profile: tables.profiles.iter().find(|p| p.user_id == id).cloned(),
        }))
    }

    async fn find_by_identifier(
        &self,
        username: &str,
        phone_number: &str,
    ) -> AppResult<Option<User>> {
        Ok(self
            .tables()
            .users
            .iter()
            .find(|u| u.username == username || u.phone_number == phone_number)
            .cloned())
    }

    async fn username_exists(&self, username: &str) -> AppResult<bool> {
        Ok(self.tables().users.iter().any(|u| u.username == username))
    }

    async fn phone_number_exists(&self, phone_number: &str) -> AppResult<bool> {
        Ok(self.tables().users.iter().any(|u| u.phone_number == phone_number))
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let mut tables = self.tables();
        if tables.users.iter().any(|u| {
            u.username == new_user.username || u.phone_number == new_user.phone_number.as_str()
        }) {
            return Err(AppError::duplicate(DUPLICATE_USER_MESSAGE));
        }

        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            username: new_user.username,
            phone_number: new_user.phone_number.into_string(),
            password: new_user.password,
            meta: Metadata::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.tables().users.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tables = self.tables();
        if !tables.users.iter().any(|u| u.id == id) {
            return Err(AppError::NotFound("User"));
        }
        tables.profiles.retain(|p| p.user_id != id);
        tables.users.retain(|u| u.id != id);
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn find_by_user_id(&self, user_id: i32) -> AppResult<Option<Profile>> {
        Ok(self.tables().profiles.iter().find(|p| p.user_id == user_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Profile>> {
        Ok(self.tables().profiles.iter().find(|p| p.email == email).cloned())
    }

    async fn create(&self, user_id: i32, new: NewProfile) -> AppResult<Profile> {
        let mut tables = self.tables();
        if tables.profiles.iter().any(|p| p.email == new.email) {
            return Err(AppError::conflict(EMAIL_IN_USE_MESSAGE));
        }

        tables.next_profile_id += 1;
        let profile = Profile {
            id: tables.next_profile_id,
            user_id,
            email: new.email,
            first_name: new.first_name,
            last_name: new.last_name,
            is_active: new.is_active,
            is_email_verified: new.is_email_verified,
            role: new.role.unwrap_or_else(|| ROLE_USER.to_string()),
            image: new.image,
            bio: new.bio,
            meta: Metadata::now(),
        };
        tables.profiles.push(profile.clone());
        Ok(profile)
    }

    async fn update(&self, id: i32, changes: ProfileChanges) -> AppResult<Profile> {
        let mut tables = self.tables();
        if let Some(email) = changes.email.as_deref() {
            if tables.profiles.iter().any(|p| p.email == email && p.id != id) {
                return Err(AppError::conflict(EMAIL_IN_USE_MESSAGE));
            }
        }

        let row = tables
            .profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(AppError::NotFound("Profile"))?;
        if let Some(email) = changes.email {
            row.email = email;
        }
        if let Some(first_name) = changes.first_name {
            row.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            row.last_name = last_name;
        }
        if let Some(is_active) = changes.is_active {
            row.is_active = is_active;
        }
        if let Some(is_email_verified) = changes.is_email_verified {
            row.is_email_verified = is_email_verified;
        }
        if let Some(role) = changes.role {
            row.role = role;
        }
        if let Some(image) = changes.image {
            row.image = image;
        }
        if let Some(bio) = changes.bio {
            row.bio = bio;
        }
        row.meta.updated_at = Utc::now();
        Ok(row.clone())
    }
}

pub struct MemoryUnitOfWork {
    store: Arc<MemoryStore>,
}

impl UnitOfWork for MemoryUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.store.clone()
    }

    fn profiles(&self) -> Arc<dyn ProfileRepository> {
        self.store.clone()
    }
}

/// Router wired to a fresh in-memory store, plus a handle to inspect it.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        let uow = Arc::new(MemoryUnitOfWork {
            store: store.clone(),
        });
        let services = Services::from_unit_of_work(uow);

        Self {
            router: create_router(AppState::new(&services)),
            store,
        }
    }

    /// Send a request and return the status with the parsed JSON body
    /// (`Value::Null` for empty or non-JSON bodies).
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = match body {
            Some(json) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => Request::builder().method(method).uri(uri).body(Body::empty()),
        }
        .unwrap();

        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    /// Register a user and return its ID.
    pub async fn register(&self, username: &str, phone_number: &str, password: &str) -> i64 {
        let (status, body) = self
            .send(
                Method::POST,
                "/register",
                Some(serde_json::json!({
                    "username": username,
                    "phone_number": phone_number,
                    "password": password,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_i64().unwrap()
    }
}
