//! Registration and login handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::types::{Created, MessageResponse};

/// User registration request
///
/// Missing fields deserialize as empty and are rejected by the service
/// with "all fields are required".
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(max = 150, message = "username must be at most 150 characters"))]
    #[schema(example = "jdoe")]
    pub username: String,
    /// 9 to 12 digits; the letter `i` is accepted as a filler and removed
    #[serde(default)]
    #[schema(example = "254i712345678")]
    pub phone_number: String,
    #[serde(default)]
    #[schema(example = "Secret42")]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Username or phone number
    #[validate(length(min = 1, message = "identifier is required"))]
    #[schema(example = "jdoe")]
    pub identifier: String,
    #[validate(length(min = 1, message = "password is required"))]
    #[schema(example = "Secret42")]
    pub password: String,
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = UserResponse),
        (status = 400, description = "Validation error or username/phone already taken"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Created<UserResponse>> {
    let user = state
        .auth_service
        .register(payload.username, payload.phone_number, payload.password)
        .await?;

    Ok(Created(UserResponse::from(user), "User registered successfully"))
}

/// Log in with a username or phone number
#[utoipa::path(
    post,
    path = "/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = MessageResponse),
        (status = 400, description = "Malformed request"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<MessageResponse>> {
    let user = state
        .auth_service
        .login(payload.identifier, payload.password)
        .await?;

    Ok(Json(MessageResponse::new(format!(
        "Login successful. Welcome, {}!",
        user.username
    ))))
}
