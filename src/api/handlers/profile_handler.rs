//! Profile handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{UserId, ValidatedJson};
use crate::api::AppState;
use crate::config::MAX_IMAGE_LENGTH;
use crate::domain::{NewProfile, ProfileChanges, ProfileResponse};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created};

/// Profile creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProfileRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jdoe@example.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "Jane")]
    pub first_name: String,
    #[serde(default)]
    #[schema(example = "Doe")]
    pub last_name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_email_verified: bool,
    /// Defaults to `user`
    pub role: Option<String>,
    #[serde(default)]
    #[validate(length(max = MAX_IMAGE_LENGTH, message = "image reference must be at most 255 characters"))]
    pub image: String,
    #[serde(default)]
    pub bio: String,
}

impl From<CreateProfileRequest> for NewProfile {
    fn from(req: CreateProfileRequest) -> Self {
        Self {
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            is_active: req.is_active,
            is_email_verified: req.is_email_verified,
            role: req.role.filter(|role| !role.is_empty()),
            image: req.image,
            bio: req.bio,
        }
    }
}

/// Partial profile update; omitted fields keep their value
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    /// Ignored: the user in the path always owns the profile
    pub user_id: Option<i32>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: Option<bool>,
    pub is_email_verified: Option<bool>,
    pub role: Option<String>,
    #[validate(length(max = MAX_IMAGE_LENGTH, message = "image reference must be at most 255 characters"))]
    pub image: Option<String>,
    pub bio: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileChanges {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            is_active: req.is_active,
            is_email_verified: req.is_email_verified,
            role: req.role,
            image: req.image,
            bio: req.bio,
        }
    }
}

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/profile/:user_id", post(create_profile).put(update_profile))
}

/// Create the profile of a user
#[utoipa::path(
    post,
    path = "/profile/{user_id}",
    tag = "Profiles",
    params(("user_id" = i32, Path, description = "Owner user ID")),
    request_body = CreateProfileRequest,
    responses(
        (status = 201, description = "Profile created", body = ProfileResponse),
        (status = 400, description = "Invalid user ID or request body"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Profile already exists or email in use")
    )
)]
pub async fn create_profile(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    ValidatedJson(payload): ValidatedJson<CreateProfileRequest>,
) -> AppResult<Created<ProfileResponse>> {
    let profile = state
        .profile_service
        .create_profile(user_id, payload.into())
        .await?;

    Ok(Created(ProfileResponse::from(profile), "Profile created successfully"))
}

/// Update the profile of a user
#[utoipa::path(
    put,
    path = "/profile/{user_id}",
    tag = "Profiles",
    params(("user_id" = i32, Path, description = "Owner user ID")),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Invalid user ID or request body"),
        (status = 404, description = "User or profile not found"),
        (status = 409, description = "Email in use")
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<ProfileResponse>>> {
    if let Some(body_user_id) = payload.user_id.filter(|&id| id != user_id) {
        tracing::debug!(user_id, body_user_id, "Ignoring user_id from request body");
    }

    let profile = state
        .profile_service
        .update_profile(user_id, payload.into())
        .await?;

    Ok(Json(ApiResponse::with_message(
        ProfileResponse::from(profile),
        "Profile updated successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_empty_role_falls_back_to_default() {
        let req: CreateProfileRequest =
            serde_json::from_str(r#"{"email":"a@example.com","role":""}"#).unwrap();
        let new: NewProfile = req.into();
        assert_eq!(new.role, None);
    }

    #[test]
    fn test_update_request_drops_user_id() {
        let req: UpdateProfileRequest =
            serde_json::from_str(r#"{"user_id":99,"bio":"hi"}"#).unwrap();
        let changes: ProfileChanges = req.into();
        assert_eq!(
            changes,
            ProfileChanges {
                bio: Some("hi".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_image_length_limit() {
        let req = CreateProfileRequest {
            email: "a@example.com".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            is_active: false,
            is_email_verified: false,
            role: None,
            image: "x".repeat(MAX_IMAGE_LENGTH as usize + 1),
            bio: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_rejects_bad_email() {
        let req = UpdateProfileRequest {
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }
}
