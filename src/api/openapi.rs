//! OpenAPI documentation served through Swagger UI.

use utoipa::OpenApi;

use crate::api::handlers::{auth_handler, profile_handler, user_handler};
use crate::domain::{ProfileResponse, UserResponse};
use crate::types::MessageResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Registry",
        version = "0.1.0",
        description = "User registration, login and profile management"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        auth_handler::register,
        auth_handler::login,
        profile_handler::create_profile,
        profile_handler::update_profile,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::delete_user,
    ),
    components(
        schemas(
            UserResponse,
            ProfileResponse,
            MessageResponse,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            profile_handler::CreateProfileRequest,
            profile_handler::UpdateProfileRequest,
        )
    ),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Profiles", description = "Per-user profile management"),
        (name = "Users", description = "User listing, lookup and deletion")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in ["/register", "/login", "/profile/{user_id}", "/users", "/users/{id}"] {
            assert!(doc.paths.paths.contains_key(path), "{path} missing");
        }
    }
}
