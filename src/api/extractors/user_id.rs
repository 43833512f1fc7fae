//! Numeric user ID taken from the request path.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::errors::{AppError, AppResult};

pub const INVALID_USER_ID_MESSAGE: &str = "Invalid user ID";

/// Parse a path segment as a user ID.
pub fn parse_user_id(raw: &str) -> AppResult<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| AppError::bad_request(INVALID_USER_ID_MESSAGE))
}

/// Extractor for routes with a single numeric ID segment.
///
/// Non-numeric IDs are rejected with 400 before the handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request(INVALID_USER_ID_MESSAGE))?;

        parse_user_id(&raw).map(UserId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("42").unwrap(), 42);
        assert!(matches!(parse_user_id("abc"), Err(AppError::BadRequest(_))));
        assert!(parse_user_id("").is_err());
        assert!(parse_user_id("1.5").is_err());
        assert!(parse_user_id("99999999999").is_err());
    }
}
