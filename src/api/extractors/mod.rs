//! Custom request extractors.

mod user_id;
mod validated_json;

pub use user_id::{parse_user_id, UserId, INVALID_USER_ID_MESSAGE};
pub use validated_json::{ValidatedJson, INVALID_INPUT_MESSAGE};
