//! Bookkeeping fields shared by every persisted entity.

use chrono::{DateTime, Utc};

/// Creation and modification timestamps, embedded in each entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Metadata {
    /// Metadata for a record created now.
    pub fn now() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
        }
    }
}
