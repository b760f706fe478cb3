use chrono::{DateTime, Utc};

/// A note row as persisted in the store. `id` is assigned by the store and
/// is immutable; `updated_at` is refreshed by the store on every update.
#[derive(Debug, Clone)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
