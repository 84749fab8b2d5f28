//! Database row types. These map directly to SQLite rows and are kept
//! distinct from the quill-types models so the storage layer owns its format.

use chrono::{DateTime, NaiveDateTime, Utc};
use quill_types::models::{Comment, Post, User};
use tracing::warn;

pub struct UserRow {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: String,
}

pub struct PostRow {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author_id: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}

pub struct CommentRow {
    pub id: String,
    pub post_id: String,
    pub content: String,
    pub author_id: String,
    pub created_at: String,
}

impl UserRow {
    pub fn into_model(self) -> User {
        let created_at = parse_timestamp(&self.created_at, &self.id);
        User {
            id: self.id,
            username: self.username,
            created_at,
        }
    }
}

impl PostRow {
    pub fn into_model(self) -> Post {
        let created_at = parse_timestamp(&self.created_at, &self.id);
        let updated_at = self
            .updated_at
            .as_deref()
            .map(|raw| parse_timestamp(raw, &self.id));
        Post {
            id: self.id,
            title: self.title,
            content: self.content,
            author_id: self.author_id,
            created_at,
            updated_at,
        }
    }
}

impl CommentRow {
    pub fn into_model(self) -> Comment {
        let created_at = parse_timestamp(&self.created_at, &self.id);
        Comment {
            id: self.id,
            post_id: self.post_id,
            content: self.content,
            author_id: self.author_id,
            created_at,
        }
    }
}

/// Rows written by the schema defaults are RFC 3339. Rows written by hand
/// (e.g. `datetime('now')`) are "YYYY-MM-DD HH:MM:SS" with no zone, read as UTC.
fn parse_timestamp(raw: &str, row_id: &str) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt timestamp '{}' on row '{}': {}", raw, row_id, e);
            DateTime::default()
        })
}
