use quill_db::{DbError, queries};
use quill_types::models::Comment;
use rusqlite::Connection;
use tracing::info;

use super::new_id;
use crate::error::ServiceError;
use crate::validation::{Field, validate};

pub struct CommentService<'c> {
    conn: &'c Connection,
}

impl<'c> CommentService<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn create_comment(
        &self,
        post_id: &str,
        content: &str,
        author_id: &str,
    ) -> Result<Comment, ServiceError> {
        let content = validate(Field::Content, content)?;

        if !queries::post_exists(self.conn, post_id)? {
            return Err(ServiceError::PostNotFound(post_id.to_string()));
        }

        // Past the existence check a foreign key failure means the author is
        // unknown or the post went away in between.
        let row = queries::insert_comment(self.conn, &new_id(), post_id, &content, author_id)
            .map_err(|e| match e {
                DbError::ForeignKeyViolation => ServiceError::UnknownReference {
                    post_id: post_id.to_string(),
                    author_id: author_id.to_string(),
                },
                other => other.into(),
            })?;

        info!("Created comment: {} on post: {}", row.id, post_id);
        Ok(row.into_model())
    }

    /// Oldest first. Unknown posts have no comments.
    pub fn list_comments_by_post(&self, post_id: &str) -> Result<Vec<Comment>, ServiceError> {
        let rows = queries::list_comments_for_post(self.conn, post_id)?;
        Ok(rows.into_iter().map(|row| row.into_model()).collect())
    }
}
