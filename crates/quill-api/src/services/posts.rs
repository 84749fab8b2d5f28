use quill_db::{DbError, queries};
use quill_types::models::Post;
use rusqlite::Connection;
use tracing::info;

use super::new_id;
use crate::error::ServiceError;
use crate::validation::{Field, validate};

pub struct PostService<'c> {
    conn: &'c Connection,
}

impl<'c> PostService<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// The author is not looked up first; the foreign key on
    /// `posts.author_id` rejects unknown authors.
    pub fn create_post(
        &self,
        title: &str,
        content: &str,
        author_id: &str,
    ) -> Result<Post, ServiceError> {
        let title = validate(Field::Title, title)?;
        let content = validate(Field::Content, content)?;

        let row = queries::insert_post(self.conn, &new_id(), &title, &content, author_id)
            .map_err(|e| match e {
                DbError::ForeignKeyViolation => ServiceError::UnknownAuthor(author_id.to_string()),
                other => other.into(),
            })?;

        info!("Created post: {}", row.id);
        Ok(row.into_model())
    }

    pub fn get_post(&self, id: &str) -> Result<Option<Post>, ServiceError> {
        Ok(queries::get_post_by_id(self.conn, id)?.map(|row| row.into_model()))
    }

    pub fn list_posts(&self) -> Result<Vec<Post>, ServiceError> {
        let rows = queries::list_posts(self.conn)?;
        Ok(rows.into_iter().map(|row| row.into_model()).collect())
    }

    pub fn search_posts(&self, query: &str) -> Result<Vec<Post>, ServiceError> {
        let needle = validate(Field::SearchQuery, query)?;
        let rows = queries::search_posts(self.conn, &needle)?;
        Ok(rows.into_iter().map(|row| row.into_model()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::UserService;
    use crate::services::test_support::temp_db;

    fn author(db: &quill_db::Database) -> String {
        db.with_tx(|tx| UserService::new(tx).create_user("writer", "pw"))
            .unwrap()
            .id
    }

    #[test]
    fn create_trims_and_round_trips() {
        let (_dir, db) = temp_db();
        let author_id = author(&db);

        let post = db
            .with_tx(|tx| PostService::new(tx).create_post("  Hello  ", " World ", &author_id))
            .unwrap();
        assert_eq!(post.title, "Hello");
        assert_eq!(post.content, "World");
        assert_eq!(post.author_id, author_id);
        assert!(post.updated_at.is_none());

        let fetched = db
            .with_tx(|tx| PostService::new(tx).get_post(&post.id))
            .unwrap();
        assert_eq!(fetched, Some(post));
    }

    #[test]
    fn title_length_limits() {
        let (_dir, db) = temp_db();
        let author_id = author(&db);

        let ok = "t".repeat(200);
        assert!(db
            .with_tx(|tx| PostService::new(tx).create_post(&ok, "body", &author_id))
            .is_ok());

        let long = "t".repeat(201);
        let err = db
            .with_tx(|tx| PostService::new(tx).create_post(&long, "body", &author_id))
            .unwrap_err();
        assert_eq!(err.to_string(), "Title cannot exceed 200 characters");

        let err = db
            .with_tx(|tx| PostService::new(tx).create_post("", "body", &author_id))
            .unwrap_err();
        assert_eq!(err.to_string(), "Title cannot be empty");
    }

    #[test]
    fn unknown_author_is_reported() {
        let (_dir, db) = temp_db();
        let err = db
            .with_tx(|tx| PostService::new(tx).create_post("Title", "body", "nobody"))
            .unwrap_err();
        assert!(matches!(err, ServiceError::UnknownAuthor(ref id) if id == "nobody"));
    }

    #[test]
    fn missing_post_is_none() {
        let (_dir, db) = temp_db();
        let res = db
            .with_tx(|tx| {
                PostService::new(tx).get_post("00000000-0000-4000-8000-000000000000")
            })
            .unwrap();
        assert!(res.is_none());
    }

    #[test]
    fn search_requires_a_query() {
        let (_dir, db) = temp_db();
        let author_id = author(&db);
        db.with_tx(|tx| PostService::new(tx).create_post("Rust tips", "borrowck", &author_id))
            .unwrap();

        let hits = db
            .with_tx(|tx| PostService::new(tx).search_posts(" tips "))
            .unwrap();
        assert_eq!(hits.len(), 1);

        let err = db
            .with_tx(|tx| PostService::new(tx).search_posts("  "))
            .unwrap_err();
        assert_eq!(err.to_string(), "Query cannot be empty");
    }
}
