use quill_db::{DbError, queries};
use quill_types::models::User;
use rusqlite::Connection;
use sha2::{Digest, Sha256};
use tracing::info;

use super::new_id;
use crate::error::ServiceError;
use crate::validation::{Field, validate};

pub struct UserService<'c> {
    conn: &'c Connection,
}

impl<'c> UserService<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Register a new user. The UNIQUE constraint on `users.username` is the
    /// only duplicate check, so concurrent registrations cannot both succeed.
    pub fn create_user(&self, username: &str, password: &str) -> Result<User, ServiceError> {
        let username = validate(Field::Username, username)?;
        let password = validate(Field::Password, password)?;

        let row = queries::insert_user(self.conn, &new_id(), &username, &hash_password(&password))
            .map_err(|e| match e {
                DbError::UniqueViolation(_) => ServiceError::DuplicateUsername(username.clone()),
                other => other.into(),
            })?;

        info!("Created user: {}", row.username);
        Ok(row.into_model())
    }

    /// `Ok(None)` for unknown users and wrong passwords alike.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>, ServiceError> {
        let user = queries::find_user_by_credentials(self.conn, username, &hash_password(password))?
            .map(|row| row.into_model());

        if let Some(user) = &user {
            info!("User authenticated: {}", user.username);
        }
        Ok(user)
    }

    pub fn get_user(&self, id: &str) -> Result<Option<User>, ServiceError> {
        Ok(queries::get_user_by_id(self.conn, id)?.map(|row| row.into_model()))
    }
}

/// Unsalted SHA-256, lowercase hex.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::temp_db;
    use crate::validation::ValidationError;

    #[test]
    fn hash_is_sha256_hex() {
        assert_eq!(
            hash_password("password"),
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
    }

    #[test]
    fn register_then_authenticate() {
        let (_dir, db) = temp_db();

        let created = db
            .with_tx(|tx| UserService::new(tx).create_user("alice", "s3cret"))
            .unwrap();
        assert_eq!(created.username, "alice");
        assert_eq!(created.id.len(), 36);

        let found = db
            .with_tx(|tx| UserService::new(tx).authenticate("alice", "s3cret"))
            .unwrap()
            .unwrap();
        assert_eq!(found.id, created.id);

        let miss = db
            .with_tx(|tx| UserService::new(tx).authenticate("alice", "wrong"))
            .unwrap();
        assert!(miss.is_none());

        let by_id = db
            .with_tx(|tx| UserService::new(tx).get_user(&created.id))
            .unwrap();
        assert_eq!(by_id, Some(created));
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let (_dir, db) = temp_db();
        db.with_tx(|tx| UserService::new(tx).create_user("bob", "one"))
            .unwrap();

        let err = db
            .with_tx(|tx| UserService::new(tx).create_user("bob", "two"))
            .unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateUsername(ref name) if name == "bob"));
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn empty_credentials_are_rejected() {
        let (_dir, db) = temp_db();
        let err = db
            .with_tx(|tx| UserService::new(tx).create_user("", "pw"))
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::Empty { label: "Username" })
        ));

        let err = db
            .with_tx(|tx| UserService::new(tx).create_user("carol", ""))
            .unwrap_err();
        assert_eq!(err.to_string(), "Password cannot be empty");
    }
}
