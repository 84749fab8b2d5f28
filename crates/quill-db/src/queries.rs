//! One function per SQL statement. Every statement is parameterized; none
//! of them builds SQL from caller input.

use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::error::DbResult;
use crate::models::{CommentRow, PostRow, UserRow};

// -- Users --

pub fn insert_user(
    conn: &Connection,
    id: &str,
    username: &str,
    password_hash: &str,
) -> DbResult<UserRow> {
    let row = conn.query_row(
        "INSERT INTO users (id, username, password_hash) VALUES (?1, ?2, ?3)
         RETURNING id, username, password_hash, created_at",
        params![id, username, password_hash],
        user_from_row,
    )?;
    Ok(row)
}

/// Exact, case-sensitive match on both username and hash.
pub fn find_user_by_credentials(
    conn: &Connection,
    username: &str,
    password_hash: &str,
) -> DbResult<Option<UserRow>> {
    let row = conn
        .query_row(
            "SELECT id, username, password_hash, created_at
             FROM users
             WHERE username = ?1 AND password_hash = ?2",
            params![username, password_hash],
            user_from_row,
        )
        .optional()?;
    Ok(row)
}

pub fn get_user_by_id(conn: &Connection, id: &str) -> DbResult<Option<UserRow>> {
    let row = conn
        .query_row(
            "SELECT id, username, password_hash, created_at FROM users WHERE id = ?1",
            [id],
            user_from_row,
        )
        .optional()?;
    Ok(row)
}

// -- Posts --

pub fn insert_post(
    conn: &Connection,
    id: &str,
    title: &str,
    content: &str,
    author_id: &str,
) -> DbResult<PostRow> {
    let row = conn.query_row(
        "INSERT INTO posts (id, title, content, author_id) VALUES (?1, ?2, ?3, ?4)
         RETURNING id, title, content, author_id, created_at, updated_at",
        params![id, title, content, author_id],
        post_from_row,
    )?;
    Ok(row)
}

pub fn get_post_by_id(conn: &Connection, id: &str) -> DbResult<Option<PostRow>> {
    let row = conn
        .query_row(
            "SELECT id, title, content, author_id, created_at, updated_at
             FROM posts
             WHERE id = ?1",
            [id],
            post_from_row,
        )
        .optional()?;
    Ok(row)
}

pub fn post_exists(conn: &Connection, id: &str) -> DbResult<bool> {
    let found = conn
        .query_row("SELECT 1 FROM posts WHERE id = ?1", [id], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

/// Newest first. rowid breaks ties between posts created in the same millisecond.
pub fn list_posts(conn: &Connection) -> DbResult<Vec<PostRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, content, author_id, created_at, updated_at
         FROM posts
         ORDER BY created_at DESC, rowid DESC",
    )?;

    let rows = stmt
        .query_map([], post_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Substring match on title or content. SQLite's LIKE is case-insensitive
/// for ASCII only.
pub fn search_posts(conn: &Connection, needle: &str) -> DbResult<Vec<PostRow>> {
    let pattern = format!("%{}%", escape_like(needle));
    let mut stmt = conn.prepare(
        "SELECT id, title, content, author_id, created_at, updated_at
         FROM posts
         WHERE title LIKE ?1 ESCAPE '\\' OR content LIKE ?1 ESCAPE '\\'
         ORDER BY created_at DESC, rowid DESC",
    )?;

    let rows = stmt
        .query_map([pattern], post_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

// -- Comments --

pub fn insert_comment(
    conn: &Connection,
    id: &str,
    post_id: &str,
    content: &str,
    author_id: &str,
) -> DbResult<CommentRow> {
    let row = conn.query_row(
        "INSERT INTO comments (id, post_id, content, author_id) VALUES (?1, ?2, ?3, ?4)
         RETURNING id, post_id, content, author_id, created_at",
        params![id, post_id, content, author_id],
        comment_from_row,
    )?;
    Ok(row)
}

/// Oldest first; `seq` keeps insertion order when timestamps collide.
pub fn list_comments_for_post(conn: &Connection, post_id: &str) -> DbResult<Vec<CommentRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, post_id, content, author_id, created_at
         FROM comments
         WHERE post_id = ?1
         ORDER BY created_at ASC, seq ASC",
    )?;

    let rows = stmt
        .query_map([post_id], comment_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

// -- Row mapping --

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn post_from_row(row: &Row<'_>) -> rusqlite::Result<PostRow> {
    Ok(PostRow {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        author_id: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

fn comment_from_row(row: &Row<'_>) -> rusqlite::Result<CommentRow> {
    Ok(CommentRow {
        id: row.get(0)?,
        post_id: row.get(1)?,
        content: row.get(2)?,
        author_id: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
