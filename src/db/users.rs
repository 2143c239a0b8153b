// src/db/users.rs
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension};

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
}

/// Insert a new user. Email should already be normalized by the caller.
/// Returns `BadRequest` when the email is taken.
pub fn create_user(
    conn: &Connection,
    email: &str,
    password_hash: &str,
    now: i64,
) -> Result<i64, ServerError> {
    let inserted = conn
        .execute(
            "insert or ignore into users (email, password_hash, created_at) values (?, ?, ?)",
            params![email, password_hash, now],
        )
        .map_err(|e| ServerError::DbError(format!("insert user failed: {e}")))?;

    if inserted == 0 {
        return Err(ServerError::BadRequest("an account with this email already exists".into()));
    }

    Ok(conn.last_insert_rowid())
}

pub fn find_user_by_email(conn: &Connection, email: &str) -> Result<Option<UserRow>, ServerError> {
    conn.query_row(
        "select id, email, password_hash from users where email = ?",
        params![email],
        |r| {
            Ok(UserRow {
                id: r.get(0)?,
                email: r.get(1)?,
                password_hash: r.get(2)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select user failed: {e}")))
}

pub fn touch_last_login(conn: &Connection, user_id: i64, now: i64) -> Result<(), ServerError> {
    conn.execute(
        "update users set last_login_at = ? where id = ?",
        params![now, user_id],
    )
    .map_err(|e| ServerError::DbError(format!("update last_login_at failed: {e}")))?;
    Ok(())
}
