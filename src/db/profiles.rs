// src/db/profiles.rs
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension};

pub const ROLE_AGENT: &str = "agent";
pub const ROLE_BUYER: &str = "buyer";

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
}

impl Profile {
    pub fn is_agent(&self) -> bool {
        self.role == ROLE_AGENT
    }

    /// First letter of each name, uppercased. Falls back to "U".
    pub fn initials(&self) -> String {
        let initials: String = [&self.first_name, &self.last_name]
            .iter()
            .filter_map(|n| n.trim().chars().next())
            .flat_map(char::to_uppercase)
            .collect();

        if initials.is_empty() {
            "U".to_string()
        } else {
            initials
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

pub fn get_profile(conn: &Connection, user_id: i64) -> Result<Option<Profile>, ServerError> {
    conn.query_row(
        "select id, first_name, last_name, email, role from profiles where id = ?",
        params![user_id],
        |r| {
            Ok(Profile {
                id: r.get(0)?,
                first_name: r.get(1)?,
                last_name: r.get(2)?,
                email: r.get(3)?,
                role: r.get(4)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select profile failed: {e}")))
}

/// Insert or replace the profile keyed by `profile.id`.
pub fn upsert_profile(conn: &Connection, profile: &Profile) -> Result<(), ServerError> {
    conn.execute(
        r#"
        insert into profiles (id, first_name, last_name, email, role)
        values (?, ?, ?, ?, ?)
        on conflict(id) do update set
            first_name = excluded.first_name,
            last_name  = excluded.last_name,
            email      = excluded.email,
            role       = excluded.role
        "#,
        params![
            profile.id,
            profile.first_name,
            profile.last_name,
            profile.email,
            profile.role
        ],
    )
    .map_err(|e| ServerError::DbError(format!("upsert profile failed: {e}")))?;
    Ok(())
}
