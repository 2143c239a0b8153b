// src/db/properties.rs
use crate::db::connection::Database;
use crate::errors::ServerError;
use chrono::{SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

const SELECT_COLUMNS: &str = "id, street, city, state, price, bedrooms, bathrooms, sqft, \
     offer_type, type, description, image_url, agent_id, created_at";

/// A row of the `properties` collection, exactly as persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRow {
    pub id: i64,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub price: Option<f64>,
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    pub sqft: Option<f64>,
    pub offer_type: Option<String>,
    pub property_type: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub agent_id: i64,
    /// RFC 3339, UTC.
    pub created_at: String,
}

/// Editable fields of a listing, shared by insert and update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyFields {
    pub street: String,
    pub city: String,
    pub state: String,
    pub price: Option<f64>,
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    pub sqft: Option<f64>,
    pub offer_type: String,
    pub property_type: String,
    pub description: String,
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<PropertyRow> {
    Ok(PropertyRow {
        id: row.get(0)?,
        street: row.get(1)?,
        city: row.get(2)?,
        state: row.get(3)?,
        price: row.get(4)?,
        bedrooms: row.get(5)?,
        bathrooms: row.get(6)?,
        sqft: row.get(7)?,
        offer_type: row.get(8)?,
        property_type: row.get(9)?,
        description: row.get(10)?,
        image_url: row.get(11)?,
        agent_id: row.get(12)?,
        created_at: row.get(13)?,
    })
}

fn query_rows(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<PropertyRow>, ServerError> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| ServerError::DbError(format!("prepare properties query failed: {e}")))?;

    let rows = stmt
        .query_map(params, map_row)
        .map_err(|e| ServerError::DbError(format!("query properties failed: {e}")))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(format!("read property row failed: {e}")))?);
    }
    Ok(out)
}

/// Newest listings first, at most `limit` of them.
pub fn list_recent(db: &Database, limit: usize) -> Result<Vec<PropertyRow>, ServerError> {
    let sql = format!(
        "select {SELECT_COLUMNS} from properties order by created_at desc, id desc limit ?"
    );
    db.with_conn(|conn| query_rows(conn, &sql, params![limit as i64]))
}

/// Every listing, newest first.
pub fn list_all(db: &Database) -> Result<Vec<PropertyRow>, ServerError> {
    let sql = format!("select {SELECT_COLUMNS} from properties order by created_at desc, id desc");
    db.with_conn(|conn| query_rows(conn, &sql, []))
}

pub fn list_by_agent(db: &Database, agent_id: i64) -> Result<Vec<PropertyRow>, ServerError> {
    let sql = format!(
        "select {SELECT_COLUMNS} from properties where agent_id = ? order by created_at desc, id desc"
    );
    db.with_conn(|conn| query_rows(conn, &sql, params![agent_id]))
}

pub fn get(db: &Database, id: i64) -> Result<Option<PropertyRow>, ServerError> {
    let sql = format!("select {SELECT_COLUMNS} from properties where id = ?");
    db.with_conn(|conn| {
        conn.query_row(&sql, params![id], map_row)
            .optional()
            .map_err(|e| ServerError::DbError(format!("select property failed: {e}")))
    })
}

pub fn insert(
    db: &Database,
    agent_id: i64,
    fields: &PropertyFields,
    image_url: &str,
) -> Result<i64, ServerError> {
    let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    db.with_conn(|conn| {
        conn.execute(
            r#"
            insert into properties (
                street, city, state, price, bedrooms, bathrooms, sqft,
                offer_type, type, description, image_url, agent_id, created_at
            ) values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                fields.street,
                fields.city,
                fields.state,
                fields.price,
                fields.bedrooms,
                fields.bathrooms,
                fields.sqft,
                fields.offer_type,
                fields.property_type,
                fields.description,
                image_url,
                agent_id,
                created_at,
            ],
        )
        .map_err(|e| ServerError::DbError(format!("insert property failed: {e}")))?;

        Ok(conn.last_insert_rowid())
    })
}

/// Overwrite the editable fields. The image only changes when a new one is given.
pub fn update(
    db: &Database,
    id: i64,
    fields: &PropertyFields,
    image_url: Option<&str>,
) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        let updated = conn
            .execute(
                r#"
                update properties set
                    street = ?, city = ?, state = ?, price = ?, bedrooms = ?,
                    bathrooms = ?, sqft = ?, offer_type = ?, type = ?, description = ?,
                    image_url = coalesce(?, image_url)
                where id = ?
                "#,
                params![
                    fields.street,
                    fields.city,
                    fields.state,
                    fields.price,
                    fields.bedrooms,
                    fields.bathrooms,
                    fields.sqft,
                    fields.offer_type,
                    fields.property_type,
                    fields.description,
                    image_url,
                    id,
                ],
            )
            .map_err(|e| ServerError::DbError(format!("update property failed: {e}")))?;

        if updated == 0 {
            return Err(ServerError::NotFound);
        }
        Ok(())
    })
}
