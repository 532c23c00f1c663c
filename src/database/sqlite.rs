//! SQLite implementation of the Database trait
//!
//! This module provides a SQLite-based implementation of the Database trait
//! using rusqlite and tokio-rusqlite for async operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension;
use tokio_rusqlite::Connection;

use super::migrations::CREATE_SCHEMA;
use super::Database;
use crate::error::DbError;
use crate::models::{EventRecord, IdentityRecord};

/// SQLite database implementation
pub struct SqliteDatabase {
    conn: Connection,
}

impl SqliteDatabase {
    /// Create a new SQLite database connection
    ///
    /// Use `:memory:` for in-memory database or a file path for persistent storage.
    pub async fn new(path: &str) -> Result<Self, DbError> {
        let conn = Connection::open(path).await?;

        // Run migrations
        conn.call(|conn| {
            conn.execute_batch(CREATE_SCHEMA)?;
            Ok(())
        })
        .await?;

        Ok(Self { conn })
    }

    /// Create a new in-memory database (useful for testing)
    pub async fn in_memory() -> Result<Self, DbError> {
        Self::new(":memory:").await
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn list_events(&self) -> Result<Vec<EventRecord>, DbError> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT id, name, description, date_added
                    FROM event
                    ORDER BY id
                    "#,
                )?;

                let events = stmt
                    .query_map([], |row| {
                        Ok(EventRecord {
                            id: row.get(0)?,
                            name: row.get(1)?,
                            description: row.get(2)?,
                            date_added: parse_datetime(3, row.get(3)?)?,
                        })
                    })?
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(events)
            })
            .await
            .map_err(Into::into)
    }

    async fn insert_event(&self, name: &str, description: &str) -> Result<i64, DbError> {
        let name = name.to_string();
        let description = description.to_string();
        let date_added = Utc::now().to_rfc3339();

        self.conn
            .call(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO event (name, description, date_added)
                    VALUES (?1, ?2, ?3)
                    "#,
                    rusqlite::params![name, description, date_added],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(Into::into)
    }

    async fn fetch_identity(&self, id: &str) -> Result<Option<IdentityRecord>, DbError> {
        let id = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT id, first_name, last_name, profile, created_at, updated_at
                    FROM identity
                    WHERE id = ?1
                    "#,
                )?;

                let record = stmt
                    .query_row([&id], |row| {
                        Ok(IdentityRecord {
                            id: row.get(0)?,
                            first_name: row.get(1)?,
                            last_name: row.get(2)?,
                            profile: parse_profile(3, row.get::<_, Option<String>>(3)?)?,
                            created_at: parse_datetime(4, row.get(4)?)?,
                            updated_at: parse_datetime(5, row.get(5)?)?,
                        })
                    })
                    .optional()?;

                Ok(record)
            })
            .await
            .map_err(Into::into)
    }

    async fn insert_identity(&self, record: &IdentityRecord) -> Result<usize, DbError> {
        let id = record.id.clone();
        let first_name = record.first_name.clone();
        let last_name = record.last_name.clone();
        let profile = record
            .profile
            .as_ref()
            .map(|p| p.to_string());
        let created_at = record.created_at.to_rfc3339();
        let updated_at = record.updated_at.to_rfc3339();

        self.conn
            .call(move |conn| {
                let affected = conn.execute(
                    r#"
                    INSERT INTO identity
                    (id, first_name, last_name, profile, created_at, updated_at)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                    "#,
                    rusqlite::params![id, first_name, last_name, profile, created_at, updated_at],
                )?;
                Ok(affected)
            })
            .await
            .map_err(Into::into)
    }
}

/// Parse an RFC3339 timestamp stored as TEXT
fn parse_datetime(column: usize, value: String) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

/// Parse a JSON profile document stored as TEXT
fn parse_profile(
    column: usize,
    value: Option<String>,
) -> rusqlite::Result<Option<serde_json::Value>> {
    match value {
        None => Ok(None),
        Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        }),
    }
}
