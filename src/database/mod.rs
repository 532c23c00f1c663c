//! Database layer for identity-gateway
//!
//! This module defines the database trait and SQLite implementation.

pub mod migrations;
pub mod sqlite;

pub use sqlite::SqliteDatabase;

use async_trait::async_trait;

use crate::error::DbError;
use crate::models::{EventRecord, IdentityRecord};

/// Database trait for data persistence
///
/// This trait defines all database operations needed by the application.
/// It uses `async_trait` for async methods and `mockall::automock` for testing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Database: Send + Sync {
    /// List all event rows, oldest first
    async fn list_events(&self) -> Result<Vec<EventRecord>, DbError>;

    /// Insert an event row
    ///
    /// Returns the id of the inserted row
    async fn insert_event(&self, name: &str, description: &str) -> Result<i64, DbError>;

    /// Fetch an identity by id
    ///
    /// Returns None when no row matches
    async fn fetch_identity(&self, id: &str) -> Result<Option<IdentityRecord>, DbError>;

    /// Insert an identity row
    ///
    /// Returns the number of rows affected
    async fn insert_identity(&self, record: &IdentityRecord) -> Result<usize, DbError>;
}
