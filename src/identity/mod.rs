//! Identity service
//!
//! Business logic for identity rows, over the injected database capability.
//! All failures are explicit Results; nothing in this path panics.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::database::Database;
use crate::error::DbError;
use crate::models::IdentityRecord;

/// Maximum stored length of a generated identity id
const ID_LENGTH: usize = 50;

/// Sample values inserted at creation time; the service predates any
/// caller-supplied identity payload.
const SAMPLE_FIRST_NAME: &str = "adam";
const SAMPLE_LAST_NAME: &str = "cobb";
const SAMPLE_EMAIL: &str = "test@gmail.com";

/// Identity business logic over a database capability
pub struct IdentityService<D: Database> {
    db: Arc<D>,
}

impl<D: Database> IdentityService<D> {
    /// Create a new identity service
    pub fn new(db: Arc<D>) -> Self {
        Self { db }
    }

    /// Fetch an identity row by id
    pub async fn fetch(&self, id: &str) -> Result<Option<IdentityRecord>, DbError> {
        let record = self.db.fetch_identity(id).await?;
        debug!(id = %id, found = record.is_some(), "identity fetch");
        Ok(record)
    }

    /// Create a new identity row and read it back
    ///
    /// The id is a composite of two freshly generated UUIDs, truncated to
    /// the stored column width.
    pub async fn create(&self) -> Result<IdentityRecord, DbError> {
        let id = generate_identity_id();
        debug!(id = %id, "creating identity");

        let record = IdentityRecord::new(&id, SAMPLE_FIRST_NAME, SAMPLE_LAST_NAME)
            .with_profile(serde_json::json!({ "email": SAMPLE_EMAIL }));

        let affected = self.db.insert_identity(&record).await?;
        if affected != 1 {
            return Err(DbError::UnexpectedRowCount(affected));
        }

        self.db
            .fetch_identity(&id)
            .await?
            .ok_or(DbError::NotFound)
    }
}

/// Generate a composite identity id from two UUIDs
fn generate_identity_id() -> String {
    let mut id = format!("{}-{}", Uuid::new_v4(), Uuid::new_v4());
    id.truncate(ID_LENGTH);
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MockDatabase;

    // Test 1: fetch passes through the stored row
    #[tokio::test]
    async fn test_fetch_found() {
        let mut mock = MockDatabase::new();
        mock.expect_fetch_identity()
            .returning(|id| Ok(Some(IdentityRecord::new(id, "adam", "cobb"))));

        let service = IdentityService::new(Arc::new(mock));
        let record = service.fetch("some-id").await.unwrap().unwrap();
        assert_eq!(record.id, "some-id");
    }

    // Test 2: fetch reports a missing row as None
    #[tokio::test]
    async fn test_fetch_missing() {
        let mut mock = MockDatabase::new();
        mock.expect_fetch_identity().returning(|_| Ok(None));

        let service = IdentityService::new(Arc::new(mock));
        assert!(service.fetch("no-such-id").await.unwrap().is_none());
    }

    // Test 3: create inserts and reads back the new row
    #[tokio::test]
    async fn test_create_round_trip() {
        let mut mock = MockDatabase::new();
        mock.expect_insert_identity().returning(|_| Ok(1));
        mock.expect_fetch_identity()
            .returning(|id| Ok(Some(IdentityRecord::new(id, "adam", "cobb"))));

        let service = IdentityService::new(Arc::new(mock));
        let record = service.create().await.unwrap();
        assert_eq!(record.first_name, "adam");
        assert_eq!(record.id.len(), ID_LENGTH);
    }

    // Test 4: create fails when the insert touched no rows
    #[tokio::test]
    async fn test_create_unexpected_row_count() {
        let mut mock = MockDatabase::new();
        mock.expect_insert_identity().returning(|_| Ok(0));

        let service = IdentityService::new(Arc::new(mock));
        let result = service.create().await;
        assert!(matches!(result, Err(DbError::UnexpectedRowCount(0))));
    }

    // Test 5: create fails when the read-back finds nothing
    #[tokio::test]
    async fn test_create_read_back_missing() {
        let mut mock = MockDatabase::new();
        mock.expect_insert_identity().returning(|_| Ok(1));
        mock.expect_fetch_identity().returning(|_| Ok(None));

        let service = IdentityService::new(Arc::new(mock));
        let result = service.create().await;
        assert!(matches!(result, Err(DbError::NotFound)));
    }

    // Test 6: generated ids are unique and of fixed length
    #[test]
    fn test_generate_identity_id() {
        let id1 = generate_identity_id();
        let id2 = generate_identity_id();
        assert_eq!(id1.len(), ID_LENGTH);
        assert_eq!(id2.len(), ID_LENGTH);
        assert_ne!(id1, id2);
    }
}
