//! # rescat-db
//!
//! libSQL persistence for the research catalog.
//!
//! Owns the `research_records` table: validated inserts, partial updates,
//! deletes, filtered and paginated listings, grouped analytics and CSV
//! import/export. Repository methods live on `RecordService` in `repos/`.

pub mod error;
pub mod helpers;
mod migrations;
pub mod query;
pub mod repos;
pub mod service;
pub mod updates;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Database handle: a libSQL database and its single connection.
pub struct RescatDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl RescatDb {
    /// Open a local database at the given path (`":memory:"` for a throwaway one).
    ///
    /// Runs migrations automatically.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let rescat_db = Self { db, conn };
        rescat_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(rescat_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> RescatDb {
        RescatDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;
        let mut rows = db
            .conn()
            .query(
                "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                ["research_records"],
            )
            .await
            .unwrap();
        assert!(rows.next().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn indexes_exist() {
        let db = test_db().await;
        let indexes = [
            "idx_research_records_title",
            "idx_research_records_author",
            "idx_research_records_category",
            "idx_research_records_publication_date",
            "idx_research_records_created_at",
            "idx_research_records_category_date",
        ];
        for index in &indexes {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='index' AND name=?1",
                    [*index],
                )
                .await
                .unwrap();
            assert!(
                rows.next().await.unwrap().is_some(),
                "index '{index}' should exist"
            );
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn file_database_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.db");
        let path = path.to_str().unwrap();

        {
            let db = RescatDb::open_local(path).await.unwrap();
            db.conn()
                .execute(
                    "INSERT INTO research_records (title, author, category, publication_date, created_at, updated_at)
                     VALUES ('Persisted title', 'Ada', 'Math', '2024-01-01', '2024-01-01T00:00:00.000000Z', '2024-01-01T00:00:00.000000Z')",
                    (),
                )
                .await
                .unwrap();
        }

        let db = RescatDb::open_local(path).await.unwrap();
        let mut rows = db
            .conn()
            .query("SELECT COUNT(*) FROM research_records", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 1);
    }
}
