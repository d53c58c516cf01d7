//! Service handle shared by every repository method.
//!
//! `RecordService` wraps `RescatDb` and the configured page-size limits. All
//! repo methods are implemented as `impl RecordService` blocks in `repos/`.
//! The server builds one at startup and hands it to handlers as state.

use rescat_config::PaginationConfig;
use rescat_core::query::Pagination;

use crate::RescatDb;
use crate::error::DatabaseError;

pub struct RecordService {
    db: RescatDb,
    pagination: PaginationConfig,
}

impl RecordService {
    /// Create a service over a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path`: path to the libSQL database file, or `":memory:"` for tests.
    /// * `pagination`: default and maximum page sizes.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(
        db_path: &str,
        pagination: PaginationConfig,
    ) -> Result<Self, DatabaseError> {
        let db = RescatDb::open_local(db_path).await?;
        Ok(Self::from_db(db, pagination))
    }

    /// Create from an existing `RescatDb`.
    #[must_use]
    pub const fn from_db(db: RescatDb, pagination: PaginationConfig) -> Self {
        Self { db, pagination }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &RescatDb {
        &self.db
    }

    /// Resolve raw `page` / `per_page` request values against the configured limits.
    #[must_use]
    pub fn resolve_page(&self, page: Option<i64>, per_page: Option<i64>) -> Pagination {
        self.pagination.resolve(page, per_page)
    }
}
