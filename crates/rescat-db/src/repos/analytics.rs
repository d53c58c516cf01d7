//! Aggregate counts over the whole catalog.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use rescat_core::responses::Analytics;

use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, get_count};
use crate::service::RecordService;

/// Width of the `recent_additions` window.
pub const RECENT_WINDOW_DAYS: i64 = 30;

impl RecordService {
    /// Analytics relative to the current time.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails.
    pub async fn analytics(&self) -> Result<Analytics, DatabaseError> {
        self.analytics_at(Utc::now()).await
    }

    /// Analytics with the recent-additions window ending at `now`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails.
    pub async fn analytics_at(&self, now: DateTime<Utc>) -> Result<Analytics, DatabaseError> {
        let total_count = self.count_records().await?;
        let by_category = self
            .grouped_counts(
                "SELECT category, COUNT(*) FROM research_records GROUP BY category",
            )
            .await?;
        let by_month = self
            .grouped_counts(
                "SELECT strftime('%Y-%m', publication_date) AS month, COUNT(*)
                 FROM research_records GROUP BY month",
            )
            .await?;

        let cutoff = format_timestamp(now - Duration::days(RECENT_WINDOW_DAYS));
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT COUNT(*) FROM research_records WHERE created_at >= ?1",
                [cutoff],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let recent_additions = get_count(&row, 0)?;

        Ok(Analytics {
            total_count,
            by_category,
            by_month,
            recent_additions,
        })
    }

    async fn grouped_counts(&self, sql: &str) -> Result<BTreeMap<String, u64>, DatabaseError> {
        let mut rows = self.db().conn().query(sql, ()).await?;
        let mut counts = BTreeMap::new();
        while let Some(row) = rows.next().await? {
            let key = row.get::<Option<String>>(0)?.unwrap_or_default();
            counts.insert(key, get_count(&row, 1)?);
        }
        Ok(counts)
    }
}
