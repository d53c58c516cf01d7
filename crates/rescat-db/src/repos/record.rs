//! Research record repository: CRUD, filtered listings and categories.

use chrono::Utc;
use rescat_core::entities::{NewRecord, ResearchRecord};
use rescat_core::fields::Field;
use rescat_core::payload::RecordPayload;
use rescat_core::query::{Page, RecordFilter, RecordQuery};

use crate::error::DatabaseError;
use crate::helpers::{
    format_timestamp, get_count, get_opt_string, parse_date, parse_datetime, text_or_null,
};
use crate::query::{ORDER_BY, where_clause};
use crate::service::RecordService;
use crate::updates::record::RecordUpdate;

/// Column list matching `row_to_record`.
const COLUMNS: &str = "id, title, author, category, keywords, publication_date, abstract, \
     methodology, results, conclusions, journal, volume, issue, pages, doi, url, notes, \
     created_at, updated_at";

fn row_to_record(row: &libsql::Row) -> Result<ResearchRecord, DatabaseError> {
    Ok(ResearchRecord {
        id: row.get::<i64>(0)?,
        title: row.get::<String>(1)?,
        author: row.get::<String>(2)?,
        category: row.get::<String>(3)?,
        keywords: get_opt_string(row, 4)?,
        publication_date: parse_date(&row.get::<String>(5)?)?,
        abstract_text: get_opt_string(row, 6)?,
        methodology: get_opt_string(row, 7)?,
        results: get_opt_string(row, 8)?,
        conclusions: get_opt_string(row, 9)?,
        journal: get_opt_string(row, 10)?,
        volume: get_opt_string(row, 11)?,
        issue: get_opt_string(row, 12)?,
        pages: get_opt_string(row, 13)?,
        doi: get_opt_string(row, 14)?,
        url: get_opt_string(row, 15)?,
        notes: get_opt_string(row, 16)?,
        created_at: parse_datetime(&row.get::<String>(17)?)?,
        updated_at: parse_datetime(&row.get::<String>(18)?)?,
    })
}

async fn collect_records(mut rows: libsql::Rows) -> Result<Vec<ResearchRecord>, DatabaseError> {
    let mut records = Vec::new();
    while let Some(row) = rows.next().await? {
        records.push(row_to_record(&row)?);
    }
    Ok(records)
}

fn to_sql_int(n: u64) -> libsql::Value {
    libsql::Value::Integer(i64::try_from(n).unwrap_or(i64::MAX))
}

impl RecordService {
    /// Insert a validated record.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn create_record(&self, new: NewRecord) -> Result<ResearchRecord, DatabaseError> {
        let now = format_timestamp(Utc::now());
        let columns: Vec<&str> = Field::ALL.iter().map(|f| f.as_str()).collect();
        let placeholders: Vec<String> = (1..=Field::ALL.len() + 2).map(|i| format!("?{i}")).collect();

        let mut params: Vec<libsql::Value> =
            Field::ALL.iter().map(|f| text_or_null(new.value(*f))).collect();
        params.push(libsql::Value::Text(now.clone()));
        params.push(libsql::Value::Text(now));

        let sql = format!(
            "INSERT INTO research_records ({}, created_at, updated_at) VALUES ({}) RETURNING {COLUMNS}",
            columns.join(", "),
            placeholders.join(", ")
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let record = row_to_record(&row)?;
        tracing::debug!(id = record.id, "research record created");
        Ok(record)
    }

    /// Validate a payload and insert it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` listing every failing field, or a
    /// database error if the INSERT fails.
    pub async fn create_from_payload(
        &self,
        payload: RecordPayload,
    ) -> Result<ResearchRecord, DatabaseError> {
        let new = NewRecord::from_payload(payload)?;
        self.create_record(new).await
    }

    /// Get a record by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no record has this id.
    pub async fn get_record(&self, id: i64) -> Result<ResearchRecord, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {COLUMNS} FROM research_records WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NotFound { id })?;
        row_to_record(&row)
    }

    /// Apply a partial update with dynamic SET clauses.
    ///
    /// An empty update writes nothing and returns the current record.
    /// `updated_at` never moves backwards.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no record has this id.
    pub async fn update_record(
        &self,
        id: i64,
        update: RecordUpdate,
    ) -> Result<ResearchRecord, DatabaseError> {
        if update.is_empty() {
            return self.get_record(id).await;
        }
        let assignments = update.assignments();

        let mut sets = Vec::with_capacity(assignments.len() + 1);
        let mut params: Vec<libsql::Value> = Vec::with_capacity(assignments.len() + 2);
        for (field, value) in assignments {
            params.push(value);
            sets.push(format!("{} = ?{}", field.as_str(), params.len()));
        }

        params.push(libsql::Value::Text(format_timestamp(Utc::now())));
        sets.push(format!("updated_at = MAX(updated_at, ?{})", params.len()));

        params.push(libsql::Value::Integer(id));
        let sql = format!(
            "UPDATE research_records SET {} WHERE id = ?{} RETURNING {COLUMNS}",
            sets.join(", "),
            params.len()
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NotFound { id })?;
        let record = row_to_record(&row)?;
        tracing::debug!(id, "research record updated");
        Ok(record)
    }

    /// Validate an update payload and apply it.
    ///
    /// An unknown id is reported as `NotFound` even when the payload is also
    /// invalid.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` or `DatabaseError::Validation`.
    pub async fn update_from_payload(
        &self,
        id: i64,
        payload: RecordPayload,
    ) -> Result<ResearchRecord, DatabaseError> {
        match RecordUpdate::from_payload(payload) {
            Ok(update) => self.update_record(id, update).await,
            Err(errors) => {
                self.get_record(id).await?;
                Err(errors.into())
            }
        }
    }

    /// Delete a record.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no record has this id.
    pub async fn delete_record(&self, id: i64) -> Result<(), DatabaseError> {
        let affected = self
            .db()
            .conn()
            .execute("DELETE FROM research_records WHERE id = ?1", [id])
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NotFound { id });
        }
        tracing::debug!(id, "research record deleted");
        Ok(())
    }

    /// One page of records matching the filter, newest first, with totals.
    ///
    /// A page past the end yields empty `data`, never an error.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails.
    pub async fn list_records(
        &self,
        query: &RecordQuery,
    ) -> Result<Page<ResearchRecord>, DatabaseError> {
        let clause = where_clause(&query.filter);

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT COUNT(*) FROM research_records {}", clause.sql),
                libsql::params_from_iter(clause.params.clone()),
            )
            .await?;
        let total_count = match rows.next().await? {
            Some(row) => get_count(&row, 0)?,
            None => 0,
        };

        let pagination = query.pagination;
        let limit_idx = clause.next_index();
        let sql = format!(
            "SELECT {COLUMNS} FROM research_records {} {ORDER_BY} LIMIT ?{limit_idx} OFFSET ?{}",
            clause.sql,
            limit_idx + 1
        );
        let mut params = clause.params;
        params.push(to_sql_int(u64::from(pagination.per_page)));
        params.push(to_sql_int(pagination.offset()));

        let rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let data = collect_records(rows).await?;

        Ok(Page::new(data, total_count, pagination))
    }

    /// Every record matching the filter in listing order, without pagination.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn records_matching(
        &self,
        filter: &RecordFilter,
    ) -> Result<Vec<ResearchRecord>, DatabaseError> {
        let clause = where_clause(filter);
        let rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {COLUMNS} FROM research_records {} {ORDER_BY}", clause.sql),
                libsql::params_from_iter(clause.params),
            )
            .await?;
        collect_records(rows).await
    }

    /// Distinct categories currently in use, sorted.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn categories(&self) -> Result<Vec<String>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT DISTINCT category FROM research_records ORDER BY category",
                (),
            )
            .await?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next().await? {
            categories.push(row.get::<String>(0)?);
        }
        Ok(categories)
    }

    /// Number of stored records.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_records(&self) -> Result<u64, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM research_records", ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        get_count(&row, 0)
    }
}
