//! CSV import and export over the record store.

use std::io;

use rescat_core::entities::NewRecord;
use rescat_core::query::RecordFilter;
use rescat_core::responses::ImportReport;
use rescat_core::transfer::{read_csv, write_csv};

use crate::error::DatabaseError;
use crate::service::RecordService;

impl RecordService {
    /// Import every row of a CSV document as a validated insert.
    ///
    /// Rows that fail validation or cannot be parsed are counted and skipped;
    /// the batch continues.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Transfer` if the header names no known column,
    /// or a database error if an INSERT fails.
    pub async fn import_csv<R: io::Read + Send>(
        &self,
        source: R,
    ) -> Result<ImportReport, DatabaseError> {
        let mut report = ImportReport::default();
        let rows = read_csv(source)?;
        tracing::debug!(fields = ?rows.fields(), "CSV header mapped");
        for (row, parsed) in rows {
            let outcome = parsed.map_err(|message| vec![message]).and_then(|payload| {
                NewRecord::from_payload(payload).map_err(|errors| errors.full_messages())
            });
            match outcome {
                Ok(new) => {
                    self.create_record(new).await?;
                    report.record_success();
                }
                Err(messages) => {
                    tracing::warn!(row, errors = ?messages, "skipping CSV row");
                    report.record_failure(row, messages);
                }
            }
        }
        tracing::info!(
            imported = report.imported,
            failed = report.failed,
            "CSV import finished"
        );
        Ok(report)
    }

    /// Write every record matching the filter as CSV.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or the writer errors.
    pub async fn export_csv<W: io::Write>(
        &self,
        filter: &RecordFilter,
        writer: W,
    ) -> Result<usize, DatabaseError> {
        let records = self.records_matching(filter).await?;
        write_csv(&records, writer)?;
        Ok(records.len())
    }
}
