//! CSV transfer format.
//!
//! Export writes a fixed column order. Import is header-driven: columns are
//! matched by export label or wire key, in any order, and unknown columns
//! (including `ID` and `Created At`) are ignored.

use std::io;

use chrono::NaiveDate;

use crate::entities::ResearchRecord;
use crate::errors::TransferError;
use crate::fields::Field;
use crate::payload::RecordPayload;
use crate::query::RecordFilter;

/// One column of the export layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    Field(Field),
    CreatedAt,
}

impl Column {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Field(field) => field.label(),
            Self::CreatedAt => "Created At",
        }
    }

    fn value(self, record: &ResearchRecord) -> String {
        match self {
            Self::Id => record.id.to_string(),
            Self::Field(field) => record.value(field).unwrap_or_default(),
            Self::CreatedAt => record.created_at.to_rfc3339(),
        }
    }
}

/// Export column order.
pub const EXPORT_COLUMNS: [Column; 18] = [
    Column::Id,
    Column::Field(Field::Title),
    Column::Field(Field::Author),
    Column::Field(Field::Category),
    Column::Field(Field::Keywords),
    Column::Field(Field::Journal),
    Column::Field(Field::Volume),
    Column::Field(Field::Issue),
    Column::Field(Field::Pages),
    Column::Field(Field::PublicationDate),
    Column::Field(Field::Doi),
    Column::Field(Field::Url),
    Column::Field(Field::Abstract),
    Column::Field(Field::Methodology),
    Column::Field(Field::Results),
    Column::Field(Field::Conclusions),
    Column::Field(Field::Notes),
    Column::CreatedAt,
];

/// Write a header row and one row per record.
///
/// Cells containing the delimiter, a quote, CR or LF are quoted with quotes
/// doubled; absent values are empty cells.
///
/// # Errors
///
/// Returns `TransferError::Csv` if the underlying writer fails.
pub fn write_csv<W: io::Write>(records: &[ResearchRecord], writer: W) -> Result<(), TransferError> {
    let mut csv = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    csv.write_record(EXPORT_COLUMNS.iter().map(|c| c.label()))?;
    for record in records {
        csv.write_record(EXPORT_COLUMNS.iter().map(|c| c.value(record)))?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Render records to an in-memory CSV document.
///
/// # Errors
///
/// Returns `TransferError::Csv` on writer failure.
pub fn to_csv_bytes(records: &[ResearchRecord]) -> Result<Vec<u8>, TransferError> {
    let mut buf = Vec::new();
    write_csv(records, &mut buf)?;
    Ok(buf)
}

/// Download filename for an export, e.g.
/// `research_data_report_Biology_2020-01-01-to-all_2026-10-18.csv`.
#[must_use]
pub fn export_filename(filter: &RecordFilter, today: NaiveDate) -> String {
    let mut name = String::from("research_data_report");
    if let Some(category) = filter.category_value() {
        name.push('_');
        name.extend(category.chars().map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '_'
            }
        }));
    }
    if filter.date_from.is_some() || filter.date_to.is_some() {
        let bound = |d: Option<NaiveDate>| d.map_or_else(|| "all".to_string(), |d| d.to_string());
        name.push_str(&format!(
            "_{}-to-{}",
            bound(filter.date_from),
            bound(filter.date_to)
        ));
    }
    name.push_str(&format!("_{today}.csv"));
    name
}

/// Header-driven CSV reader yielding one payload per data row.
pub struct CsvRows<R> {
    reader: csv::Reader<R>,
    columns: Vec<Option<Field>>,
    row: u64,
    done: bool,
}

/// Open a CSV document and map its header.
///
/// # Errors
///
/// Returns `TransferError::UnknownHeader` if no header cell names a record
/// field, or `TransferError::Csv` if the header row cannot be read.
pub fn read_csv<R: io::Read>(source: R) -> Result<CsvRows<R>, TransferError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::None)
        .from_reader(source);
    let columns: Vec<Option<Field>> = reader.headers()?.iter().map(Field::from_header).collect();
    if columns.iter().all(Option::is_none) {
        return Err(TransferError::UnknownHeader);
    }
    Ok(CsvRows {
        reader,
        columns,
        row: 0,
        done: false,
    })
}

impl<R: io::Read> CsvRows<R> {
    /// Fields recognised in the header, in column order.
    #[must_use]
    pub fn fields(&self) -> Vec<Field> {
        self.columns.iter().flatten().copied().collect()
    }
}

impl<R: io::Read> Iterator for CsvRows<R> {
    /// `(row number, payload or row-level error message)`.
    type Item = (u64, Result<RecordPayload, String>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut record = csv::StringRecord::new();
        match self.reader.read_record(&mut record) {
            Ok(false) => {
                self.done = true;
                None
            }
            Ok(true) => {
                self.row += 1;
                let mut payload = RecordPayload::default();
                for (field, cell) in self.columns.iter().zip(record.iter()) {
                    let Some(field) = field else { continue };
                    if !cell.trim().is_empty() {
                        payload.set(*field, Some(cell.to_string()));
                    }
                }
                Some((self.row, Ok(payload)))
            }
            Err(error) => {
                self.row += 1;
                // The stream is unusable past an I/O failure.
                if matches!(error.kind(), csv::ErrorKind::Io(_)) {
                    self.done = true;
                }
                Some((self.row, Err(error.to_string())))
            }
        }
    }
}
