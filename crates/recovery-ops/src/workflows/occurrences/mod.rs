//! Intake of occurrence records from the operations desk, either one JSON
//! payload at a time or as a spreadsheet export.

mod parser;
mod record;
mod values;

pub use record::{ExpenseItem, OccurrenceRecord};

use parser::ParseFailure;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum OccurrenceImportError {
    #[error("failed to read occurrence export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid occurrence CSV data: {0}")]
    Csv(#[from] csv::Error),
}

impl From<ParseFailure> for OccurrenceImportError {
    fn from(failure: ParseFailure) -> Self {
        match failure {
            ParseFailure::Io(err) => Self::Io(err),
            ParseFailure::Csv(err) => Self::Csv(err),
        }
    }
}

pub struct OccurrenceCsvImporter;

impl OccurrenceCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<OccurrenceRecord>, OccurrenceImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Rows without an id are numbered by their position in the export.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<OccurrenceRecord>, OccurrenceImportError> {
        let mut records = parser::parse_records(reader)?;
        for (index, record) in records.iter_mut().enumerate() {
            if record.id.is_none() {
                record.id = Some(format!("linha-{}", index + 1));
            }
        }

        info!(rows = records.len(), "occurrence export imported");
        Ok(records)
    }
}
