use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while producing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("offset {offset} is too large for a {rows}-row report")]
    OffsetOverflow { offset: u64, rows: u32 },

    #[error("failed to encode report as CSV: {0}")]
    Encoding(String),
}

impl From<csv::Error> for ReportError {
    fn from(e: csv::Error) -> Self {
        ReportError::Encoding(e.to_string())
    }
}

/// One row of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// `offset + row index`
    pub timestamp: u64,
    /// `data-<row index>`
    pub data: String,
}

/// A generated report. Depends only on its offset and row count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    offset: u64,
    rows: Vec<ReportRow>,
}

impl Report {
    /// Build the `row_count` rows starting at `offset`.
    pub fn from_offset(offset: u64, row_count: u32) -> Result<Self, ReportError> {
        let rows = (0..row_count)
            .map(|i| {
                offset
                    .checked_add(u64::from(i))
                    .map(|timestamp| ReportRow {
                        timestamp,
                        data: format!("data-{}", i),
                    })
                    .ok_or(ReportError::OffsetOverflow {
                        offset,
                        rows: row_count,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { offset, rows })
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Attachment filename, `<offset>.csv`.
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.offset)
    }

    /// Render as CSV with a `timestamp,data` header.
    pub fn to_csv(&self) -> Result<Vec<u8>, ReportError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        if self.rows.is_empty() {
            writer.write_record(["timestamp", "data"])?;
        }
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer
            .into_inner()
            .map_err(|e| ReportError::Encoding(e.to_string()))
    }
}
