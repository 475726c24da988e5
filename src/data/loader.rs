//! Workbook Loader Module
//! Reads the first worksheet of an uploaded `.xlsx` file into a polars table,
//! coercing the class date column and dropping rows that cannot be used.

use crate::config::ColumnConfig;
use crate::data::dates::{self, to_epoch_days};
use calamine::{Data, Reader, XlsxError, Xlsx};
use polars::prelude::*;
use std::io::Cursor;
use thiserror::Error;
use tracing::{debug, info};

/// Canonical column names of the in-memory table.
pub const DATE_COL: &str = "Class Date";
pub const SECTION_COL: &str = "Section ID";
pub const STUDENT_COL: &str = "Student Name";
pub const ATTENDANCE_COL: &str = "Attendance";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] XlsxError),
    #[error("Workbook contains no worksheets")]
    NoWorksheet,
    #[error("Missing required column \"{0}\"")]
    MissingColumn(String),
    #[error("Failed to build table: {0}")]
    Frame(#[from] PolarsError),
}

/// Row accounting for one upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Data rows below the header.
    pub raw_rows: usize,
    /// Rows dropped because the class date could not be coerced.
    pub invalid_dates: usize,
    /// Rows dropped because the student name or section id was empty.
    pub missing_keys: usize,
}

impl LoadReport {
    pub fn kept_rows(&self) -> usize {
        self.raw_rows - self.invalid_dates - self.missing_keys
    }
}

/// Attendance table for one session.
#[derive(Debug, Clone)]
pub struct Dataset {
    df: DataFrame,
    report: LoadReport,
}

impl Dataset {
    /// Build a dataset from already-typed records.
    #[cfg(test)]
    pub fn from_records(
        records: &[crate::data::AttendanceRecord],
    ) -> Result<Self, LoaderError> {
        let mut columns = RawColumns::with_capacity(records.len());
        for record in records {
            columns.push(
                Some(record.class_date),
                Some(record.section_id.clone()),
                Some(record.student_name.clone()),
                record.status.raw_text(),
            );
        }
        let df = columns.into_frame()?;
        Ok(Self {
            report: LoadReport {
                raw_rows: df.height(),
                ..LoadReport::default()
            },
            df,
        })
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Distinct section ids in order of first appearance.
    pub fn section_ids(&self) -> Vec<String> {
        let Ok(unique) = self
            .df
            .column(SECTION_COL)
            .and_then(|c| c.unique_stable())
        else {
            return Vec::new();
        };

        unique
            .str()
            .map(|ids| ids.into_iter().flatten().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

/// Column vectors collected while walking the worksheet.
struct RawColumns {
    dates: Vec<Option<i32>>,
    sections: Vec<Option<String>>,
    students: Vec<Option<String>>,
    attendance: Vec<Option<String>>,
}

impl RawColumns {
    fn with_capacity(n: usize) -> Self {
        Self {
            dates: Vec::with_capacity(n),
            sections: Vec::with_capacity(n),
            students: Vec::with_capacity(n),
            attendance: Vec::with_capacity(n),
        }
    }

    fn push(
        &mut self,
        date: Option<chrono::NaiveDate>,
        section: Option<String>,
        student: Option<String>,
        attendance: Option<String>,
    ) {
        self.dates.push(date.map(to_epoch_days));
        self.sections.push(section);
        self.students.push(student);
        self.attendance.push(attendance);
    }

    fn into_frame(self) -> Result<DataFrame, PolarsError> {
        let dates = Column::new(DATE_COL.into(), self.dates).cast(&DataType::Date)?;
        DataFrame::new(vec![
            dates,
            Column::new(SECTION_COL.into(), self.sections),
            Column::new(STUDENT_COL.into(), self.students),
            Column::new(ATTENDANCE_COL.into(), self.attendance),
        ])
    }
}

/// Positions of the required columns in the header row.
struct HeaderIndex {
    date: usize,
    section: usize,
    student: usize,
    attendance: usize,
}

impl HeaderIndex {
    fn locate(header: &[Data], config: &ColumnConfig) -> Result<Self, LoaderError> {
        let find = |name: &str| {
            header
                .iter()
                .position(|cell| cell_text(cell).as_deref() == Some(name))
                .ok_or_else(|| LoaderError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            date: find(&config.date_col)?,
            section: find(&config.section_col)?,
            student: find(&config.student_col)?,
            attendance: find(&config.attendance_col)?,
        })
    }
}

/// Render a non-date cell as text. Empty cells and errors become `None`.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            (!s.is_empty()).then(|| s.clone())
        }
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => dt.as_datetime().map(|d| d.to_string()),
        _ => None,
    }
}

/// Reads attendance workbooks.
#[derive(Debug, Clone, Default)]
pub struct DataLoader {
    config: ColumnConfig,
}

impl DataLoader {
    pub fn new(config: ColumnConfig) -> Self {
        Self { config }
    }

    /// Parse uploaded workbook bytes.
    pub fn load_bytes(&self, bytes: &[u8]) -> Result<Dataset, LoaderError> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
        let sheet = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(LoaderError::NoWorksheet)?;
        let range = workbook.worksheet_range(&sheet)?;

        let mut rows = range.rows();
        let Some(header) = rows.next() else {
            debug!(sheet = %sheet, "worksheet is empty");
            return Ok(Dataset {
                df: RawColumns::with_capacity(0).into_frame()?,
                report: LoadReport::default(),
            });
        };
        let index = HeaderIndex::locate(header, &self.config)?;

        let mut columns = RawColumns::with_capacity(range.height().saturating_sub(1));
        for row in rows {
            let text = |i: usize| row.get(i).and_then(cell_text);
            columns.push(
                row.get(index.date).and_then(dates::coerce_cell),
                text(index.section),
                text(index.student),
                text(index.attendance),
            );
        }

        let raw = columns.into_frame()?;
        let raw_rows = raw.height();

        let dated = raw
            .lazy()
            .filter(col(DATE_COL).is_not_null())
            .collect()?;
        let invalid_dates = raw_rows - dated.height();

        let keyed = dated
            .lazy()
            .filter(
                col(SECTION_COL)
                    .is_not_null()
                    .and(col(STUDENT_COL).is_not_null()),
            )
            .collect()?;
        let report = LoadReport {
            raw_rows,
            invalid_dates,
            missing_keys: raw_rows - invalid_dates - keyed.height(),
        };

        if report.invalid_dates > 0 || report.missing_keys > 0 {
            debug!(
                invalid_dates = report.invalid_dates,
                missing_keys = report.missing_keys,
                "dropped unusable rows"
            );
        }
        info!(
            sheet = %sheet,
            rows = report.kept_rows(),
            raw_rows = report.raw_rows,
            "loaded attendance sheet"
        );

        Ok(Dataset { df: keyed, report })
    }
}
