//! Data Processor Module
//! Section filtering, row extraction and ordering of student summaries.

use crate::config::ReportOptions;
use crate::data::dates::from_epoch_days;
use crate::data::loader::{Dataset, ATTENDANCE_COL, DATE_COL, SECTION_COL, STUDENT_COL};
use crate::data::{AttendanceRecord, AttendanceStatus};
use crate::stats::{AttendanceCalculator, SectionOverview, StudentSummary};
use polars::prelude::*;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Order of bars in the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Highest attendance first
    #[default]
    Percentage,
    /// Alphabetical by student name
    Name,
}

impl SortMode {
    pub const ALL: [SortMode; 2] = [SortMode::Percentage, SortMode::Name];

    pub fn label(&self) -> &'static str {
        match self {
            SortMode::Percentage => "Percentage",
            SortMode::Name => "Name",
        }
    }
}

/// Everything shown for one section.
#[derive(Debug, Clone)]
pub struct SectionReport {
    pub section_id: String,
    pub summaries: Vec<StudentSummary>,
    pub overview: SectionOverview,
}

/// Handles filtering and ordering operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Rows whose section id equals `section_id` exactly.
    pub fn filter_by_section(
        df: &DataFrame,
        section_id: &str,
    ) -> Result<DataFrame, ProcessorError> {
        let filtered = df
            .clone()
            .lazy()
            .filter(col(SECTION_COL).eq(lit(section_id)))
            .collect()?;
        Ok(filtered)
    }

    /// Convert table rows to typed records.
    pub fn records(df: &DataFrame) -> Result<Vec<AttendanceRecord>, ProcessorError> {
        let dates = df.column(DATE_COL)?.cast(&DataType::Int32)?;
        let dates = dates.i32()?;
        let sections = df.column(SECTION_COL)?.str()?;
        let students = df.column(STUDENT_COL)?.str()?;
        let attendance = df.column(ATTENDANCE_COL)?.str()?;

        let mut records = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let (Some(days), Some(section), Some(student)) =
                (dates.get(i), sections.get(i), students.get(i))
            else {
                continue;
            };
            let Some(class_date) = from_epoch_days(days) else {
                continue;
            };

            records.push(AttendanceRecord {
                student_name: student.to_string(),
                section_id: section.to_string(),
                class_date,
                status: AttendanceStatus::from_cell(attendance.get(i)),
            });
        }

        Ok(records)
    }

    /// Sort summaries in place. Both orders are stable.
    pub fn sort_summaries(summaries: &mut [StudentSummary], mode: SortMode) {
        match mode {
            SortMode::Percentage => summaries.sort_by(|a, b| {
                b.percentage
                    .partial_cmp(&a.percentage)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
            SortMode::Name => summaries.sort_by(|a, b| a.student_name.cmp(&b.student_name)),
        }
    }

    /// Filter, aggregate and sort one section.
    pub fn section_report(
        dataset: &Dataset,
        section_id: &str,
        sort: SortMode,
        options: &ReportOptions,
    ) -> Result<SectionReport, ProcessorError> {
        let filtered = Self::filter_by_section(dataset.dataframe(), section_id)?;
        let records = Self::records(&filtered)?;

        let mut summaries = AttendanceCalculator::summarize(&records, options);
        Self::sort_summaries(&mut summaries, sort);
        let overview = AttendanceCalculator::overview(&records, &summaries);

        debug!(
            section = section_id,
            rows = records.len(),
            students = summaries.len(),
            "recomputed section report"
        );

        Ok(SectionReport {
            section_id: section_id.to_string(),
            summaries,
            overview,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(name: &str, section: &str, day: u32, status: &str) -> AttendanceRecord {
        AttendanceRecord {
            student_name: name.to_string(),
            section_id: section.to_string(),
            class_date: NaiveDate::from_ymd_opt(2024, 9, day).unwrap(),
            status: AttendanceStatus::from_cell(Some(status)),
        }
    }

    fn summary(name: &str, percentage: f64) -> StudentSummary {
        StudentSummary {
            student_name: name.to_string(),
            present_count: 0,
            total_count: 1,
            percentage,
        }
    }

    #[test]
    fn filter_keeps_exact_section_only() {
        let records = vec![
            record("Alice", "A", 2, "present"),
            record("Bob", "B", 2, "present"),
            record("Cara", "A", 3, "late"),
            record("Dan", "AA", 3, "absent"),
            record("Eve", "a", 3, "absent"),
        ];
        let dataset = Dataset::from_records(&records).unwrap();

        let filtered = DataProcessor::filter_by_section(dataset.dataframe(), "A").unwrap();
        let kept = DataProcessor::records(&filtered).unwrap();

        let expected: Vec<_> = records.iter().filter(|r| r.section_id == "A").collect();
        assert_eq!(kept.len(), expected.len());
        assert!(kept.iter().all(|r| r.section_id == "A"));
    }

    #[test]
    fn records_round_trip_through_table() {
        let records = vec![
            record("Alice", "A", 2, "present"),
            record("Bob", "A", 3, "excused"),
        ];
        let dataset = Dataset::from_records(&records).unwrap();
        assert_eq!(DataProcessor::records(dataset.dataframe()).unwrap(), records);
    }

    #[test]
    fn sort_by_percentage_is_non_increasing() {
        let mut summaries = vec![
            summary("Alice", 50.0),
            summary("Bob", 100.0),
            summary("Cara", 75.0),
            summary("Dan", 75.0),
        ];
        DataProcessor::sort_summaries(&mut summaries, SortMode::Percentage);

        assert!(summaries
            .windows(2)
            .all(|w| w[0].percentage >= w[1].percentage));
        let names: Vec<_> = summaries.iter().map(|s| s.student_name.as_str()).collect();
        assert_eq!(names, ["Bob", "Cara", "Dan", "Alice"]);
    }

    #[test]
    fn sort_by_name_is_non_decreasing() {
        let mut summaries = vec![
            summary("Cara", 10.0),
            summary("Alice", 90.0),
            summary("Bob", 50.0),
        ];
        DataProcessor::sort_summaries(&mut summaries, SortMode::Name);

        assert!(summaries
            .windows(2)
            .all(|w| w[0].student_name <= w[1].student_name));
    }

    #[test]
    fn alice_and_bob_scenario() {
        let records = vec![
            record("Alice", "A", 2, "present"),
            record("Alice", "A", 3, "absent"),
            record("Bob", "A", 2, "present"),
            record("Bob", "A", 3, "present"),
        ];
        let dataset = Dataset::from_records(&records).unwrap();

        let report = DataProcessor::section_report(
            &dataset,
            "A",
            SortMode::Percentage,
            &ReportOptions::default(),
        )
        .unwrap();

        assert_eq!(report.summaries.len(), 2);
        assert_eq!(report.summaries[0].student_name, "Bob");
        assert_eq!(report.summaries[0].percentage, 100.0);
        assert_eq!(report.summaries[1].student_name, "Alice");
        assert_eq!(report.summaries[1].percentage, 50.0);
    }

    #[test]
    fn unknown_section_yields_empty_report() {
        let dataset = Dataset::from_records(&[record("Alice", "A", 2, "present")]).unwrap();
        let report = DataProcessor::section_report(
            &dataset,
            "Z",
            SortMode::Name,
            &ReportOptions::default(),
        )
        .unwrap();
        assert!(report.summaries.is_empty());
        assert_eq!(report.overview.record_count, 0);
    }
}
