//! Attendance Calculator Module
//! Scores attendance rows and aggregates them per student.

use crate::config::{ReportOptions, UnmappedPolicy};
use crate::data::AttendanceRecord;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

/// Attendance totals for a single student.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentSummary {
    pub student_name: String,
    /// Sum of present/late scores.
    pub present_count: u32,
    /// Number of scored rows.
    pub total_count: u32,
    /// `100 * present_count / total_count`
    pub percentage: f64,
}

impl StudentSummary {
    pub fn new(student_name: impl Into<String>, present_count: u32, total_count: u32) -> Self {
        let percentage = if total_count == 0 {
            0.0
        } else {
            present_count as f64 / total_count as f64 * 100.0
        };
        Self {
            student_name: student_name.into(),
            present_count,
            total_count,
            percentage,
        }
    }
}

/// Section-wide figures shown next to the chart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectionOverview {
    pub student_count: usize,
    pub record_count: usize,
    pub class_days: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// Present/late rows over all scored rows.
    pub overall_percentage: Option<f64>,
    /// Average of the per-student percentages.
    pub mean_percentage: Option<f64>,
}

/// Handles attendance aggregation.
pub struct AttendanceCalculator;

impl AttendanceCalculator {
    /// Group records by student name and total their scores.
    ///
    /// Output is ordered by student name. Students without any scored row
    /// do not appear.
    pub fn summarize(records: &[AttendanceRecord], options: &ReportOptions) -> Vec<StudentSummary> {
        let mut counts: HashMap<&str, (u32, u32)> = HashMap::new();

        for record in records {
            if options.unmapped == UnmappedPolicy::Exclude && !record.status.is_mapped() {
                continue;
            }
            let entry = counts.entry(record.student_name.as_str()).or_insert((0, 0));
            entry.0 += record.status.score();
            entry.1 += 1;
        }

        let mut summaries: Vec<StudentSummary> = counts
            .into_iter()
            .map(|(name, (present, total))| StudentSummary::new(name, present, total))
            .collect();
        summaries.sort_by(|a, b| a.student_name.cmp(&b.student_name));
        summaries
    }

    /// Section-wide figures for the rows of one section.
    pub fn overview(records: &[AttendanceRecord], summaries: &[StudentSummary]) -> SectionOverview {
        let days: BTreeSet<NaiveDate> = records.iter().map(|r| r.class_date).collect();

        let present: u32 = summaries.iter().map(|s| s.present_count).sum();
        let total: u32 = summaries.iter().map(|s| s.total_count).sum();
        let overall_percentage = (total > 0).then(|| present as f64 / total as f64 * 100.0);

        let mean_percentage = (!summaries.is_empty()).then(|| {
            summaries.iter().map(|s| s.percentage).sum::<f64>() / summaries.len() as f64
        });

        SectionOverview {
            student_count: summaries.len(),
            record_count: records.len(),
            class_days: days.len(),
            first_date: days.first().copied(),
            last_date: days.last().copied(),
            overall_percentage,
            mean_percentage,
        }
    }
}
