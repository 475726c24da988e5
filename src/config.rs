//! Report Configuration
//! Column names expected in the workbook and aggregation policy.

/// Header names looked up in the first row of the worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnConfig {
    pub date_col: String,
    pub section_col: String,
    pub student_col: String,
    pub attendance_col: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            date_col: "Class Date".to_string(),
            section_col: "Section ID".to_string(),
            student_col: "Student Name".to_string(),
            attendance_col: "Attendance".to_string(),
        }
    }
}

/// How attendance values outside the score table are handled.
///
/// Values such as `"excused"` or an empty cell are not part of the score
/// table. Counting them as absent is the long-standing behaviour; excluding
/// them drops those rows from both the present and total counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmappedPolicy {
    #[default]
    CountAsAbsent,
    Exclude,
}

/// Options applied when turning a section's rows into student summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub unmapped: UnmappedPolicy,
}
