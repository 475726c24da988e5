//! Attendance Record Types

use chrono::NaiveDate;

/// Attendance status recorded for one student on one class date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendanceStatus {
    Present,
    Late,
    Absent,
    /// Any text outside the score table, e.g. `"excused"` or `"Present"`.
    Other(String),
    /// Empty cell.
    Missing,
}

/// Score table. Labels are matched case-sensitively; anything not listed
/// here scores zero.
pub const SCORE_TABLE: [(&str, u32); 3] = [("present", 1), ("late", 1), ("absent", 0)];

impl AttendanceStatus {
    /// Parse the raw cell text.
    pub fn from_cell(cell: Option<&str>) -> Self {
        match cell {
            None | Some("") => AttendanceStatus::Missing,
            Some("present") => AttendanceStatus::Present,
            Some("late") => AttendanceStatus::Late,
            Some("absent") => AttendanceStatus::Absent,
            Some(other) => AttendanceStatus::Other(other.to_string()),
        }
    }

    /// Label used in the score table, if the status has one.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            AttendanceStatus::Present => Some("present"),
            AttendanceStatus::Late => Some("late"),
            AttendanceStatus::Absent => Some("absent"),
            AttendanceStatus::Other(_) | AttendanceStatus::Missing => None,
        }
    }

    /// Cell text this status was read from.
    #[cfg(test)]
    pub fn raw_text(&self) -> Option<String> {
        match self {
            AttendanceStatus::Other(text) => Some(text.clone()),
            AttendanceStatus::Missing => None,
            mapped => mapped.label().map(str::to_string),
        }
    }

    /// Whether the status appears in [`SCORE_TABLE`].
    pub fn is_mapped(&self) -> bool {
        self.label().is_some()
    }

    /// Present/late score: 1 for present or late, 0 for everything else.
    pub fn score(&self) -> u32 {
        self.label()
            .and_then(|label| {
                SCORE_TABLE
                    .iter()
                    .find(|(key, _)| *key == label)
                    .map(|(_, score)| *score)
            })
            .unwrap_or(0)
    }
}

/// One row of the attendance sheet after date coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub student_name: String,
    pub section_id: String,
    pub class_date: NaiveDate,
    pub status: AttendanceStatus,
}
