//! Presenter
//! Turns the session into what the central panel should display.

use crate::data::{DataProcessor, SectionReport};
use crate::session::Session;
use crate::stats::SectionOverview;

pub const X_AXIS_LABEL: &str = "Attendance Percentage";
pub const Y_AXIS_LABEL: &str = "Student Name";

pub const NO_FILE_PROMPT: &str = "Please upload an Excel file to proceed.";
pub const EMPTY_FILE_PROMPT: &str =
    "The uploaded file has no attendance rows with a valid class date.";

/// One horizontal bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub label: String,
    /// Bar length, 0 to 100.
    pub value: f64,
    pub present: u32,
    pub total: u32,
}

/// Horizontal bar chart of attendance percentages for one section.
/// Bars are in display order, top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceChart {
    pub section_id: String,
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub bars: Vec<ChartBar>,
    pub overview: SectionOverview,
}

impl AttendanceChart {
    pub fn from_report(report: &SectionReport) -> Self {
        Self {
            section_id: report.section_id.clone(),
            title: format!(
                "Total Percentage of Present/Late for Section {}",
                report.section_id
            ),
            x_label: X_AXIS_LABEL,
            y_label: Y_AXIS_LABEL,
            bars: report
                .summaries
                .iter()
                .map(|s| ChartBar {
                    label: s.student_name.clone(),
                    value: s.percentage,
                    present: s.present_count,
                    total: s.total_count,
                })
                .collect(),
            overview: report.overview.clone(),
        }
    }
}

/// What the central panel shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Presentation {
    /// Static prompt, no chart.
    Idle(&'static str),
    /// Last upload could not be read.
    Failed(String),
    Chart(AttendanceChart),
}

/// Runs the whole pipeline for the current session.
pub struct Presenter;

impl Presenter {
    pub fn present(session: &Session) -> Presentation {
        if let Some(error) = session.load_error() {
            return Presentation::Failed(error.to_string());
        }

        let Some(dataset) = session.dataset() else {
            return Presentation::Idle(NO_FILE_PROMPT);
        };
        if dataset.is_empty() {
            return Presentation::Idle(EMPTY_FILE_PROMPT);
        }
        let Some(section_id) = session.active_section() else {
            return Presentation::Idle(EMPTY_FILE_PROMPT);
        };

        match DataProcessor::section_report(
            dataset,
            &section_id,
            session.selection.sort,
            session.options(),
        ) {
            Ok(report) => Presentation::Chart(AttendanceChart::from_report(&report)),
            Err(err) => Presentation::Failed(err.to_string()),
        }
    }
}
