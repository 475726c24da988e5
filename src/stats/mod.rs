//! Stats module - per-student attendance aggregation

mod calculator;

pub use calculator::{AttendanceCalculator, SectionOverview, StudentSummary};
