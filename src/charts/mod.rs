//! Charts module - presentation model and chart drawing

mod plotter;
mod presenter;

pub use plotter::ChartPlotter;
pub use presenter::{AttendanceChart, Presentation, Presenter};
