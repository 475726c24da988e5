//! Attendance View - Attendance Spreadsheet Reporting & Interactive Chart Viewer
//!
//! Upload an attendance workbook, pick a section and see students ranked by
//! attendance percentage.

mod charts;
mod config;
mod data;
mod gui;
mod session;
mod stats;
#[cfg(test)]
mod test_support;

use anyhow::anyhow;
use eframe::egui;
use gui::AttendanceApp;
use tracing::{info, Level};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Attendance View"),
        ..Default::default()
    };

    info!("starting Attendance View");

    // Run the application
    eframe::run_native(
        "Attendance View",
        options,
        Box::new(|cc| Ok(Box::new(AttendanceApp::new(cc)))),
    )
    .map_err(|e| anyhow!("failed to run window: {e}"))
}
