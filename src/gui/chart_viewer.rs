//! Chart Viewer Widget
//! Central panel: idle prompt, load error, or the section's bar chart.

use crate::charts::{AttendanceChart, ChartPlotter, Presentation};
use egui::{Color32, RichText, ScrollArea};

/// Central display area.
#[derive(Default)]
pub struct ChartViewer;

impl ChartViewer {
    pub fn new() -> Self {
        Self
    }

    /// Draw whatever the presenter produced for this frame.
    pub fn show(&mut self, ui: &mut egui::Ui, presentation: &Presentation) {
        match presentation {
            Presentation::Idle(prompt) => {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new(*prompt).size(20.0));
                });
            }
            Presentation::Failed(error) => {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        RichText::new(format!("Could not read the uploaded file: {}", error))
                            .size(16.0)
                            .color(Color32::from_rgb(220, 53, 69)),
                    );
                });
            }
            Presentation::Chart(chart) => {
                ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| Self::draw_chart_card(ui, chart));
            }
        }
    }

    fn draw_chart_card(ui: &mut egui::Ui, chart: &AttendanceChart) {
        egui::Frame::none()
            .rounding(8.0)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(&chart.title).size(18.0).strong());
                    ui.add_space(8.0);

                    ChartPlotter::draw_attendance_chart(ui, chart);

                    ui.add_space(10.0);

                    ChartPlotter::draw_overview_table(ui, &chart.section_id, &chart.overview);
                });
            });
    }
}
