//! Control Panel Widget
//! Left side panel with the upload button, section and sort selectors.

use crate::data::SortMode;
use crate::session::Session;
use egui::{Color32, ComboBox, RichText};

/// Left side control panel.
pub struct ControlPanel {
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status line after an upload.
    pub fn refresh_status(&mut self, session: &Session) {
        self.status = if let Some(error) = session.load_error() {
            format!("Error: {}", error)
        } else if let Some(dataset) = session.dataset() {
            let report = dataset.report();
            let mut status = format!(
                "Loaded {}, {}",
                counted(dataset.row_count(), "row", "rows"),
                counted(session.section_ids().len(), "section", "sections")
            );
            if report.invalid_dates > 0 {
                status.push_str(&format!(", {} without a valid date", report.invalid_dates));
            }
            if report.missing_keys > 0 {
                status.push_str(&format!(", {} without name or section", report.missing_keys));
            }
            status
        } else {
            "Ready".to_string()
        };
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, session: &Session) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Attendance View")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Upload Section =====
        ui.label(RichText::new("📁 Upload File").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let file_text = session.file_name().unwrap_or("No file selected");

                    ui.label(RichText::new(file_text).size(12.0).color(
                        if session.file_name().is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Upload").clicked() {
                            action = ControlPanelAction::BrowseFile;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Selection Section =====
        ui.label(RichText::new("🔧 Filters").size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 110.0;
        let combo_width = 150.0;
        let sections = session.section_ids();
        let active = session.active_section().unwrap_or_default();

        ui.add_enabled_ui(!sections.is_empty(), |ui| {
            ui.horizontal(|ui| {
                ui.add_sized([label_width, 20.0], egui::Label::new("Section ID:"));
                ComboBox::from_id_salt("section_id")
                    .width(combo_width)
                    .selected_text(&active)
                    .show_ui(ui, |ui| {
                        for section in &sections {
                            if ui.selectable_label(active == *section, section).clicked() {
                                action = ControlPanelAction::SelectSection(section.clone());
                            }
                        }
                    });
            });

            ui.add_space(5.0);

            ui.horizontal(|ui| {
                ui.add_sized([label_width, 20.0], egui::Label::new("Sort By:"));
                ComboBox::from_id_salt("sort_mode")
                    .width(combo_width)
                    .selected_text(session.selection.sort.label())
                    .show_ui(ui, |ui| {
                        for mode in SortMode::ALL {
                            if ui
                                .selectable_label(session.selection.sort == mode, mode.label())
                                .clicked()
                            {
                                action = ControlPanelAction::SetSort(mode);
                            }
                        }
                    });
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.starts_with("Loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

fn counted(n: usize, one: &str, many: &str) -> String {
    format!("{} {}", n, if n == 1 { one } else { many })
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseFile,
    SelectSection(String),
    SetSort(SortMode),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{attendance_rows, WorkbookBuilder};

    #[test]
    fn status_reports_dropped_rows() {
        let bytes = WorkbookBuilder::new()
            .rows(attendance_rows(&[
                ("2024-09-02", "A", "Alice", "present"),
                ("someday", "A", "Alice", "present"),
            ]))
            .build();
        let mut session = Session::default();
        session.upload("week1.xlsx", &bytes);

        let mut panel = ControlPanel::new();
        panel.refresh_status(&session);
        assert_eq!(panel.status, "Loaded 1 row, 1 section, 1 without a valid date");
    }

    #[test]
    fn status_pluralises_counts() {
        let bytes = WorkbookBuilder::new()
            .rows(attendance_rows(&[
                ("2024-09-02", "A", "Alice", "present"),
                ("2024-09-02", "B", "Bob", "late"),
            ]))
            .build();
        let mut session = Session::default();
        session.upload("week1.xlsx", &bytes);

        let mut panel = ControlPanel::new();
        panel.refresh_status(&session);
        assert_eq!(panel.status, "Loaded 2 rows, 2 sections");
    }

    #[test]
    fn status_shows_errors() {
        let mut session = Session::default();
        session.upload("broken.xlsx", b"garbage");

        let mut panel = ControlPanel::new();
        panel.refresh_status(&session);
        assert!(panel.status.starts_with("Error: "));
    }
}
