//! Attendance View Main Application
//! Main window with control panel and chart viewer.

use crate::charts::Presenter;
use crate::config::{ColumnConfig, ReportOptions};
use crate::data::DataLoader;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::session::Session;
use egui::SidePanel;
use tracing::debug;

/// Main application window.
pub struct AttendanceApp {
    session: Session,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl AttendanceApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            session: Session::new(
                DataLoader::new(ColumnConfig::default()),
                ReportOptions::default(),
            ),
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
        }
    }

    /// Handle workbook selection
    fn handle_browse_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Excel Files", &["xlsx"])
            .pick_file()
        {
            self.session.upload_path(&path);
            self.control_panel.refresh_status(&self.session);
        }
    }

    fn handle_action(&mut self, action: ControlPanelAction) {
        match action {
            ControlPanelAction::BrowseFile => self.handle_browse_file(),
            ControlPanelAction::SelectSection(section) => {
                debug!(section = %section, "section selected");
                self.session.select_section(section);
            }
            ControlPanelAction::SetSort(mode) => {
                debug!(sort = mode.label(), "sort mode selected");
                self.session.set_sort(mode);
            }
            ControlPanelAction::None => {}
        }
    }
}

impl eframe::App for AttendanceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        let action = SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .show(ui, |ui| self.control_panel.show(ui, &self.session))
                    .inner
            })
            .inner;
        self.handle_action(action);

        // Central panel - recomputed from the session on every repaint
        let presentation = Presenter::present(&self.session);
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui, &presentation);
        });
    }
}
