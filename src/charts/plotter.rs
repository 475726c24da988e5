//! Chart Plotter Module
//! Draws the attendance bar chart and section overview using egui_plot.

use crate::charts::AttendanceChart;
use crate::stats::SectionOverview;
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, GridMark, Plot};

/// Bar colours by attendance band
pub const HIGH_COLOR: Color32 = Color32::from_rgb(46, 204, 113); // Green
pub const MID_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
pub const LOW_COLOR: Color32 = Color32::from_rgb(243, 156, 18); // Orange
pub const CRITICAL_COLOR: Color32 = Color32::from_rgb(231, 76, 60); // Red

const ROW_HEIGHT: f32 = 26.0;
const MIN_PLOT_HEIGHT: f32 = 300.0;
const BAR_WIDTH: f64 = 0.7;

/// Draws attendance charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Colour for a bar of the given percentage.
    pub fn band_color(percentage: f64) -> Color32 {
        match percentage {
            p if p >= 90.0 => HIGH_COLOR,
            p if p >= 75.0 => MID_COLOR,
            p if p >= 50.0 => LOW_COLOR,
            _ => CRITICAL_COLOR,
        }
    }

    /// Bar position on the category axis. The first bar sits at the top.
    pub fn bar_position(index: usize, count: usize) -> f64 {
        count.saturating_sub(index + 1) as f64
    }

    /// Draw the horizontal bar chart.
    /// X-axis: attendance percentage, Y-axis: one row per student
    pub fn draw_attendance_chart(ui: &mut egui::Ui, chart: &AttendanceChart) {
        let count = chart.bars.len();
        if count == 0 {
            ui.label(RichText::new("No students in this section").color(Color32::GRAY));
            return;
        }

        let height = (count as f32 * ROW_HEIGHT + 80.0).max(MIN_PLOT_HEIGHT);

        // Category labels indexed by bar position
        let mut labels = vec![String::new(); count];
        let mut counts = vec![(0u32, 0u32); count];
        for (i, bar) in chart.bars.iter().enumerate() {
            let pos = Self::bar_position(i, count) as usize;
            labels[pos] = bar.label.clone();
            counts[pos] = (bar.present, bar.total);
        }

        let bars: Vec<Bar> = chart
            .bars
            .iter()
            .enumerate()
            .map(|(i, bar)| {
                let color = Self::band_color(bar.value);
                Bar::new(Self::bar_position(i, count), bar.value)
                    .name(&bar.label)
                    .width(BAR_WIDTH)
                    .fill(color.gamma_multiply(0.8))
                    .stroke(egui::Stroke::new(1.0, color))
            })
            .collect();

        let bar_chart = BarChart::new(bars)
            .name("Attendance")
            .horizontal()
            .element_formatter(Box::new(move |bar: &Bar, _chart: &BarChart| {
                let (present, total) = counts
                    .get(bar.argument.round() as usize)
                    .copied()
                    .unwrap_or_default();
                format!("{}: {:.1}% ({}/{})", bar.name, bar.value, present, total)
            }));

        Plot::new(format!("attendance_{}", chart.section_id))
            .height(height)
            .x_axis_label(chart.x_label)
            .y_axis_label(chart.y_label)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_x(0.0)
            .include_x(100.0)
            .include_y(-0.5)
            .include_y(count as f64 - 0.5)
            // One tick per student so every name gets a label
            .y_grid_spacer(move |_input| {
                (0..count)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .y_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if idx >= 0.0 && (mark.value - idx).abs() < 1e-6 {
                    labels.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .x_axis_formatter(|mark, _range| {
                if (0.0..=100.0).contains(&mark.value) {
                    format!("{:.0}%", mark.value)
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(bar_chart);
            });
    }

    /// Draw the section overview table
    pub fn draw_overview_table(ui: &mut egui::Ui, section_id: &str, overview: &SectionOverview) {
        let percent = |value: Option<f64>| {
            value
                .map(|v| format!("{:.1}%", v))
                .unwrap_or_else(|| "-".to_string())
        };
        let date_range = match (overview.first_date, overview.last_date) {
            (Some(first), Some(last)) if first == last => first.to_string(),
            (Some(first), Some(last)) => format!("{} to {}", first, last),
            _ => "-".to_string(),
        };

        let rows = [
            ("Students", overview.student_count.to_string()),
            ("Records", overview.record_count.to_string()),
            ("Class days", overview.class_days.to_string()),
            ("Date range", date_range),
            ("Overall attendance", percent(overview.overall_percentage)),
            ("Mean per student", percent(overview.mean_percentage)),
        ];

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(format!("overview_{}", section_id)))
                    .striped(true)
                    .min_col_width(120.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for (name, value) in rows {
                            ui.label(RichText::new(name).strong().size(11.0));
                            ui.label(RichText::new(value).size(11.0));
                            ui.end_row();
                        }
                    });
            });
    }
}
