use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{heatmap, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: year selector ----
        egui::SidePanel::left("filter_panel")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the dashboard page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard_page(ui, &self.state));
        });
    }
}

/// Header, then the three chart groups stacked vertically.
fn dashboard_page(ui: &mut Ui, state: &AppState) {
    ui.heading("Air Quality Index (AQI) Dashboard");

    let Some(view) = &state.view else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("The loaded file has no observations  (File → Open…)");
        });
        return;
    };
    let colors = &state.station_colors;

    ui.separator();
    ui.label(egui::RichText::new(format!("Pollutant levels per station in {}", view.year)).heading());
    plot::panel_grid(ui, "monthly", &view.monthly_chart, colors, state.chart_height);

    egui::CollapsingHeader::new("Monthly averages table")
        .default_open(false)
        .show(ui, |ui: &mut Ui| table::monthly_table(ui, &view.monthly));

    ui.separator();
    ui.label(egui::RichText::new("Correlation between pollutants and weather parameters").heading());
    heatmap::heatmap(ui, &view.heatmap);

    ui.separator();
    ui.label(egui::RichText::new(format!("Seasonal pollutant levels in {}", view.year)).heading());
    if view.seasonal.is_empty() {
        ui.weak(format!("No observations in {}: the seasonal panels are empty.", view.year));
    }
    plot::panel_grid(ui, "seasonal", &view.seasonal_chart, colors, state.chart_height);
}
