use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – year selector
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.years.is_empty() {
        ui.label("No observations loaded.");
        return;
    }

    ui.strong("Year");
    let current = state.selected_year;
    let mut chosen = current;
    egui::ComboBox::from_id_salt("year_select")
        .selected_text(current.map(|y| y.to_string()).unwrap_or_default())
        .show_ui(ui, |ui: &mut Ui| {
            for &year in &state.years {
                ui.selectable_value(&mut chosen, Some(year), year.to_string());
            }
        });

    if chosen != current {
        if let Some(year) = chosen {
            log::info!("Year changed to {year}");
            state.select_year(year);
        }
    }

    ui.separator();

    // ---- Station legend ----
    ui.strong("Stations");
    for station in &state.dataset.stations {
        let color = state.station_colors.color_for(station);
        ui.label(RichText::new(format!("● {station}")).color(color));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{}: {} observations",
            state.data_path.display(),
            state.dataset.len()
        ));
        if let Some(view) = &state.view {
            ui.label(format!("{} in {}", view.year_rows, view.year));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open air-quality data")
        .add_filter("Supported files", &["csv", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}
