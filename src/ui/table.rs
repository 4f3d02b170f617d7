use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::aggregate::monthly::MonthlyMeans;
use crate::aggregate::PollutantMeans;
use crate::data::model::Pollutant;

fn cell_text(means: &PollutantMeans, p: Pollutant) -> String {
    means.get(p).map(|v| format!("{v:.2}")).unwrap_or_else(|| "–".to_string())
}

/// Monthly means as a striped table, one row per (month, station).
pub fn monthly_table(ui: &mut Ui, monthly: &MonthlyMeans) {
    if monthly.is_empty() {
        ui.weak("No observations for this year.");
        return;
    }
    TableBuilder::new(ui)
        .id_salt("monthly_table")
        .striped(true)
        .max_scroll_height(320.0)
        .column(Column::auto())
        .column(Column::auto().at_least(120.0))
        .columns(Column::remainder(), Pollutant::ALL.len())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Month");
            });
            header.col(|ui| {
                ui.strong("Station");
            });
            for p in Pollutant::ALL {
                header.col(|ui| {
                    ui.strong(p.label());
                });
            }
        })
        .body(|body| {
            body.rows(18.0, monthly.rows.len(), |mut row| {
                let data = &monthly.rows[row.index()];
                row.col(|ui| {
                    ui.label(data.month.to_string());
                });
                row.col(|ui| {
                    ui.label(data.station.as_str());
                });
                for p in Pollutant::ALL {
                    row.col(|ui| {
                        ui.label(cell_text(&data.means, p));
                    });
                }
            });
        });
}
