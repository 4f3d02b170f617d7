use eframe::egui::{RichText, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::chart::{LinePanel, PanelGrid};
use crate::color::StationColors;

// ---------------------------------------------------------------------------
// Line-chart grids (monthly trends, seasonal averages)
// ---------------------------------------------------------------------------

/// Draw a grid of line panels, row by row. `id` keeps plot ids unique
/// between grids on the same page.
pub fn panel_grid(ui: &mut Ui, id: &str, grid: &PanelGrid, colors: &StationColors, height: f32) {
    for r in 0..grid.rows {
        let panels = grid.row(r);
        ui.columns(grid.cols, |columns| {
            for (c, (col_ui, panel)) in columns.iter_mut().zip(panels).enumerate() {
                line_panel(col_ui, &format!("{id}_{r}_{c}"), panel, colors, height);
            }
        });
        ui.add_space(8.0);
    }
}

fn line_panel(ui: &mut Ui, id: &str, panel: &LinePanel, colors: &StationColors, height: f32) {
    ui.label(RichText::new(&panel.title).strong());

    let ticks = panel.x_ticks.clone();

    Plot::new(id)
        .height(height)
        .legend(Legend::default())
        .x_axis_label(panel.x_label.as_str())
        .y_axis_label(panel.y_label.as_str())
        // Only label the categorical positions; fractional grid marks stay blank.
        .x_axis_formatter(move |mark, _range| {
            ticks
                .iter()
                .find(|(x, _)| (x - mark.value).abs() < 1e-9)
                .map(|(_, label)| label.clone())
                .unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for series in &panel.series {
                if series.points.is_empty() {
                    continue;
                }
                let color = colors.color_for(&series.name);

                let line: PlotPoints = series.points.iter().copied().collect();
                plot_ui.line(Line::new(line).name(&series.name).color(color).width(1.5));

                let markers: PlotPoints = series.points.iter().copied().collect();
                plot_ui.points(Points::new(markers).name(&series.name).color(color).radius(3.0));
            }
        });
}
