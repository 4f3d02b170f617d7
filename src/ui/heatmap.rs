use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, RichText, Sense, Stroke, Ui, Vec2};

use crate::chart::Heatmap;
use crate::color::{diverging_color, text_color_on};

const CELL: f32 = 56.0;
const LABEL_GUTTER: f32 = 56.0;
const COLORBAR_WIDTH: f32 = 18.0;
const COLORBAR_STEPS: usize = 40;
const UNDEFINED: Color32 = Color32::from_gray(160);

/// Annotated heatmap drawn directly with the painter: one square per cell,
/// value text inside, row/column labels, and a colour bar on the right.
pub fn heatmap(ui: &mut Ui, map: &Heatmap) {
    ui.label(RichText::new(&map.title).strong());

    let n = map.labels.len();
    let grid = CELL * n as f32;
    let size = Vec2::new(LABEL_GUTTER + grid + 24.0 + COLORBAR_WIDTH + 40.0, grid + LABEL_GUTTER);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min + Vec2::new(LABEL_GUTTER, 0.0);
    let label_font = FontId::proportional(12.0);
    let value_font = FontId::proportional(11.0);
    let label_color = ui.visuals().text_color();

    for row in 0..n {
        for col in 0..n {
            let min = origin + Vec2::new(col as f32 * CELL, row as f32 * CELL);
            let cell = Rect::from_min_size(min, Vec2::splat(CELL));
            let value = map.cells[row][col];

            painter.rect_filled(cell, 0.0, value.map(diverging_color).unwrap_or(UNDEFINED));
            if let (Some(v), Some(text)) = (value, map.annotation(row, col)) {
                painter.text(cell.center(), Align2::CENTER_CENTER, text, value_font.clone(), text_color_on(v));
            }
        }
    }

    // Cell separators.
    let stroke = Stroke::new(1.0, ui.visuals().panel_fill);
    for k in 0..=n {
        let offset = k as f32 * CELL;
        painter.line_segment([origin + Vec2::new(offset, 0.0), origin + Vec2::new(offset, grid)], stroke);
        painter.line_segment([origin + Vec2::new(0.0, offset), origin + Vec2::new(grid, offset)], stroke);
    }

    for (i, label) in map.labels.iter().enumerate() {
        let centre = i as f32 * CELL + CELL / 2.0;
        painter.text(
            Pos2::new(origin.x - 6.0, origin.y + centre),
            Align2::RIGHT_CENTER,
            label,
            label_font.clone(),
            label_color,
        );
        painter.text(
            Pos2::new(origin.x + centre, origin.y + grid + 6.0),
            Align2::CENTER_TOP,
            label,
            label_font.clone(),
            label_color,
        );
    }

    colorbar(&painter, origin + Vec2::new(grid + 24.0, 0.0), grid, &label_font, label_color);
}

/// Vertical scale from +1 (top) to -1 (bottom).
fn colorbar(painter: &egui::Painter, top_left: Pos2, height: f32, font: &FontId, text: Color32) {
    let step = height / COLORBAR_STEPS as f32;
    for s in 0..COLORBAR_STEPS {
        let value = 1.0 - 2.0 * (s as f64 + 0.5) / COLORBAR_STEPS as f64;
        let rect = Rect::from_min_size(
            top_left + Vec2::new(0.0, s as f32 * step),
            Vec2::new(COLORBAR_WIDTH, step + 0.5),
        );
        painter.rect_filled(rect, 0.0, diverging_color(value));
    }

    for (value, y) in [(1.0, 0.0), (0.0, height / 2.0), (-1.0, height)] {
        painter.text(
            top_left + Vec2::new(COLORBAR_WIDTH + 4.0, y),
            Align2::LEFT_CENTER,
            format!("{value:.1}"),
            font.clone(),
            text,
        );
    }
}
