use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Clamp, Hsl, IntoColor, Lab, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.clamp().into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Station colours
// ---------------------------------------------------------------------------

/// Maps station names to distinct colours. Built from the whole dataset so a
/// station keeps its colour when the selected year changes.
#[derive(Debug, Clone, Default)]
pub struct StationColors {
    mapping: BTreeMap<String, Color32>,
}

impl StationColors {
    pub fn new(stations: &[String]) -> Self {
        let mapping = stations
            .iter()
            .cloned()
            .zip(generate_palette(stations.len()))
            .collect();
        StationColors { mapping }
    }

    pub fn color_for(&self, station: &str) -> Color32 {
        self.mapping.get(station).copied().unwrap_or(Color32::GRAY)
    }
}

// ---------------------------------------------------------------------------
// Diverging scale for correlations
// ---------------------------------------------------------------------------

const COOL: (u8, u8, u8) = (59, 76, 192);
const NEUTRAL: (u8, u8, u8) = (221, 221, 221);
const WARM: (u8, u8, u8) = (180, 4, 38);

fn lab(c: (u8, u8, u8)) -> Lab {
    Srgb::new(c.0, c.1, c.2).into_format::<f32>().into_color()
}

/// Blue–grey–red colour for a value in [-1, 1], grey at 0.
/// Interpolated in CIE Lab so equal steps look equally far apart.
pub fn diverging_color(value: f64) -> Color32 {
    let t = value.clamp(-1.0, 1.0) as f32;
    let end = if t < 0.0 { COOL } else { WARM };
    let mixed = lab(NEUTRAL).mix(lab(end), t.abs());
    to_color32(mixed.into_color())
}

/// Readable annotation colour on top of [`diverging_color`].
pub fn text_color_on(value: f64) -> Color32 {
    if value.abs() > 0.6 {
        Color32::WHITE
    } else {
        Color32::BLACK
    }
}
