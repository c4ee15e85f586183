use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

pub const SUCCESS_COLOR: Color32 = Color32::from_rgb(99, 110, 250);
pub const FAILURE_COLOR: Color32 = Color32::from_rgb(239, 85, 59);

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
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Slice colour for a pie label.
pub fn outcome_color(label: &str) -> Color32 {
    match label {
        "Success" => SUCCESS_COLOR,
        _ => FAILURE_COLOR,
    }
}

// ---------------------------------------------------------------------------
// Color mapping: booster version category → Color32
// ---------------------------------------------------------------------------

/// Maps booster version categories to distinct colours.
///
/// Built from the whole dataset, so a category keeps its colour while the
/// filters change.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    pub fn new(categories: &[String]) -> Self {
        let palette = generate_palette(categories.len());
        let mapping = categories
            .iter()
            .cloned()
            .zip(palette)
            .collect();
        ColorMap { mapping }
    }

    /// Look up the colour for a category; unknown categories are grey.
    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(Color32::GRAY)
    }
}
