use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::{outcome_color, ColorMap};
use crate::figure::{PieFigure, ScatterFigure, ScatterSeries};

const CHART_HEIGHT: f32 = 320.0;

/// Largest arc drawn as a single polygon; plot polygons fill correctly only
/// when convex.
const MAX_WEDGE: f64 = FRAC_PI_2;
const ARC_STEP: f64 = TAU / 180.0;

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

pub fn pie_chart(ui: &mut Ui, figure: &PieFigure) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(figure.title.as_str());
    });

    if figure.total() == 0 {
        ui.label("No launches recorded for this site.");
        return;
    }

    Plot::new("success_pie_chart")
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            // Clockwise from twelve o'clock.
            let mut start = FRAC_PI_2;
            for slice in &figure.slices {
                if slice.value == 0 {
                    continue;
                }
                let sweep = slice.fraction * TAU;
                let color = outcome_color(slice.label);

                for wedge in wedge_polygons(start, sweep) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(wedge))
                            .name(slice.label)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, color)),
                    );
                }

                let mid = start - sweep / 2.0;
                let label_radius = if slice.fraction >= 1.0 { 0.0 } else { 0.6 };
                plot_ui.text(Text::new(
                    PlotPoint::new(label_radius * mid.cos(), label_radius * mid.sin()),
                    RichText::new(format!("{:.1}%", slice.fraction * 100.0))
                        .color(Color32::WHITE)
                        .strong(),
                ));

                start -= sweep;
            }
        });
}

/// Split a clockwise unit-circle sector into convex pieces.
fn wedge_polygons(start: f64, sweep: f64) -> Vec<Vec<[f64; 2]>> {
    let pieces = (sweep / MAX_WEDGE).ceil().max(1.0) as usize;
    let piece_sweep = sweep / pieces as f64;

    (0..pieces)
        .map(|p| {
            let from = start - p as f64 * piece_sweep;
            let steps = (piece_sweep / ARC_STEP).ceil().max(1.0) as usize;
            let mut points = vec![[0.0, 0.0]];
            points.extend((0..=steps).map(|s| {
                let angle = from - piece_sweep * s as f64 / steps as f64;
                [angle.cos(), angle.sin()]
            }));
            points
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

pub fn scatter_chart(ui: &mut Ui, figure: &ScatterFigure, colors: &ColorMap) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(figure.title);
    });
    if figure.is_empty() {
        ui.weak("No launches match the selected site and payload range.");
    }

    let hover_series = figure.series.clone();

    Plot::new("success_payload_scatter_chart")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(figure.x_label)
        .y_axis_label(figure.y_label)
        .include_x(0.0)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .label_formatter(move |name, value| hover_text(&hover_series, name, value))
        .show(ui, |plot_ui| {
            for series in &figure.series {
                let points: PlotPoints = series
                    .points
                    .iter()
                    .map(|p| [p.payload_mass_kg, p.class as f64])
                    .collect();

                plot_ui.points(
                    Points::new(points)
                        .name(&series.category)
                        .color(colors.color_for(&series.category))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(5.0),
                );
            }
        });
}

fn hover_text(series: &[ScatterSeries], name: &str, value: &PlotPoint) -> String {
    let point = series
        .iter()
        .filter(|s| s.category == name)
        .flat_map(|s| s.points.iter())
        .find(|p| (p.payload_mass_kg - value.x).abs() < 0.5 && (p.class as f64 - value.y).abs() < 0.5);

    match point {
        Some(p) => {
            let mut text = format!(
                "Booster Version Category: {name}\nPayload Mass (kg): {:.1}\nLaunch Outcome: {}\nLaunch Site: {}",
                p.payload_mass_kg, p.class, p.launch_site
            );
            if let Some(booster) = &p.booster_version {
                text.push_str(&format!("\nBooster Version: {booster}"));
            }
            if let Some(flight) = p.flight_number {
                text.push_str(&format!("\nFlight Number: {flight}"));
            }
            text
        }
        None => format!("Payload Mass (kg): {:.0}\nLaunch Outcome: {:.2}", value.x, value.y),
    }
}
