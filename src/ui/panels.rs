use std::path::Path;

use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::PayloadRange;
use crate::state::{AppState, SLIDER_MAX, SLIDER_MIN, SLIDER_STEP};

const TITLE: &str = "SpaceX Launch Records Dashboard";
const TITLE_COLOR: Color32 = Color32::from_rgb(0x50, 0x3D, 0x36);

// ---------------------------------------------------------------------------
// Dashboard controls
// ---------------------------------------------------------------------------

pub fn header(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(TITLE).size(40.0).color(TITLE_COLOR));
    });
}

/// Launch site dropdown with a search box; "All Sites" is the default entry.
pub fn site_dropdown(ui: &mut Ui, state: &mut AppState) {
    let selected_text = state.site().to_string();

    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.add(
                egui::TextEdit::singleline(&mut state.site_search)
                    .hint_text("Select a Launch Site here"),
            );
            ui.separator();

            let options = state.site_options();
            if options.is_empty() {
                ui.weak("No matching launch site");
            }
            for (label, selection) in options {
                let is_selected = state.site() == &selection;
                if ui.selectable_label(is_selected, label).clicked() {
                    state.select_site(selection);
                    state.site_search.clear();
                }
            }
        });
}

/// Two-handle payload slider over 0..10000 kg in steps of 1000 kg.
pub fn payload_slider(ui: &mut Ui, state: &mut AppState) {
    ui.label("Payload range (Kg):");

    let range = state.payload_range();
    let mut low = range.low;
    let mut high = range.high;

    // Only user edits snap to the step, so the data's own bounds survive
    // the first frame.
    let low_changed = ui
        .add(
            egui::Slider::new(&mut low, SLIDER_MIN..=SLIDER_MAX)
                .step_by(SLIDER_STEP)
                .clamping(egui::SliderClamping::Edits)
                .text("from"),
        )
        .changed();
    let high_changed = ui
        .add(
            egui::Slider::new(&mut high, SLIDER_MIN..=SLIDER_MAX)
                .step_by(SLIDER_STEP)
                .clamping(egui::SliderClamping::Edits)
                .text("to"),
        )
        .changed();

    // Handles push each other instead of crossing.
    if low_changed && low > high {
        high = low;
    }
    if high_changed && high < low {
        low = high;
    }

    ui.horizontal(|ui: &mut Ui| {
        ui.weak(format!("{SLIDER_MIN:.0}"));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            ui.weak(format!("{SLIDER_MAX:.0}"));
        });
    });

    if low_changed || high_changed {
        state.set_payload_range(PayloadRange::new(low, high));
    }
}

/// Collapsible table listing the launches currently on the scatter chart.
pub fn plotted_launches_table(ui: &mut Ui, state: &AppState) {
    let (Some(dataset), Some(scatter)) = (state.dataset(), state.scatter()) else {
        return;
    };
    let rows = scatter.rows();

    egui::CollapsingHeader::new(format!("Plotted launches ({})", rows.len()))
        .id_salt("plotted_launches")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .max_scroll_height(240.0)
                .column(Column::auto())
                .column(Column::auto().at_least(120.0))
                .column(Column::auto())
                .column(Column::auto().at_least(140.0))
                .column(Column::auto())
                .column(Column::remainder())
                .header(20.0, |mut header| {
                    for title in [
                        "Flight",
                        "Launch Site",
                        "Payload Mass (kg)",
                        "Booster Version",
                        "Category",
                        "Outcome",
                    ] {
                        header.col(|ui: &mut Ui| {
                            ui.strong(title);
                        });
                    }
                })
                .body(|mut body| {
                    for &i in &rows {
                        let rec = &dataset.records[i];
                        body.row(18.0, |mut row| {
                            row.col(|ui: &mut Ui| {
                                ui.label(
                                    rec.flight_number
                                        .map(|n| n.to_string())
                                        .unwrap_or_default(),
                                );
                            });
                            row.col(|ui: &mut Ui| {
                                ui.label(rec.launch_site.as_str());
                            });
                            row.col(|ui: &mut Ui| {
                                ui.label(format!("{:.1}", rec.payload_mass_kg));
                            });
                            row.col(|ui: &mut Ui| {
                                ui.label(rec.booster_version.as_deref().unwrap_or(""));
                            });
                            row.col(|ui: &mut Ui| {
                                ui.label(
                                    RichText::new(&rec.booster_version_category)
                                        .color(state.color_map.color_for(&rec.booster_version_category)),
                                );
                            });
                            row.col(|ui: &mut Ui| {
                                ui.label(rec.outcome.to_string());
                            });
                        });
                    }
                });
        });
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
        });

        ui.separator();

        if let Some(ds) = state.dataset() {
            let plotted = state.scatter().map(|s| s.point_count()).unwrap_or(0);
            ui.label(format!(
                "{} launches from {} sites, {} plotted",
                ds.len(),
                ds.launch_sites.len(),
                plotted
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        load_into(state, &path);
    }
}

/// Load `path` and install it, or record the error in the status bar.
pub fn load_into(state: &mut AppState, path: &Path) {
    match crate::data::loader::load_file(path) {
        Ok(dataset) => {
            log::info!(
                "Loaded {} launches from {} ({} sites, payload {}..{} kg)",
                dataset.len(),
                path.display(),
                dataset.launch_sites.len(),
                dataset.min_payload,
                dataset.max_payload
            );
            if dataset.is_empty() {
                log::warn!("{} contains no launches", path.display());
            }
            state.set_dataset(dataset);
        }
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", path.display());
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::data::model::tests::record;
    use crate::data::model::{LaunchDataset, Outcome};

    fn render(ctx: &egui::Context, state: &mut AppState) {
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| payload_slider(ui, state));
        });
    }

    #[test]
    fn slider_keeps_unstepped_data_bounds() {
        let mut state = AppState::default();
        state.set_dataset(LaunchDataset::from_records(vec![
            record("CCAFS LC-40", 600.0, "v1.0", Outcome::Failure),
            record("KSC LC-39A", 9600.0, "B5", Outcome::Success),
        ]));

        let ctx = egui::Context::default();
        render(&ctx, &mut state);
        render(&ctx, &mut state);

        assert_eq!(state.payload_range(), PayloadRange::new(600.0, 9600.0));
        assert_eq!(state.scatter().map(|s| s.point_count()), Some(2));
    }
}
