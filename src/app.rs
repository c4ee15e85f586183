use eframe::egui::{self, Ui};

use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
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

        // ---- Central panel: dashboard, top to bottom ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    panels::header(ui);
                    ui.add_space(8.0);

                    if self.state.dataset().is_none() {
                        ui.centered_and_justified(|ui: &mut Ui| {
                            ui.heading("Open a launch records file to begin  (File → Open…)");
                        });
                        return;
                    }

                    panels::site_dropdown(ui, &mut self.state);
                    ui.add_space(8.0);

                    if let Some(pie) = self.state.pie() {
                        charts::pie_chart(ui, pie);
                    }
                    ui.add_space(8.0);

                    panels::payload_slider(ui, &mut self.state);
                    ui.add_space(8.0);

                    if let Some(scatter) = self.state.scatter() {
                        charts::scatter_chart(ui, scatter, &self.state.color_map);
                    }
                    ui.add_space(8.0);

                    panels::plotted_launches_table(ui, &self.state);
                });
        });
    }
}
