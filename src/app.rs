use eframe::egui;

use crate::state::{AppState, Tab};
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FundingLensApp {
    pub state: AppState,
}

impl eframe::App for FundingLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar and tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: summary cards ----
        egui::TopBottomPanel::bottom("summary_cards").show(ctx, |ui| {
            panels::summary_cards(ui, &self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: active tab ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.active_tab {
            Tab::Data => table::data_grid(ui, &self.state),
            Tab::Charts => plot::chart_panel(ui, &mut self.state),
            Tab::Analysis => panels::analysis_panel(ui, &mut self.state),
        });

        // ---- Floating window: cleaning report ----
        panels::cleaning_report_window(ctx, &mut self.state);
    }
}
