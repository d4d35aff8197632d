use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::analyze::{self, AnalysisKind};
use crate::data::clean::{COL_CITY, COL_INVESTMENT, COL_SECTOR};
use crate::data::filter::ALL;
use crate::state::{AppState, Tab};

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
            ui.separator();
            if ui.button("Export Plot").clicked() {
                state.status_message = Some("Export Plot is not implemented yet".to_string());
                ui.close_menu();
            }
            if ui.button("Export Analysis").clicked() {
                state.status_message = Some("Export Analysis is not implemented yet".to_string());
                ui.close_menu();
            }
        });

        ui.separator();

        for (tab, label) in [
            (Tab::Data, "Data Management"),
            (Tab::Charts, "Visualization"),
            (Tab::Analysis, "Analysis & Insights"),
        ] {
            if ui.selectable_label(state.active_tab == tab, label).clicked() {
                state.active_tab = tab;
            }
        }

        ui.separator();

        if ui.button("Show Cleaning Steps").clicked() {
            state.show_cleaning_steps();
        }
        if ui.button("Clean Data").clicked() {
            state.clean_table();
        }

        ui.separator();

        match &state.table {
            Some(table) => {
                ui.label(format!(
                    "{} records loaded, {} visible",
                    table.len(),
                    state.visible_indices.len()
                ));
            }
            None => {
                ui.label("No dataset loaded");
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().weak_text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the filter panel: year range, sector, city, investment type.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(table) = &state.table else {
        ui.label("No dataset loaded.");
        return;
    };

    // Option lists come from the canonical table, so they refresh after a
    // clean or re-load.
    let year_options: Vec<String> = std::iter::once(ALL.to_string())
        .chain(table.years().into_iter().map(|y| y.to_string()))
        .collect();
    let sector_options = combo_options(table, COL_SECTOR);
    let city_options = combo_options(table, COL_CITY);
    let investment_options = combo_options(table, COL_INVESTMENT);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Year range");
            ui.horizontal(|ui: &mut Ui| {
                value_combo(ui, "year_min", &mut state.year_min_input, &year_options);
                ui.label("to");
                value_combo(ui, "year_max", &mut state.year_max_input, &year_options);
            });
            ui.add_space(4.0);

            ui.strong("Industry sector");
            value_combo(ui, "sector", &mut state.sector_input, &sector_options);
            ui.add_space(4.0);

            ui.strong("City");
            value_combo(ui, "city", &mut state.city_input, &city_options);
            ui.add_space(4.0);

            ui.strong("Investment type");
            value_combo(
                ui,
                "investment",
                &mut state.investment_input,
                &investment_options,
            );
            ui.add_space(8.0);

            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Apply Filters").clicked() {
                    state.apply_filters();
                }
                if ui.button("Reset").clicked() {
                    state.reset_filters();
                }
            });
        });
}

/// "All" plus every distinct value of a column.
fn combo_options(table: &crate::data::model::Table, column: &str) -> Vec<String> {
    std::iter::once(ALL.to_string())
        .chain(table.unique_values(column).into_iter().map(|v| v.to_string()))
        .collect()
}

fn value_combo(ui: &mut Ui, id: &str, selection: &mut String, options: &[String]) {
    egui::ComboBox::from_id_salt(id)
        .selected_text(selection.clone())
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                if ui
                    .selectable_label(selection == option, option)
                    .clicked()
                {
                    *selection = option.clone();
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Summary cards
// ---------------------------------------------------------------------------

/// Render the dashboard card strip for the current filtered view.
pub fn summary_cards(ui: &mut Ui, state: &AppState) {
    let summary = &state.summary;
    ui.columns(5, |cols| {
        card(&mut cols[0], "Total Funding", &analyze::format_usd(summary.total_funding));
        card(&mut cols[1], "Startups", &summary.startup_count.to_string());
        card(&mut cols[2], "Top Sector", &summary.top_sector);
        card(&mut cols[3], "Top City", &summary.top_city);
        card(&mut cols[4], "Avg Funding", &analyze::format_usd(summary.mean_funding));
    });
}

fn card(ui: &mut Ui, title: &str, value: &str) {
    ui.group(|ui: &mut Ui| {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(RichText::new(title).small().strong());
            ui.label(RichText::new(value).size(16.0));
        });
    });
}

// ---------------------------------------------------------------------------
// Analysis tab
// ---------------------------------------------------------------------------

/// Render the analysis tab: type selector, report text, recommendations.
pub fn analysis_panel(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Analysis type:");
        egui::ComboBox::from_id_salt("analysis_type")
            .selected_text(state.analysis_kind.label())
            .show_ui(ui, |ui: &mut Ui| {
                for kind in AnalysisKind::ALL {
                    if ui
                        .selectable_label(state.analysis_kind == kind, kind.label())
                        .clicked()
                    {
                        state.analysis_kind = kind;
                    }
                }
            });

        if ui.button("Run Analysis").clicked() {
            state.run_analysis();
        }
        if ui.button("Show Recommendations").clicked() {
            state.show_recommendations();
        }
    });

    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.monospace(&state.analysis_output);
        });
}

// ---------------------------------------------------------------------------
// Cleaning report window
// ---------------------------------------------------------------------------

/// Show the pre-clean diagnostics window while a report is open.
pub fn cleaning_report_window(ctx: &egui::Context, state: &mut AppState) {
    let Some(report) = state.cleaning_report.clone() else {
        return;
    };
    let mut open = true;
    egui::Window::new("Data Cleaning Report")
        .open(&mut open)
        .default_width(500.0)
        .show(ctx, |ui: &mut Ui| {
            ScrollArea::vertical().show(ui, |ui: &mut Ui| {
                ui.monospace(report);
            });
        });
    if !open {
        state.cleaning_report = None;
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open funding dataset")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_file(&path);
    }
}
