use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Data grid (Data tab, central panel)
// ---------------------------------------------------------------------------

/// Render the filtered view as a scrollable grid.
pub fn data_grid(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a CSV to view funding records  (File → Open…)");
        });
        return;
    };

    if state.visible_indices.is_empty() {
        ui.label("No records match the current filters.");
        return;
    }

    let n_cols = table.columns.len();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(60.0), n_cols)
        .header(22.0, |mut header| {
            for col in &table.columns {
                header.col(|ui| {
                    ui.strong(col);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, state.visible_indices.len(), |mut row| {
                let record = &table.rows[state.visible_indices[row.index()]];
                for col in &table.columns {
                    row.col(|ui| {
                        ui.label(record.get(col).to_string());
                    });
                }
            });
        });
}
