use eframe::egui::{self, Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::color::CategoryColors;
use crate::data::analyze;
use crate::data::clean::{
    COL_AMOUNT, COL_CITY, COL_INVESTMENT, COL_INVESTORS, COL_SECTOR, COL_STARTUP, COL_YEAR,
};
use crate::data::model::{Table, Value};
use crate::state::{AppState, ChartKind, ChartMetric};

/// Categorical columns offered as the bar-chart dimension.
const CATEGORY_COLUMNS: &[&str] = &[
    COL_SECTOR,
    COL_CITY,
    COL_INVESTMENT,
    COL_STARTUP,
    COL_INVESTORS,
];

// ---------------------------------------------------------------------------
// Charts tab (central panel)
// ---------------------------------------------------------------------------

/// Render the chart controls and the selected chart over the filtered view.
pub fn chart_panel(ui: &mut Ui, state: &mut AppState) {
    if state.table.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a CSV to visualize funding records");
        });
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Chart type:");
        egui::ComboBox::from_id_salt("chart_type")
            .selected_text(state.chart_kind.label())
            .show_ui(ui, |ui: &mut Ui| {
                for kind in ChartKind::ALL {
                    if ui
                        .selectable_label(state.chart_kind == kind, kind.label())
                        .clicked()
                    {
                        state.chart_kind = kind;
                    }
                }
            });

        if state.chart_kind == ChartKind::Bar {
            ui.label("Category:");
            egui::ComboBox::from_id_salt("chart_column")
                .selected_text(state.chart_column.clone())
                .show_ui(ui, |ui: &mut Ui| {
                    for col in CATEGORY_COLUMNS {
                        if ui
                            .selectable_label(state.chart_column == *col, *col)
                            .clicked()
                        {
                            state.chart_column = (*col).to_string();
                        }
                    }
                });

            ui.label("Metric:");
            egui::ComboBox::from_id_salt("chart_metric")
                .selected_text(state.chart_metric.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for metric in ChartMetric::ALL {
                        if ui
                            .selectable_label(state.chart_metric == metric, metric.label())
                            .clicked()
                        {
                            state.chart_metric = metric;
                        }
                    }
                });
        }
    });
    ui.separator();

    let Some(table) = &state.table else {
        return;
    };
    match state.chart_kind {
        ChartKind::Bar => bar_chart(
            ui,
            table,
            &state.visible_indices,
            &state.chart_column,
            state.chart_metric,
        ),
        ChartKind::Line => funding_trend_line(ui, table, &state.visible_indices),
        ChartKind::Scatter => amount_scatter(ui, table, &state.visible_indices),
    }
}

/// Top-10 categories of the selected column, one coloured bar per category.
fn bar_chart(ui: &mut Ui, table: &Table, view: &[usize], column: &str, metric: ChartMetric) {
    let ranked: Vec<(String, f64)> = match metric {
        ChartMetric::Count => match analyze::top_by_count(table, view, column, 10) {
            Ok(ranked) => ranked
                .into_iter()
                .map(|(label, count)| (label, count as f64))
                .collect(),
            Err(e) => return chart_error(ui, &e.to_string()),
        },
        ChartMetric::TotalFunding => match analyze::top_by_funding(table, view, column, 10) {
            Ok(ranked) => ranked,
            Err(e) => return chart_error(ui, &e.to_string()),
        },
    };

    let colors = CategoryColors::new(ranked.iter().map(|(label, _)| label.clone()));

    Plot::new("bar_chart")
        .legend(Legend::default())
        .show_axes([false, true])
        .show(ui, |plot_ui| {
            for (i, (label, value)) in ranked.iter().enumerate() {
                let bar = Bar::new(i as f64, *value).width(0.7);
                let chart = BarChart::new(vec![bar])
                    .color(colors.color_for(label))
                    .name(label);
                plot_ui.bar_chart(chart);
            }
        });
}

/// Year-over-year funding totals.
fn funding_trend_line(ui: &mut Ui, table: &Table, view: &[usize]) {
    let series = match analyze::funding_by_year(table, view) {
        Ok(series) => series,
        Err(e) => return chart_error(ui, &e.to_string()),
    };

    let points: PlotPoints = series
        .iter()
        .map(|&(year, total)| [year as f64, total])
        .collect();

    Plot::new("funding_trend")
        .x_axis_label("Year")
        .y_axis_label("Total funding (USD)")
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points)
                    .name("Total funding")
                    .color(Color32::LIGHT_BLUE)
                    .width(2.0),
            );
        });
}

/// One point per record: year on x, amount on y.
fn amount_scatter(ui: &mut Ui, table: &Table, view: &[usize]) {
    if !table.has_column(COL_YEAR) || !table.has_column(COL_AMOUNT) {
        return chart_error(
            ui,
            "scatter needs the year and amount columns (clean the data first)",
        );
    }

    let points: PlotPoints = view
        .iter()
        .filter_map(|&i| {
            let row = &table.rows[i];
            let Value::Integer(year) = row.get(COL_YEAR) else {
                return None;
            };
            let amount = row.get(COL_AMOUNT).as_f64()?;
            Some([*year as f64, amount])
        })
        .collect();

    Plot::new("amount_scatter")
        .x_axis_label("Year")
        .y_axis_label("Amount (USD)")
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .name("Funding events")
                    .color(Color32::LIGHT_GREEN)
                    .radius(3.0),
            );
        });
}

fn chart_error(ui: &mut Ui, message: &str) {
    ui.colored_label(Color32::RED, message);
}
