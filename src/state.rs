use std::path::Path;

use crate::data::analyze::{self, AnalysisKind, Summary};
use crate::data::clean;
use crate::data::filter::{self, ALL, FilterCriteria};
use crate::data::loader;
use crate::data::model::Table;

// ---------------------------------------------------------------------------
// Chart selections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
    Scatter,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Bar, ChartKind::Line, ChartKind::Scatter];

    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar Plot",
            ChartKind::Line => "Line Plot",
            ChartKind::Scatter => "Scatter Plot",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMetric {
    Count,
    TotalFunding,
}

impl ChartMetric {
    pub const ALL: [ChartMetric; 2] = [ChartMetric::Count, ChartMetric::TotalFunding];

    pub fn label(&self) -> &'static str {
        match self {
            ChartMetric::Count => "Record Count",
            ChartMetric::TotalFunding => "Total Funding",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which tab of the central panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Data,
    Charts,
    Analysis,
}

/// The full session state, independent of rendering. Owns the single
/// canonical table and everything derived from it; every user action is a
/// blocking call on this struct.
pub struct AppState {
    /// Loaded dataset (None until the user opens a file).
    pub table: Option<Table>,

    /// Whether the cleaning pipeline has run on the current table.
    pub cleaned: bool,

    /// Criteria currently applied to the table.
    pub criteria: FilterCriteria,

    /// Indices of records passing the current criteria (the filtered view).
    pub visible_indices: Vec<usize>,

    /// Summary cards, recomputed whenever the view changes.
    pub summary: Summary,

    /// Raw UI selections for the filter widgets ("All" = no constraint).
    pub year_min_input: String,
    pub year_max_input: String,
    pub sector_input: String,
    pub city_input: String,
    pub investment_input: String,

    pub active_tab: Tab,
    pub chart_kind: ChartKind,
    pub chart_metric: ChartMetric,
    /// Category column for the bar chart.
    pub chart_column: String,

    pub analysis_kind: AnalysisKind,
    pub analysis_output: String,

    /// Pre-clean diagnostics text; `Some` while the report window is open.
    pub cleaning_report: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            cleaned: false,
            criteria: FilterCriteria::default(),
            visible_indices: Vec::new(),
            summary: Summary::default(),
            year_min_input: ALL.to_string(),
            year_max_input: ALL.to_string(),
            sector_input: ALL.to_string(),
            city_input: ALL.to_string(),
            investment_input: ALL.to_string(),
            active_tab: Tab::Data,
            chart_kind: ChartKind::Bar,
            chart_metric: ChartMetric::Count,
            chart_column: clean::COL_SECTOR.to_string(),
            analysis_kind: AnalysisKind::FundingTrends,
            analysis_output: "Select an analysis type and click 'Run Analysis'".to_string(),
            cleaning_report: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Load a CSV file. On failure the previous table is left untouched and
    /// the error becomes the status message.
    pub fn load_file(&mut self, path: &Path) {
        match loader::load_csv(path) {
            Ok(table) => {
                log::info!(
                    "loaded {} records with columns {:?}",
                    table.len(),
                    table.columns
                );
                self.status_message = Some(format!("Dataset loaded: {} records", table.len()));
                self.set_table(table, false);
            }
            Err(e) => {
                log::error!("failed to load file: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Replace the current table wholesale and reset everything derived.
    fn set_table(&mut self, table: Table, cleaned: bool) {
        self.cleaned = cleaned;
        self.criteria = FilterCriteria::default();
        self.visible_indices = (0..table.len()).collect();
        self.year_min_input = ALL.to_string();
        self.year_max_input = ALL.to_string();
        self.sector_input = ALL.to_string();
        self.city_input = ALL.to_string();
        self.investment_input = ALL.to_string();
        self.summary = analyze::summarize(&table, &self.visible_indices);
        self.table = Some(table);
    }

    /// Run the cleaning pipeline. Cleans into a new table and swaps only on
    /// success, so a failed clean never loses the loaded data.
    pub fn clean_table(&mut self) {
        let Some(table) = &self.table else {
            self.status_message = Some("Please upload a dataset first".to_string());
            return;
        };
        match clean::clean(table) {
            Ok(cleaned) => {
                log::info!("cleaned table: {} records remain", cleaned.len());
                self.set_table(cleaned, true);
                self.status_message = Some("Data cleaned successfully".to_string());
            }
            Err(e) => {
                log::error!("clean failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Open the pre-clean diagnostics report.
    pub fn show_cleaning_steps(&mut self) {
        match &self.table {
            Some(table) => self.cleaning_report = Some(clean::cleaning_report(table)),
            None => self.status_message = Some("Please upload a dataset first".to_string()),
        }
    }

    /// Build criteria from the raw widget inputs and recompute the view.
    /// A malformed year bound is dropped (with a status message) rather than
    /// failing the whole filter.
    pub fn apply_filters(&mut self) {
        let mut dropped_bound = false;
        let year_min = filter::parse_year_bound(&self.year_min_input).unwrap_or_else(|_| {
            dropped_bound = true;
            None
        });
        let year_max = filter::parse_year_bound(&self.year_max_input).unwrap_or_else(|_| {
            dropped_bound = true;
            None
        });

        let from_combo = |input: &str| {
            if input == ALL {
                None
            } else {
                Some(input.to_string())
            }
        };

        self.criteria = FilterCriteria {
            year_min,
            year_max,
            sector: from_combo(&self.sector_input),
            city: from_combo(&self.city_input),
            investment_type: from_combo(&self.investment_input),
        };
        self.refilter();

        self.status_message = if dropped_bound {
            Some("Ignored a non-numeric year bound".to_string())
        } else if let Some(table) = &self.table {
            Some(format!(
                "Showing {} of {} records",
                self.visible_indices.len(),
                table.len()
            ))
        } else {
            None
        };
    }

    /// Drop all criteria and restore the unconstrained view.
    pub fn reset_filters(&mut self) {
        self.year_min_input = ALL.to_string();
        self.year_max_input = ALL.to_string();
        self.sector_input = ALL.to_string();
        self.city_input = ALL.to_string();
        self.investment_input = ALL.to_string();
        self.criteria = FilterCriteria::default();
        self.refilter();
        if let Some(table) = &self.table {
            self.status_message = Some(format!("Showing all {} records", table.len()));
        }
    }

    /// Recompute `visible_indices` and the summary from the current criteria.
    pub fn refilter(&mut self) {
        if let Some(table) = &self.table {
            self.visible_indices = filter::apply(table, &self.criteria);
            self.summary = analyze::summarize(table, &self.visible_indices);
        }
    }

    /// Run the selected analysis over the current view into
    /// `analysis_output`. A missing column is a message, not a failure.
    pub fn run_analysis(&mut self) {
        let Some(table) = &self.table else {
            self.analysis_output = "No data to analyze. Please upload data first.".to_string();
            return;
        };
        match analyze::run_analysis(table, &self.visible_indices, self.analysis_kind) {
            Ok(report) => self.analysis_output = report,
            Err(e) => self.analysis_output = e.to_string(),
        }
    }

    /// Replace the analysis output with the recommendations block.
    pub fn show_recommendations(&mut self) {
        let Some(table) = &self.table else {
            self.analysis_output = "Please upload and clean the dataset first".to_string();
            return;
        };
        self.analysis_output = analyze::recommendations(table, &self.visible_indices);
    }
}
