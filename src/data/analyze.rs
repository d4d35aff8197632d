use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use super::clean::{
    COL_AMOUNT, COL_CITY, COL_INVESTORS, COL_SECTOR, COL_STARTUP, COL_YEAR, UNKNOWN,
};
use super::error::DataError;
use super::model::{Table, Value};

// ---------------------------------------------------------------------------
// Summary – the dashboard cards
// ---------------------------------------------------------------------------

/// Aggregate statistics over the current filtered view. Recomputed whenever
/// the view changes; cheap at the dataset sizes this tool handles.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_funding: f64,
    pub startup_count: usize,
    pub top_sector: String,
    pub top_city: String,
    pub mean_funding: f64,
}

impl Default for Summary {
    fn default() -> Self {
        Summary {
            total_funding: 0.0,
            startup_count: 0,
            top_sector: "N/A".to_string(),
            top_city: "N/A".to_string(),
            mean_funding: 0.0,
        }
    }
}

/// Compute the summary cards for a filtered view, given as row indices into
/// the canonical table. Pure; every call walks the view afresh.
pub fn summarize(table: &Table, view: &[usize]) -> Summary {
    let total_funding = total_amount(table, view);
    let mean_funding = if view.is_empty() {
        0.0
    } else {
        total_funding / view.len() as f64
    };

    // Distinct startups in the view, excluding the fill sentinel.
    let startup_count = view
        .iter()
        .filter_map(|&i| table.rows[i].get(COL_STARTUP).as_text())
        .filter(|name| *name != UNKNOWN)
        .collect::<BTreeSet<_>>()
        .len();

    Summary {
        total_funding,
        startup_count,
        top_sector: modal_value(table, view, COL_SECTOR).unwrap_or_else(|| "N/A".to_string()),
        top_city: modal_value(table, view, COL_CITY).unwrap_or_else(|| "N/A".to_string()),
        mean_funding,
    }
}

fn total_amount(table: &Table, view: &[usize]) -> f64 {
    if !table.has_column(COL_AMOUNT) {
        return 0.0;
    }
    view.iter()
        .filter_map(|&i| table.rows[i].get(COL_AMOUNT).as_f64())
        .sum()
}

/// Most frequent value of a column within the view. Ties break towards the
/// lexicographically smallest value so the result is deterministic.
fn modal_value(table: &Table, view: &[usize], column: &str) -> Option<String> {
    if !table.has_column(column) {
        return None;
    }
    let counts = count_by(table, view, column);
    let mut best: Option<(&String, usize)> = None;
    for (value, count) in &counts {
        // BTreeMap iterates in key order, so a strict `>` keeps the smallest
        // key among equal counts.
        if best.map_or(true, |(_, best_count)| *count > best_count) {
            best = Some((value, *count));
        }
    }
    best.map(|(value, _)| value.clone())
}

// ---------------------------------------------------------------------------
// Ranked aggregates
// ---------------------------------------------------------------------------

/// Occurrence count per distinct value of `column` within the view. Null
/// cells do not form a group.
fn count_by(table: &Table, view: &[usize], column: &str) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for &i in view {
        let value = table.rows[i].get(column);
        if value.is_null() {
            continue;
        }
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Summed funding per distinct value of `column` within the view.
fn funding_by(table: &Table, view: &[usize], column: &str) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for &i in view {
        let value = table.rows[i].get(column);
        if value.is_null() {
            continue;
        }
        let amount = table.rows[i].get(COL_AMOUNT).as_f64().unwrap_or(0.0);
        *totals.entry(value.to_string()).or_insert(0.0) += amount;
    }
    totals
}

fn require_column(table: &Table, column: &str) -> Result<(), DataError> {
    if table.has_column(column) {
        Ok(())
    } else {
        Err(DataError::Analysis(column.to_string()))
    }
}

/// Top `n` values of a column by occurrence count, descending; ties break
/// lexicographically ascending.
pub fn top_by_count(
    table: &Table,
    view: &[usize],
    column: &str,
    n: usize,
) -> Result<Vec<(String, usize)>, DataError> {
    require_column(table, column)?;
    let mut ranked: Vec<(String, usize)> = count_by(table, view, column).into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    Ok(ranked)
}

/// Top `n` values of a column by summed funding, descending; ties break
/// lexicographically ascending.
pub fn top_by_funding(
    table: &Table,
    view: &[usize],
    column: &str,
    n: usize,
) -> Result<Vec<(String, f64)>, DataError> {
    require_column(table, column)?;
    require_column(table, COL_AMOUNT)?;
    let mut ranked: Vec<(String, f64)> = funding_by(table, view, column).into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    Ok(ranked)
}

/// Funding totals grouped by year, ascending year order.
pub fn funding_by_year(table: &Table, view: &[usize]) -> Result<Vec<(i64, f64)>, DataError> {
    require_column(table, COL_YEAR)?;
    require_column(table, COL_AMOUNT)?;
    let mut totals: BTreeMap<i64, f64> = BTreeMap::new();
    for &i in view {
        let Value::Integer(year) = table.rows[i].get(COL_YEAR) else {
            continue;
        };
        let amount = table.rows[i].get(COL_AMOUNT).as_f64().unwrap_or(0.0);
        *totals.entry(*year).or_insert(0.0) += amount;
    }
    Ok(totals.into_iter().collect())
}

// ---------------------------------------------------------------------------
// Text reports (Analysis tab)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    FundingTrends,
    TopSectors,
    TopStartups,
    InvestorActivity,
    GeographicalDistribution,
}

impl AnalysisKind {
    pub const ALL: [AnalysisKind; 5] = [
        AnalysisKind::FundingTrends,
        AnalysisKind::TopSectors,
        AnalysisKind::TopStartups,
        AnalysisKind::InvestorActivity,
        AnalysisKind::GeographicalDistribution,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AnalysisKind::FundingTrends => "Funding Trends",
            AnalysisKind::TopSectors => "Top Sectors",
            AnalysisKind::TopStartups => "Top Startups",
            AnalysisKind::InvestorActivity => "Investor Activity",
            AnalysisKind::GeographicalDistribution => "Geographical Distribution",
        }
    }
}

/// Build the text report for one analysis type over the current view.
pub fn run_analysis(
    table: &Table,
    view: &[usize],
    kind: AnalysisKind,
) -> Result<String, DataError> {
    let mut out = String::new();
    match kind {
        AnalysisKind::FundingTrends => {
            writeln!(out, "Funding Trends by Year:").ok();
            for (year, total) in funding_by_year(table, view)? {
                writeln!(out, "{year}    {}", format_usd(total)).ok();
            }
        }
        AnalysisKind::TopSectors => {
            writeln!(out, "Top 10 Sectors by Startup Count:").ok();
            for (sector, count) in top_by_count(table, view, COL_SECTOR, 10)? {
                writeln!(out, "{sector}    {count}").ok();
            }
        }
        AnalysisKind::TopStartups => {
            writeln!(out, "Top 10 Startups by Total Funding:").ok();
            for (name, total) in top_by_funding(table, view, COL_STARTUP, 10)? {
                writeln!(out, "{name}    {}", format_usd(total)).ok();
            }
        }
        AnalysisKind::InvestorActivity => {
            writeln!(out, "Top 10 Most Active Investors:").ok();
            for (investor, count) in top_by_count(table, view, COL_INVESTORS, 10)? {
                writeln!(out, "{investor}    {count}").ok();
            }
        }
        AnalysisKind::GeographicalDistribution => {
            writeln!(out, "Top 10 Cities by Total Funding:").ok();
            for (city, total) in top_by_funding(table, view, COL_CITY, 10)? {
                writeln!(out, "{city}    {}", format_usd(total)).ok();
            }
        }
    }
    Ok(out)
}

/// Advisory block shown under the analysis report: top sector, hub cities,
/// active investors, and whether the year-over-year funding total is rising.
pub fn recommendations(table: &Table, view: &[usize]) -> String {
    let top_sector = modal_value(table, view, COL_SECTOR).unwrap_or_else(|| "N/A".to_string());

    let top_cities = top_by_count(table, view, COL_CITY, 3)
        .map(|ranked| ranked.into_iter().map(|(c, _)| c).collect::<Vec<_>>())
        .unwrap_or_default();
    let top_investors = top_by_count(table, view, COL_INVESTORS, 3)
        .map(|ranked| ranked.into_iter().map(|(inv, _)| inv).collect::<Vec<_>>())
        .unwrap_or_default();

    let trend = match funding_by_year(table, view) {
        Ok(series) if series.len() > 1 => {
            if series[series.len() - 1].1 > series[0].1 {
                "increasing"
            } else {
                "decreasing"
            }
        }
        _ => "unclear",
    };

    let join = |items: Vec<String>| {
        if items.is_empty() {
            "N/A".to_string()
        } else {
            items.join(", ")
        }
    };

    format!(
        "Recommendations based on the current view:\n\n\
         1. Focus on the top funding sector: {top_sector}\n\
         2. Target the top startup hubs: {}\n\
         3. Engage with active investors: {}\n\
         4. The funding trend is currently {trend} - adjust strategy accordingly\n",
        join(top_cities),
        join(top_investors),
    )
}

/// `1234567.5` → `$1,234,567.50`.
pub fn format_usd(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${grouped}.{frac:02}", if negative { "-" } else { "" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::clean::clean;
    use crate::data::loader::read_table;

    fn cleaned_table() -> Table {
        let csv = "Date,Startup Name,Industry Vertical,City  Location,Investment Type,Investors Name,Amount in USD\n\
                   01/01/2015,A,Technology,Pune,Seed,Sequoia,100\n\
                   01/01/2016,B,Health,Mumbai,Series A,Accel,200\n\
                   01/01/2016,C,Technology,Pune,Seed,Sequoia,300\n\
                   01/01/2017,D,Health,Mumbai,Seed,Tiger,400\n\
                   01/01/2017,,Health,Bangalore,Seed,Accel,0\n";
        clean(&read_table(csv.as_bytes()).unwrap()).unwrap()
    }

    fn full_view(table: &Table) -> Vec<usize> {
        (0..table.len()).collect()
    }

    #[test]
    fn summary_over_full_view() {
        let table = cleaned_table();
        let summary = summarize(&table, &full_view(&table));

        assert_eq!(summary.total_funding, 1000.0);
        // Row 4's startup name was filled with "Unknown" and is excluded.
        assert_eq!(summary.startup_count, 4);
        assert_eq!(summary.top_sector, "Health");
        assert_eq!(summary.mean_funding, 200.0);
    }

    #[test]
    fn empty_view_yields_defined_defaults() {
        let table = cleaned_table();
        let summary = summarize(&table, &[]);
        assert_eq!(summary.total_funding, 0.0);
        assert_eq!(summary.mean_funding, 0.0);
        assert_eq!(summary.startup_count, 0);
        assert_eq!(summary.top_sector, "N/A");
        assert_eq!(summary.top_city, "N/A");
    }

    #[test]
    fn modal_ties_break_lexicographically() {
        let table = cleaned_table();
        // Pune and Mumbai both appear twice; Bangalore (→ Bengaluru) once.
        let summary = summarize(&table, &full_view(&table));
        assert_eq!(summary.top_city, "Mumbai");
    }

    #[test]
    fn top_by_count_orders_desc_then_lexicographic() {
        let table = cleaned_table();
        let ranked = top_by_count(&table, &full_view(&table), COL_INVESTORS, 10).unwrap();
        assert_eq!(
            ranked,
            vec![
                ("Accel".to_string(), 2),
                ("Sequoia".to_string(), 2),
                ("Tiger".to_string(), 1),
            ]
        );
    }

    #[test]
    fn top_by_funding_sums_groups() {
        let table = cleaned_table();
        let ranked = top_by_funding(&table, &full_view(&table), COL_CITY, 2).unwrap();
        assert_eq!(
            ranked,
            vec![("Mumbai".to_string(), 600.0), ("Pune".to_string(), 400.0)]
        );
    }

    #[test]
    fn funding_by_year_is_ascending() {
        let table = cleaned_table();
        let series = funding_by_year(&table, &full_view(&table)).unwrap();
        assert_eq!(
            series,
            vec![(2015, 100.0), (2016, 500.0), (2017, 400.0)]
        );
    }

    #[test]
    fn missing_column_is_an_analysis_error() {
        let table = clean(&read_table("Startup Name\nA\n".as_bytes()).unwrap()).unwrap();
        let err = top_by_count(&table, &[0], COL_INVESTORS, 10).unwrap_err();
        assert!(matches!(err, DataError::Analysis(_)));
    }

    #[test]
    fn analysis_reports_render() {
        let table = cleaned_table();
        let view = full_view(&table);
        for kind in AnalysisKind::ALL {
            let report = run_analysis(&table, &view, kind).unwrap();
            assert!(report.contains(':'), "{kind:?} report looks empty");
        }
    }

    #[test]
    fn usd_formatting() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(2500.0), "$2,500.00");
        assert_eq!(format_usd(1_234_567.5), "$1,234,567.50");
    }
}
