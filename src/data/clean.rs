use chrono::{Datelike, NaiveDate};

use super::error::DataError;
use super::model::{Record, Table, Value};

// ---------------------------------------------------------------------------
// Canonical column names
// ---------------------------------------------------------------------------

pub const COL_DATE: &str = "date";
pub const COL_YEAR: &str = "year";
pub const COL_STARTUP: &str = "startup_name";
pub const COL_SECTOR: &str = "industry_vertical";
pub const COL_CITY: &str = "city_location";
pub const COL_INVESTMENT: &str = "investment_type";
pub const COL_AMOUNT: &str = "amount_in_usd";
pub const COL_INVESTORS: &str = "investors_name";

/// Sentinel for text fields with no usable value.
pub const UNKNOWN: &str = "Unknown";

/// City spellings folded into one canonical name. Applied after
/// title-casing, so keys are title-cased too. `Delhi Ncr` is the re-entry
/// of `Delhi NCR` through title-casing; mapping it back keeps cleaning
/// idempotent.
const CITY_SYNONYMS: &[(&str, &str)] = &[
    ("Bangalore", "Bengaluru"),
    ("Delhi", "Delhi NCR"),
    ("New Delhi", "Delhi NCR"),
    ("Ncr", "Delhi NCR"),
    ("Delhi Ncr", "Delhi NCR"),
    ("Gurgaon", "Delhi NCR"),
    ("Noida", "Delhi NCR"),
    ("Bombay", "Mumbai"),
];

/// Date layouts seen in funding exports, tried in order.
const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d", "%m/%d/%Y"];

// ---------------------------------------------------------------------------
// Cleaning pipeline
// ---------------------------------------------------------------------------

/// Normalize a raw table into canonical form.
///
/// Builds a brand-new table; the caller swaps it in only on success, so a
/// failed clean never corrupts the loaded dataset. The step order is fixed:
///
/// 1. normalize column names (trim, lowercase, whitespace → `_`)
/// 2. drop records whose every field is unset
/// 3. canonicalize `city_location` (fill, title-case, synonym map;
///    synthesized as "Unknown" when the column is missing)
/// 4. parse `date`, derive `year`
/// 5. parse `amount_in_usd` (synthesized as 0 when the column is missing)
/// 6. fill unset `startup_name` / `industry_vertical` with "Unknown"
/// 7. records are re-indexed by compaction
///
/// Running the pipeline on already-clean input is a no-op (verified in
/// tests).
pub fn clean(table: &Table) -> Result<Table, DataError> {
    if table.columns.is_empty() {
        return Err(DataError::Clean("table has no columns".into()));
    }

    // 1. Column names. Header text like "City  Location" (double space)
    // collapses to the canonical "city_location".
    let renames: Vec<(String, String)> = table
        .columns
        .iter()
        .map(|c| (c.clone(), normalize_column_name(c)))
        .collect();
    let mut columns: Vec<String> = renames.iter().map(|(_, n)| n.clone()).collect();

    let mut rows: Vec<Record> = table
        .rows
        .iter()
        .map(|row| {
            let mut record = Record::default();
            for (old, new) in &renames {
                record.set(new, row.get(old).clone());
            }
            record
        })
        .collect();

    // 2. Entirely empty records carry no information.
    rows.retain(|r| !r.is_blank());

    // 3. City.
    if !columns.iter().any(|c| c == COL_CITY) {
        columns.push(COL_CITY.to_string());
    }
    for row in &mut rows {
        let city = match row.get(COL_CITY) {
            Value::Text(raw) => canonical_city(raw),
            _ => UNKNOWN.to_string(),
        };
        row.set(COL_CITY, Value::Text(city));
    }

    // 4. Date and derived year. The year column only exists when a date
    // column does.
    if columns.iter().any(|c| c == COL_DATE) {
        if !columns.iter().any(|c| c == COL_YEAR) {
            let date_pos = columns.iter().position(|c| c == COL_DATE).unwrap_or(0);
            columns.insert(date_pos + 1, COL_YEAR.to_string());
        }
        for row in &mut rows {
            let date = match row.get(COL_DATE) {
                Value::Date(d) => Some(*d),
                Value::Text(raw) => parse_date(raw),
                _ => None,
            };
            match date {
                Some(d) => {
                    row.set(COL_DATE, Value::Date(d));
                    row.set(COL_YEAR, Value::Integer(i64::from(d.year())));
                }
                None => {
                    row.set(COL_DATE, Value::Null);
                    row.set(COL_YEAR, Value::Null);
                }
            }
        }
    }

    // 5. Amount. Unparseable and undisclosed amounts become 0, never
    // dropped.
    if !columns.iter().any(|c| c == COL_AMOUNT) {
        columns.push(COL_AMOUNT.to_string());
    }
    for row in &mut rows {
        let amount = match row.get(COL_AMOUNT) {
            Value::Float(v) => *v,
            Value::Integer(i) => *i as f64,
            Value::Text(raw) => parse_amount(raw).unwrap_or(0.0),
            _ => 0.0,
        };
        row.set(COL_AMOUNT, Value::Float(amount));
    }

    // 6. Remaining key text columns.
    for col in [COL_STARTUP, COL_SECTOR] {
        if columns.iter().any(|c| c == col) {
            for row in &mut rows {
                if row.get(col).is_null() {
                    row.set(col, Value::Text(UNKNOWN.to_string()));
                }
            }
        }
    }

    // 7. `rows` is already compact, which is the re-index.
    Ok(Table { columns, rows })
}

// ---------------------------------------------------------------------------
// Pre-clean diagnostics
// ---------------------------------------------------------------------------

/// Human-readable report of what cleaning would fix in a raw table: column
/// names that need normalizing, null counts, and suspect amount/date cells.
pub fn cleaning_report(table: &Table) -> String {
    use std::fmt::Write as _;

    let mut out = String::from("Dataset Cleaning Report (before cleaning):\n\n");

    writeln!(out, "Original column names:\n{:?}\n", table.columns).ok();

    let messy: Vec<&String> = table
        .columns
        .iter()
        .filter(|c| c.as_str() != normalize_column_name(c))
        .collect();
    if !messy.is_empty() {
        writeln!(out, "Columns needing rename: {messy:?}\n").ok();
    }

    writeln!(out, "Null values per column:").ok();
    for col in &table.columns {
        let nulls = table.rows.iter().filter(|r| r.get(col).is_null()).count();
        writeln!(out, "  {col}: {nulls}").ok();
    }
    out.push('\n');

    let amount_col = table
        .columns
        .iter()
        .find(|c| normalize_column_name(c) == COL_AMOUNT);
    if let Some(col) = amount_col {
        let suspect = table
            .rows
            .iter()
            .filter(|r| matches!(r.get(col), Value::Text(s) if parse_amount(s).is_none()))
            .count();
        writeln!(out, "'{col}' entries that will default to 0: {suspect}\n").ok();
    }

    let date_col = table
        .columns
        .iter()
        .find(|c| normalize_column_name(c) == COL_DATE);
    if let Some(col) = date_col {
        let invalid = table
            .rows
            .iter()
            .filter(|r| matches!(r.get(col), Value::Text(s) if parse_date(s).is_none()))
            .count();
        writeln!(out, "Invalid date entries: {invalid}\n").ok();
    }

    out.push_str("These are the issues cleaning will fix.\n");
    out
}

// ---------------------------------------------------------------------------
// Field-level helpers
// ---------------------------------------------------------------------------

/// Trim, lowercase, collapse whitespace runs to a single underscore.
pub fn normalize_column_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Title-case, then fold known synonym spellings into the canonical city.
fn canonical_city(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return UNKNOWN.to_string();
    }
    let titled = title_case(trimmed);
    for (from, to) in CITY_SYNONYMS {
        if titled == *from {
            return (*to).to_string();
        }
    }
    titled
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a raw date cell through the known layouts.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Parse a raw amount cell: strip thousands separators and whitespace,
/// treat "undisclosed" as unset, coerce the rest to a number.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let stripped: String = raw.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    if stripped.is_empty() || stripped.eq_ignore_ascii_case("undisclosed") {
        return None;
    }
    stripped.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_table;

    fn sample_table() -> Table {
        let csv = "Date,Startup Name,Industry Vertical,City  Location,Investment Type,Amount in USD\n\
                   01/01/2018,Byju's,EdTech,Bangalore,Private Equity,\"1,000,000\"\n\
                   ,,,,,\n\
                   05/03/2017,Swiggy,Food Delivery,bombay ,Series A,Undisclosed\n\
                   09/06/2018,Oyo,Hospitality,New Delhi,Series B,2500000\n";
        read_table(csv.as_bytes()).unwrap()
    }

    #[test]
    fn column_names_are_canonical() {
        let cleaned = clean(&sample_table()).unwrap();
        assert_eq!(
            cleaned.columns,
            vec![
                COL_DATE,
                COL_YEAR,
                COL_STARTUP,
                COL_SECTOR,
                COL_CITY,
                COL_INVESTMENT,
                COL_AMOUNT,
            ]
        );
    }

    #[test]
    fn blank_rows_are_dropped() {
        let cleaned = clean(&sample_table()).unwrap();
        assert_eq!(cleaned.len(), 3);
    }

    #[test]
    fn city_synonyms_fold_to_canonical() {
        let cleaned = clean(&sample_table()).unwrap();
        let cities: Vec<&Value> = cleaned.rows.iter().map(|r| r.get(COL_CITY)).collect();
        assert_eq!(cities[0], &Value::Text("Bengaluru".into()));
        assert_eq!(cities[1], &Value::Text("Mumbai".into()));
        assert_eq!(cities[2], &Value::Text("Delhi NCR".into()));
    }

    #[test]
    fn amounts_are_coerced() {
        let cleaned = clean(&sample_table()).unwrap();
        assert_eq!(cleaned.rows[0].get(COL_AMOUNT), &Value::Float(1_000_000.0));
        assert_eq!(cleaned.rows[1].get(COL_AMOUNT), &Value::Float(0.0));
        assert_eq!(cleaned.rows[2].get(COL_AMOUNT), &Value::Float(2_500_000.0));
    }

    #[test]
    fn years_are_derived_from_dates() {
        let cleaned = clean(&sample_table()).unwrap();
        assert_eq!(cleaned.rows[0].get(COL_YEAR), &Value::Integer(2018));
        assert_eq!(cleaned.rows[1].get(COL_YEAR), &Value::Integer(2017));
    }

    #[test]
    fn unparseable_dates_become_null_not_error() {
        let table = read_table("Date,Startup Name\nnot a date,X\n".as_bytes()).unwrap();
        let cleaned = clean(&table).unwrap();
        assert_eq!(cleaned.rows[0].get(COL_DATE), &Value::Null);
        assert_eq!(cleaned.rows[0].get(COL_YEAR), &Value::Null);
    }

    #[test]
    fn missing_city_and_amount_columns_are_synthesized() {
        let table = read_table("Startup Name\nFlipkart\n".as_bytes()).unwrap();
        let cleaned = clean(&table).unwrap();
        assert!(cleaned.has_column(COL_CITY));
        assert!(cleaned.has_column(COL_AMOUNT));
        assert_eq!(cleaned.rows[0].get(COL_CITY), &Value::Text(UNKNOWN.into()));
        assert_eq!(cleaned.rows[0].get(COL_AMOUNT), &Value::Float(0.0));
        // No date column, so no year column either.
        assert!(!cleaned.has_column(COL_YEAR));
    }

    #[test]
    fn unset_name_and_sector_are_filled() {
        // The first row is not entirely empty (it has a serial number), so it
        // survives the blank-row drop and gets its text fields filled.
        let table =
            read_table("Sr No,Startup Name,Industry Vertical\n1,,\n2,X,Tech\n".as_bytes()).unwrap();
        let cleaned = clean(&table).unwrap();
        for row in &cleaned.rows {
            assert!(!row.get(COL_STARTUP).is_null());
            assert!(!row.get(COL_SECTOR).is_null());
        }
        assert_eq!(cleaned.rows[0].get(COL_STARTUP), &Value::Text(UNKNOWN.into()));
    }

    #[test]
    fn cleaning_is_idempotent() {
        let once = clean(&sample_table()).unwrap();
        let twice = clean(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn idempotent_on_delhi_ncr() {
        // "Delhi NCR" title-cases to "Delhi Ncr"; the synonym map folds it
        // straight back.
        assert_eq!(canonical_city("Delhi NCR"), "Delhi NCR");
    }

    #[test]
    fn amount_parsing_cases() {
        assert_eq!(parse_amount("1,000,000"), Some(1_000_000.0));
        assert_eq!(parse_amount(" 2,500 "), Some(2500.0));
        assert_eq!(parse_amount("Undisclosed"), None);
        assert_eq!(parse_amount("undisclosed"), None);
        assert_eq!(parse_amount("n/a"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn date_parsing_layouts() {
        let expected = NaiveDate::from_ymd_opt(2018, 1, 2).unwrap();
        assert_eq!(parse_date("02/01/2018"), Some(expected));
        assert_eq!(parse_date("02-01-2018"), Some(expected));
        assert_eq!(parse_date("2018-01-02"), Some(expected));
        assert_eq!(parse_date("garbage"), None);
    }

    #[test]
    fn cleaning_report_flags_suspect_cells() {
        let report = cleaning_report(&sample_table());
        assert!(report.contains("Original column names"));
        // "Undisclosed" defaults to 0.
        assert!(report.contains("entries that will default to 0: 1"));
        assert!(report.contains("Invalid date entries: 0"));
    }

    #[test]
    fn cleaning_degenerate_table_is_an_error() {
        assert!(matches!(clean(&Table::default()), Err(DataError::Clean(_))));
    }

    #[test]
    fn end_to_end_scenario() {
        let csv = "Date,Startup Name,Industry Vertical,City  Location,Investment Type,Amount in USD\n\
                   01/01/2018,Acme,Technology,Gurgaon,Seed,\"2,500\"\n\
                   ,,,,,\n\
                   02/02/2016,Beta,Technology,Pune,Series A,100\n\
                   03/03/2015,Gamma,Health,Bangalore,Seed,200\n\
                   04/04/2016,Delta,Health,Mumbai,Series B,300\n";
        let cleaned = clean(&read_table(csv.as_bytes()).unwrap()).unwrap();

        assert_eq!(cleaned.len(), 4);
        let acme = &cleaned.rows[0];
        assert_eq!(acme.get(COL_CITY), &Value::Text("Delhi NCR".into()));
        assert_eq!(acme.get(COL_AMOUNT), &Value::Float(2500.0));
        assert_eq!(acme.get(COL_YEAR), &Value::Integer(2018));
    }
}
