use super::clean::{COL_CITY, COL_INVESTMENT, COL_SECTOR, COL_YEAR};
use super::error::DataError;
use super::model::{Table, Value};

// ---------------------------------------------------------------------------
// Filter criteria: which records of the canonical table are visible
// ---------------------------------------------------------------------------

/// Sentinel shown in the UI for "no constraint" on a field.
pub const ALL: &str = "All";

/// Optional predicates combined with AND semantics. `None` means the field
/// imposes no constraint (the "All" sentinel in the UI).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub year_min: Option<i64>,
    pub year_max: Option<i64>,
    pub sector: Option<String>,
    pub city: Option<String>,
    pub investment_type: Option<String>,
}

impl FilterCriteria {
    pub fn is_unconstrained(&self) -> bool {
        *self == FilterCriteria::default()
    }
}

/// Turn a UI year bound into a predicate bound. "All" and the empty string
/// mean no bound; anything that is not an integer is a [`DataError::Filter`],
/// which the caller recovers from by dropping the bound.
pub fn parse_year_bound(text: &str) -> Result<Option<i64>, DataError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == ALL {
        return Ok(None);
    }
    trimmed
        .parse::<i64>()
        .map(Some)
        .map_err(|_| DataError::Filter(text.to_string()))
}

/// Return indices of records that pass all active predicates.
///
/// * Year: the record's derived year must be present and inside
///   `[year_min, year_max]` inclusive. If the table has no year column the
///   predicate is skipped entirely.
/// * Sector / city / investment type: exact match against the canonical
///   (post-clean) value; skipped when the column is absent.
///
/// The canonical table is never touched; resetting the criteria restores the
/// full index range.
pub fn apply(table: &Table, criteria: &FilterCriteria) -> Vec<usize> {
    let year_active =
        (criteria.year_min.is_some() || criteria.year_max.is_some()) && table.has_column(COL_YEAR);
    let text_predicates: [(&str, Option<&String>); 3] = [
        (COL_SECTOR, criteria.sector.as_ref()),
        (COL_CITY, criteria.city.as_ref()),
        (COL_INVESTMENT, criteria.investment_type.as_ref()),
    ];

    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            if year_active {
                let year = match row.get(COL_YEAR) {
                    Value::Integer(y) => *y,
                    _ => return false,
                };
                if criteria.year_min.is_some_and(|min| year < min) {
                    return false;
                }
                if criteria.year_max.is_some_and(|max| year > max) {
                    return false;
                }
            }
            for (col, wanted) in &text_predicates {
                let Some(wanted) = wanted else { continue };
                if !table.has_column(col) {
                    continue;
                }
                if row.get(col).as_text() != Some(wanted.as_str()) {
                    return false;
                }
            }
            true
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::clean::clean;
    use crate::data::loader::read_table;

    fn cleaned_table() -> Table {
        let csv = "Date,Startup Name,Industry Vertical,City  Location,Investment Type,Amount in USD\n\
                   01/01/2015,A,Technology,Pune,Seed,100\n\
                   01/01/2016,B,Technology,Mumbai,Series A,200\n\
                   01/01/2017,C,Technology,Pune,Seed,300\n\
                   01/01/2016,D,Health,Pune,Seed,400\n\
                   bad date,E,Technology,Pune,Seed,500\n";
        clean(&read_table(csv.as_bytes()).unwrap()).unwrap()
    }

    #[test]
    fn conjunction_of_year_and_sector() {
        let table = cleaned_table();
        let criteria = FilterCriteria {
            year_min: Some(2015),
            year_max: Some(2016),
            sector: Some("Technology".into()),
            ..Default::default()
        };
        let visible = apply(&table, &criteria);
        assert_eq!(visible, vec![0, 1]);
    }

    #[test]
    fn records_without_a_year_fail_the_year_predicate() {
        let table = cleaned_table();
        let criteria = FilterCriteria {
            year_min: Some(2000),
            year_max: Some(2030),
            ..Default::default()
        };
        // Row 4 has an unparseable date, hence no year.
        assert_eq!(apply(&table, &criteria), vec![0, 1, 2, 3]);
    }

    #[test]
    fn year_predicate_skipped_when_column_absent() {
        let table = clean(&read_table("Startup Name\nA\nB\n".as_bytes()).unwrap()).unwrap();
        let criteria = FilterCriteria {
            year_min: Some(2015),
            year_max: Some(2016),
            ..Default::default()
        };
        assert_eq!(apply(&table, &criteria), vec![0, 1]);
    }

    #[test]
    fn reset_restores_the_full_view() {
        let table = cleaned_table();
        let unconstrained = FilterCriteria::default();
        assert!(unconstrained.is_unconstrained());
        assert_eq!(
            apply(&table, &unconstrained),
            (0..table.len()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn year_bounds_parse_with_local_recovery() {
        assert_eq!(parse_year_bound("All").unwrap(), None);
        assert_eq!(parse_year_bound("  ").unwrap(), None);
        assert_eq!(parse_year_bound("2018").unwrap(), Some(2018));
        assert!(matches!(
            parse_year_bound("twenty-eighteen"),
            Err(DataError::Filter(_))
        ));
    }
}
