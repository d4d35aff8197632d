use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Value – a single cell in the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value. Funding CSVs have no reliable schema, so
/// every column holds whatever the Cleaner could make of the raw text.
/// Using `BTreeMap` / `BTreeSet` downstream so `Value` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Date(NaiveDate),
    Null,
}

// -- Manual Eq/Ord so we can put Value in BTreeSet --

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Value::*;
        fn discriminant(v: &Value) -> u8 {
            match v {
                Null => 0,
                Integer(_) => 1,
                Float(_) => 2,
                Date(_) => 3,
                Text(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Date(a), Date(b)) => a.cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Text(s) => s.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Date(d) => d.hash(state),
            Value::Null => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => {
                if v.fract() == 0.0 {
                    write!(f, "{v:.0}")
                } else {
                    write!(f, "{v:.2}")
                }
            }
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Null => write!(f, ""),
        }
    }
}

impl Value {
    /// Try to interpret the value as an `f64` for sums and chart axes.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// The text payload, if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

// ---------------------------------------------------------------------------
// Record – one funding event (one row of the table)
// ---------------------------------------------------------------------------

/// A single funding record. Columns are dynamic: a cell may simply be absent
/// from `fields`, which reads the same as `Value::Null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn get(&self, column: &str) -> &Value {
        self.fields.get(column).unwrap_or(&Value::Null)
    }

    pub fn set(&mut self, column: &str, value: Value) {
        self.fields.insert(column.to_string(), value);
    }

    /// True when every field of the record is unset.
    pub fn is_blank(&self) -> bool {
        self.fields.values().all(Value::is_null)
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// An ordered set of records sharing one column set. `columns` preserves the
/// CSV header order for display; `rows` preserves file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
}

impl Table {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sorted set of distinct non-null values in a column.
    pub fn unique_values(&self, column: &str) -> BTreeSet<Value> {
        self.rows
            .iter()
            .map(|r| r.get(column))
            .filter(|v| !v.is_null())
            .cloned()
            .collect()
    }

    /// Distinct years present in the `year` column, ascending.
    pub fn years(&self) -> Vec<i64> {
        let mut years: Vec<i64> = self
            .rows
            .iter()
            .filter_map(|r| match r.get(super::clean::COL_YEAR) {
                Value::Integer(y) => Some(*y),
                _ => None,
            })
            .collect();
        years.sort_unstable();
        years.dedup();
        years
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, Value)]) -> Record {
        let mut rec = Record::default();
        for (col, val) in pairs {
            rec.set(col, val.clone());
        }
        rec
    }

    #[test]
    fn blank_record_detection() {
        assert!(Record::default().is_blank());
        assert!(record(&[("a", Value::Null), ("b", Value::Null)]).is_blank());
        assert!(!record(&[("a", Value::Text("x".into()))]).is_blank());
    }

    #[test]
    fn unique_values_skip_nulls_and_sort() {
        let table = Table {
            columns: vec!["city".into()],
            rows: vec![
                record(&[("city", Value::Text("Pune".into()))]),
                record(&[("city", Value::Null)]),
                record(&[("city", Value::Text("Mumbai".into()))]),
                record(&[("city", Value::Text("Pune".into()))]),
            ],
        };
        let unique: Vec<Value> = table.unique_values("city").into_iter().collect();
        assert_eq!(
            unique,
            vec![
                Value::Text("Mumbai".into()),
                Value::Text("Pune".into()),
            ]
        );
    }

    #[test]
    fn value_order_is_total() {
        let mut vals = vec![
            Value::Text("b".into()),
            Value::Null,
            Value::Float(2.0),
            Value::Integer(1),
            Value::Text("a".into()),
        ];
        vals.sort();
        assert_eq!(vals[0], Value::Null);
        assert_eq!(vals[4], Value::Text("b".into()));
    }
}
