use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::error::DataError;
use super::model::{Record, Table, Value};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a funding dataset from a CSV file.
///
/// The whole file becomes the new table or nothing does: on any error the
/// caller keeps its previous table. Every cell is loaded as raw text
/// (`Value::Text`) or `Value::Null` for empty cells; type coercion is the
/// Cleaner's job.
pub fn load_csv(path: &Path) -> Result<Table, DataError> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => return Err(DataError::Load(format!("{}: {e}", path.display()))),
    };
    read_table(&bytes[..]).map_err(|e| DataError::Load(format!("{e:#}")))
}

/// Parse CSV text from any reader into a [`Table`].
///
/// Funding exports from spreadsheet tools are frequently not valid UTF-8
/// (curly quotes, rupee signs, etc. in Latin-1). The reader works on byte
/// records and decodes each field as UTF-8 when possible, falling back to a
/// Latin-1 interpretation otherwise, so no row is ever rejected for its
/// encoding.
pub fn read_table<R: Read>(input: R) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(input);

    let columns: Vec<String> = reader
        .byte_headers()
        .context("reading CSV header")?
        .iter()
        .map(decode_field)
        .collect();

    if columns.is_empty() {
        bail!("CSV has no header row");
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.byte_records().enumerate() {
        let byte_record = result.with_context(|| format!("CSV row {row_no}"))?;

        let mut record = Record::default();
        for (idx, column) in columns.iter().enumerate() {
            let cell = byte_record.get(idx).map(decode_field).unwrap_or_default();
            let value = if cell.trim().is_empty() {
                Value::Null
            } else {
                Value::Text(cell)
            };
            record.set(column, value);
        }
        rows.push(record);
    }

    Ok(Table { columns, rows })
}

/// Decode one CSV field: UTF-8 when valid, Latin-1 otherwise.
/// Latin-1 maps every byte to the code point of the same number, so the
/// fallback never fails.
fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_and_column_fidelity() {
        let csv = "Startup Name,City  Location,Amount in USD\n\
                   Flipkart,Bangalore,1000\n\
                   Ola,Mumbai,2000\n\
                   Zomato,Delhi,3000\n";
        let table = read_table(csv.as_bytes()).unwrap();

        assert_eq!(
            table.columns,
            vec!["Startup Name", "City  Location", "Amount in USD"]
        );
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.rows[1].get("Startup Name"),
            &Value::Text("Ola".into())
        );
    }

    #[test]
    fn empty_cells_become_null() {
        let csv = "a,b\nx,\n,y\n";
        let table = read_table(csv.as_bytes()).unwrap();
        assert_eq!(table.rows[0].get("b"), &Value::Null);
        assert_eq!(table.rows[1].get("a"), &Value::Null);
    }

    #[test]
    fn latin1_bytes_are_tolerated() {
        // 0xE9 is 'é' in Latin-1 and invalid on its own in UTF-8.
        let bytes = b"name,city\nCaf\xe9 Coffee Day,Bangalore\n";
        let table = read_table(&bytes[..]).unwrap();
        assert_eq!(
            table.rows[0].get("name"),
            &Value::Text("Café Coffee Day".into())
        );
    }

    #[test]
    fn short_rows_are_padded_with_null() {
        let csv = "a,b,c\n1,2\n";
        let table = read_table(csv.as_bytes()).unwrap();
        assert_eq!(table.rows[0].get("c"), &Value::Null);
    }

    #[test]
    fn unreadable_path_reports_load_error() {
        let err = load_csv(Path::new("/nonexistent/funding.csv")).unwrap_err();
        assert!(matches!(err, DataError::Load(_)));
    }
}
