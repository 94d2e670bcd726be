//! Dataset loading - CSV decoding with encoding fallback, preview rows, and
//! the type-declaration payload.

use std::collections::HashMap;
use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;

/// Load a CSV file, decoding UTF-8 with a Latin-1 (windows-1252) fallback
/// for files exported by older spreadsheet tooling.
pub fn load_csv(path: &Path) -> Result<DataFrame> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    let text = decode_bytes(&bytes);
    read_csv_str(&text).with_context(|| format!("Failed to parse CSV file: {}", path.display()))
}

/// Parse CSV text into a DataFrame with every column read as text.
///
/// Numeric interpretation belongs to the caller's type map, not to schema
/// inference; a column declared continuous gets coerced later, and everything
/// else stays categorical regardless of what its values look like.
pub fn read_csv_str(text: &str) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(text.as_bytes()))
        .finish()?;
    Ok(df)
}

fn decode_bytes(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}

/// Column names plus the first rows of the dataset, for the client-side
/// type-annotation step.
#[derive(Debug, Serialize)]
pub struct DatasetPreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Extract the first `n` rows as display strings (nulls become empty).
pub fn preview(df: &DataFrame, n: usize) -> DatasetPreview {
    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let take = n.min(df.height());
    let mut rows = Vec::with_capacity(take);
    for i in 0..take {
        let row: Vec<String> = df
            .get_columns()
            .iter()
            .map(|col| match col.get(i) {
                Ok(AnyValue::Null) | Err(_) => String::new(),
                Ok(AnyValue::String(s)) => s.to_string(),
                Ok(AnyValue::StringOwned(s)) => s.to_string(),
                Ok(other) => other.to_string(),
            })
            .collect();
        rows.push(row);
    }

    DatasetPreview { columns, rows }
}

/// Load the type-declaration payload: a JSON object mapping column names to
/// type labels.
pub fn load_type_map(path: &Path) -> Result<HashMap<String, String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read type map: {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| {
        format!(
            "Type map is not a JSON object of column: label pairs: {}",
            path.display()
        )
    })
}
