//! CSV input

use std::path::Path;
use varscatter_core::{Cell, Table};

use crate::LoadError;

/// Read a CSV file with a header row.
///
/// Fields are typed on read: empty fields become `Cell::Empty`, fields that
/// parse as a finite number become `Cell::Number`, everything else is text.
pub fn read_csv(path: &Path) -> Result<Table, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(LoadError::EmptyInput);
    }

    let mut table = Table::new(headers);
    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter().map(typed_cell).collect());
    }

    Ok(table)
}

fn typed_cell(field: &str) -> Cell {
    if field.is_empty() {
        return Cell::Empty;
    }
    match field.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Cell::Number(v),
        _ => Cell::Text(field.to_string()),
    }
}
