//! Spreadsheet input via calamine

use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use varscatter_core::{Cell, Table};

use crate::LoadError;

/// Read the first worksheet of a workbook; its first row holds the headers
pub fn read_first_sheet(path: &Path) -> Result<Table, LoadError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| LoadError::Spreadsheet(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(LoadError::EmptyInput)?
        .map_err(|e| LoadError::Spreadsheet(e.to_string()))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or(LoadError::EmptyInput)?
        .iter()
        .map(|data| cell_from_data(data).to_string())
        .collect();

    let mut table = Table::new(headers);
    for row in rows {
        table.push_row(row.iter().map(cell_from_data).collect());
    }

    Ok(table)
}

/// Map a native workbook value to a `Cell`
pub fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) if s.is_empty() => Cell::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Float(v) => Cell::Number(*v),
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
    }
}
