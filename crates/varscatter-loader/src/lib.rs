//! # varscatter-loader
//!
//! Loads schedule activity exports and turns them into a cleaned
//! `ActivitySet`.
//!
//! This crate provides:
//! - Spreadsheet reading (.xlsx, .xlsm, .xlsb, .xls, .ods) of the first sheet
//! - CSV reading
//! - Required column validation, status filtering and numeric coercion
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::path::Path;
//! use varscatter_loader::load_activities;
//!
//! let activities = load_activities(Path::new("SCATTER Finish and Duration Variance.xlsx"))?;
//! println!("{} activities in play", activities.len());
//! ```

pub mod clean;
pub mod delimited;
pub mod workbook;

pub use clean::clean;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use varscatter_core::{ActivitySet, Table};

/// Loading error
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File '{}' not found", .0.display())]
    NotFound(PathBuf),

    #[error("Unsupported file format: '{0}'. Supported formats: xlsx, xlsm, xlsb, xls, ods, csv")]
    UnsupportedFormat(String),

    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    #[error("Input has no header row")]
    EmptyInput,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Excel or OpenDocument workbook; the first sheet is read
    Spreadsheet,
    /// Comma separated values with a header row
    Csv,
}

/// Detect input format from extension (case-insensitive)
pub fn detect_format(path: &Path) -> Result<InputFormat, LoadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(InputFormat::Spreadsheet),
        "csv" => Ok(InputFormat::Csv),
        _ => Err(LoadError::UnsupportedFormat(extension)),
    }
}

/// Read the raw table from a file (auto-detects format)
pub fn read_table(path: &Path) -> Result<Table, LoadError> {
    match detect_format(path)? {
        InputFormat::Spreadsheet => workbook::read_first_sheet(path),
        InputFormat::Csv => delimited::read_csv(path),
    }
}

/// Load, validate and clean an activity file
pub fn load_activities(path: &Path) -> Result<ActivitySet, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let table = read_table(path)?;
    info!(
        path = %path.display(),
        rows = table.len(),
        columns = table.headers.len(),
        "loaded input table"
    );
    debug!(columns = ?table.headers, "available columns");

    clean(table)
}
