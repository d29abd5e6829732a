//! # varscatter-core
//!
//! Core domain model and traits for the varscatter variance analysis tool.
//!
//! This crate provides:
//! - Tabular types: `Table`, `Cell`
//! - Domain types: `Activity`, `ActivitySet`, `Bucket`, `Quadrant`
//! - Descriptive statistics: `ScatterStatistics`
//! - Core traits: `Renderer`
//! - Error types
//!
//! ## Example
//!
//! ```rust
//! use varscatter_core::{Bucket, Quadrant};
//!
//! assert_eq!(Bucket::from_total_float(0.0), Bucket::Critical);
//! assert_eq!(Bucket::from_total_float(10.0), Bucket::NearCritical);
//! assert_eq!(Bucket::from_total_float(25.0), Bucket::HighFloat);
//!
//! assert_eq!(
//!     Quadrant::from_variances(-3.0, -5.0),
//!     Some(Quadrant::EarlierShorter)
//! );
//! assert_eq!(Quadrant::from_variances(0.0, -5.0), None);
//! ```

pub mod stats;

pub use stats::{BucketCount, QuadrantStats, ScatterStatistics, ValueRange};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Column Names
// ============================================================================

pub const COL_ACTIVITY_ID: &str = "Activity ID";
pub const COL_ACTIVITY_NAME: &str = "Activity Name";
pub const COL_ACTIVITY_STATUS: &str = "Activity Status";
pub const COL_FINISH_VARIANCE: &str = "Variance - BL Project Finish Date";
pub const COL_DURATION_VARIANCE: &str = "Variance - BL Project Duration";
pub const COL_TOTAL_FLOAT: &str = "Total Float";

/// Columns that must be present (exact header match) for an input to load
pub const REQUIRED_COLUMNS: [&str; 6] = [
    COL_ACTIVITY_ID,
    COL_ACTIVITY_NAME,
    COL_ACTIVITY_STATUS,
    COL_FINISH_VARIANCE,
    COL_DURATION_VARIANCE,
    COL_TOTAL_FLOAT,
];

/// Status value excluded from analysis (case-sensitive)
pub const COMPLETED_STATUS: &str = "Completed";

// ============================================================================
// Tabular Data
// ============================================================================

/// A single cell of tabular input
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    /// Coerce the cell to a finite number.
    ///
    /// Text is trimmed and parsed; empty cells, booleans, unparsable text and
    /// non-finite values all coerce to `None`. This includes text such as
    /// `inf` and `-inf`, which a lenient numeric parse would accept as
    /// infinite floats: here those rows are dropped rather than plotted.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            Cell::Number(v) => *v,
            Cell::Text(s) => s.trim().parse::<f64>().ok()?,
            Cell::Empty | Cell::Bool(_) => return None,
        };
        value.is_finite().then_some(value)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(v) => write!(f, "{}", format_number(*v)),
            Cell::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

/// Raw rows read from an input file, first row used as headers
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating it to the header width
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.headers.len(), Cell::Empty);
        self.rows.push(row);
    }

    /// Index of the first column with exactly this header
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Format a number the way it is shown in tooltips and reports
///
/// Uses the shortest representation that round-trips (`5`, `-3.5`, `10.0001`).
pub fn format_number(value: f64) -> String {
    format!("{value}")
}

// ============================================================================
// Categories
// ============================================================================

/// Total float category, ordered by threshold
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Bucket {
    /// Total Float ≤ 0 (critical path)
    #[serde(rename = "Total Float ≤ 0")]
    Critical,
    /// 0 < Total Float ≤ 10
    #[serde(rename = "0 < Total Float ≤ 10")]
    NearCritical,
    /// 10 < Total Float ≤ 20
    #[serde(rename = "10 < Total Float ≤ 20")]
    MediumFloat,
    /// Total Float > 20
    #[serde(rename = "Total Float > 20")]
    HighFloat,
}

impl Bucket {
    /// All buckets in legend (threshold) order
    pub const ALL: [Bucket; 4] = [
        Bucket::Critical,
        Bucket::NearCritical,
        Bucket::MediumFloat,
        Bucket::HighFloat,
    ];

    /// Categorize a total float value.
    ///
    /// Thresholds at 0, 10 and 20 are inclusive on the lower bucket. Defined
    /// for every `f64`; NaN compares false everywhere and lands in `HighFloat`.
    pub fn from_total_float(total_float: f64) -> Self {
        if total_float <= 0.0 {
            Bucket::Critical
        } else if total_float <= 10.0 {
            Bucket::NearCritical
        } else if total_float <= 20.0 {
            Bucket::MediumFloat
        } else {
            Bucket::HighFloat
        }
    }

    /// Display label, also used as legend entry and export sheet name
    pub fn label(&self) -> &'static str {
        match self {
            Bucket::Critical => "Total Float ≤ 0",
            Bucket::NearCritical => "0 < Total Float ≤ 10",
            Bucket::MediumFloat => "10 < Total Float ≤ 20",
            Bucket::HighFloat => "Total Float > 20",
        }
    }

    /// Fixed chart color (CSS color name)
    pub fn color(&self) -> &'static str {
        match self {
            Bucket::Critical => "red",
            Bucket::NearCritical => "orange",
            Bucket::MediumFloat => "gold",
            Bucket::HighFloat => "green",
        }
    }

    /// Position in `Bucket::ALL`
    pub fn index(&self) -> usize {
        match self {
            Bucket::Critical => 0,
            Bucket::NearCritical => 1,
            Bucket::MediumFloat => 2,
            Bucket::HighFloat => 3,
        }
    }

    /// Stable identifier for markup (CSS classes, data attributes)
    pub fn slug(&self) -> &'static str {
        match self {
            Bucket::Critical => "critical",
            Bucket::NearCritical => "near-critical",
            Bucket::MediumFloat => "medium-float",
            Bucket::HighFloat => "high-float",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sign combination of (finish variance, duration variance)
///
/// Negative variance means ahead of baseline: earlier finish, shorter duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    #[serde(rename = "Earlier and shorter")]
    EarlierShorter,
    #[serde(rename = "Earlier but longer")]
    EarlierLonger,
    #[serde(rename = "Later but shorter")]
    LaterShorter,
    #[serde(rename = "Later and longer")]
    LaterLonger,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::EarlierShorter,
        Quadrant::EarlierLonger,
        Quadrant::LaterShorter,
        Quadrant::LaterLonger,
    ];

    /// Classify by strict sign of both variances.
    ///
    /// Returns `None` when either variance is exactly zero (or NaN).
    pub fn from_variances(finish_variance: f64, duration_variance: f64) -> Option<Self> {
        let earlier = if finish_variance < 0.0 {
            true
        } else if finish_variance > 0.0 {
            false
        } else {
            return None;
        };
        let shorter = if duration_variance < 0.0 {
            true
        } else if duration_variance > 0.0 {
            false
        } else {
            return None;
        };

        Some(match (earlier, shorter) {
            (true, true) => Quadrant::EarlierShorter,
            (true, false) => Quadrant::EarlierLonger,
            (false, true) => Quadrant::LaterShorter,
            (false, false) => Quadrant::LaterLonger,
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::EarlierShorter => "Earlier and shorter",
            Quadrant::EarlierLonger => "Earlier but longer",
            Quadrant::LaterShorter => "Later but shorter",
            Quadrant::LaterLonger => "Later and longer",
        }
    }

    /// True for the quadrants left of the y axis (negative finish variance)
    pub fn is_earlier(&self) -> bool {
        matches!(self, Quadrant::EarlierShorter | Quadrant::EarlierLonger)
    }

    /// True for the quadrants below the x axis (negative duration variance)
    pub fn is_shorter(&self) -> bool {
        matches!(self, Quadrant::EarlierShorter | Quadrant::LaterShorter)
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Activities
// ============================================================================

/// One cleaned schedule activity
#[derive(Clone, Debug, PartialEq)]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub status: String,
    /// Variance - BL Project Finish Date, in days (x axis)
    pub finish_variance: f64,
    /// Variance - BL Project Duration, in days (y axis)
    pub duration_variance: f64,
    /// Total Float, in days
    pub total_float: f64,
    /// Zero-based data row index in the input table
    pub source_row: usize,
    /// Full input row with the numeric columns replaced by coerced values
    pub cells: Vec<Cell>,
}

impl Activity {
    pub fn bucket(&self) -> Bucket {
        Bucket::from_total_float(self.total_float)
    }

    pub fn quadrant(&self) -> Option<Quadrant> {
        Quadrant::from_variances(self.finish_variance, self.duration_variance)
    }

    /// Tooltip content, one entry per line.
    ///
    /// An empty entry separates the identity block from the metrics block.
    pub fn tooltip_lines(&self) -> Vec<String> {
        vec![
            format!("{COL_ACTIVITY_ID}: {}", self.id),
            format!("{COL_ACTIVITY_NAME}: {}", self.name),
            format!("{COL_ACTIVITY_STATUS}: {}", self.status),
            String::new(),
            format!(
                "{COL_DURATION_VARIANCE}: {}",
                format_number(self.duration_variance)
            ),
            format!(
                "{COL_FINISH_VARIANCE}: {}",
                format_number(self.finish_variance)
            ),
            format!("{COL_TOTAL_FLOAT}: {}", format_number(self.total_float)),
        ]
    }

    pub fn tooltip(&self) -> String {
        self.tooltip_lines().join("\n")
    }
}

/// Row counters collected while cleaning an input table
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Data rows in the input (header excluded)
    pub rows_read: usize,
    /// Rows dropped because their status was "Completed"
    pub completed_dropped: usize,
    /// Rows dropped because a numeric column failed to parse
    pub invalid_dropped: usize,
}

impl CleaningReport {
    pub fn kept(&self) -> usize {
        self.rows_read - self.completed_dropped - self.invalid_dropped
    }
}

/// The cleaned record set, in input row order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActivitySet {
    /// Headers of the cleaned schema (same as the input headers)
    pub headers: Vec<String>,
    pub activities: Vec<Activity>,
    pub report: CleaningReport,
}

impl ActivitySet {
    pub fn new(headers: Vec<String>, activities: Vec<Activity>) -> Self {
        let report = CleaningReport {
            rows_read: activities.len(),
            ..CleaningReport::default()
        };
        Self {
            headers,
            activities,
            report,
        }
    }

    pub fn with_report(mut self, report: CleaningReport) -> Self {
        self.report = report;
        self
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.activities.iter()
    }

    /// Activities of one bucket, in input order
    pub fn in_bucket(&self, bucket: Bucket) -> impl Iterator<Item = &Activity> {
        self.activities.iter().filter(move |a| a.bucket() == bucket)
    }

    /// Activity count per bucket, in `Bucket::ALL` order
    pub fn bucket_counts(&self) -> [usize; 4] {
        let mut counts = [0usize; 4];
        for activity in &self.activities {
            counts[activity.bucket().index()] += 1;
        }
        counts
    }

    pub fn statistics(&self) -> ScatterStatistics {
        ScatterStatistics::from_activities(self)
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Output rendering
pub trait Renderer {
    type Output;

    /// Render the cleaned activities to the output format
    fn render(&self, activities: &ActivitySet) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn activity(id: &str, finish: f64, duration: f64, total_float: f64) -> Activity {
        Activity {
            id: id.to_string(),
            name: format!("Activity {id}"),
            status: "In Progress".to_string(),
            finish_variance: finish,
            duration_variance: duration,
            total_float,
            source_row: 0,
            cells: Vec::new(),
        }
    }

    #[test]
    fn bucket_boundaries_are_inclusive_on_lower_bucket() {
        assert_eq!(Bucket::from_total_float(-5.0), Bucket::Critical);
        assert_eq!(Bucket::from_total_float(0.0), Bucket::Critical);
        assert_eq!(Bucket::from_total_float(0.0001), Bucket::NearCritical);
        assert_eq!(Bucket::from_total_float(10.0), Bucket::NearCritical);
        assert_eq!(Bucket::from_total_float(10.0001), Bucket::MediumFloat);
        assert_eq!(Bucket::from_total_float(20.0), Bucket::MediumFloat);
        assert_eq!(Bucket::from_total_float(20.5), Bucket::HighFloat);
        assert_eq!(Bucket::from_total_float(25.0), Bucket::HighFloat);
    }

    #[test]
    fn bucket_is_total_over_extreme_values() {
        assert_eq!(Bucket::from_total_float(-0.0), Bucket::Critical);
        assert_eq!(Bucket::from_total_float(f64::NEG_INFINITY), Bucket::Critical);
        assert_eq!(Bucket::from_total_float(f64::INFINITY), Bucket::HighFloat);
        assert_eq!(Bucket::from_total_float(f64::NAN), Bucket::HighFloat);
    }

    #[test]
    fn bucket_order_labels_and_colors() {
        let labels: Vec<_> = Bucket::ALL.iter().map(|b| b.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Total Float ≤ 0",
                "0 < Total Float ≤ 10",
                "10 < Total Float ≤ 20",
                "Total Float > 20",
            ]
        );
        let colors: Vec<_> = Bucket::ALL.iter().map(|b| b.color()).collect();
        assert_eq!(colors, vec!["red", "orange", "gold", "green"]);
        for (i, bucket) in Bucket::ALL.iter().enumerate() {
            assert_eq!(bucket.index(), i);
        }
    }

    #[test]
    fn quadrant_from_sign_pairs() {
        assert_eq!(
            Quadrant::from_variances(-3.0, -5.0),
            Some(Quadrant::EarlierShorter)
        );
        assert_eq!(
            Quadrant::from_variances(-1.0, 4.0),
            Some(Quadrant::EarlierLonger)
        );
        assert_eq!(
            Quadrant::from_variances(2.0, -1.0),
            Some(Quadrant::LaterShorter)
        );
        assert_eq!(
            Quadrant::from_variances(7.0, 0.5),
            Some(Quadrant::LaterLonger)
        );
        assert_eq!(Quadrant::from_variances(2.0, -1.0).unwrap().label(), "Later but shorter");
    }

    #[test]
    fn quadrant_undefined_on_zero_variance() {
        assert_eq!(Quadrant::from_variances(0.0, -5.0), None);
        assert_eq!(Quadrant::from_variances(3.0, 0.0), None);
        assert_eq!(Quadrant::from_variances(0.0, 0.0), None);
        assert_eq!(Quadrant::from_variances(-0.0, 1.0), None);
    }

    #[test]
    fn cell_coercion() {
        assert_eq!(Cell::Number(4.5).as_number(), Some(4.5));
        assert_eq!(Cell::from(" -12 ").as_number(), Some(-12.0));
        assert_eq!(Cell::from("1e1").as_number(), Some(10.0));
        assert_eq!(Cell::from("TBD").as_number(), None);
        assert_eq!(Cell::from("").as_number(), None);
        assert_eq!(Cell::from("inf").as_number(), None);
        assert_eq!(Cell::from("-inf").as_number(), None);
        assert_eq!(Cell::Number(f64::NAN).as_number(), None);
        assert_eq!(Cell::Bool(true).as_number(), None);
        assert_eq!(Cell::Empty.as_number(), None);
    }

    #[test]
    fn cell_display() {
        assert_eq!(Cell::Number(5.0).to_string(), "5");
        assert_eq!(Cell::Number(-3.25).to_string(), "-3.25");
        assert_eq!(Cell::from("A1010").to_string(), "A1010");
        assert_eq!(Cell::Empty.to_string(), "");
    }

    #[test]
    fn table_pads_short_rows() {
        let mut table = Table::new(vec!["a".into(), "b".into(), "c".into()]);
        table.push_row(vec![Cell::from("x")]);
        assert_eq!(table.rows[0], vec![Cell::from("x"), Cell::Empty, Cell::Empty]);
        assert_eq!(table.column_index("b"), Some(1));
        assert_eq!(table.column_index("B"), None);
    }

    #[test]
    fn tooltip_format() {
        let mut a = activity("A1000", 2.0, -1.5, 10.0001);
        a.name = "Pour foundations".to_string();
        assert_eq!(
            a.tooltip(),
            "Activity ID: A1000\n\
             Activity Name: Pour foundations\n\
             Activity Status: In Progress\n\
             \n\
             Variance - BL Project Duration: -1.5\n\
             Variance - BL Project Finish Date: 2\n\
             Total Float: 10.0001"
        );
    }

    #[test]
    fn activity_set_partitions_by_bucket() {
        let set = ActivitySet::new(
            vec![],
            vec![
                activity("a", 1.0, 1.0, -2.0),
                activity("b", 1.0, 1.0, 30.0),
                activity("c", 1.0, 1.0, 5.0),
                activity("d", 1.0, 1.0, 0.0),
                activity("e", 1.0, 1.0, 15.0),
            ],
        );

        assert_eq!(set.bucket_counts(), [2, 1, 1, 1]);

        let critical: Vec<_> = set.in_bucket(Bucket::Critical).map(|a| a.id.as_str()).collect();
        assert_eq!(critical, vec!["a", "d"]);

        let total: usize = Bucket::ALL.iter().map(|b| set.in_bucket(*b).count()).sum();
        assert_eq!(total, set.len());
    }

    #[test]
    fn bucket_serializes_as_label() {
        let json = serde_json::to_string(&Bucket::MediumFloat).unwrap();
        assert_eq!(json, "\"10 < Total Float ≤ 20\"");
        let json = serde_json::to_string(&Quadrant::LaterShorter).unwrap();
        assert_eq!(json, "\"Later but shorter\"");
    }
}
