//! Integration tests for loading activity exports from disk

use pretty_assertions::assert_eq;
use rust_xlsxwriter::Workbook;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use varscatter_core::{Bucket, Cell, Quadrant, REQUIRED_COLUMNS};
use varscatter_loader::{load_activities, read_table, LoadError};

enum Value {
    Text(&'static str),
    Num(f64),
    Blank,
}

use Value::{Blank, Num, Text};

/// Rows of a typical P6 variance export, including completed and bad rows
fn fixture_rows() -> Vec<[Value; 6]> {
    vec![
        [Text("A1000"), Text("Mobilize"), Text("Completed"), Num(-2.0), Num(0.0), Num(0.0)],
        [Text("A1010"), Text("Excavate"), Text("In Progress"), Num(-3.0), Num(-5.0), Num(0.0)],
        [Text("A1020"), Text("Formwork"), Text("Not Started"), Num(2.0), Num(-1.0), Num(10.0)],
        [Text("A1030"), Text("Rebar"), Text("Not Started"), Num(4.0), Num(3.0), Text("TBD")],
        [Text("A1040"), Text("Pour"), Text("Not Started"), Num(6.0), Num(2.0), Num(10.0001)],
        [Text("A1050"), Text("Cure"), Text("In Progress"), Blank, Num(1.0), Num(5.0)],
        [Text("A1060"), Text("Strip"), Text("Not Started"), Num(0.0), Num(1.0), Num(25.0)],
    ]
}

fn write_xlsx(path: &Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in REQUIRED_COLUMNS.iter().enumerate() {
        sheet.write(0, col as u16, *header).unwrap();
    }
    sheet.write(0, 6, "Original Duration").unwrap();

    for (i, row) in fixture_rows().iter().enumerate() {
        let r = i as u32 + 1;
        for (col, value) in row.iter().enumerate() {
            match value {
                Text(s) => {
                    sheet.write(r, col as u16, *s).unwrap();
                }
                Num(v) => {
                    sheet.write(r, col as u16, *v).unwrap();
                }
                Blank => {}
            }
        }
        sheet.write(r, 6, 10.0 + i as f64).unwrap();
    }

    workbook.save(path).unwrap();
}

fn write_csv(path: &Path) {
    let mut file = std::fs::File::create(path).unwrap();
    writeln!(file, "{},Original Duration", REQUIRED_COLUMNS.join(",")).unwrap();
    for (i, row) in fixture_rows().iter().enumerate() {
        let fields: Vec<String> = row
            .iter()
            .map(|v| match v {
                Text(s) => (*s).to_string(),
                Num(n) => n.to_string(),
                Blank => String::new(),
            })
            .collect();
        writeln!(file, "{},{}", fields.join(","), 10 + i).unwrap();
    }
}

fn assert_cleaned(path: &Path) {
    let set = load_activities(path).unwrap();

    let ids: Vec<_> = set.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["A1010", "A1020", "A1040", "A1060"]);

    assert_eq!(set.report.rows_read, 7);
    assert_eq!(set.report.completed_dropped, 1);
    assert_eq!(set.report.invalid_dropped, 2);

    let buckets: Vec<_> = set.iter().map(|a| a.bucket()).collect();
    assert_eq!(
        buckets,
        vec![
            Bucket::Critical,
            Bucket::NearCritical,
            Bucket::MediumFloat,
            Bucket::HighFloat
        ]
    );

    let quadrants: Vec<_> = set.iter().map(|a| a.quadrant()).collect();
    assert_eq!(
        quadrants,
        vec![
            Some(Quadrant::EarlierShorter),
            Some(Quadrant::LaterShorter),
            Some(Quadrant::LaterLonger),
            None
        ]
    );

    // Extra columns survive cleaning
    assert_eq!(set.headers.len(), 7);
    assert_eq!(set.headers[6], "Original Duration");
    assert_eq!(set.activities[0].cells[6], Cell::Number(11.0));
}

#[test]
fn load_xlsx_export() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("variance.xlsx");
    write_xlsx(&path);

    assert_cleaned(&path);
}

#[test]
fn load_csv_export() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("variance.csv");
    write_csv(&path);

    assert_cleaned(&path);
}

#[test]
fn read_xlsx_keeps_all_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("variance.xlsx");
    write_xlsx(&path);

    let table = read_table(&path).unwrap();
    assert_eq!(table.len(), 7);
    assert_eq!(table.rows[3][5], Cell::from("TBD"));
    assert_eq!(table.rows[5][3], Cell::Empty);
}

#[test]
fn load_xlsx_missing_column() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in REQUIRED_COLUMNS.iter().take(5).enumerate() {
        sheet.write(0, col as u16, *header).unwrap();
    }
    workbook.save(&path).unwrap();

    let err = load_activities(&path).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "Total Float"));
}

#[test]
fn load_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("variance.txt");
    std::fs::write(&path, "Activity ID\n").unwrap();

    let err = load_activities(&path).unwrap_err();
    assert!(matches!(err, LoadError::UnsupportedFormat(_)));
}

#[test]
fn load_nonexistent_file() {
    let dir = TempDir::new().unwrap();
    let err = load_activities(&dir.path().join("missing.xlsx")).unwrap_err();
    assert!(matches!(err, LoadError::NotFound(_)));
}
