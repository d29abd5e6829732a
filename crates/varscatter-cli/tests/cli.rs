//! End-to-end tests for the `varscatter` binary
//!
//! | Exit Code | Meaning |
//! |-----------|---------|
//! | 0 | Chart (and export) written |
//! | 1 | Input missing or unreadable, nothing written |

use calamine::{open_workbook_auto, Reader};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn varscatter_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_varscatter"))
}

fn write_fixture(dir: &Path) -> PathBuf {
    let path = dir.join("variance.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        "Activity ID,Activity Name,Activity Status,Variance - BL Project Finish Date,Variance - BL Project Duration,Total Float"
    )
    .unwrap();
    for row in [
        "A100,Survey,Completed,-1,-1,0",
        "A110,Clear site,In Progress,-3,-5,0",
        "A120,Excavate,Not Started,2,-1,10",
        "A130,Footings,Not Started,4,3,10.0001",
        "A140,Walls,Not Started,6,2,25",
        "A150,Roof,Not Started,1,1,TBD",
    ] {
        writeln!(file, "{row}").unwrap();
    }
    path
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(varscatter_binary())
        .current_dir(dir)
        .env_remove("VARSCATTER_INPUT")
        .env_remove("VARSCATTER_OUTPUT")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to execute varscatter")
}

#[test]
fn missing_input_exits_1_without_outputs() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), &["--excel", "absent.xlsx"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("absent.xlsx"), "stderr: {stderr}");
    assert!(!dir.path().join("interactive_scatter_plot.html").exists());
    assert!(!dir
        .path()
        .join("interactive_scatter_plot_categories.xlsx")
        .exists());
}

#[test]
fn writes_chart_and_export() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path());
    let output = run(
        dir.path(),
        &["--excel", input.to_str().unwrap(), "--output", "site"],
    );
    assert!(output.status.success(), "{output:?}");

    let html = std::fs::read_to_string(dir.path().join("site.html")).unwrap();
    assert!(html.contains("<b>Total activities:</b> 4"));

    let workbook = open_workbook_auto(dir.path().join("site_categories.xlsx")).unwrap();
    assert_eq!(
        workbook.sheet_names(),
        vec![
            "Total Float ≤ 0",
            "0 < Total Float ≤ 10",
            "10 < Total Float ≤ 20",
            "Total Float > 20",
        ]
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Total activities: 4"));
    assert!(stdout.contains("Interactive chart saved: site.html"));
    assert!(stdout.contains("Excel file with categories saved:"));
}

#[test]
fn no_excel_skips_export() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path());
    let output = run(dir.path(), &["--excel", input.to_str().unwrap(), "--no-excel"]);
    assert!(output.status.success(), "{output:?}");

    assert!(dir.path().join("interactive_scatter_plot.html").exists());
    assert!(!dir
        .path()
        .join("interactive_scatter_plot_categories.xlsx")
        .exists());
}

#[test]
fn json_prints_statistics_only() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path());
    let output = run(
        dir.path(),
        &["--excel", input.to_str().unwrap(), "--no-excel", "--json"],
    );
    assert!(output.status.success(), "{output:?}");

    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["total_activities"], 4);
    assert_eq!(stats["unassigned_quadrant"], 0);
}

#[test]
fn quiet_prints_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path());
    let output = run(
        dir.path(),
        &["--excel", input.to_str().unwrap(), "--no-excel", "-q"],
    );
    assert!(output.status.success(), "{output:?}");
    assert!(output.stdout.is_empty());
}

#[test]
fn config_file_sets_chart_title() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path());
    std::fs::write(
        dir.path().join("chart.toml"),
        "[chart]\ntitle = \"Recovery Look-Ahead\"\n",
    )
    .unwrap();

    let output = run(
        dir.path(),
        &[
            "--excel",
            input.to_str().unwrap(),
            "--no-excel",
            "--config",
            "chart.toml",
        ],
    );
    assert!(output.status.success(), "{output:?}");

    let html =
        std::fs::read_to_string(dir.path().join("interactive_scatter_plot.html")).unwrap();
    assert!(html.contains("<title>Recovery Look-Ahead</title>"));
}

#[test]
fn invalid_config_fails_before_writing() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(dir.path());
    std::fs::write(dir.path().join("chart.toml"), "[chart]\ncolour = 1\n").unwrap();

    let output = run(
        dir.path(),
        &["--excel", input.to_str().unwrap(), "--config", "chart.toml"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("interactive_scatter_plot.html").exists());
}
