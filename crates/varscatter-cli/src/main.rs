//! varscatter CLI - Schedule Variance Scatter Analysis
//!
//! Loads an activity export, draws the finish/duration variance scatter chart
//! and optionally writes the activities split by total float category.

use anyhow::{Context, Result};
use clap::Parser;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use varscatter_core::Renderer;
use varscatter_loader::load_activities;
use varscatter_render::{RenderConfig, SummaryRenderer};

#[derive(Parser, Debug)]
#[command(name = "varscatter")]
#[command(author, version, about = "Finish vs. duration variance scatter analysis", long_about = None)]
struct Cli {
    /// Input spreadsheet or CSV with the activity export
    #[arg(
        long,
        value_name = "FILE",
        env = "VARSCATTER_INPUT",
        default_value = "SCATTER Finish and Duration Variance.xlsx"
    )]
    excel: PathBuf,

    /// Output base name (the chart is written to <NAME>.html)
    #[arg(
        long,
        value_name = "NAME",
        env = "VARSCATTER_OUTPUT",
        default_value = "interactive_scatter_plot"
    )]
    output: String,

    /// Skip the categorized Excel export
    #[arg(long)]
    no_excel: bool,

    /// TOML file with chart and export settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the statistics as JSON instead of the text summary
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress the text summary
    #[arg(short, long)]
    quiet: bool,
}

/// Chart and export paths derived from the output base name
#[derive(Debug, PartialEq)]
struct OutputPaths {
    html: PathBuf,
    excel: PathBuf,
}

impl OutputPaths {
    /// `<output>.html` and `<output without extension>_categories.xlsx`
    fn from_base(output: &str) -> Self {
        let html = PathBuf::from(format!("{output}.html"));
        let stem = Path::new(output).with_extension("");
        let mut name = stem
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(OsString::new);
        name.push("_categories.xlsx");
        let excel = stem.with_file_name(name);
        Self { html, excel }
    }
}

fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(cli.verbose)));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RenderConfig::default(),
    };

    let activities = load_activities(&cli.excel)
        .with_context(|| format!("Failed to load activities from {}", cli.excel.display()))?;
    info!(
        activities = activities.len(),
        "Loaded {}",
        cli.excel.display()
    );

    let paths = OutputPaths::from_base(&cli.output);

    let html = config
        .scatter_renderer()
        .render(&activities)
        .context("Failed to render scatter chart")?;
    std::fs::write(&paths.html, html)
        .with_context(|| format!("Failed to write {}", paths.html.display()))?;
    info!("Chart saved: {}", paths.html.display());

    let excel_path = if cli.no_excel {
        None
    } else {
        let written = config
            .excel_renderer()
            .write_to_file(&activities, &paths.excel)
            .with_context(|| format!("Failed to write {}", paths.excel.display()))?;
        info!("Excel file with categories saved: {}", written.display());
        Some(written)
    };

    if cli.json {
        let stats = activities.statistics();
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else if !cli.quiet {
        print!("{}", SummaryRenderer::new().render(&activities)?);
        println!();
        println!("Interactive chart saved: {}", paths.html.display());
        if let Some(path) = excel_path {
            println!("Excel file with categories saved: {}", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_the_export_names() {
        let cli = Cli::try_parse_from(["varscatter"]).unwrap();
        assert_eq!(
            cli.excel,
            PathBuf::from("SCATTER Finish and Duration Variance.xlsx")
        );
        assert_eq!(cli.output, "interactive_scatter_plot");
        assert!(!cli.no_excel);
        assert!(!cli.json);
    }

    #[test]
    fn verbosity_levels() {
        let cli = Cli::try_parse_from(["varscatter", "-vv", "--no-excel"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_excel);
        assert_eq!(default_filter(0), "warn");
        assert_eq!(default_filter(1), "info");
        assert_eq!(default_filter(cli.verbose), "debug");
    }

    #[test]
    fn output_paths_from_plain_name() {
        let paths = OutputPaths::from_base("interactive_scatter_plot");
        assert_eq!(paths.html, PathBuf::from("interactive_scatter_plot.html"));
        assert_eq!(
            paths.excel,
            PathBuf::from("interactive_scatter_plot_categories.xlsx")
        );
    }

    #[test]
    fn output_paths_strip_extension_for_export() {
        let paths = OutputPaths::from_base("reports/q3.plot");
        assert_eq!(paths.html, PathBuf::from("reports/q3.plot.html"));
        assert_eq!(paths.excel, PathBuf::from("reports/q3_categories.xlsx"));
    }
}
