//! Plain-text statistics summary

use std::fmt::Write;
use varscatter_core::{
    format_number, ActivitySet, RenderError, Renderer, ScatterStatistics, ValueRange,
    COL_DURATION_VARIANCE, COL_FINISH_VARIANCE,
};

/// Text report of the cleaned set: counts, ranges, categories and quadrants
#[derive(Clone, Debug)]
pub struct SummaryRenderer {
    /// Include the cleaning counters (rows read, dropped)
    pub show_cleaning: bool,
}

impl Default for SummaryRenderer {
    fn default() -> Self {
        Self {
            show_cleaning: true,
        }
    }
}

impl SummaryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Omit the cleaning counters
    pub fn without_cleaning(mut self) -> Self {
        self.show_cleaning = false;
        self
    }

    fn write_report(
        &self,
        out: &mut String,
        activities: &ActivitySet,
        stats: &ScatterStatistics,
    ) -> std::fmt::Result {
        if self.show_cleaning {
            let report = &activities.report;
            writeln!(out, "Total activities in the file: {}", report.rows_read)?;
            writeln!(
                out,
                "Non-completed activities: {}",
                report.rows_read - report.completed_dropped
            )?;
            writeln!(
                out,
                "Dropped for non-numeric values: {}",
                report.invalid_dropped
            )?;
            writeln!(out)?;
        }

        writeln!(out, "Total activities: {}", stats.total_activities)?;
        writeln!(
            out,
            "X-axis range ({COL_FINISH_VARIANCE}): {}",
            range_text(stats.finish_variance)
        )?;
        writeln!(
            out,
            "Y-axis range ({COL_DURATION_VARIANCE}): {}",
            range_text(stats.duration_variance)
        )?;
        writeln!(out, "Total Float range: {}", range_text(stats.total_float))?;

        writeln!(out)?;
        writeln!(out, "Distribution by categories (Total Float):")?;
        for entry in &stats.category_distribution {
            writeln!(out, "{}: {}", entry.bucket, entry.count)?;
        }

        writeln!(out)?;
        writeln!(out, "--- Analysis by quadrants ---")?;
        for quadrant in &stats.quadrants {
            writeln!(out, "{}: {} activities", quadrant.quadrant, quadrant.count)?;
            if let Some(mean) = quadrant.mean_total_float {
                writeln!(out, "  Mean Total Float: {mean:.2}")?;
            }
        }
        if stats.unassigned_quadrant > 0 {
            writeln!(
                out,
                "No quadrant (zero variance): {} activities",
                stats.unassigned_quadrant
            )?;
        }

        Ok(())
    }
}

fn range_text(range: Option<ValueRange>) -> String {
    match range {
        Some(r) => format!("{} to {}", format_number(r.min), format_number(r.max)),
        None => "n/a".to_string(),
    }
}

impl Renderer for SummaryRenderer {
    type Output = String;

    fn render(&self, activities: &ActivitySet) -> Result<String, RenderError> {
        let stats = activities.statistics();
        let mut out = String::new();
        self.write_report(&mut out, activities, &stats)
            .map_err(|e| RenderError::Format(e.to_string()))?;
        Ok(out)
    }
}
