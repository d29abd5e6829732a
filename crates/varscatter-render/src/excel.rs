//! Excel export renderer
//!
//! Generates an XLSX workbook with exactly four sheets, one per total float
//! bucket, in threshold order:
//!
//! ```text
//! Sheet: Total Float ≤ 0
//! | Activity ID | Activity Name | Activity Status | Variance - BL ... | ... | Total Float |
//! |-------------|---------------|-----------------|-------------------|-----|-------------|
//! | A1010       | Excavate      | In Progress     | -3                | ... | 0           |
//!
//! Sheet: 0 < Total Float ≤ 10
//! Sheet: 10 < Total Float ≤ 20
//! Sheet: Total Float > 20
//! ```
//!
//! Every sheet carries the full cleaned schema (all input columns, numeric
//! columns coerced) and lists its activities in input order. Taken together
//! the sheets partition the cleaned set.

use rust_xlsxwriter::{Format, FormatBorder, Workbook, Worksheet};
use std::path::{Path, PathBuf};
use varscatter_core::{Activity, ActivitySet, Bucket, Cell, RenderError, Renderer};

/// Excel category export renderer
#[derive(Clone, Debug)]
pub struct ExcelRenderer {
    /// Fit column widths to their content
    pub autofit: bool,
    /// Keep the header row visible while scrolling
    pub freeze_header: bool,
}

impl Default for ExcelRenderer {
    fn default() -> Self {
        Self {
            autofit: true,
            freeze_header: true,
        }
    }
}

impl ExcelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leave column widths at the Excel default
    pub fn no_autofit(mut self) -> Self {
        self.autofit = false;
        self
    }

    /// Generate Excel workbook bytes
    pub fn render_to_bytes(&self, activities: &ActivitySet) -> Result<Vec<u8>, RenderError> {
        if activities.headers.len() > usize::from(u16::MAX) {
            return Err(RenderError::InvalidData(format!(
                "Too many columns for a worksheet: {}",
                activities.headers.len()
            )));
        }

        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold().set_border(FormatBorder::Thin);

        for bucket in Bucket::ALL {
            let sheet = workbook.add_worksheet();
            sheet
                .set_name(bucket.label())
                .map_err(|e| RenderError::Format(e.to_string()))?;
            self.write_bucket_sheet(sheet, activities, bucket, &header_format)?;
        }

        workbook
            .save_to_buffer()
            .map_err(|e| RenderError::Format(format!("Failed to create Excel: {e}")))
    }

    /// Write the workbook to `path` and return its absolute path
    pub fn write_to_file(
        &self,
        activities: &ActivitySet,
        path: &Path,
    ) -> Result<PathBuf, RenderError> {
        let bytes = self.render_to_bytes(activities)?;
        std::fs::write(path, bytes)?;
        Ok(path.canonicalize()?)
    }

    fn write_bucket_sheet(
        &self,
        sheet: &mut Worksheet,
        activities: &ActivitySet,
        bucket: Bucket,
        header_format: &Format,
    ) -> Result<(), RenderError> {
        for (col, header) in activities.headers.iter().enumerate() {
            sheet
                .write_string_with_format(0, col as u16, header, header_format)
                .map_err(|e| RenderError::Format(e.to_string()))?;
        }

        let mut row = 1u32;
        for activity in activities.in_bucket(bucket) {
            write_activity_row(sheet, row, activity)?;
            row += 1;
        }

        if self.freeze_header {
            sheet.set_freeze_panes(1, 0).ok();
        }
        if self.autofit {
            sheet.autofit();
        }

        Ok(())
    }
}

fn write_activity_row(
    sheet: &mut Worksheet,
    row: u32,
    activity: &Activity,
) -> Result<(), RenderError> {
    for (col, cell) in activity.cells.iter().enumerate() {
        let col = col as u16;
        let result = match cell {
            Cell::Empty => continue,
            Cell::Text(s) => sheet.write_string(row, col, s),
            Cell::Number(v) => sheet.write_number(row, col, *v),
            Cell::Bool(b) => sheet.write_boolean(row, col, *b),
        };
        result.map_err(|e| RenderError::Format(e.to_string()))?;
    }
    Ok(())
}

impl Renderer for ExcelRenderer {
    type Output = Vec<u8>;

    fn render(&self, activities: &ActivitySet) -> Result<Vec<u8>, RenderError> {
        self.render_to_bytes(activities)
    }
}
