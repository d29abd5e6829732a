//! Column validation, status filtering and numeric coercion

use tracing::{debug, info, warn};
use varscatter_core::{
    Activity, ActivitySet, Cell, CleaningReport, Table, COL_ACTIVITY_ID, COL_ACTIVITY_NAME,
    COL_ACTIVITY_STATUS, COL_DURATION_VARIANCE, COL_FINISH_VARIANCE, COL_TOTAL_FLOAT,
    COMPLETED_STATUS, REQUIRED_COLUMNS,
};

use crate::LoadError;

/// Positions of the required columns in a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    id: usize,
    name: usize,
    status: usize,
    finish: usize,
    duration: usize,
    total_float: usize,
}

impl ColumnMap {
    fn locate(table: &Table) -> Result<Self, LoadError> {
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|c| table.column_index(c).is_none())
        {
            return Err(LoadError::MissingColumn((*missing).to_string()));
        }

        for column in REQUIRED_COLUMNS {
            if table.headers.iter().filter(|h| *h == column).count() > 1 {
                warn!(column, "duplicate column header, using the first occurrence");
            }
        }

        let index = |name: &str| table.column_index(name).unwrap_or_default();
        Ok(Self {
            id: index(COL_ACTIVITY_ID),
            name: index(COL_ACTIVITY_NAME),
            status: index(COL_ACTIVITY_STATUS),
            finish: index(COL_FINISH_VARIANCE),
            duration: index(COL_DURATION_VARIANCE),
            total_float: index(COL_TOTAL_FLOAT),
        })
    }
}

/// Turn a raw table into the cleaned activity set.
///
/// Rows with status "Completed" are dropped first; the remaining rows need a
/// finite number in each of the three numeric columns or they are dropped too.
/// Surviving rows keep every input column, with the numeric columns replaced
/// by their coerced values, in input order.
pub fn clean(table: Table) -> Result<ActivitySet, LoadError> {
    let columns = ColumnMap::locate(&table)?;
    let Table { headers, rows } = table;

    let mut report = CleaningReport {
        rows_read: rows.len(),
        ..CleaningReport::default()
    };
    let mut statuses: Vec<String> = Vec::new();
    let mut activities = Vec::with_capacity(rows.len());

    for (index, mut row) in rows.into_iter().enumerate() {
        row.resize(headers.len(), Cell::Empty);
        let status = row[columns.status].to_string();
        if !statuses.contains(&status) {
            statuses.push(status.clone());
        }
        if status == COMPLETED_STATUS {
            report.completed_dropped += 1;
            continue;
        }

        let finish = row[columns.finish].as_number();
        let duration = row[columns.duration].as_number();
        let total_float = row[columns.total_float].as_number();
        let (Some(finish), Some(duration), Some(total_float)) = (finish, duration, total_float)
        else {
            debug!(
                row = index,
                id = %row[columns.id],
                "dropping row with a non-numeric variance or float value"
            );
            report.invalid_dropped += 1;
            continue;
        };

        row[columns.finish] = Cell::Number(finish);
        row[columns.duration] = Cell::Number(duration);
        row[columns.total_float] = Cell::Number(total_float);

        activities.push(Activity {
            id: row[columns.id].to_string(),
            name: row[columns.name].to_string(),
            status,
            finish_variance: finish,
            duration_variance: duration,
            total_float,
            source_row: index,
            cells: row,
        });
    }

    debug!(statuses = ?statuses, "activity status values");
    info!(
        rows_read = report.rows_read,
        completed = report.completed_dropped,
        invalid = report.invalid_dropped,
        kept = activities.len(),
        "cleaned activity table"
    );

    Ok(ActivitySet::new(headers, activities).with_report(report))
}
