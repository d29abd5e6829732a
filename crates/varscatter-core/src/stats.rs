//! Descriptive statistics over a cleaned activity set
//!
//! Answers the questions a scheduler asks before opening the chart: how many
//! activities are in play, how far the variances spread, how the float is
//! distributed, and how each quadrant is doing on float.
//!
//! # Example
//!
//! ```rust
//! use varscatter_core::{Activity, ActivitySet, Bucket, Quadrant, ScatterStatistics};
//!
//! let activity = |id: &str, finish: f64, duration: f64, total_float: f64| Activity {
//!     id: id.to_string(),
//!     name: id.to_string(),
//!     status: "Not Started".to_string(),
//!     finish_variance: finish,
//!     duration_variance: duration,
//!     total_float,
//!     source_row: 0,
//!     cells: Vec::new(),
//! };
//!
//! let set = ActivitySet::new(
//!     Vec::new(),
//!     vec![activity("a", -3.0, -5.0, 0.0), activity("b", 2.0, -1.0, 12.0)],
//! );
//! let stats = ScatterStatistics::from_activities(&set);
//!
//! assert_eq!(stats.total_activities, 2);
//! assert_eq!(stats.bucket_count(Bucket::Critical), 1);
//! assert_eq!(stats.quadrant(Quadrant::LaterShorter).count, 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::{ActivitySet, Bucket, Quadrant};

/// Observed minimum and maximum of one numeric column
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Range of the given values, `None` when there are none
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values.into_iter().fold(None, |range, v| {
            Some(match range {
                None => ValueRange { min: v, max: v },
                Some(r) => ValueRange {
                    min: r.min.min(v),
                    max: r.max.max(v),
                },
            })
        })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Number of activities in one total float bucket
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCount {
    pub bucket: Bucket,
    pub count: usize,
}

/// Aggregates for one variance quadrant
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuadrantStats {
    pub quadrant: Quadrant,
    pub count: usize,
    /// Mean total float of the quadrant's activities (`None` when empty)
    pub mean_total_float: Option<f64>,
}

/// Summary statistics for a cleaned activity set
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScatterStatistics {
    /// Number of cleaned activities
    pub total_activities: usize,

    /// Range of finish date variance (x axis)
    pub finish_variance: Option<ValueRange>,

    /// Range of duration variance (y axis)
    pub duration_variance: Option<ValueRange>,

    /// Range of total float
    pub total_float: Option<ValueRange>,

    /// Counts per bucket, in threshold order
    pub category_distribution: Vec<BucketCount>,

    /// Per-quadrant counts and mean float, in `Quadrant::ALL` order
    pub quadrants: Vec<QuadrantStats>,

    /// Activities with a zero variance on either axis (no quadrant)
    pub unassigned_quadrant: usize,
}

impl ScatterStatistics {
    pub fn from_activities(set: &ActivitySet) -> Self {
        let counts = set.bucket_counts();
        let category_distribution = Bucket::ALL
            .iter()
            .map(|&bucket| BucketCount {
                bucket,
                count: counts[bucket.index()],
            })
            .collect();

        let mut sums = [(0usize, 0.0f64); 4];
        let mut unassigned_quadrant = 0usize;
        for activity in set.iter() {
            match activity.quadrant() {
                Some(quadrant) => {
                    let slot = &mut sums[quadrant_index(quadrant)];
                    slot.0 += 1;
                    slot.1 += activity.total_float;
                }
                None => unassigned_quadrant += 1,
            }
        }

        let quadrants = Quadrant::ALL
            .iter()
            .map(|&quadrant| {
                let (count, sum) = sums[quadrant_index(quadrant)];
                QuadrantStats {
                    quadrant,
                    count,
                    mean_total_float: (count > 0).then(|| sum / count as f64),
                }
            })
            .collect();

        Self {
            total_activities: set.len(),
            finish_variance: ValueRange::from_values(set.iter().map(|a| a.finish_variance)),
            duration_variance: ValueRange::from_values(set.iter().map(|a| a.duration_variance)),
            total_float: ValueRange::from_values(set.iter().map(|a| a.total_float)),
            category_distribution,
            quadrants,
            unassigned_quadrant,
        }
    }

    pub fn bucket_count(&self, bucket: Bucket) -> usize {
        self.category_distribution
            .iter()
            .find(|c| c.bucket == bucket)
            .map(|c| c.count)
            .unwrap_or(0)
    }

    pub fn quadrant(&self, quadrant: Quadrant) -> QuadrantStats {
        self.quadrants
            .iter()
            .find(|q| q.quadrant == quadrant)
            .copied()
            .unwrap_or(QuadrantStats {
                quadrant,
                count: 0,
                mean_total_float: None,
            })
    }
}

fn quadrant_index(quadrant: Quadrant) -> usize {
    match quadrant {
        Quadrant::EarlierShorter => 0,
        Quadrant::EarlierLonger => 1,
        Quadrant::LaterShorter => 2,
        Quadrant::LaterLonger => 3,
    }
}
