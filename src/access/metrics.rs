//! Access statistics for one ground point

use serde::{Deserialize, Serialize};

use super::intervals::{
    access_durations, compute_access_intervals, max_gap, mean, revisit_times, AccessInterval,
};
use super::pipeline::visible_times;
use crate::time::TimeGrid;

/// Summary of constellation access over a simulation window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccessMetrics {
    /// Share of samples with access (%)
    pub availability_percent: f64,
    /// Longest interval without access (s)
    pub worst_gap_s: f64,
    /// Mean time between consecutive pass starts (s), 0 with fewer than two passes
    pub mean_revisit_s: f64,
    /// Mean pass length (s), 0 with no passes
    pub mean_pass_duration_s: f64,
    pub pass_count: usize,
}

impl AccessMetrics {
    /// Metrics for a per-sample visibility mask on `grid`
    pub fn from_visibility(mask: &[bool], grid: &TimeGrid) -> Self {
        AccessReport::from_visibility(mask, grid).metrics
    }

    /// Metrics from precomputed intervals
    ///
    /// `visible_samples` out of `total_samples` drive the availability; the
    /// worst gap is taken over `[grid.start(), grid.window_end()]`.
    pub fn from_intervals(
        intervals: &[AccessInterval],
        visible_samples: usize,
        total_samples: usize,
        grid: &TimeGrid,
    ) -> Self {
        let availability_percent = if total_samples == 0 {
            0.0
        } else {
            100.0 * visible_samples as f64 / total_samples as f64
        };

        Self {
            availability_percent,
            worst_gap_s: max_gap(intervals, grid.start(), grid.window_end()),
            mean_revisit_s: mean(&revisit_times(intervals)),
            mean_pass_duration_s: mean(&access_durations(intervals)),
            pass_count: intervals.len(),
        }
    }

    pub fn has_access(&self) -> bool {
        self.pass_count > 0
    }
}

/// Access intervals together with their statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessReport {
    pub intervals: Vec<AccessInterval>,
    pub metrics: AccessMetrics,
}

impl AccessReport {
    pub fn from_visibility(mask: &[bool], grid: &TimeGrid) -> Self {
        let times = visible_times(mask, grid);
        let intervals = compute_access_intervals(&times, grid.step());
        let metrics = AccessMetrics::from_intervals(&intervals, times.len(), mask.len(), grid);
        Self { intervals, metrics }
    }
}
