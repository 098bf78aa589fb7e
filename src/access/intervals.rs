//! Access interval algebra
//!
//! Turns discrete visibility samples into closed time ranges and derives
//! gap and revisit statistics from them.

use serde::{Deserialize, Serialize};

/// Relative tolerance on the sample spacing when chaining samples
const CONTIGUITY_TOLERANCE: f64 = 1.01;

/// Closed time range `[start, end]` in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccessInterval {
    pub start: f64,
    pub end: f64,
}

impl AccessInterval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Merge sorted visible instants into access intervals
///
/// Consecutive instants at most `step * 1.01` apart belong to the same
/// interval. Each interval ends one step after its last instant, so its
/// length is the time the predicate held rather than the span of samples.
pub fn compute_access_intervals(visible_times: &[f64], step: f64) -> Vec<AccessInterval> {
    let Some((&first, rest)) = visible_times.split_first() else {
        return Vec::new();
    };

    let mut intervals = Vec::new();
    let mut t_start = first;
    let mut t_prev = first;

    for &t in rest {
        if t - t_prev > step * CONTIGUITY_TOLERANCE {
            intervals.push(AccessInterval::new(t_start, t_prev + step));
            t_start = t;
        }
        t_prev = t;
    }

    intervals.push(AccessInterval::new(t_start, t_prev + step));
    intervals
}

/// Duration of each interval (s)
pub fn access_durations(intervals: &[AccessInterval]) -> Vec<f64> {
    intervals.iter().map(AccessInterval::duration).collect()
}

/// Total time covered by `intervals` (s)
pub fn total_duration(intervals: &[AccessInterval]) -> f64 {
    intervals.iter().map(AccessInterval::duration).sum()
}

/// Gaps without access inside `[window_start, window_end]`
///
/// Leading gap, gaps between consecutive intervals, trailing gap. With no
/// intervals the whole window is one gap.
pub fn gap_durations(intervals: &[AccessInterval], window_start: f64, window_end: f64) -> Vec<f64> {
    let (Some(first), Some(last)) = (intervals.first(), intervals.last()) else {
        return vec![window_end - window_start];
    };

    let mut gaps = Vec::with_capacity(intervals.len() + 1);
    gaps.push(first.start - window_start);
    gaps.extend(intervals.windows(2).map(|pair| pair[1].start - pair[0].end));
    gaps.push(window_end - last.end);
    gaps
}

/// Longest gap without access inside the window (s)
pub fn max_gap(intervals: &[AccessInterval], window_start: f64, window_end: f64) -> f64 {
    gap_durations(intervals, window_start, window_end)
        .into_iter()
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Time between the starts of consecutive intervals (s)
///
/// Empty for fewer than two intervals.
pub fn revisit_times(intervals: &[AccessInterval]) -> Vec<f64> {
    intervals
        .windows(2)
        .map(|pair| pair[1].start - pair[0].start)
        .collect()
}

/// Union of possibly overlapping intervals
///
/// Sorts by start, then sweeps: an interval starting at or before the
/// current end extends it, otherwise it opens a new one. Touching
/// intervals merge.
pub fn merge_intervals(mut intervals: Vec<AccessInterval>) -> Vec<AccessInterval> {
    intervals.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut merged: Vec<AccessInterval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        match merged.last_mut() {
            Some(current) if interval.start <= current.end => {
                current.end = current.end.max(interval.end);
            }
            _ => merged.push(interval),
        }
    }
    merged
}

/// Constellation-level access: a point is covered if any satellite is visible
pub fn aggregate_constellation_access(per_satellite: &[Vec<AccessInterval>]) -> Vec<AccessInterval> {
    merge_intervals(per_satellite.iter().flatten().copied().collect())
}

/// Arithmetic mean, zero for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
