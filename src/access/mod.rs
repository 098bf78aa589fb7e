//! Ground access analysis
//!
//! Visibility predicates, interval algebra, and the pipeline that turns
//! propagated trajectories into access statistics for a ground point.

pub mod geometry;
pub mod intervals;
pub mod metrics;
pub mod pipeline;
pub mod visibility;

pub use geometry::{elevation, topocentric, Topocentric};
pub use intervals::{
    access_durations, aggregate_constellation_access, compute_access_intervals, gap_durations,
    max_gap, mean, merge_intervals, revisit_times, total_duration, AccessInterval,
};
pub use metrics::{AccessMetrics, AccessReport};
pub use pipeline::{
    analyze_station, earth_fixed_tracks, per_satellite_intervals, visibility_mask, visible_times,
};
pub use visibility::{ElevationMask, LinkClosure, VisibilityPredicate};
