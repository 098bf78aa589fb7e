//! Access pipeline
//!
//! Trajectories → Earth-fixed tracks → per-sample visibility → intervals →
//! metrics. Each stage is a pure function of the previous one's output.
//! Tracks are computed once and shared by every ground point.

use rayon::prelude::*;

use super::intervals::{compute_access_intervals, AccessInterval};
use super::metrics::AccessReport;
use super::visibility::VisibilityPredicate;
use crate::error::{Error, Result};
use crate::ground::GroundStation;
use crate::orbits::{EarthFixedTrack, Trajectory};
use crate::time::TimeGrid;

/// Rotate every trajectory into the Earth-fixed frame
pub fn earth_fixed_tracks(trajectories: &[Trajectory]) -> Vec<EarthFixedTrack> {
    trajectories.par_iter().map(Trajectory::earth_fixed).collect()
}

/// Per-sample constellation visibility from `station`
///
/// A sample is visible when at least one satellite satisfies `predicate`.
/// Every track must have one position per sample of `grid`.
pub fn visibility_mask(
    tracks: &[EarthFixedTrack],
    grid: &TimeGrid,
    station: &GroundStation,
    predicate: &dyn VisibilityPredicate,
) -> Result<Vec<bool>> {
    if let Some(track) = tracks.iter().find(|track| track.len() != grid.len()) {
        return Err(Error::TrackLengthMismatch {
            expected: grid.len(),
            actual: track.len(),
        });
    }

    let mut mask = Vec::with_capacity(grid.len());

    for k in 0..grid.len() {
        let mut visible = false;
        for track in tracks {
            if predicate.is_visible(&track.positions()[k], station)? {
                visible = true;
                break;
            }
        }
        mask.push(visible);
    }

    Ok(mask)
}

/// Instants of the visible samples of `mask`
pub fn visible_times(mask: &[bool], grid: &TimeGrid) -> Vec<f64> {
    mask.iter()
        .enumerate()
        .filter(|(_, &visible)| visible)
        .map(|(k, _)| grid.time_at(k))
        .collect()
}

/// Access intervals of each satellite on its own
///
/// Their union (`aggregate_constellation_access`) equals the intervals of
/// the constellation mask.
pub fn per_satellite_intervals(
    tracks: &[EarthFixedTrack],
    grid: &TimeGrid,
    station: &GroundStation,
    predicate: &dyn VisibilityPredicate,
) -> Result<Vec<Vec<AccessInterval>>> {
    tracks
        .iter()
        .map(|track| {
            let mask = visibility_mask(std::slice::from_ref(track), grid, station, predicate)?;
            Ok(compute_access_intervals(&visible_times(&mask, grid), grid.step()))
        })
        .collect()
}

/// Constellation access report for a single ground station
pub fn analyze_station(
    tracks: &[EarthFixedTrack],
    grid: &TimeGrid,
    station: &GroundStation,
    predicate: &dyn VisibilityPredicate,
) -> Result<AccessReport> {
    let mask = visibility_mask(tracks, grid, station, predicate)?;
    let report = AccessReport::from_visibility(&mask, grid);

    log::debug!(
        "Station ({:.2}°, {:.2}°) with {}: {} passes, availability {:.2}%, worst gap {:.0} s",
        station.location().lat_deg(),
        station.location().lon_deg(),
        predicate.name(),
        report.metrics.pass_count,
        report.metrics.availability_percent,
        report.metrics.worst_gap_s
    );

    Ok(report)
}
