//! Latitude/longitude coverage grid
//!
//! Every cell is a virtual ground station. Cells are independent, so they
//! are evaluated in parallel against the same precomputed Earth-fixed
//! tracks and assembled into `(lat, lon)` shaped arrays.

use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::access::{visibility_mask, AccessMetrics, VisibilityPredicate};
use crate::error::{Error, Result};
use crate::ground::GroundStation;
use crate::orbits::EarthFixedTrack;
use crate::time::TimeGrid;

/// Rectilinear grid of ground points, axes in degrees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLonGrid {
    lat_deg: Vec<f64>,
    lon_deg: Vec<f64>,
}

impl LatLonGrid {
    pub fn new(lat_deg: Vec<f64>, lon_deg: Vec<f64>) -> Result<Self> {
        for (name, axis) in [("latitude", &lat_deg), ("longitude", &lon_deg)] {
            if axis.is_empty() {
                return Err(Error::InvalidGrid(format!("{name} axis is empty")));
            }
            if axis.iter().any(|v| !v.is_finite()) {
                return Err(Error::InvalidGrid(format!("{name} axis has non-finite values")));
            }
        }
        Ok(Self { lat_deg, lon_deg })
    }

    /// Axes `start, start + step, ...` strictly below `stop` on each axis
    ///
    /// `regular(-90.0, 91.0, 10.0, -180.0, 181.0, 10.0)` gives a 19 x 37
    /// global grid including both poles and the antimeridian.
    pub fn regular(
        lat_start: f64,
        lat_stop: f64,
        lat_step: f64,
        lon_start: f64,
        lon_stop: f64,
        lon_step: f64,
    ) -> Result<Self> {
        Self::new(
            arange(lat_start, lat_stop, lat_step)?,
            arange(lon_start, lon_stop, lon_step)?,
        )
    }

    /// Global 10 degree grid
    pub fn global_10deg() -> Self {
        Self {
            lat_deg: (0..19).map(|k| -90.0 + 10.0 * k as f64).collect(),
            lon_deg: (0..37).map(|k| -180.0 + 10.0 * k as f64).collect(),
        }
    }

    pub fn lat_deg(&self) -> &[f64] {
        &self.lat_deg
    }

    pub fn lon_deg(&self) -> &[f64] {
        &self.lon_deg
    }

    /// `(n_lat, n_lon)`
    pub fn shape(&self) -> (usize, usize) {
        (self.lat_deg.len(), self.lon_deg.len())
    }

    pub fn cell_count(&self) -> usize {
        self.lat_deg.len() * self.lon_deg.len()
    }

    /// Indices of the cell closest to `(lat_deg, lon_deg)`, per axis
    ///
    /// Ties resolve to the lower index.
    pub fn nearest_cell(&self, lat_deg: f64, lon_deg: f64) -> (usize, usize) {
        (nearest_index(&self.lat_deg, lat_deg), nearest_index(&self.lon_deg, lon_deg))
    }

    /// Ground station at cell `(i, j)`
    pub fn station(&self, i: usize, j: usize) -> Option<GroundStation> {
        Some(GroundStation::from_degrees(
            *self.lat_deg.get(i)?,
            *self.lon_deg.get(j)?,
        ))
    }

    /// All cell indices in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n_lon = self.lon_deg.len();
        (0..self.lat_deg.len()).flat_map(move |i| (0..n_lon).map(move |j| (i, j)))
    }
}

fn arange(start: f64, stop: f64, step: f64) -> Result<Vec<f64>> {
    if !(start.is_finite() && stop.is_finite() && step.is_finite()) || step <= 0.0 {
        return Err(Error::InvalidGrid(format!(
            "bad axis range (start={start}, stop={stop}, step={step})"
        )));
    }
    let n = ((stop - start) / step).ceil().max(0.0) as usize;
    Ok((0..n).map(|k| start + k as f64 * step).collect())
}

fn nearest_index(axis: &[f64], value: f64) -> usize {
    axis.iter()
        .enumerate()
        .fold((0, f64::INFINITY), |(best, best_d), (k, &v)| {
            let d = (v - value).abs();
            if d < best_d {
                (k, d)
            } else {
                (best, best_d)
            }
        })
        .0
}

/// Scalar field over a `LatLonGrid`
#[derive(Debug, Clone, PartialEq)]
pub struct GridMap {
    pub grid: LatLonGrid,
    /// Shape `(n_lat, n_lon)`
    pub values: Array2<f64>,
}

impl GridMap {
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get((i, j)).copied()
    }

    pub fn mean(&self) -> f64 {
        self.values.mean().unwrap_or(0.0)
    }

    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Same map with every value multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            grid: self.grid.clone(),
            values: self.values.mapv(|v| v * factor),
        }
    }
}

/// Coverage and gap maps from one visibility pass per cell
#[derive(Debug, Clone)]
pub struct GridEvaluation {
    /// Fraction of samples with access, in [0, 1]
    pub coverage: GridMap,
    /// Longest gap without access (s)
    pub max_gap: GridMap,
    /// Full access statistics per cell
    pub metrics: Array2<AccessMetrics>,
}

impl GridEvaluation {
    pub fn grid(&self) -> &LatLonGrid {
        &self.coverage.grid
    }

    pub fn cell_metrics(&self, i: usize, j: usize) -> Option<&AccessMetrics> {
        self.metrics.get((i, j))
    }
}

/// Evaluate constellation access for every grid cell
pub fn evaluate_grid(
    tracks: &[EarthFixedTrack],
    time_grid: &TimeGrid,
    latlon: &LatLonGrid,
    predicate: &dyn VisibilityPredicate,
) -> Result<GridEvaluation> {
    let (n_lat, n_lon) = latlon.shape();
    log::info!(
        "Evaluating {}x{} grid with {} ({} satellites, {} samples)",
        n_lat,
        n_lon,
        predicate.name(),
        tracks.len(),
        time_grid.len()
    );

    let cells: Vec<(usize, usize)> = latlon.cells().collect();
    let metrics: Vec<AccessMetrics> = cells
        .par_iter()
        .map(|&(i, j)| {
            let station = GroundStation::from_degrees(latlon.lat_deg[i], latlon.lon_deg[j]);
            let mask = visibility_mask(tracks, time_grid, &station, predicate)?;
            Ok(AccessMetrics::from_visibility(&mask, time_grid))
        })
        .collect::<Result<_>>()?;

    let coverage: Vec<f64> = metrics.iter().map(|m| m.availability_percent / 100.0).collect();
    let max_gap: Vec<f64> = metrics.iter().map(|m| m.worst_gap_s).collect();

    let shape_err = |e: ndarray::ShapeError| Error::InvalidGrid(e.to_string());
    let evaluation = GridEvaluation {
        coverage: GridMap {
            grid: latlon.clone(),
            values: Array2::from_shape_vec((n_lat, n_lon), coverage).map_err(shape_err)?,
        },
        max_gap: GridMap {
            grid: latlon.clone(),
            values: Array2::from_shape_vec((n_lat, n_lon), max_gap).map_err(shape_err)?,
        },
        metrics: Array2::from_shape_vec((n_lat, n_lon), metrics).map_err(shape_err)?,
    };

    log::info!(
        "Grid done: mean coverage {:.3}, worst gap {:.0} s",
        evaluation.coverage.mean(),
        evaluation.max_gap.max()
    );

    Ok(evaluation)
}

/// Fraction of samples with access per cell
pub fn compute_grid_coverage(
    tracks: &[EarthFixedTrack],
    time_grid: &TimeGrid,
    latlon: &LatLonGrid,
    predicate: &dyn VisibilityPredicate,
) -> Result<GridMap> {
    Ok(evaluate_grid(tracks, time_grid, latlon, predicate)?.coverage)
}

/// Longest gap without access per cell (s)
pub fn compute_grid_max_gap(
    tracks: &[EarthFixedTrack],
    time_grid: &TimeGrid,
    latlon: &LatLonGrid,
    predicate: &dyn VisibilityPredicate,
) -> Result<GridMap> {
    Ok(evaluate_grid(tracks, time_grid, latlon, predicate)?.max_gap)
}
