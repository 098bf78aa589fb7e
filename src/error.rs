//! Error types for satsweep

use thiserror::Error;

/// Error types for the satsweep library.
///
/// The numerical core has almost no recoverable failure surface. Empty
/// access results are values, not errors; the variants below are either
/// configuration mistakes or degenerate geometry that would otherwise turn
/// into NaN.
#[derive(Debug, Error)]
pub enum Error {
    /// A vector that must be normalized has zero length (satellite at the
    /// Earth's center, or station coincident with the satellite).
    #[error("zero-length {what} vector")]
    ZeroLengthVector { what: &'static str },

    /// Propagation produced a non-finite or zero-radius state.
    #[error("degenerate orbital state at t = {epoch} s")]
    DegenerateState { epoch: f64 },

    /// A constellation with no planes or no satellites per plane.
    #[error("degenerate constellation: {n_planes} planes x {sats_per_plane} satellites per plane")]
    DegenerateConstellation {
        n_planes: usize,
        sats_per_plane: usize,
    },

    /// Time grid with a non-positive step or reversed window.
    #[error("invalid time grid: {0}")]
    InvalidTimeGrid(String),

    /// Track sampled on a different time grid than the analysis.
    #[error("track has {actual} samples, time grid has {expected}")]
    TrackLengthMismatch { expected: usize, actual: usize },

    /// Lat/lon grid with an empty or non-finite axis.
    #[error("invalid lat/lon grid: {0}")]
    InvalidGrid(String),
}

pub type Result<T> = std::result::Result<T, Error>;
