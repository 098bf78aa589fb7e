//! Coverage and gap maps over a latitude/longitude grid

mod grid;
mod roi;

pub use grid::{
    compute_grid_coverage, compute_grid_max_gap, evaluate_grid, GridEvaluation, GridMap,
    LatLonGrid,
};
pub use roi::Roi;
