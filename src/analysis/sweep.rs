//! Constellation architecture sweep
//!
//! Enumerates (planes, satellites per plane) splits under a satellite cap,
//! evaluates each against one ground criterion and ranks them by worst
//! gap. Architectures are independent and evaluated in parallel; the
//! ranked output does not depend on scheduling.

use std::cmp::Ordering;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::access::{
    analyze_station, earth_fixed_tracks, AccessMetrics, ElevationMask, LinkClosure,
    VisibilityPredicate,
};
use crate::coverage::{evaluate_grid, LatLonGrid, Roi};
use crate::error::{Error, Result};
use crate::ground::GroundStation;
use crate::orbits::{Propagator, WalkerConstellation};
use crate::rf::LinkParams;
use crate::time::TimeGrid;

/// Every `(n_planes, sats_per_plane)` with both in `1..=n_max` and a
/// product of at most `n_max`, planes-major
pub fn enumerate_architectures(n_max: usize) -> Vec<(usize, usize)> {
    (1..=n_max)
        .flat_map(|n_planes| {
            (1..=n_max)
                .filter(move |&sats_per_plane| n_planes * sats_per_plane <= n_max)
                .map(move |sats_per_plane| (n_planes, sats_per_plane))
        })
        .collect()
}

/// Visibility rule applied at each ground point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StationAccess {
    /// Elevation above `min_elevation` (rad)
    Elevation { min_elevation: f64 },
    /// Uplink closes with `link`
    Link { link: LinkParams },
}

impl StationAccess {
    fn predicate(&self) -> Box<dyn VisibilityPredicate> {
        match *self {
            Self::Elevation { min_elevation } => Box::new(ElevationMask::new(min_elevation)),
            Self::Link { link } => Box::new(LinkClosure::new(link)),
        }
    }
}

/// Ground criterion an architecture is judged by
#[derive(Debug, Clone)]
pub enum SweepCriterion {
    /// Elevation mask at one station
    Geometric {
        station: GroundStation,
        min_elevation: f64,
    },
    /// Uplink closure at one station
    RfLink {
        station: GroundStation,
        link: LinkParams,
    },
    /// Visibility over a grid; the primary metrics are those of the
    /// region's worst cell
    Grid {
        latlon: LatLonGrid,
        roi: Roi,
        access: StationAccess,
    },
}

impl SweepCriterion {
    /// Grid criterion whose region selects at least one cell
    pub fn grid(latlon: LatLonGrid, roi: Roi, access: StationAccess) -> Result<Self> {
        let criterion = Self::Grid {
            latlon,
            roi,
            access,
        };
        criterion.validate()?;
        Ok(criterion)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Geometric { .. } => "geometric",
            Self::RfLink { .. } => "rf_link",
            Self::Grid {
                access: StationAccess::Elevation { .. },
                ..
            } => "grid",
            Self::Grid {
                access: StationAccess::Link { .. },
                ..
            } => "rf_grid",
        }
    }

    /// Reject a criterion no architecture could be judged by
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Grid { latlon, roi, .. } if roi.cells(latlon).is_empty() => Err(
                Error::InvalidGrid("region of interest selects no grid cell".to_string()),
            ),
            _ => Ok(()),
        }
    }

    fn predicate(&self) -> Box<dyn VisibilityPredicate> {
        match self {
            Self::Geometric { min_elevation, .. } => StationAccess::Elevation {
                min_elevation: *min_elevation,
            }
            .predicate(),
            Self::RfLink { link, .. } => StationAccess::Link { link: *link }.predicate(),
            Self::Grid { access, .. } => access.predicate(),
        }
    }
}

/// Acceptance thresholds for the filtered result set
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepRequirement {
    /// Largest acceptable worst gap (s)
    #[serde(default)]
    pub max_gap_s: Option<f64>,
    /// Smallest acceptable availability (%)
    #[serde(default)]
    pub min_availability_percent: Option<f64>,
}

impl SweepRequirement {
    pub fn max_gap(max_gap_s: f64) -> Self {
        Self {
            max_gap_s: Some(max_gap_s),
            min_availability_percent: None,
        }
    }

    pub fn is_met(&self, descriptor: &ArchitectureDescriptor) -> bool {
        let gap_ok = self
            .max_gap_s
            .map_or(true, |max| descriptor.metrics.worst_gap_s <= max);
        let availability_ok = self
            .min_availability_percent
            .map_or(true, |min| descriptor.metrics.availability_percent >= min);
        gap_ok && availability_ok
    }
}

/// Grid statistics attached to a grid sweep result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSummary {
    /// Worst gap over the region of interest (s)
    pub worst_gap_roi_s: f64,
    pub roi_cell_lat_deg: f64,
    pub roi_cell_lon_deg: f64,
    /// Mean covered fraction over all cells
    pub mean_coverage_fraction: f64,
    /// Worst covered fraction over all cells
    pub min_coverage_fraction: f64,
}

/// One evaluated architecture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureDescriptor {
    pub n_planes: usize,
    pub sats_per_plane: usize,
    pub total_sats: usize,
    #[serde(flatten)]
    pub metrics: AccessMetrics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridSummary>,
}

impl ArchitectureDescriptor {
    pub fn new(n_planes: usize, sats_per_plane: usize, metrics: AccessMetrics) -> Self {
        Self {
            n_planes,
            sats_per_plane,
            total_sats: n_planes * sats_per_plane,
            metrics,
            grid: None,
        }
    }

    pub fn worst_gap_min(&self) -> f64 {
        self.metrics.worst_gap_s / 60.0
    }
}

/// Sort ascending by worst gap
///
/// Equal gaps are ordered by descending mean grid coverage when both
/// descriptors carry a grid summary; otherwise their order is kept.
pub fn rank_architectures(descriptors: &mut [ArchitectureDescriptor]) {
    descriptors.sort_by(|a, b| {
        a.metrics
            .worst_gap_s
            .total_cmp(&b.metrics.worst_gap_s)
            .then_with(|| match (&a.grid, &b.grid) {
                (Some(ga), Some(gb)) => gb
                    .mean_coverage_fraction
                    .total_cmp(&ga.mean_coverage_fraction),
                _ => Ordering::Equal,
            })
    });
}

/// Result of a sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepOutcome {
    /// Every architecture, best first
    pub ranked: Vec<ArchitectureDescriptor>,
    /// Ranked architectures meeting the requirement, when one was given
    pub filtered: Option<Vec<ArchitectureDescriptor>>,
}

impl SweepOutcome {
    pub fn best(&self) -> Option<&ArchitectureDescriptor> {
        self.ranked.first()
    }
}

/// Architecture sweep configuration
#[derive(Debug)]
pub struct ArchitectureSweep {
    /// Orbit altitude (m)
    pub altitude: f64,
    /// Orbit inclination (rad)
    pub inclination: f64,
    /// RAAN of the first plane (rad)
    pub raan0: f64,
    /// Largest total satellite count
    pub n_max: usize,
    pub time_grid: TimeGrid,
    pub propagator: Propagator,
    pub criterion: SweepCriterion,
    pub requirement: Option<SweepRequirement>,
    pub show_progress: bool,
}

impl ArchitectureSweep {
    /// Sweep with J2 propagation, no requirement and no progress bar
    pub fn new(
        altitude: f64,
        inclination: f64,
        n_max: usize,
        time_grid: TimeGrid,
        criterion: SweepCriterion,
    ) -> Self {
        Self {
            altitude,
            inclination,
            raan0: 0.0,
            n_max,
            time_grid,
            propagator: Propagator::with_j2(),
            criterion,
            requirement: None,
            show_progress: false,
        }
    }

    pub fn with_raan0(mut self, raan0: f64) -> Self {
        self.raan0 = raan0;
        self
    }

    pub fn with_propagator(mut self, propagator: Propagator) -> Self {
        self.propagator = propagator;
        self
    }

    pub fn with_requirement(mut self, requirement: SweepRequirement) -> Self {
        self.requirement = Some(requirement);
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Generate, propagate and evaluate one architecture
    pub fn evaluate(&self, n_planes: usize, sats_per_plane: usize) -> Result<ArchitectureDescriptor> {
        let constellation =
            WalkerConstellation::new(self.altitude, self.inclination, n_planes, sats_per_plane)
                .with_raan0(self.raan0);
        let elements = constellation.elements()?;
        let trajectories = self
            .propagator
            .propagate_constellation(&elements, &self.time_grid)?;
        let tracks = earth_fixed_tracks(&trajectories);
        let predicate = self.criterion.predicate();

        let descriptor = match &self.criterion {
            SweepCriterion::Geometric { station, .. } | SweepCriterion::RfLink { station, .. } => {
                let report = analyze_station(&tracks, &self.time_grid, station, predicate.as_ref())?;
                ArchitectureDescriptor::new(n_planes, sats_per_plane, report.metrics)
            }
            SweepCriterion::Grid { latlon, roi, .. } => {
                let eval = evaluate_grid(&tracks, &self.time_grid, latlon, predicate.as_ref())?;
                let (i, j) = roi.worst_cell(&eval.max_gap).ok_or_else(|| {
                    Error::InvalidGrid("region of interest selects no grid cell".to_string())
                })?;
                let metrics = *eval.cell_metrics(i, j).ok_or_else(|| {
                    Error::InvalidGrid(format!("cell ({i}, {j}) outside the grid"))
                })?;

                ArchitectureDescriptor {
                    grid: Some(GridSummary {
                        worst_gap_roi_s: metrics.worst_gap_s,
                        roi_cell_lat_deg: latlon.lat_deg()[i],
                        roi_cell_lon_deg: latlon.lon_deg()[j],
                        mean_coverage_fraction: eval.coverage.mean(),
                        min_coverage_fraction: eval.coverage.min(),
                    }),
                    ..ArchitectureDescriptor::new(n_planes, sats_per_plane, metrics)
                }
            }
        };

        log::debug!(
            "Architecture {}x{} ({} sats): worst gap {:.1} min, availability {:.2}%",
            n_planes,
            sats_per_plane,
            descriptor.total_sats,
            descriptor.worst_gap_min(),
            descriptor.metrics.availability_percent
        );

        Ok(descriptor)
    }

    /// Evaluate and rank every architecture up to `n_max` satellites
    ///
    /// The criterion is checked once before any propagation.
    pub fn run(&self) -> Result<SweepOutcome> {
        self.criterion.validate()?;
        let architectures = enumerate_architectures(self.n_max);

        log::info!(
            "Sweeping {} architectures up to {} satellites ({} criterion, {} samples)",
            architectures.len(),
            self.n_max,
            self.criterion.name(),
            self.time_grid.len()
        );

        let progress = if self.show_progress {
            ProgressBar::new(architectures.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) = ProgressStyle::with_template(
            "{elapsed_precise} {bar:40.cyan/blue} {pos}/{len} {percent}% ETA {eta_precise}",
        ) {
            progress.set_style(style.progress_chars("##-"));
        }

        let mut ranked = architectures
            .par_iter()
            .map(|&(n_planes, sats_per_plane)| {
                let descriptor = self.evaluate(n_planes, sats_per_plane);
                progress.inc(1);
                descriptor
            })
            .collect::<Result<Vec<_>>>()?;

        progress.finish_and_clear();
        rank_architectures(&mut ranked);

        let filtered = self.requirement.map(|requirement| {
            ranked
                .iter()
                .filter(|d| requirement.is_met(d))
                .cloned()
                .collect::<Vec<_>>()
        });

        if let Some(best) = ranked.first() {
            log::info!(
                "Best architecture {}x{} ({} sats), worst gap {:.1} min",
                best.n_planes,
                best.sats_per_plane,
                best.total_sats,
                best.worst_gap_min()
            );
        }
        if let Some(filtered) = &filtered {
            log::info!("{} of {} architectures meet the requirement", filtered.len(), ranked.len());
        }

        Ok(SweepOutcome { ranked, filtered })
    }
}
