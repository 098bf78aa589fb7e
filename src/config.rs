//! Scenario configuration
//!
//! A scenario file is JSON in the units people write by hand (km, degrees,
//! hours, minutes). Every section is optional; missing fields take the
//! defaults below, which describe a 550 km sun-synchronous shell observed
//! from Svalbard over one day. A `grid` section, when present, gives both
//! axes in full.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::analysis::{ArchitectureSweep, StationAccess, SweepCriterion, SweepRequirement};
use crate::coverage::{LatLonGrid, Roi};
use crate::error::Result;
use crate::ground::{GroundStation, StationLocation};
use crate::orbits::{GravityModel, Propagator};
use crate::rf::LinkParams;
use crate::time::TimeGrid;

/// Orbit shell shared by every architecture
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitSettings {
    pub altitude_km: f64,
    pub inclination_deg: f64,
    pub raan0_deg: f64,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            altitude_km: 550.0,
            inclination_deg: 98.0,
            raan0_deg: 0.0,
        }
    }
}

/// Simulation window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub duration_h: f64,
    pub step_s: f64,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            duration_h: 24.0,
            step_s: 30.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropagationSettings {
    pub use_j2: bool,
}

impl Default for PropagationSettings {
    fn default() -> Self {
        Self { use_j2: true }
    }
}

/// `start, start + step, ...` below `stop`, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    pub lat: AxisRange,
    pub lon: AxisRange,
}

impl Default for GridSettings {
    /// Global 10 degree grid, poles and antimeridian included
    fn default() -> Self {
        Self {
            lat: AxisRange {
                start: -90.0,
                stop: 91.0,
                step: 10.0,
            },
            lon: AxisRange {
                start: -180.0,
                stop: 181.0,
                step: 10.0,
            },
        }
    }
}

impl GridSettings {
    pub fn to_grid(&self) -> Result<LatLonGrid> {
        LatLonGrid::regular(
            self.lat.start,
            self.lat.stop,
            self.lat.step,
            self.lon.start,
            self.lon.stop,
            self.lon.step,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepSettings {
    /// Largest total satellite count
    pub n_max: usize,
    /// Largest acceptable worst gap (min)
    pub max_gap_min: Option<f64>,
    pub min_availability_percent: Option<f64>,
    pub show_progress: bool,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            n_max: 6,
            max_gap_min: None,
            min_availability_percent: None,
            show_progress: false,
        }
    }
}

impl SweepSettings {
    /// Requirement for the filtered result set, if any threshold is set
    pub fn requirement(&self) -> Option<SweepRequirement> {
        if self.max_gap_min.is_none() && self.min_availability_percent.is_none() {
            return None;
        }
        Some(SweepRequirement {
            max_gap_s: self.max_gap_min.map(|m| m * 60.0),
            min_availability_percent: self.min_availability_percent,
        })
    }
}

/// Complete analysis scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub orbit: OrbitSettings,
    pub window: WindowSettings,
    pub propagation: PropagationSettings,
    pub station: StationLocation,
    pub min_elevation_deg: f64,
    pub link: LinkParams,
    /// Grid for grid sweeps; the global 10 degree grid when absent
    pub grid: Option<GridSettings>,
    /// Region of interest for grid sweeps; the station's cell when absent
    pub roi: Option<Roi>,
    pub sweep: SweepSettings,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            orbit: OrbitSettings::default(),
            window: WindowSettings::default(),
            propagation: PropagationSettings::default(),
            station: StationLocation::default(),
            min_elevation_deg: 0.0,
            link: LinkParams::vdes_sat_uplink(),
            grid: None,
            roi: None,
            sweep: SweepSettings::default(),
        }
    }
}

impl ScenarioConfig {
    /// Load a scenario from a JSON file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        log::info!("Loading scenario from {:?}", path);

        let file =
            File::open(path).with_context(|| format!("Failed to open scenario file: {:?}", path))?;
        let config: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse scenario file: {:?}", path))?;

        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json).context("Failed to parse scenario JSON")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        self.time_grid().context("Invalid simulation window")?;
        Ok(())
    }

    pub fn time_grid(&self) -> Result<TimeGrid> {
        TimeGrid::from_duration(self.window.duration_h * 3600.0, self.window.step_s)
    }

    pub fn station(&self) -> GroundStation {
        self.station.station()
    }

    pub fn propagator(&self) -> Propagator {
        Propagator::from_model(GravityModel::from_use_j2(self.propagation.use_j2))
    }

    pub fn min_elevation(&self) -> f64 {
        self.min_elevation_deg.to_radians()
    }

    /// Latitude/longitude grid for grid sweeps
    pub fn latlon_grid(&self) -> Result<LatLonGrid> {
        self.grid.unwrap_or_default().to_grid()
    }

    /// Region of interest, defaulting to the station location
    pub fn roi(&self) -> Roi {
        self.roi
            .unwrap_or_else(|| Roi::point(self.station.lat_deg, self.station.lon_deg))
    }

    /// Elevation-mask sweep at the configured station
    pub fn geometric_sweep(&self) -> Result<ArchitectureSweep> {
        self.sweep_with(SweepCriterion::Geometric {
            station: self.station(),
            min_elevation: self.min_elevation(),
        })
    }

    /// Link-closure sweep at the configured station
    pub fn rf_sweep(&self) -> Result<ArchitectureSweep> {
        self.sweep_with(SweepCriterion::RfLink {
            station: self.station(),
            link: self.link,
        })
    }

    /// Elevation-mask sweep over the grid, judged on the region of interest
    pub fn grid_sweep(&self) -> Result<ArchitectureSweep> {
        self.grid_sweep_with(StationAccess::Elevation {
            min_elevation: self.min_elevation(),
        })
    }

    /// Link-closure sweep over the grid, judged on the region of interest
    pub fn rf_grid_sweep(&self) -> Result<ArchitectureSweep> {
        self.grid_sweep_with(StationAccess::Link { link: self.link })
    }

    fn grid_sweep_with(&self, access: StationAccess) -> Result<ArchitectureSweep> {
        let criterion = SweepCriterion::grid(self.latlon_grid()?, self.roi(), access)?;
        self.sweep_with(criterion)
    }

    fn sweep_with(&self, criterion: SweepCriterion) -> Result<ArchitectureSweep> {
        let mut sweep = ArchitectureSweep::new(
            self.orbit.altitude_km * 1000.0,
            self.orbit.inclination_deg.to_radians(),
            self.sweep.n_max,
            self.time_grid()?,
            criterion,
        )
        .with_raan0(self.orbit.raan0_deg.to_radians())
        .with_propagator(self.propagator())
        .with_progress(self.sweep.show_progress);

        if let Some(requirement) = self.sweep.requirement() {
            sweep = sweep.with_requirement(requirement);
        }
        Ok(sweep)
    }
}
