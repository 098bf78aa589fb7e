//! End-to-end access, coverage and sweep scenarios

use std::f64::consts::PI;

use approx::assert_relative_eq;
use nalgebra::Vector3;

use satsweep::access::{
    aggregate_constellation_access, analyze_station, earth_fixed_tracks, gap_durations,
    per_satellite_intervals, total_duration, ElevationMask, LinkClosure,
};
use satsweep::analysis::{ArchitectureSweep, SweepCriterion, SweepRequirement};
use satsweep::constants::{R_EARTH, SECONDS_PER_DAY};
use satsweep::coverage::{compute_grid_coverage, compute_grid_max_gap, LatLonGrid};
use satsweep::frames::{earth_rotation_angle, ecef_to_geodetic, eci_to_ecef};
use satsweep::orbits::{
    generate_constellation, j2_raan_rate, raan_of, ClassicalOrbitalElements, Propagator,
    WalkerConstellation,
};
use satsweep::rf::LinkParams;
use satsweep::{Error, GroundStation, TimeGrid};

const ALTITUDE: f64 = 550e3;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn inclination() -> f64 {
    98f64.to_radians()
}

fn svalbard() -> GroundStation {
    GroundStation::from_degrees(79.0, 17.5)
}

fn one_day() -> TimeGrid {
    TimeGrid::new(0.0, SECONDS_PER_DAY, 30.0).unwrap()
}

fn wrap_pi(angle: f64) -> f64 {
    (angle + PI).rem_euclid(2.0 * PI) - PI
}

#[test]
fn single_polar_satellite_over_svalbard() {
    init_logging();
    let grid = one_day();
    let elements = WalkerConstellation::new(ALTITUDE, inclination(), 1, 1)
        .elements()
        .unwrap();
    let trajectories = Propagator::with_j2()
        .propagate_constellation(&elements, &grid)
        .unwrap();
    let tracks = earth_fixed_tracks(&trajectories);

    let report = analyze_station(&tracks, &grid, &svalbard(), &ElevationMask::horizon()).unwrap();
    let intervals = &report.intervals;

    assert!(!intervals.is_empty());
    for interval in intervals {
        assert!(interval.start.is_finite() && interval.end.is_finite());
        assert!(interval.end > interval.start);
    }
    for pair in intervals.windows(2) {
        assert!(pair[0].end < pair[1].start);
    }

    // A single satellite cannot cover the station continuously
    assert!(total_duration(intervals) < SECONDS_PER_DAY);
    assert!(report.metrics.worst_gap_s < SECONDS_PER_DAY);
    assert!(report.metrics.worst_gap_s > 0.0);
    assert!(report.metrics.pass_count >= 2);
    assert!(report.metrics.mean_revisit_s > 0.0);
}

#[test]
fn degenerate_constellation_is_signalled() {
    let radius = R_EARTH + ALTITUDE;
    assert!(matches!(
        generate_constellation(radius, inclination(), 0, 4, 0.0),
        Err(Error::DegenerateConstellation { n_planes: 0, .. })
    ));
    assert!(matches!(
        generate_constellation(radius, inclination(), 3, 0, 0.0),
        Err(Error::DegenerateConstellation {
            sats_per_plane: 0,
            ..
        })
    ));

    let sweep = ArchitectureSweep::new(
        ALTITUDE,
        inclination(),
        4,
        TimeGrid::new(0.0, 600.0, 60.0).unwrap(),
        SweepCriterion::Geometric {
            station: svalbard(),
            min_elevation: 0.0,
        },
    );
    assert!(sweep.evaluate(0, 2).is_err());
}

#[test]
fn two_body_circular_orbit_is_conserved() {
    let grid = one_day();
    let elements = ClassicalOrbitalElements::circular(ALTITUDE, inclination(), 0.4, 0.0);
    let trajectory = Propagator::two_body()
        .propagate_elements(&elements, &grid)
        .unwrap();
    assert_eq!(trajectory.len(), grid.len());

    let r0 = R_EARTH + ALTITUDE;
    let max_drift = trajectory
        .states()
        .iter()
        .map(|s| (s.radius() - r0).abs() / r0)
        .fold(0.0, f64::max);
    assert!(max_drift < 1e-4, "relative radius drift {max_drift}");

    let n0 = trajectory.first().unwrap().orbit_normal().unwrap();
    let n1 = trajectory.last().unwrap().orbit_normal().unwrap();
    assert!(n0.dot(&n1) > 1.0 - 1e-10);
}

#[test]
fn earth_fixed_latitude_longitude_matches_direct_geometry() {
    let positions = [
        Vector3::new(7.0e6, 0.0, 0.0),
        Vector3::new(-3.1e6, 5.2e6, 2.4e6),
        Vector3::new(1.0e6, -6.5e6, -3.3e6),
        Vector3::new(0.5e6, 0.2e6, 6.9e6),
    ];

    for r in &positions {
        for t in [0.0, 1234.5, 43_200.0, 86_399.0, 250_000.0] {
            let geo = ecef_to_geodetic(&eci_to_ecef(r, t)).unwrap();

            let lat = (r.z / r.norm()).asin();
            let lon = wrap_pi(r.y.atan2(r.x) - earth_rotation_angle(t));

            assert_relative_eq!(geo.lat, lat, epsilon = 1e-12);
            assert_relative_eq!(wrap_pi(geo.lon - lon), 0.0, epsilon = 1e-9);
        }
    }
}

#[test]
fn availability_and_gaps_agree() {
    let grid = TimeGrid::new(0.0, 12.0 * 3600.0, 30.0).unwrap();
    let elements = WalkerConstellation::new(ALTITUDE, inclination(), 2, 2)
        .elements()
        .unwrap();
    let tracks = earth_fixed_tracks(
        &Propagator::with_j2()
            .propagate_constellation(&elements, &grid)
            .unwrap(),
    );

    for (lat, lon) in [(79.0, 17.5), (45.0, -70.0), (0.0, 100.0)] {
        let station = GroundStation::from_degrees(lat, lon);
        let report =
            analyze_station(&tracks, &grid, &station, &ElevationMask::from_degrees(5.0)).unwrap();

        let gaps: f64 = gap_durations(&report.intervals, grid.start(), grid.window_end())
            .iter()
            .sum();
        let from_gaps = 100.0 - gaps / grid.window_duration() * 100.0;
        assert_relative_eq!(report.metrics.availability_percent, from_gaps, epsilon = 1e-9);
    }
}

#[test]
fn per_satellite_union_equals_constellation_access() {
    let grid = TimeGrid::new(0.0, 12.0 * 3600.0, 30.0).unwrap();
    let elements = WalkerConstellation::new(ALTITUDE, inclination(), 3, 2)
        .elements()
        .unwrap();
    let tracks = earth_fixed_tracks(
        &Propagator::with_j2()
            .propagate_constellation(&elements, &grid)
            .unwrap(),
    );
    let predicate = LinkClosure::new(LinkParams::vdes_sat_uplink());

    let per_sat = per_satellite_intervals(&tracks, &grid, &svalbard(), &predicate).unwrap();
    let report = analyze_station(&tracks, &grid, &svalbard(), &predicate).unwrap();

    assert_eq!(aggregate_constellation_access(&per_sat), report.intervals);
}

#[test]
fn grid_maps_match_single_station_analysis() {
    init_logging();
    let grid = TimeGrid::new(0.0, 3.0 * 3600.0, 60.0).unwrap();
    let elements = WalkerConstellation::new(ALTITUDE, inclination(), 2, 1)
        .elements()
        .unwrap();
    let tracks = earth_fixed_tracks(
        &Propagator::with_j2()
            .propagate_constellation(&elements, &grid)
            .unwrap(),
    );
    let latlon = LatLonGrid::new(vec![-70.0, -20.0, 30.0, 80.0], vec![-150.0, 0.0, 120.0]).unwrap();
    let predicate = ElevationMask::horizon();

    let coverage = compute_grid_coverage(&tracks, &grid, &latlon, &predicate).unwrap();
    let max_gap = compute_grid_max_gap(&tracks, &grid, &latlon, &predicate).unwrap();

    assert_eq!(coverage.values.dim(), (4, 3));
    assert_eq!(max_gap.values.dim(), (4, 3));

    for (i, j) in latlon.cells() {
        let station = latlon.station(i, j).unwrap();
        let report = analyze_station(&tracks, &grid, &station, &predicate).unwrap();

        assert_relative_eq!(
            coverage.values[[i, j]],
            report.metrics.availability_percent / 100.0,
            epsilon = 1e-12
        );
        assert_eq!(max_gap.values[[i, j]], report.metrics.worst_gap_s);
    }
}

#[test]
fn j2_drives_sun_synchronous_node_drift() {
    let grid = one_day();
    let elements = ClassicalOrbitalElements::circular(ALTITUDE, inclination(), 0.0, 0.0);
    let trajectory = Propagator::with_j2()
        .propagate_elements(&elements, &grid)
        .unwrap();

    let raan_start = raan_of(trajectory.first().unwrap());
    let raan_end = raan_of(trajectory.last().unwrap());
    let drift_deg = wrap_pi(raan_end - raan_start).to_degrees();

    // Prograde (eastward) drift of about one degree per day at 98 degrees
    assert!(drift_deg > 0.7 && drift_deg < 1.4, "drift {drift_deg} deg/day");

    let secular_deg = (j2_raan_rate(elements.a, 0.0, elements.i) * SECONDS_PER_DAY).to_degrees();
    assert_relative_eq!(drift_deg, secular_deg, max_relative = 0.1);

    // Without J2 the node stays put
    let two_body = Propagator::two_body()
        .propagate_elements(&elements, &grid)
        .unwrap();
    let still = wrap_pi(raan_of(two_body.last().unwrap()) - raan_of(two_body.first().unwrap()));
    assert!(still.abs().to_degrees() < 1e-3);
}

#[test]
fn rf_sweep_ranks_and_filters() {
    init_logging();
    let grid = TimeGrid::new(0.0, 4.0 * 3600.0, 60.0).unwrap();
    let requirement = SweepRequirement::max_gap(100.0 * 60.0);
    let sweep = ArchitectureSweep::new(
        ALTITUDE,
        inclination(),
        4,
        grid,
        SweepCriterion::RfLink {
            station: svalbard(),
            link: LinkParams::vdes_sat_uplink(),
        },
    )
    .with_requirement(requirement);

    let outcome = sweep.run().unwrap();
    assert_eq!(outcome.ranked.len(), 8);
    for pair in outcome.ranked.windows(2) {
        assert!(pair[0].metrics.worst_gap_s <= pair[1].metrics.worst_gap_s);
    }

    let filtered = outcome.filtered.expect("requirement given");
    assert!(filtered.len() <= outcome.ranked.len());
    assert!(filtered.iter().all(|d| requirement.is_met(d)));
    let kept = outcome.ranked.iter().filter(|d| requirement.is_met(d)).count();
    assert_eq!(filtered.len(), kept);

    // A single satellite is never strictly better than the best architecture
    let single = outcome
        .ranked
        .iter()
        .find(|d| d.total_sats == 1)
        .unwrap();
    assert!(outcome.ranked[0].metrics.worst_gap_s <= single.metrics.worst_gap_s);
}
