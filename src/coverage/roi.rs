//! Regions of interest over a coverage grid

use serde::{Deserialize, Serialize};

use super::grid::{GridMap, LatLonGrid};

/// Area over which a grid sweep takes its primary gap metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Roi {
    /// Grid cell nearest to a point
    Point { lat_deg: f64, lon_deg: f64 },
    /// Both polar caps: every cell with `|lat| >= min_abs_lat_deg`
    LatBand { min_abs_lat_deg: f64 },
    /// Closed latitude/longitude box
    #[serde(rename = "box")]
    LatLonBox {
        lat_min_deg: f64,
        lat_max_deg: f64,
        lon_min_deg: f64,
        lon_max_deg: f64,
    },
}

impl Roi {
    pub fn point(lat_deg: f64, lon_deg: f64) -> Self {
        Self::Point { lat_deg, lon_deg }
    }

    /// Cells of `grid` inside the region, row-major
    ///
    /// A point always selects exactly one cell. Bands and boxes may select
    /// none on a coarse grid.
    pub fn cells(&self, grid: &LatLonGrid) -> Vec<(usize, usize)> {
        match *self {
            Self::Point { lat_deg, lon_deg } => vec![grid.nearest_cell(lat_deg, lon_deg)],
            Self::LatBand { min_abs_lat_deg } => grid
                .cells()
                .filter(|&(i, _)| grid.lat_deg()[i].abs() >= min_abs_lat_deg)
                .collect(),
            Self::LatLonBox {
                lat_min_deg,
                lat_max_deg,
                lon_min_deg,
                lon_max_deg,
            } => grid
                .cells()
                .filter(|&(i, j)| {
                    (lat_min_deg..=lat_max_deg).contains(&grid.lat_deg()[i])
                        && (lon_min_deg..=lon_max_deg).contains(&grid.lon_deg()[j])
                })
                .collect(),
        }
    }

    /// Cell with the largest value of `gap_map` inside the region
    ///
    /// Ties resolve to the first cell in row-major order. `None` when the
    /// region selects no cell.
    pub fn worst_cell(&self, gap_map: &GridMap) -> Option<(usize, usize)> {
        let mut worst: Option<((usize, usize), f64)> = None;
        for cell in self.cells(&gap_map.grid) {
            let Some(value) = gap_map.get(cell.0, cell.1) else {
                continue;
            };
            match worst {
                Some((_, best)) if value <= best => {}
                _ => worst = Some((cell, value)),
            }
        }
        worst.map(|(cell, _)| cell)
    }

    /// Largest value of `gap_map` inside the region
    pub fn worst_value(&self, gap_map: &GridMap) -> Option<f64> {
        self.worst_cell(gap_map)
            .and_then(|(i, j)| gap_map.get(i, j))
    }
}

impl Default for Roi {
    /// Svalbard ground station
    fn default() -> Self {
        Self::point(79.0, 17.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn gap_map() -> GridMap {
        let grid = LatLonGrid::new(vec![-80.0, 0.0, 80.0], vec![0.0, 90.0]).unwrap();
        let values =
            Array2::from_shape_vec((3, 2), vec![500.0, 900.0, 100.0, 2000.0, 700.0, 700.0])
                .unwrap();
        GridMap { grid, values }
    }

    #[test]
    fn test_point_uses_nearest_cell() {
        let map = gap_map();
        let roi = Roi::point(75.0, 10.0);
        assert_eq!(roi.cells(&map.grid), vec![(2, 0)]);
        assert_eq!(roi.worst_value(&map), Some(700.0));
    }

    #[test]
    fn test_lat_band_covers_both_caps() {
        let map = gap_map();
        let roi = Roi::LatBand { min_abs_lat_deg: 60.0 };
        assert_eq!(roi.cells(&map.grid).len(), 4);
        // Equatorial 2000 s gap is outside the band
        assert_eq!(roi.worst_cell(&map), Some((0, 1)));
        assert_eq!(roi.worst_value(&map), Some(900.0));
    }

    #[test]
    fn test_box_and_ties() {
        let map = gap_map();
        let roi = Roi::LatLonBox {
            lat_min_deg: 70.0,
            lat_max_deg: 90.0,
            lon_min_deg: -10.0,
            lon_max_deg: 100.0,
        };
        assert_eq!(roi.worst_cell(&map), Some((2, 0)));

        let empty = Roi::LatLonBox {
            lat_min_deg: 10.0,
            lat_max_deg: 20.0,
            lon_min_deg: 0.0,
            lon_max_deg: 90.0,
        };
        assert!(empty.cells(&map.grid).is_empty());
        assert_eq!(empty.worst_cell(&map), None);
    }

    #[test]
    fn test_serde_tagging() {
        let roi: Roi = serde_json::from_str(r#"{"type": "lat_band", "min_abs_lat_deg": 70}"#).unwrap();
        assert_eq!(roi, Roi::LatBand { min_abs_lat_deg: 70.0 });

        let roi: Roi = serde_json::from_str(
            r#"{"type": "box", "lat_min_deg": 0, "lat_max_deg": 10, "lon_min_deg": 0, "lon_max_deg": 10}"#,
        )
        .unwrap();
        assert!(matches!(roi, Roi::LatLonBox { .. }));

        let json = serde_json::to_string(&Roi::default()).unwrap();
        assert!(json.contains(r#""type":"point""#));
    }
}
