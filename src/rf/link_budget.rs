//! Link budget calculator
//!
//! Free-space path loss from slant range and wavelength, then carrier to
//! noise from EIRP, receive gain, G/T and the thermal noise power `k·B`.

use std::f64::consts::PI;
use std::fmt;

use serde::Serialize;

use super::params::LinkParams;
use crate::constants::K_BOLTZMANN;

/// Outcome of a link closure test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStatus {
    /// Margin is non-negative
    Closed,
    /// Satellite at or below the local horizon; no budget computed
    BelowHorizon,
    /// Budget computed but the margin is negative
    InsufficientMargin,
}

impl LinkStatus {
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::BelowHorizon => "below_horizon",
            Self::InsufficientMargin => "insufficient_margin",
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// Detailed link budget result
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinkBudget {
    pub status: LinkStatus,
    /// Slant range (m)
    pub slant_range_m: f64,
    /// Free-space path loss (dB), absent below the horizon
    pub fspl_db: Option<f64>,
    /// Achieved carrier-to-noise ratio (dB), absent below the horizon
    pub cn_db: Option<f64>,
    /// `cn_db - cn_required_db`, absent below the horizon
    pub margin_db: Option<f64>,
}

impl LinkBudget {
    pub fn below_horizon(slant_range_m: f64) -> Self {
        Self {
            status: LinkStatus::BelowHorizon,
            slant_range_m,
            fspl_db: None,
            cn_db: None,
            margin_db: None,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.status == LinkStatus::Closed
    }

    pub fn reason(&self) -> &'static str {
        self.status.reason()
    }
}

/// Free-space path loss in dB: `20·log10(4πd/λ)`
pub fn free_space_path_loss_db(distance_m: f64, wavelength_m: f64) -> f64 {
    20.0 * (4.0 * PI * distance_m / wavelength_m).log10()
}

/// Thermal noise power per kelvin over `bandwidth_hz`, in dB(W/K)
pub fn noise_power_db(bandwidth_hz: f64) -> f64 {
    10.0 * (K_BOLTZMANN * bandwidth_hz).log10()
}

/// Uplink budget over `distance_m` of free space
pub fn compute_uplink(distance_m: f64, params: &LinkParams) -> LinkBudget {
    let fspl_db = free_space_path_loss_db(distance_m, params.wavelength());

    let cn_db = params.tx_eirp_dbw + params.rx_gain_dbi + params.gt_db_per_k
        - fspl_db
        - noise_power_db(params.bandwidth_hz);

    let margin_db = cn_db - params.cn_required_db;

    LinkBudget {
        status: if margin_db >= 0.0 {
            LinkStatus::Closed
        } else {
            LinkStatus::InsufficientMargin
        },
        slant_range_m: distance_m,
        fspl_db: Some(fspl_db),
        cn_db: Some(cn_db),
        margin_db: Some(margin_db),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fspl_reference_value() {
        // 162 MHz over 1000 km
        let params = LinkParams::vdes_sat_uplink();
        let fspl = free_space_path_loss_db(1.0e6, params.wavelength());
        assert_relative_eq!(fspl, 136.64, epsilon = 0.05);
    }

    #[test]
    fn test_fspl_inverse_square() {
        let a = free_space_path_loss_db(1.0e6, 1.0);
        let b = free_space_path_loss_db(2.0e6, 1.0);
        assert_relative_eq!(b - a, 20.0 * 2f64.log10(), epsilon = 1e-12);
    }

    #[test]
    fn test_noise_power() {
        assert_relative_eq!(noise_power_db(25e3), -184.62, epsilon = 0.01);
    }

    #[test]
    fn test_vdes_uplink_closes_at_leo_range() {
        let params = LinkParams::vdes_sat_uplink();
        let budget = compute_uplink(1.0e6, &params);

        assert!(budget.is_closed());
        assert_eq!(budget.reason(), "closed");
        let cn = budget.cn_db.unwrap();
        assert_relative_eq!(budget.margin_db.unwrap(), cn - 6.0, epsilon = 1e-12);
        assert_relative_eq!(cn, 14.0 + 0.0 - 5.0 - 136.64 + 184.62, epsilon = 0.1);
    }

    #[test]
    fn test_insufficient_margin() {
        let params = LinkParams {
            cn_required_db: 80.0,
            ..LinkParams::vdes_sat_uplink()
        };
        let budget = compute_uplink(2.0e6, &params);
        assert_eq!(budget.status, LinkStatus::InsufficientMargin);
        assert!(budget.margin_db.unwrap() < 0.0);
        assert!(!budget.is_closed());
    }

    #[test]
    fn test_below_horizon_record() {
        let budget = LinkBudget::below_horizon(3.0e6);
        assert!(!budget.is_closed());
        assert_eq!(budget.reason(), "below_horizon");
        assert!(budget.margin_db.is_none());
        assert!(budget.cn_db.is_none());
    }
}
