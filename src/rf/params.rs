//! Link parameter sets

use serde::{Deserialize, Serialize};

/// Ground-to-satellite link parameters (SI / dB units)
///
/// The receive gain is a single constant: the antenna pattern does not
/// depend on the off-boresight angle. This is a known simplification of
/// the model, not an omission to be filled in per call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkParams {
    /// Carrier frequency (Hz)
    pub frequency_hz: f64,
    /// Channel bandwidth (Hz)
    pub bandwidth_hz: f64,
    /// Transmit EIRP (dBW)
    pub tx_eirp_dbw: f64,
    /// Receive antenna gain (dBi)
    pub rx_gain_dbi: f64,
    /// Receiver figure of merit G/T (dB/K)
    pub gt_db_per_k: f64,
    /// Carrier-to-noise ratio required to close the link (dB)
    pub cn_required_db: f64,
}

impl Default for LinkParams {
    fn default() -> Self {
        Self::vdes_sat_uplink()
    }
}

impl LinkParams {
    /// VDES satellite uplink (VHF ship terminal to wide-beam satellite receiver)
    pub fn vdes_sat_uplink() -> Self {
        Self {
            frequency_hz: 162e6,
            bandwidth_hz: 25e3,
            tx_eirp_dbw: 14.0,
            rx_gain_dbi: 0.0,
            gt_db_per_k: -5.0,
            cn_required_db: 6.0,
        }
    }

    /// Carrier wavelength (m)
    pub fn wavelength(&self) -> f64 {
        crate::constants::C_LIGHT / self.frequency_hz
    }
}
