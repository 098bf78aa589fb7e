//! RF link modelling
//!
//! Link closure between a ground transmitter and a satellite receiver.
//! Used by the `LinkClosure` visibility predicate.

mod link_budget;
mod params;

pub use link_budget::{compute_uplink, free_space_path_loss_db, noise_power_db, LinkBudget, LinkStatus};
pub use params::LinkParams;
