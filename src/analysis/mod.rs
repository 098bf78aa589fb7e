//! Batch analyses built on the access and coverage engines

pub mod sweep;

pub use sweep::{
    enumerate_architectures, rank_architectures, ArchitectureDescriptor, ArchitectureSweep,
    GridSummary, StationAccess, SweepCriterion, SweepOutcome, SweepRequirement,
};
