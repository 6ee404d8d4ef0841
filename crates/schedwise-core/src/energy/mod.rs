//! User energy profile.
//!
//! The profile describes expected capacity for each hour of the day and the
//! budget available to one planning run. It is passed explicitly into every
//! call; nothing here is shared or mutated behind the caller's back.

mod profile;

pub use profile::{EnergyPreset, EnergyProfile, DEFAULT_CURVE};
