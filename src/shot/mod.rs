//! Charge, strike and return sequencing for a single shot.

mod config;
mod cooldown;
mod machine;

pub use config::{ShotConfig, StrikeSpeedSource};
pub use cooldown::ContactCooldown;
pub use machine::{CancelReason, ShotEvent, ShotPhase, ShotStateMachine};
