//! Where the rig stands and where the cue points.
//!
//! The controller orbits the rig root around the target ball, or with the
//! fine-aim modifier held, steers the cue in place. A moving ball detaches the
//! rig until it settles.

mod config;
mod controller;
mod pointer;
mod target;

pub use config::AimConfig;
pub use controller::{AimController, AimMode, AimPose, AimState, AimUpdate, Attachment};
pub use pointer::{aim_pointer, AimPointer, POINTER_SURFACE_OFFSET};
pub use target::TargetCycle;
