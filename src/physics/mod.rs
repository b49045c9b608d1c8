//! Strike physics: turning where and how hard the tip meets the ball into
//! the impulse and spin handed to the rigid-body engine.

mod contact;
mod tip_velocity;

pub use contact::{ContactEvent, ContactPhysicsModel, ContactTunables, StrikeGeometry, StrikeImpulse};
pub use tip_velocity::TipVelocityTracker;
