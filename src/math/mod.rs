//! Math utilities module
//!
//! Provides convenient re-exports from glam and the transform and angle helpers
//! shared by the scene graph, IK and aim code.

mod angle;
mod transform;

pub use angle::{clamp_or_wrap_degrees, normalize_degrees, spherical_offset};
pub use transform::{flatten, look_rotation, Transform, DEGENERATE_EPSILON};

// Re-export commonly used glam types
pub use glam::{Mat4, Quat, Vec2, Vec3};
