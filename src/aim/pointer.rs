use glam::Vec3;

use crate::collision::{BallVolume, Ray};

/// Lift off the ball surface so the pointer dot does not z-fight.
pub const POINTER_SURFACE_OFFSET: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimPointer {
    pub point: Vec3,
    pub normal: Vec3,
    pub distance: f32,
}

/// Casts along the rig forward and reports where it meets the ball, if
/// within `range`.
pub fn aim_pointer(origin: Vec3, forward: Vec3, ball: &BallVolume, range: f32) -> Option<AimPointer> {
    let ray = Ray::with_range(origin, forward, 0.0001, range);
    let hit = ball.ray_intersect(&ray)?;
    Some(AimPointer {
        point: hit.point + hit.normal * POINTER_SURFACE_OFFSET,
        normal: hit.normal,
        distance: hit.t,
    })
}
