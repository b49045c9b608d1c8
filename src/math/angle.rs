use glam::Vec3;

/// Wraps an angle in degrees into `(-180, 180]`.
pub fn normalize_degrees(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Clamps to `[min, max]`, or wraps when the limits cover a full turn.
pub fn clamp_or_wrap_degrees(angle: f32, min: f32, max: f32) -> f32 {
    if max - min >= 360.0 {
        normalize_degrees(angle)
    } else {
        angle.clamp(min, max)
    }
}

/// Offset from an orbit center for yaw/pitch in degrees.
///
/// Yaw 0 with pitch 0 lies on +Z; positive pitch lifts toward +Y. The result
/// always has length `distance`.
pub fn spherical_offset(distance: f32, yaw_degrees: f32, pitch_degrees: f32) -> Vec3 {
    let yaw = yaw_degrees.to_radians();
    let pitch = pitch_degrees.to_radians();
    Vec3::new(
        distance * pitch.cos() * yaw.sin(),
        distance * pitch.sin(),
        distance * pitch.cos() * yaw.cos(),
    )
}
