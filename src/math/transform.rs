use glam::{Mat3, Mat4, Quat, Vec3};

/// Squared length below which a direction is treated as degenerate.
pub const DEGENERATE_EPSILON: f32 = 1.0e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            scale: Vec3::ONE,
        }
    }

    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Decomposes an affine matrix. Shear is dropped.
    pub fn from_matrix(matrix: &Mat4) -> Self {
        let (scale, rotation, position) = matrix.to_scale_rotation_translation();
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// `T · R · S`, the usual TRS composition.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// The rig convention: forward is −Z.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }
}

/// Rotation whose forward axis (−Z) points along `direction`.
///
/// The up vector is re-orthogonalized through two cross products. When
/// `direction` is (numerically) parallel to `up`, `fallback` stands in for
/// `up` so the basis stays well defined. A zero `direction` yields identity.
pub fn look_rotation(direction: Vec3, up: Vec3, fallback: Vec3) -> Quat {
    let forward = direction.normalize_or_zero();
    if forward.length_squared() < DEGENERATE_EPSILON {
        return Quat::IDENTITY;
    }

    let mut right = forward.cross(up);
    if right.length_squared() < DEGENERATE_EPSILON {
        right = forward.cross(fallback);
    }
    if right.length_squared() < DEGENERATE_EPSILON {
        right = forward.any_orthonormal_vector();
    }
    let right = right.normalize();
    let corrected_up = right.cross(forward);

    Quat::from_mat3(&Mat3::from_cols(right, corrected_up, -forward)).normalize()
}

/// Drops the vertical component and renormalizes. Zero when `v` is vertical.
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_rotation_points_forward_axis_at_direction() {
        let dir = Vec3::new(1.0, -0.5, 2.0);
        let rotation = look_rotation(dir, Vec3::Y, Vec3::NEG_Z);
        let forward = rotation * Vec3::NEG_Z;
        assert!(forward.abs_diff_eq(dir.normalize(), 1e-5));
        // Up stays in the upper half-space for a non-vertical look.
        assert!((rotation * Vec3::Y).y > 0.0);
    }

    #[test]
    fn look_rotation_survives_vertical_direction() {
        let rotation = look_rotation(Vec3::NEG_Y, Vec3::Y, Vec3::NEG_Z);
        let forward = rotation * Vec3::NEG_Z;
        assert!(forward.abs_diff_eq(Vec3::NEG_Y, 1e-5));
        assert!(rotation.is_finite());
    }

    #[test]
    fn matrix_round_trip_keeps_trs() {
        let t = Transform::new(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::from_rotation_y(0.7),
            Vec3::splat(2.0),
        );
        let back = Transform::from_matrix(&t.to_matrix());
        assert!(back.position.abs_diff_eq(t.position, 1e-5));
        assert!(back.scale.abs_diff_eq(t.scale, 1e-5));
        let probe = Vec3::new(0.3, -1.0, 0.5);
        assert!((back.rotation * probe).abs_diff_eq(t.rotation * probe, 1e-5));
    }

    #[test]
    fn flatten_removes_height() {
        assert_eq!(flatten(Vec3::new(0.0, 3.0, -4.0)), Vec3::NEG_Z);
        assert_eq!(flatten(Vec3::Y), Vec3::ZERO);
    }
}
