use glam::{Quat, Vec3};

use crate::math::DEGENERATE_EPSILON;

/// Segment lengths of a two-bone chain.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmSegments {
    pub upper: f32,
    pub lower: f32,
}

impl ArmSegments {
    pub fn new(upper: f32, lower: f32) -> Self {
        Self { upper, lower }
    }

    pub fn total_length(&self) -> f32 {
        self.upper + self.lower
    }

    /// Measures lengths from rest-pose joint positions. Returns `None` when a
    /// segment comes out near zero, which usually means the pose was sampled
    /// before the hierarchy was placed.
    pub fn measure(shoulder: Vec3, elbow: Vec3, hand: Vec3) -> Option<Self> {
        let upper = shoulder.distance(elbow);
        let lower = elbow.distance(hand);
        if upper < 0.01 || lower < 0.01 {
            log::warn!(
                "measured arm lengths are near zero (upper={upper:.4}, lower={lower:.4}); keep configured lengths"
            );
            return None;
        }
        Some(Self { upper, lower })
    }
}

impl Default for ArmSegments {
    fn default() -> Self {
        Self {
            upper: 1.0,
            lower: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveResult {
    pub reachable: bool,
    pub elbow: Vec3,
    /// Where the end of the lower segment actually lands.
    pub reached: Vec3,
    pub upper_direction: Vec3,
    pub lower_direction: Vec3,
    /// Interior angle at the shoulder, radians.
    pub shoulder_angle: f32,
    /// Interior angle at the elbow, radians. `PI` for a straight arm.
    pub elbow_angle: f32,
    /// Distance left between `reached` and the requested target.
    pub final_distance: f32,
}

/// Closed-form two-bone solver (law of cosines).
pub struct TwoBoneSolver;

impl TwoBoneSolver {
    /// Solves for the elbow given a fixed shoulder and a hand target.
    ///
    /// `bend_direction` fixes the side the elbow bends to; when the reach is
    /// parallel to it, `secondary_axis` (made perpendicular to the reach)
    /// defines the bend plane instead.
    pub fn solve(
        shoulder: Vec3,
        target: Vec3,
        segments: ArmSegments,
        bend_direction: Vec3,
        secondary_axis: Vec3,
    ) -> SolveResult {
        let l1 = segments.upper;
        let l2 = segments.lower;
        let to_target = target - shoulder;
        let distance = to_target.length();

        let direction = if distance * distance > DEGENERATE_EPSILON {
            to_target / distance
        } else {
            Self::reach_fallback(bend_direction, secondary_axis)
        };

        if distance > l1 + l2 {
            return Self::stretch_towards_target(shoulder, direction, segments, distance);
        }

        let cos_elbow = if l1 * l2 > 0.0 {
            ((l1 * l1 + l2 * l2 - distance * distance) / (2.0 * l1 * l2)).clamp(-1.0, 1.0)
        } else {
            -1.0
        };
        let elbow_angle = cos_elbow.acos();

        let cos_shoulder = if l1 * distance > 0.0 {
            ((l1 * l1 + distance * distance - l2 * l2) / (2.0 * l1 * distance)).clamp(-1.0, 1.0)
        } else {
            1.0
        };
        let shoulder_angle = cos_shoulder.acos();

        let normal = Self::bend_plane_normal(direction, bend_direction, secondary_axis);
        let upper_direction = (Quat::from_axis_angle(normal, -shoulder_angle) * direction).normalize();
        let elbow = shoulder + upper_direction * l1;

        let elbow_to_target = target - elbow;
        let lower_direction = if elbow_to_target.length_squared() > DEGENERATE_EPSILON {
            elbow_to_target.normalize()
        } else {
            upper_direction
        };
        let reached = elbow + lower_direction * l2;

        SolveResult {
            reachable: true,
            elbow,
            reached,
            upper_direction,
            lower_direction,
            shoulder_angle,
            elbow_angle,
            final_distance: (reached - target).length(),
        }
    }

    fn stretch_towards_target(
        shoulder: Vec3,
        direction: Vec3,
        segments: ArmSegments,
        distance: f32,
    ) -> SolveResult {
        let elbow = shoulder + direction * segments.upper;
        let reached = shoulder + direction * segments.total_length();
        SolveResult {
            reachable: false,
            elbow,
            reached,
            upper_direction: direction,
            lower_direction: direction,
            shoulder_angle: 0.0,
            elbow_angle: std::f32::consts::PI,
            final_distance: distance - segments.total_length(),
        }
    }

    fn bend_plane_normal(direction: Vec3, bend_direction: Vec3, secondary_axis: Vec3) -> Vec3 {
        let normal = direction.cross(bend_direction);
        if normal.length_squared() > DEGENERATE_EPSILON {
            return normal.normalize();
        }

        // Gram-Schmidt the secondary axis against the reach so the rotation
        // stays in a plane containing the reach.
        let rejected = secondary_axis - direction * secondary_axis.dot(direction);
        if rejected.length_squared() > DEGENERATE_EPSILON {
            rejected.normalize()
        } else {
            direction.any_orthonormal_vector()
        }
    }

    fn reach_fallback(bend_direction: Vec3, secondary_axis: Vec3) -> Vec3 {
        let axis = secondary_axis.normalize_or_zero();
        if axis.length_squared() > DEGENERATE_EPSILON {
            axis
        } else {
            bend_direction.any_orthonormal_vector()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const SEGMENTS: ArmSegments = ArmSegments {
        upper: 1.2,
        lower: 0.8,
    };

    fn solve(target: Vec3) -> SolveResult {
        TwoBoneSolver::solve(Vec3::ZERO, target, SEGMENTS, Vec3::Y, Vec3::X)
    }

    #[test]
    fn reachable_targets_keep_both_lengths() {
        let targets = [
            Vec3::new(1.5, 0.0, 0.0),
            Vec3::new(0.3, 0.9, -0.7),
            Vec3::new(-0.5, -0.5, -1.2),
            Vec3::new(0.0, 0.0, -1.99),
            Vec3::new(0.0, 0.41, 0.0),
        ];
        for target in targets {
            let result = solve(target);
            assert!(result.reachable, "{target:?}");
            assert_abs_diff_eq!(result.elbow.length(), SEGMENTS.upper, epsilon = 1e-4);
            assert_abs_diff_eq!(result.elbow.distance(target), SEGMENTS.lower, epsilon = 1e-3);
            assert!(result.reached.abs_diff_eq(target, 1e-3));
        }
    }

    #[test]
    fn unreachable_target_stretches_straight() {
        let target = Vec3::new(0.0, 3.0, 4.0);
        let result = solve(target);
        assert!(!result.reachable);
        assert_abs_diff_eq!(result.reached.length(), SEGMENTS.total_length(), epsilon = 1e-5);
        assert!(result
            .elbow
            .abs_diff_eq(target.normalize() * SEGMENTS.upper, 1e-5));
        assert_abs_diff_eq!(result.final_distance, 5.0 - 2.0, epsilon = 1e-5);
    }

    #[test]
    fn bend_side_is_deterministic() {
        let target = Vec3::new(1.5, 0.0, 0.0);
        let a = solve(target);
        let b = solve(target);
        assert_eq!(a.elbow, b.elbow);
        // Reach along +X with bend Y: rotating by minus the shoulder angle about +Z
        // drops the elbow below the reach line.
        assert!(a.elbow.y < 0.0);
        assert_abs_diff_eq!(a.elbow.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn reach_parallel_to_bend_uses_secondary_axis() {
        let target = Vec3::new(0.0, 1.5, 0.0);
        let result = solve(target);
        assert!(result.elbow.is_finite());
        assert_abs_diff_eq!(result.elbow.length(), SEGMENTS.upper, epsilon = 1e-4);
        assert_abs_diff_eq!(result.elbow.distance(target), SEGMENTS.lower, epsilon = 1e-3);
    }

    #[test]
    fn target_on_shoulder_does_not_produce_nan() {
        let result = TwoBoneSolver::solve(
            Vec3::ZERO,
            Vec3::ZERO,
            ArmSegments::new(1.0, 1.0),
            Vec3::Y,
            Vec3::X,
        );
        assert!(result.elbow.is_finite());
        assert!(result.upper_direction.is_finite());
        assert!(result.lower_direction.is_finite());
    }

    #[test]
    fn measure_rejects_collapsed_pose() {
        assert!(ArmSegments::measure(Vec3::ZERO, Vec3::ZERO, Vec3::X).is_none());
        let measured = ArmSegments::measure(Vec3::ZERO, Vec3::Y, Vec3::new(0.0, 1.0, 2.0)).unwrap();
        assert_abs_diff_eq!(measured.upper, 1.0);
        assert_abs_diff_eq!(measured.lower, 2.0);
    }
}
