use glam::{Quat, Vec3};

use super::solver::{ArmSegments, SolveResult, TwoBoneSolver};
use crate::error::{Result, RigError};
use crate::math::{look_rotation, Transform};
use crate::scene::{NodeId, SceneGraph};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmConfig {
    pub enabled: bool,
    pub segments: ArmSegments,
    pub bend_direction: Vec3,
    pub secondary_axis: Vec3,
}

impl Default for ArmConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            segments: ArmSegments::default(),
            bend_direction: Vec3::Y,
            secondary_axis: Vec3::X,
        }
    }
}

impl ArmConfig {
    pub fn new(upper: f32, lower: f32) -> Self {
        Self {
            segments: ArmSegments::new(upper, lower),
            ..Default::default()
        }
    }

    pub fn with_bend_direction(mut self, bend_direction: Vec3) -> Self {
        self.bend_direction = bend_direction;
        self
    }

    pub fn with_secondary_axis(mut self, secondary_axis: Vec3) -> Self {
        self.secondary_axis = secondary_axis;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.segments.upper > 0.0) {
            return Err(RigError::invalid("arm.segments.upper", "must be positive"));
        }
        if !(self.segments.lower > 0.0) {
            return Err(RigError::invalid("arm.segments.lower", "must be positive"));
        }
        if self.bend_direction.length_squared() < 1e-6 {
            return Err(RigError::invalid("arm.bend_direction", "must be non-zero"));
        }
        Ok(())
    }
}

/// Binds the two-bone solver to a pair of scene nodes.
///
/// The upper segment node hangs off the anchor (its parent); the lower segment
/// node is a child of the upper one. Both segments extend along their node's
/// forward axis (−Z). The chain is assumed to carry unit scale.
#[derive(Debug, Clone)]
pub struct ArmRig {
    upper: NodeId,
    lower: NodeId,
    config: ArmConfig,
}

impl ArmRig {
    pub fn new(graph: &SceneGraph, upper: NodeId, lower: NodeId, config: ArmConfig) -> Result<Self> {
        config.validate()?;
        let upper_node = graph.node(upper).ok_or(RigError::UnknownNode(upper))?;
        if upper_node.parent().is_none() {
            return Err(RigError::MissingNode("shoulder"));
        }
        let lower_node = graph.node(lower).ok_or(RigError::UnknownNode(lower))?;
        if lower_node.parent() != Some(upper) {
            return Err(RigError::MissingNode("lower arm"));
        }
        Ok(Self {
            upper,
            lower,
            config,
        })
    }

    pub fn upper(&self) -> NodeId {
        self.upper
    }

    pub fn lower(&self) -> NodeId {
        self.lower
    }

    pub fn config(&self) -> &ArmConfig {
        &self.config
    }

    /// Solves toward `hand`'s current world position and writes the segment
    /// rotations. Returns `Ok(None)` when IK is disabled.
    pub fn apply(&self, graph: &mut SceneGraph, hand: NodeId) -> Result<Option<SolveResult>> {
        if !self.config.enabled {
            return Ok(None);
        }

        let upper_node = graph.node(self.upper).ok_or(RigError::UnknownNode(self.upper))?;
        let anchor_id = upper_node.parent().ok_or(RigError::MissingNode("shoulder"))?;
        let upper_origin = upper_node.origin;

        let anchor_world = graph
            .evaluate_world(anchor_id)
            .ok_or(RigError::UnknownNode(anchor_id))?;
        let hand_world = graph.evaluate_world(hand).ok_or(RigError::UnknownNode(hand))?;

        let (_, anchor_rotation, _) = anchor_world.to_scale_rotation_translation();
        let shoulder = anchor_world.transform_point3(upper_origin);
        let target = hand_world.w_axis.truncate();

        let result = TwoBoneSolver::solve(
            shoulder,
            target,
            self.config.segments,
            self.config.bend_direction,
            self.config.secondary_axis,
        );

        let up_hint = anchor_rotation * Vec3::Y;
        let upper_world = look_rotation(result.upper_direction, up_hint, self.config.bend_direction);
        let lower_world = look_rotation(result.lower_direction, up_hint, self.config.bend_direction);

        graph.set_local(
            self.upper,
            Transform::from_position_rotation(Vec3::ZERO, local_rotation(anchor_rotation, upper_world)),
        )?;
        graph.set_origin(self.lower, Vec3::NEG_Z * self.config.segments.upper)?;
        graph.set_local(
            self.lower,
            Transform::from_position_rotation(Vec3::ZERO, local_rotation(upper_world, lower_world)),
        )?;

        log::trace!(
            "arm ik: reachable={} elbow={:?} residual={:.4}",
            result.reachable,
            result.elbow,
            result.final_distance
        );
        Ok(Some(result))
    }
}

fn local_rotation(parent_world: Quat, child_world: Quat) -> Quat {
    (parent_world.inverse() * child_world).normalize()
}
