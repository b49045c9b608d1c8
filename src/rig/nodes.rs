use glam::{Quat, Vec3};

use super::config::RigLayout;
use crate::error::{Result, RigError};
use crate::ik::ArmSegments;
use crate::math::{look_rotation, Transform};
use crate::scene::{NodeId, SceneGraph};

/// Handles of the nodes the rig drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RigNodes {
    pub root: NodeId,
    pub upper_arm: NodeId,
    pub lower_arm: NodeId,
    pub hand: NodeId,
}

impl RigNodes {
    /// Builds the standard hierarchy with simple box visuals:
    ///
    /// ```text
    /// cue_rig
    /// ├── upper_arm
    /// │   └── lower_arm
    /// └── hand          (carries the cue stick)
    /// ```
    pub fn build(graph: &mut SceneGraph, layout: &RigLayout, segments: ArmSegments) -> Result<Self> {
        let root = graph.add_root("cue_rig");
        let upper_arm = graph.add_child(root, "upper_arm")?;
        let lower_arm = graph.add_child(upper_arm, "lower_arm")?;
        let hand = graph.add_child(root, "hand")?;

        graph.set_origin(upper_arm, layout.shoulder_offset)?;
        graph.set_origin(lower_arm, Vec3::NEG_Z * segments.upper)?;
        graph.set_origin(hand, layout.hand_rest)?;

        graph.attach_primitive(upper_arm, "upper_arm_mesh", Vec3::ZERO, segment_box(segments.upper, 0.08))?;
        graph.attach_primitive(lower_arm, "lower_arm_mesh", Vec3::ZERO, segment_box(segments.lower, 0.07))?;

        let cue_length = layout.tip_offset.length();
        let cue = Transform::new(
            layout.tip_offset * 0.5,
            look_rotation(layout.tip_offset, Vec3::Y, Vec3::X),
            Vec3::new(0.03, 0.03, cue_length),
        );
        graph.attach_primitive(hand, "cue_stick", Vec3::ZERO, cue)?;

        Self::discover(graph, root)
    }

    /// Finds the rig nodes in an existing hierarchy: the upper arm is the
    /// first node below `root`, the lower arm the second, and the hand the
    /// last one in depth-first order.
    pub fn discover(graph: &SceneGraph, root: NodeId) -> Result<Self> {
        graph.node(root).ok_or(RigError::UnknownNode(root))?;
        let upper_arm = graph
            .node_by_depth(root, 1)
            .ok_or(RigError::MissingNode("upper arm"))?;
        let lower_arm = graph
            .node_by_depth(root, 2)
            .ok_or(RigError::MissingNode("lower arm"))?;
        let hand = graph
            .deepest_node(root)
            .filter(|&hand| hand != lower_arm && hand != upper_arm)
            .ok_or(RigError::MissingNode("hand"))?;
        Ok(Self {
            root,
            upper_arm,
            lower_arm,
            hand,
        })
    }

    /// Segment lengths as laid out in the current rest pose.
    pub fn measure_segments(&self, graph: &SceneGraph) -> Option<ArmSegments> {
        let position = |id| graph.evaluate_world(id).map(|m| m.w_axis.truncate());
        ArmSegments::measure(position(self.upper_arm)?, position(self.lower_arm)?, position(self.hand)?)
    }
}

fn segment_box(length: f32, thickness: f32) -> Transform {
    Transform::new(
        Vec3::NEG_Z * (length * 0.5),
        Quat::IDENTITY,
        Vec3::new(thickness, thickness, length),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_hierarchy_is_discoverable() {
        let mut graph = SceneGraph::new();
        let nodes = RigNodes::build(&mut graph, &RigLayout::default(), ArmSegments::default()).unwrap();
        assert_eq!(graph.node(nodes.hand).unwrap().name(), "hand");
        assert_eq!(graph.node(nodes.lower_arm).unwrap().name(), "lower_arm");
        assert_eq!(graph.primitive_count(), 3);
    }

    #[test]
    fn discovery_needs_three_levels() {
        let mut graph = SceneGraph::new();
        let root = graph.add_root("root");
        let upper = graph.add_child(root, "only").unwrap();
        assert_eq!(
            RigNodes::discover(&graph, root),
            Err(RigError::MissingNode("lower arm"))
        );
        graph.add_child(upper, "lower").unwrap();
        assert_eq!(RigNodes::discover(&graph, root), Err(RigError::MissingNode("hand")));
    }

    #[test]
    fn measures_rest_pose() {
        let mut graph = SceneGraph::new();
        let root = graph.add_root("root");
        let upper = graph.add_child(root, "upper").unwrap();
        let lower = graph.add_child(upper, "lower").unwrap();
        let hand = graph.add_child(lower, "hand").unwrap();
        graph.set_origin(lower, Vec3::new(0.0, 0.0, -0.8)).unwrap();
        graph.set_origin(hand, Vec3::new(0.0, 0.0, -0.6)).unwrap();

        let nodes = RigNodes::discover(&graph, root).unwrap();
        let segments = nodes.measure_segments(&graph).unwrap();
        assert!((segments.upper - 0.8).abs() < 1e-5);
        assert!((segments.lower - 0.6).abs() < 1e-5);
    }
}
