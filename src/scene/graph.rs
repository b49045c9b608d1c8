use glam::{Mat4, Vec3};

use super::node::{NodeId, SceneNode};
use super::primitive::{Primitive, PrimitiveId, PrimitiveInstance};
use crate::error::{Result, RigError};
use crate::math::Transform;

/// Arena-backed transform hierarchy.
///
/// Nodes are only ever created under an existing parent, so the graph stays a
/// forest of trees. World transforms are produced by [`SceneGraph::compose`],
/// which must run once per tick before anything reads [`SceneNode::world`] or
/// [`Primitive::world`].
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    primitives: Vec<Primitive>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            primitives: Vec::new(),
        }
    }

    pub fn add_root(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SceneNode::new(name, None));
        id
    }

    pub fn add_child(&mut self, parent: NodeId, name: impl Into<String>) -> Result<NodeId> {
        if parent.index() >= self.nodes.len() {
            return Err(RigError::UnknownNode(parent));
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SceneNode::new(name, Some(parent)));
        self.nodes[parent.index()].children.push(id);
        Ok(id)
    }

    /// Attaches a primitive, capturing `local` as its permanent cached transform.
    pub fn attach_primitive(
        &mut self,
        node: NodeId,
        name: impl Into<String>,
        pivot: Vec3,
        local: Transform,
    ) -> Result<PrimitiveId> {
        if node.index() >= self.nodes.len() {
            return Err(RigError::UnknownNode(node));
        }
        let id = PrimitiveId(self.primitives.len() as u32);
        self.primitives.push(Primitive::new(name, node, pivot, local));
        self.nodes[node.index()].primitives.push(id);
        Ok(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.index())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.index())
    }

    pub fn primitive(&self, id: PrimitiveId) -> Option<&Primitive> {
        self.primitives.get(id.index())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    pub fn set_origin(&mut self, id: NodeId, origin: Vec3) -> Result<()> {
        let node = self.node_mut(id).ok_or(RigError::UnknownNode(id))?;
        node.origin = origin;
        Ok(())
    }

    pub fn set_local(&mut self, id: NodeId, local: Transform) -> Result<()> {
        let node = self.node_mut(id).ok_or(RigError::UnknownNode(id))?;
        node.local = local;
        Ok(())
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<()> {
        let node = self.node_mut(id).ok_or(RigError::UnknownNode(id))?;
        node.visible = visible;
        Ok(())
    }

    /// Composes `root` and its subtree under `parent_world`, then publishes
    /// every attached primitive. Unknown handles are ignored.
    pub fn compose(&mut self, root: NodeId, parent_world: &Mat4) {
        let Some(node) = self.nodes.get_mut(root.index()) else {
            log::warn!("compose called with unknown node {:?}", root);
            return;
        };

        let world = *parent_world * node.local_matrix();
        node.world = world;

        for i in 0..self.nodes[root.index()].children.len() {
            let child = self.nodes[root.index()].children[i];
            self.compose(child, &world);
        }

        for i in 0..self.nodes[root.index()].primitives.len() {
            let pid = self.nodes[root.index()].primitives[i];
            if let Some(primitive) = self.primitives.get_mut(pid.index()) {
                primitive.publish(&world);
            }
        }
    }

    /// World matrix computed fresh from the ancestor chain.
    ///
    /// Unlike [`SceneGraph::compose`] this publishes nothing, so it is safe to
    /// call mid-tick to see the effect of a local edit before the next compose.
    pub fn evaluate_world(&self, id: NodeId) -> Option<Mat4> {
        let node = self.node(id)?;
        let local = node.local_matrix();
        match node.parent {
            Some(parent) => Some(self.evaluate_world(parent)? * local),
            None => Some(local),
        }
    }

    /// Like [`SceneGraph::evaluate_world`] but with `local` substituted for the
    /// node's own local transform.
    pub fn evaluate_world_with(&self, id: NodeId, local: &Transform) -> Option<Mat4> {
        let node = self.node(id)?;
        let parent_world = match node.parent {
            Some(parent) => self.evaluate_world(parent)?,
            None => Mat4::IDENTITY,
        };
        Some(parent_world * Mat4::from_translation(node.origin) * local.to_matrix())
    }

    /// Depth-first, parent-before-children listing of `root`'s subtree.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if self.node(root).is_none() {
            return out;
        }
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            let children = &self.nodes[id.index()].children;
            stack.extend(children.iter().rev().copied());
        }
        out
    }

    /// Node at position `depth` in the depth-first listing (0 is `root`).
    pub fn node_by_depth(&self, root: NodeId, depth: usize) -> Option<NodeId> {
        self.descendants(root).get(depth).copied()
    }

    pub fn node_by_name(&self, root: NodeId, name: &str) -> Option<NodeId> {
        self.descendants(root)
            .into_iter()
            .find(|id| self.nodes[id.index()].name == name)
    }

    /// Last node of the depth-first listing; for an arm rig this is the hand.
    pub fn deepest_node(&self, root: NodeId) -> Option<NodeId> {
        self.descendants(root).last().copied()
    }

    pub fn is_effectively_visible(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current.and_then(|id| self.node(id)) {
            if !node.visible {
                return false;
            }
            current = node.parent;
        }
        true
    }

    /// Render hand-off: one instance per primitive whose node chain is visible.
    pub fn instances(&self) -> Vec<PrimitiveInstance> {
        self.primitives
            .iter()
            .enumerate()
            .filter(|(_, p)| self.is_effectively_visible(p.node))
            .map(|(i, p)| PrimitiveInstance::new(PrimitiveId(i as u32), &p.world))
            .collect()
    }

    pub fn instance_bytes(instances: &[PrimitiveInstance]) -> &[u8] {
        bytemuck::cast_slice(instances)
    }

    pub fn debug_dump(&self, root: NodeId) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }
        self.dump_node(root, 0);
    }

    fn dump_node(&self, id: NodeId, depth: usize) {
        let Some(node) = self.node(id) else {
            return;
        };
        let indent = "-".repeat(depth * 2);
        log::debug!(
            "{indent} {} origin={:?} pos={:?} rot={:?} primitives={}",
            node.name,
            node.origin,
            node.local.position,
            node.local.rotation.to_euler(glam::EulerRot::YXZ),
            node.primitives.len()
        );
        for &child in &node.children {
            self.dump_node(child, depth + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    fn arm() -> (SceneGraph, NodeId, NodeId, NodeId) {
        let mut graph = SceneGraph::new();
        let root = graph.add_root("shoulder");
        let upper = graph.add_child(root, "upper").unwrap();
        let hand = graph.add_child(root, "hand").unwrap();
        (graph, root, upper, hand)
    }

    #[test]
    fn compose_applies_origin_then_local_trs() {
        let (mut graph, root, upper, _) = arm();
        graph
            .set_local(root, Transform::from_position(Vec3::new(10.0, 0.0, 0.0)))
            .unwrap();
        graph.set_origin(upper, Vec3::new(0.0, 1.0, 0.0)).unwrap();
        graph
            .set_local(
                upper,
                Transform::new(
                    Vec3::new(1.0, 0.0, 0.0),
                    Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
                    Vec3::ONE,
                ),
            )
            .unwrap();

        graph.compose(root, &Mat4::IDENTITY);

        let world = graph.node(upper).unwrap().world();
        assert!(world
            .transform_point3(Vec3::ZERO)
            .abs_diff_eq(Vec3::new(11.0, 1.0, 0.0), 1e-5));
        // Local -Z rotated a quarter turn about Y lands on -X.
        assert!(world
            .transform_vector3(Vec3::NEG_Z)
            .abs_diff_eq(Vec3::NEG_X, 1e-5));
    }

    #[test]
    fn primitive_rotates_about_its_pivot() {
        let (mut graph, root, upper, _) = arm();
        let local = Transform::from_position_rotation(
            Vec3::ZERO,
            Quat::from_rotation_z(std::f32::consts::PI),
        );
        let prim = graph
            .attach_primitive(upper, "bone", Vec3::new(1.0, 0.0, 0.0), local)
            .unwrap();

        graph.compose(root, &Mat4::IDENTITY);

        let world = graph.primitive(prim).unwrap().world();
        // The pivot is a fixed point of the primitive's own rotation.
        assert!(world
            .transform_point3(Vec3::new(1.0, 0.0, 0.0))
            .abs_diff_eq(Vec3::new(1.0, 0.0, 0.0), 1e-5));
        assert!(world
            .transform_point3(Vec3::ZERO)
            .abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn repeated_composition_is_idempotent() {
        let (mut graph, root, upper, hand) = arm();
        graph
            .set_local(
                root,
                Transform::new(Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_x(0.4), Vec3::ONE),
            )
            .unwrap();
        graph.set_origin(hand, Vec3::new(0.0, 0.0, -1.5)).unwrap();
        graph
            .attach_primitive(hand, "cue", Vec3::new(0.0, 0.0, -0.5), Transform::IDENTITY)
            .unwrap();
        graph
            .attach_primitive(upper, "bone", Vec3::ZERO, Transform::from_position(Vec3::Y))
            .unwrap();

        graph.compose(root, &Mat4::IDENTITY);
        let first = graph.instances();
        graph.compose(root, &Mat4::IDENTITY);
        graph.compose(root, &Mat4::IDENTITY);
        assert_eq!(first, graph.instances());
    }

    #[test]
    fn empty_lists_are_fine() {
        let mut graph = SceneGraph::new();
        let root = graph.add_root("lonely");
        graph.compose(root, &Mat4::IDENTITY);
        assert_eq!(graph.node(root).unwrap().world(), Mat4::IDENTITY);
        assert!(graph.instances().is_empty());
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let mut graph = SceneGraph::new();
        let err = graph.add_child(NodeId(7), "orphan").unwrap_err();
        assert_eq!(err, RigError::UnknownNode(NodeId(7)));
    }

    #[test]
    fn discovery_follows_depth_first_order() {
        let mut graph = SceneGraph::new();
        let root = graph.add_root("shoulder");
        let upper = graph.add_child(root, "upper").unwrap();
        let lower = graph.add_child(upper, "lower").unwrap();
        let hand = graph.add_child(root, "hand").unwrap();

        assert_eq!(graph.descendants(root), vec![root, upper, lower, hand]);
        assert_eq!(graph.deepest_node(root), Some(hand));
        assert_eq!(graph.node_by_depth(root, 2), Some(lower));
        assert_eq!(graph.node_by_depth(root, 9), None);
        assert_eq!(graph.node_by_name(root, "upper"), Some(upper));
    }

    #[test]
    fn evaluate_world_matches_composition() {
        let (mut graph, root, upper, hand) = arm();
        graph
            .set_local(root, Transform::from_position_rotation(Vec3::ONE, Quat::from_rotation_y(1.0)))
            .unwrap();
        graph.set_origin(hand, Vec3::new(0.5, 0.0, -2.0)).unwrap();
        graph.compose(root, &Mat4::IDENTITY);

        for id in [root, upper, hand] {
            let composed = graph.node(id).unwrap().world();
            let evaluated = graph.evaluate_world(id).unwrap();
            assert!(composed.abs_diff_eq(evaluated, 1e-5));
        }
    }

    #[test]
    fn hidden_subtree_is_skipped_by_instances() {
        let (mut graph, root, upper, hand) = arm();
        graph
            .attach_primitive(upper, "bone", Vec3::ZERO, Transform::IDENTITY)
            .unwrap();
        graph
            .attach_primitive(hand, "cue", Vec3::ZERO, Transform::IDENTITY)
            .unwrap();
        graph.compose(root, &Mat4::IDENTITY);
        assert_eq!(graph.instances().len(), 2);

        graph.set_visible(root, false).unwrap();
        assert!(graph.instances().is_empty());

        let bytes = SceneGraph::instance_bytes(&[]);
        assert!(bytes.is_empty());
    }
}
