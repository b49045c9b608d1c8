use glam::{Mat4, Vec3};

use super::primitive::PrimitiveId;
use crate::math::Transform;

/// Stable handle into a [`SceneGraph`](super::SceneGraph) node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) primitives: Vec<PrimitiveId>,
    /// Where the node sits in its parent's space, applied before `local`.
    pub origin: Vec3,
    pub local: Transform,
    pub visible: bool,
    pub(crate) world: Mat4,
}

impl SceneNode {
    pub(crate) fn new(name: impl Into<String>, parent: Option<NodeId>) -> Self {
        Self {
            name: name.into(),
            parent,
            children: Vec::new(),
            primitives: Vec::new(),
            origin: Vec3::ZERO,
            local: Transform::IDENTITY,
            visible: true,
            world: Mat4::IDENTITY,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn primitives(&self) -> &[PrimitiveId] {
        &self.primitives
    }

    /// World matrix from the most recent composition.
    pub fn world(&self) -> Mat4 {
        self.world
    }

    pub fn world_position(&self) -> Vec3 {
        self.world.w_axis.truncate()
    }

    /// `Translate(origin) · TRS(local)`: this node's contribution on top of its parent.
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.origin) * self.local.to_matrix()
    }
}
