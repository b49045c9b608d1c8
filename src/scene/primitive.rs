use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use super::node::NodeId;
use crate::math::Transform;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrimitiveId(pub(crate) u32);

impl PrimitiveId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A visual leaf attached to a scene node.
///
/// The local transform is captured when the primitive is created and never
/// written again, so publishing a world transform cannot feed back into the
/// next composition.
#[derive(Debug, Clone)]
pub struct Primitive {
    pub(crate) name: String,
    pub(crate) node: NodeId,
    pub(crate) pivot: Vec3,
    pub(crate) cached_local: Transform,
    pub(crate) world: Mat4,
}

impl Primitive {
    pub(crate) fn new(name: impl Into<String>, node: NodeId, pivot: Vec3, local: Transform) -> Self {
        Self {
            name: name.into(),
            node,
            pivot,
            cached_local: local,
            world: Mat4::IDENTITY,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    pub fn cached_local(&self) -> Transform {
        self.cached_local
    }

    /// World matrix published by the most recent composition.
    pub fn world(&self) -> Mat4 {
        self.world
    }

    /// `Translate(pivot) · TRS(cached) · Translate(-pivot)`
    pub fn pivot_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.pivot)
            * self.cached_local.to_matrix()
            * Mat4::from_translation(-self.pivot)
    }

    pub(crate) fn publish(&mut self, node_world: &Mat4) {
        self.world = *node_world * self.pivot_matrix();
    }
}

/// Per-primitive record handed to the renderer, laid out for direct upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PrimitiveInstance {
    pub model: [[f32; 4]; 4],
    pub primitive: u32,
    pub _padding: [u32; 3],
}

impl PrimitiveInstance {
    pub fn new(id: PrimitiveId, world: &Mat4) -> Self {
        Self {
            model: world.to_cols_array_2d(),
            primitive: id.0,
            _padding: [0; 3],
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }
}
