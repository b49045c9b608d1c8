//! Scene graph module
//!
//! Handle-addressed node arena with origin-offset composition and pivoted
//! primitives, plus the render hand-off records.

mod graph;
mod node;
mod primitive;

pub use graph::SceneGraph;
pub use node::{NodeId, SceneNode};
pub use primitive::{Primitive, PrimitiveId, PrimitiveInstance};
