//! Lazily subdividing octree used as the broad-phase index.

pub mod node;
pub mod tree;

pub use node::Node;
pub use tree::Octree;

use crate::core::aabb::Aabb;

/// An item stored in the tree: its spatial key and an opaque payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Package<T> {
    pub bounds: Aabb,
    pub data: T,
}
