use log::debug;

use super::Package;
use crate::core::aabb::Aabb;

/// One region of the octree.
///
/// A node starts as a leaf and becomes internal, with exactly eight children,
/// once it holds `split_threshold` items and still has depth budget left.
/// Items are stored once, at the deepest node whose bounds fully contain
/// them; an item straddling child boundaries stays on the parent.
#[derive(Debug, Clone)]
pub struct Node<T> {
    bounds: Aabb,
    split_threshold: usize,
    children: Option<Box<[Node<T>; 8]>>,
    items: Vec<Package<T>>,
}

impl<T> Node<T> {
    pub fn new(bounds: Aabb, split_threshold: usize) -> Self {
        Self {
            bounds,
            split_threshold,
            children: None,
            items: Vec::new(),
        }
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn split_threshold(&self) -> usize {
        self.split_threshold
    }

    /// Items stored directly at this node (not in its children).
    pub fn items(&self) -> &[Package<T>] {
        &self.items
    }

    pub fn children(&self) -> Option<&[Node<T>; 8]> {
        self.children.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Stores `package` in this subtree.
    ///
    /// Hands the package back if its bounds are not contained in this node.
    pub fn insert(&mut self, package: Package<T>, depth_budget: usize) -> Result<(), Package<T>> {
        if !self.bounds.contains(&package.bounds) {
            return Err(package);
        }
        self.place(package, depth_budget);
        Ok(())
    }

    fn place(&mut self, mut package: Package<T>, depth_budget: usize) {
        if let Some(children) = self.children.as_deref_mut() {
            let child_budget = depth_budget.saturating_sub(1);
            for child in children.iter_mut() {
                match child.insert(package, child_budget) {
                    Ok(()) => return,
                    Err(rejected) => package = rejected,
                }
            }
            // Straddles a child boundary.
            self.items.push(package);
            return;
        }

        self.items.push(package);
        self.subdivide(depth_budget);
    }

    fn subdivide(&mut self, depth_budget: usize) {
        if depth_budget == 0 || self.items.len() < self.split_threshold {
            return;
        }

        let bounds = self.bounds;
        let threshold = self.split_threshold;
        self.children = Some(Box::new(std::array::from_fn(|octant| {
            Node::new(bounds.octant(octant), threshold)
        })));
        debug!(
            "octree split at {:?} (half {:?}), {} items, budget {}",
            bounds.position,
            bounds.half_size,
            self.items.len(),
            depth_budget
        );

        for item in std::mem::take(&mut self.items) {
            self.place(item, depth_budget);
        }
    }

    /// Appends every item in this subtree whose bounds intersect `region`.
    pub fn query_intersecting<'a>(&'a self, region: &Aabb, out: &mut Vec<&'a T>) {
        if !self.bounds.intersects(region) {
            return;
        }

        out.extend(
            self.items
                .iter()
                .filter(|item| item.bounds.intersects(region))
                .map(|item| &item.data),
        );

        if let Some(children) = self.children() {
            for child in children {
                child.query_intersecting(region, out);
            }
        }
    }

    /// Number of items stored in this subtree.
    pub fn len(&self) -> usize {
        self.items.len()
            + self
                .children()
                .map_or(0, |children| children.iter().map(Node::len).sum())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of nodes in this subtree, this one included.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .map_or(0, |children| children.iter().map(Node::node_count).sum())
    }

    /// Depth-first pre-order traversal; `depth` is the depth of this node.
    pub fn walk<F>(&self, depth: usize, visitor: &mut F)
    where
        F: FnMut(&Node<T>, usize),
    {
        visitor(self, depth);
        if let Some(children) = self.children() {
            for child in children {
                child.walk(depth + 1, visitor);
            }
        }
    }
}
