use super::{node::Node, Package};
use crate::{config::OctreeConfig, core::aabb::Aabb};

/// Region index over items keyed by axis-aligned bounds.
///
/// Rebuilt from scratch every fixed step: [`Octree::reset`] drops all items
/// and the subdivision structure, then the tree builder inserts the current
/// population again. Items whose bounds leave the world bounds are kept in an
/// unindexed overflow list, so nothing inserted is ever lost.
#[derive(Debug, Clone)]
pub struct Octree<T> {
    root: Node<T>,
    max_depth: usize,
    unbound: Vec<Package<T>>,
}

impl<T> Octree<T> {
    pub fn new(world_bounds: Aabb, split_threshold: usize, max_depth: usize) -> Self {
        Self {
            root: Node::new(world_bounds, split_threshold),
            max_depth,
            unbound: Vec::new(),
        }
    }

    pub fn from_config(config: &OctreeConfig) -> Self {
        Self::new(config.world_bounds, config.split_threshold, config.max_depth)
    }

    pub fn insert(&mut self, data: T, bounds: Aabb) {
        if let Err(package) = self.root.insert(Package { bounds, data }, self.max_depth) {
            self.unbound.push(package);
        }
    }

    /// Every item whose bounds intersect `region`: unbound items first, then
    /// items in tree order.
    pub fn get_intersecting(&self, region: &Aabb) -> Vec<&T> {
        let mut results: Vec<&T> = self
            .unbound
            .iter()
            .filter(|package| package.bounds.intersects(region))
            .map(|package| &package.data)
            .collect();
        self.root.query_intersecting(region, &mut results);
        results
    }

    /// Returns the tree to an empty leaf root with the same parameters.
    pub fn reset(&mut self) {
        self.root = Node::new(*self.root.bounds(), self.root.split_threshold());
        self.unbound.clear();
    }

    pub fn bounds(&self) -> &Aabb {
        self.root.bounds()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn split_threshold(&self) -> usize {
        self.root.split_threshold()
    }

    pub fn root(&self) -> &Node<T> {
        &self.root
    }

    pub fn unbound_items(&self) -> &[Package<T>] {
        &self.unbound
    }

    /// Stored items, unbound ones included.
    pub fn len(&self) -> usize {
        self.root.len() + self.unbound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Visits every node depth-first with its depth (root = 0).
    pub fn walk<F>(&self, mut visitor: F)
    where
        F: FnMut(&Node<T>, usize),
    {
        self.root.walk(0, &mut visitor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn empty_tree_returns_no_results() {
        let tree: Octree<u32> = Octree::new(Aabb::new(Vec3::ZERO, Vec3::splat(10.0)), 2, 8);
        assert!(tree.get_intersecting(tree.bounds()).is_empty());
        assert!(tree.is_empty());
    }

    #[test]
    fn reset_severs_children() {
        let mut tree = Octree::new(Aabb::new(Vec3::ZERO, Vec3::splat(10.0)), 1, 8);
        tree.insert(1, Aabb::new(Vec3::splat(5.0), Vec3::splat(0.5)));
        tree.insert(2, Aabb::new(Vec3::splat(-5.0), Vec3::splat(0.5)));
        tree.insert(3, Aabb::new(Vec3::splat(50.0), Vec3::splat(0.5)));
        assert!(!tree.root().is_leaf());
        assert_eq!(tree.unbound_items().len(), 1);

        tree.reset();
        assert!(tree.root().is_leaf());
        assert_eq!(tree.node_count(), 1);
        assert!(tree.unbound_items().is_empty());
        assert_eq!(tree.split_threshold(), 1);
    }
}
