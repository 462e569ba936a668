/// Octree nodes stored in a flat arena.
///
/// Each item is stored in exactly one node: the deepest node whose bounds
/// fully contain the item. If the item straddles a child boundary it stays
/// in the parent. Children are allocated lazily, eight at a time and
/// contiguously, the first time an item needs to descend below a node.
/// Emptied subtrees are kept; a node only ever goes leaf -> subdivided.

use glam::Vec3;
use super::bounds::Bounds;

/// Index of a node in the arena.
pub(crate) type NodeId = usize;

/// Index of the root node in the arena.
pub(crate) const ROOT: NodeId = 0;

/// Outcome of [`NodeArena::relocate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Relocation {
    /// Item is now resident at this node
    Moved(NodeId),
    /// Not even the root encloses the new bounds
    OutsideRoot,
    /// Item was not resident at the node it was looked up in
    NotResident,
}

/// A single node in the octree.
#[derive(Debug)]
pub(crate) struct OctreeNode<K> {
    /// World-space bounds of this node (fixed at creation)
    pub(crate) bounds: Bounds,
    /// Depth of this node (root = 0)
    pub(crate) depth: u32,
    /// Parent node (None for the root)
    pub(crate) parent: Option<NodeId>,
    /// Index of the first of 8 contiguous children (None = leaf)
    pub(crate) first_child: Option<NodeId>,
    /// Items resident at this level (fit here but in no single child)
    pub(crate) items: Vec<K>,
}

impl<K> OctreeNode<K> {
    fn new(bounds: Bounds, depth: u32, parent: Option<NodeId>) -> Self {
        Self {
            bounds,
            depth,
            parent,
            first_child: None,
            items: Vec::new(),
        }
    }
}

/// Arena owning every node of one tree.
#[derive(Debug)]
pub(crate) struct NodeArena<K> {
    nodes: Vec<OctreeNode<K>>,
    max_depth: u32,
}

impl<K: Copy + Eq> NodeArena<K> {
    /// Create an arena holding a single root leaf.
    pub(crate) fn new(root_bounds: Bounds, max_depth: u32) -> Self {
        Self {
            nodes: vec![OctreeNode::new(root_bounds, 0, None)],
            max_depth,
        }
    }

    /// Drop every node except a fresh, empty root.
    pub(crate) fn reset(&mut self) {
        let root_bounds = self.nodes[ROOT].bounds;
        self.nodes.clear();
        self.nodes.push(OctreeNode::new(root_bounds, 0, None));
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn node(&self, id: NodeId) -> &OctreeNode<K> {
        &self.nodes[id]
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &OctreeNode<K>> + '_ {
        self.nodes.iter()
    }

    /// Allocate the 8 children of `id` and return the first child index.
    fn subdivide(&mut self, id: NodeId) -> NodeId {
        let first_child = self.nodes.len();
        let parent_bounds = self.nodes[id].bounds;
        let depth = self.nodes[id].depth + 1;

        for octant in 0..8u8 {
            self.nodes.push(OctreeNode::new(parent_bounds.split(octant), depth, Some(id)));
        }
        self.nodes[id].first_child = Some(first_child);
        first_child
    }

    /// Insert `key` into the subtree rooted at `at`.
    ///
    /// Returns the node now holding the item, or `None` if `bounds` is not
    /// enclosed by `at` (nothing is modified in that case).
    ///
    /// Descends while a single child encloses the item: if the octant of the
    /// min corner encloses the whole box, that is the only candidate. A
    /// straddling item stays resident at the current level without
    /// materializing children.
    pub(crate) fn insert(&mut self, at: NodeId, key: K, bounds: &Bounds) -> Option<NodeId> {
        if !self.nodes[at].bounds.encloses(bounds) {
            return None;
        }

        let mut node_id = at;
        loop {
            let node = &self.nodes[node_id];
            if node.depth >= self.max_depth {
                break;
            }

            let octant = node.bounds.octant_of(bounds.min());
            if !node.bounds.split(octant).encloses(bounds) {
                break;
            }

            let existing_children = node.first_child;
            let first_child = match existing_children {
                Some(first_child) => first_child,
                None => self.subdivide(node_id),
            };
            node_id = first_child + octant as usize;
        }

        self.nodes[node_id].items.push(key);
        Some(node_id)
    }

    /// Remove `key` from the resident list of `at`.
    ///
    /// Returns false if the item is not resident there.
    pub(crate) fn remove(&mut self, at: NodeId, key: K) -> bool {
        let items = &mut self.nodes[at].items;
        match items.iter().position(|&k| k == key) {
            Some(pos) => {
                items.swap_remove(pos);
                true
            }
            None => false,
        }
    }

    /// Nearest node at or above `from` that encloses `bounds`.
    pub(crate) fn enclosing_ancestor(&self, from: NodeId, bounds: &Bounds) -> Option<NodeId> {
        let mut node_id = from;
        loop {
            let node = &self.nodes[node_id];
            if node.bounds.encloses(bounds) {
                return Some(node_id);
            }
            node_id = node.parent?;
        }
    }

    /// Move `key` (resident at `from`) to match its new `bounds`.
    ///
    /// Walks up from `from` to the first enclosing ancestor, then descends
    /// again from there. On failure the item is left untouched.
    pub(crate) fn relocate(&mut self, from: NodeId, key: K, bounds: &Bounds) -> Relocation {
        let Some(target) = self.enclosing_ancestor(from, bounds) else {
            return Relocation::OutsideRoot;
        };
        if !self.remove(from, key) {
            return Relocation::NotResident;
        }
        match self.insert(target, key, bounds) {
            Some(node) => Relocation::Moved(node),
            None => Relocation::OutsideRoot,
        }
    }

    /// Recursively query the subtree at `id` with a sphere.
    ///
    /// 3-way classification at each node:
    /// - nearest point farther than the radius -> skip the entire subtree
    /// - farthest corner within the radius -> collect the subtree untested
    /// - otherwise -> test resident items individually, recurse into children
    ///
    /// `item_bounds` returns the last-known bounds of a resident item.
    pub(crate) fn intersect_sphere<F>(
        &self,
        id: NodeId,
        center: Vec3,
        radius_sq: f32,
        item_bounds: &F,
        results: &mut Vec<K>,
    ) where
        F: Fn(K) -> Option<Bounds>,
    {
        let node = &self.nodes[id];

        if node.bounds.squared_distance(center) > radius_sq {
            return;
        }

        if node.bounds.max_squared_distance(center) <= radius_sq {
            self.collect_all(id, results);
            return;
        }

        for &key in &node.items {
            if let Some(bounds) = item_bounds(key) {
                if bounds.squared_distance(center) <= radius_sq {
                    results.push(key);
                }
            }
        }

        if let Some(first_child) = node.first_child {
            for child in first_child..first_child + 8 {
                self.intersect_sphere(child, center, radius_sq, item_bounds, results);
            }
        }
    }

    /// Collect all items from a node and its entire subtree (no test).
    pub(crate) fn collect_all(&self, id: NodeId, results: &mut Vec<K>) {
        let node = &self.nodes[id];
        results.extend_from_slice(&node.items);

        if let Some(first_child) = node.first_child {
            for child in first_child..first_child + 8 {
                self.collect_all(child, results);
            }
        }
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
