/// Octree: dynamic bounded spatial index for blast-radius queries.
///
/// Single-node placement: each item is stored in exactly one node, the
/// deepest node whose bounds fully contain the item's bounds. A reverse
/// lookup (item -> holding node + last-known bounds) gives removal and
/// relocation without descending from the root.
///
/// The root is a cube centered at the origin whose edge is fixed by the
/// configuration. Items whose bounds leave the root cannot be tracked.

use std::fmt;
use std::hash::Hash;
use glam::Vec3;
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::{index_debug, index_trace, index_warn};
use super::bounds::Bounds;
use super::config::OctreeConfig;
use super::node::{NodeArena, NodeId, Relocation, ROOT};
use super::provider::BoundsProvider;

/// Reverse lookup entry for a tracked item.
#[derive(Debug, Clone, Copy)]
struct ItemLocation {
    /// Node currently holding the item
    node: NodeId,
    /// Bounds observed at the last successful insert or relocation
    bounds: Bounds,
}

/// Outcome of one [`Octree::update`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Items whose bounds did not change
    pub unchanged: usize,
    /// Items whose bounds changed and were re-placed
    pub relocated: usize,
    /// Items the provider reported as destroyed (dropped from the index)
    pub removed: usize,
    /// Items whose new bounds left the root (kept at their previous placement)
    pub rejected: usize,
}

impl UpdateReport {
    /// Whether the pass touched the tree at all
    pub fn changed(&self) -> bool {
        self.relocated + self.removed > 0
    }
}

/// Structural snapshot, for diagnostics and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OctreeStats {
    /// Allocated nodes, root included
    pub nodes: usize,
    /// Nodes that have children
    pub subdivided: usize,
    /// Tracked items
    pub items: usize,
    /// Depth of the deepest node holding at least one item
    pub deepest_item_depth: u32,
}

/// Dynamic octree keyed by item identity.
///
/// Typical use per query episode:
///
/// ```
/// use blast_index::blast::{Bounds, Octree};
/// use blast_index::glam::Vec3;
///
/// let mut octree = Octree::<u32>::new(4, 1.0)?;
/// octree.insert_bounds(1, Bounds::from_point(Vec3::new(-7.0, -7.0, -7.0)));
/// octree.insert_bounds(2, Bounds::from_point(Vec3::ZERO));
///
/// // Items move in the simulation: re-synchronize, then query.
/// let positions = |key: u32| Some(Bounds::from_point(Vec3::splat(key as f32)));
/// octree.update(&positions);
///
/// let hits = octree.intersect_sphere(Vec3::splat(1.0), 0.5);
/// assert_eq!(hits, vec![1]);
/// # Ok::<(), blast_index::blast::Error>(())
/// ```
pub struct Octree<K> {
    /// Fixed configuration (depth ceiling, leaf cell size)
    config: OctreeConfig,
    /// Node arena (root at index 0)
    nodes: NodeArena<K>,
    /// Reverse lookup: item key -> (holding node, last-known bounds)
    locations: FxHashMap<K, ItemLocation>,
    /// Reused key buffer for update() passes
    scratch: Vec<K>,
}

impl<K> Octree<K>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    /// Create an empty octree.
    ///
    /// The root cube has edge `min_size × 2^max_depth` and is centered at
    /// the origin.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if `max_depth` is 0 (or above
    /// `MAX_SUPPORTED_DEPTH`), if `min_size` is not a positive finite number,
    /// or if the root edge would not be finite.
    pub fn new(max_depth: u32, min_size: f32) -> Result<Self> {
        Self::with_config(OctreeConfig::new(max_depth, min_size))
    }

    /// Create an empty octree from a configuration.
    pub fn with_config(config: OctreeConfig) -> Result<Self> {
        config.validate()?;

        index_debug!("blast::Octree",
            "created: max_depth={} min_size={} root_edge={}",
            config.max_depth, config.min_size, config.root_edge());

        Ok(Self {
            config,
            nodes: NodeArena::new(config.root_bounds(), config.max_depth),
            locations: FxHashMap::default(),
            scratch: Vec::new(),
        })
    }

    /// Create an octree and bulk-insert `items` using `provider`.
    ///
    /// Items that cannot be inserted are skipped; only the configuration can
    /// make this fail.
    pub fn with_items<P, I>(config: OctreeConfig, items: I, provider: &P) -> Result<Self>
    where
        P: BoundsProvider<K> + ?Sized,
        I: IntoIterator<Item = K>,
    {
        let mut octree = Self::with_config(config)?;
        octree.insert_many(items, provider);
        Ok(octree)
    }

    // ===== MUTATION =====

    /// Insert an item using its current bounds from `provider`.
    ///
    /// Returns false if the provider reports the item as gone, or if its
    /// bounds are not fully enclosed by the root.
    pub fn insert<P>(&mut self, key: K, provider: &P) -> bool
    where
        P: BoundsProvider<K> + ?Sized,
    {
        match provider.bounds(key) {
            Some(bounds) => self.insert_bounds(key, bounds),
            None => false,
        }
    }

    /// Insert an item with explicit bounds.
    ///
    /// Inserting a key that is already tracked relocates it instead.
    /// Returns false if `bounds` is not fully enclosed by the root.
    pub fn insert_bounds(&mut self, key: K, bounds: Bounds) -> bool {
        if self.locations.contains_key(&key) {
            return self.relocate(key, bounds);
        }

        match self.nodes.insert(ROOT, key, &bounds) {
            Some(node) => {
                self.locations.insert(key, ItemLocation { node, bounds });
                true
            }
            None => {
                index_trace!("blast::Octree",
                    "insert rejected: {:?} outside root ({:?})", key, bounds);
                false
            }
        }
    }

    /// Insert each item independently; returns how many were inserted.
    ///
    /// There is no atomicity: earlier successes stay in place when a later
    /// item is rejected.
    pub fn insert_many<P, I>(&mut self, items: I, provider: &P) -> usize
    where
        P: BoundsProvider<K> + ?Sized,
        I: IntoIterator<Item = K>,
    {
        items.into_iter()
            .filter(|&key| self.insert(key, provider))
            .count()
    }

    /// Re-place a tracked item after it moved.
    ///
    /// Starts from the node currently holding the item and walks up to the
    /// first ancestor enclosing `bounds`, then descends again as deep as the
    /// item fits. Returns false if the item is not tracked, or if `bounds`
    /// leave the root; the item then keeps its previous placement and
    /// last-known bounds.
    pub fn relocate(&mut self, key: K, bounds: Bounds) -> bool {
        let Some(location) = self.locations.get(&key).copied() else {
            return false;
        };
        if location.bounds == bounds {
            return true;
        }

        match self.nodes.relocate(location.node, key, &bounds) {
            Relocation::Moved(node) => {
                self.locations.insert(key, ItemLocation { node, bounds });
                true
            }
            Relocation::OutsideRoot => {
                index_debug!("blast::Octree",
                    "relocation rejected: {:?} moved outside root ({:?})", key, bounds);
                false
            }
            Relocation::NotResident => {
                index_warn!("blast::Octree",
                    "relocation failed: {:?} is not resident at its recorded node {}",
                    key, location.node);
                false
            }
        }
    }

    /// Re-synchronize every tracked item with `provider`.
    ///
    /// Items whose bounds are unchanged are skipped after an equality check.
    /// Items the provider reports as gone are removed. Others are relocated
    /// from their current node. Call once per query episode, after the
    /// simulation has advanced and before querying.
    pub fn update<P>(&mut self, provider: &P) -> UpdateReport
    where
        P: BoundsProvider<K> + ?Sized,
    {
        let mut report = UpdateReport::default();
        let mut keys = std::mem::take(&mut self.scratch);
        keys.clear();
        keys.extend(self.locations.keys().copied());

        for &key in &keys {
            match provider.bounds(key) {
                None => {
                    self.remove(key);
                    report.removed += 1;
                }
                Some(bounds) => {
                    let unchanged = self.locations.get(&key)
                        .is_some_and(|location| location.bounds == bounds);
                    if unchanged {
                        report.unchanged += 1;
                    } else if self.relocate(key, bounds) {
                        report.relocated += 1;
                    } else {
                        report.rejected += 1;
                    }
                }
            }
        }

        keys.clear();
        self.scratch = keys;

        if report.changed() || report.rejected > 0 {
            index_trace!("blast::Octree",
                "update: {} relocated, {} removed, {} rejected, {} unchanged",
                report.relocated, report.removed, report.rejected, report.unchanged);
        }
        report
    }

    /// Stop tracking an item.
    ///
    /// Returns false if the item has no back-reference.
    pub fn remove(&mut self, key: K) -> bool {
        let Some(location) = self.locations.get(&key).copied() else {
            return false;
        };
        if !self.nodes.remove(location.node, key) {
            return false;
        }
        self.locations.remove(&key);
        true
    }

    /// Like [`remove`](Self::remove), but reports an unknown key as an error.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownItem` if the item has no back-reference.
    pub fn try_remove(&mut self, key: K) -> Result<()> {
        if self.remove(key) {
            Ok(())
        } else {
            Err(Error::UnknownItem(format!("{:?}", key)))
        }
    }

    /// Remove every item and drop all subdivisions.
    pub fn clear(&mut self) {
        self.nodes.reset();
        self.locations.clear();
    }

    // ===== QUERIES =====

    /// All tracked items whose last-known bounds touch the sphere.
    ///
    /// The result is an owned snapshot in unspecified order. Call
    /// [`update`](Self::update) first if items may have moved.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Vec<K> {
        let mut results = Vec::new();
        self.intersect_sphere_into(center, radius, &mut results);
        results
    }

    /// Same as [`intersect_sphere`](Self::intersect_sphere), appending to `results`.
    ///
    /// A negative or NaN radius matches nothing.
    pub fn intersect_sphere_into(&self, center: Vec3, radius: f32, results: &mut Vec<K>) {
        if !(radius >= 0.0) {
            return;
        }

        let item_bounds = |key: K| self.locations.get(&key).map(|location| location.bounds);
        self.nodes.intersect_sphere(ROOT, center, radius * radius, &item_bounds, results);
    }

    // ===== INTROSPECTION =====

    /// Number of tracked items
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether no item is tracked
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Whether `key` is tracked
    pub fn contains(&self, key: K) -> bool {
        self.locations.contains_key(&key)
    }

    /// Last-known bounds of a tracked item
    pub fn bounds_of(&self, key: K) -> Option<Bounds> {
        self.locations.get(&key).map(|location| location.bounds)
    }

    /// Iterate over all tracked item keys
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.locations.keys().copied()
    }

    /// Configuration this octree was built with
    pub fn config(&self) -> OctreeConfig {
        self.config
    }

    /// Bounds of the root node (the indexed universe)
    pub fn root_bounds(&self) -> Bounds {
        self.nodes.node(ROOT).bounds
    }

    /// Number of allocated nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Depth of the node currently holding `key`
    pub fn depth_of(&self, key: K) -> Option<u32> {
        self.locations.get(&key).map(|location| self.nodes.node(location.node).depth)
    }

    /// Structural snapshot
    pub fn stats(&self) -> OctreeStats {
        let mut stats = OctreeStats {
            nodes: self.nodes.len(),
            items: self.locations.len(),
            ..OctreeStats::default()
        };
        for node in self.nodes.iter() {
            if node.first_child.is_some() {
                stats.subdivided += 1;
            }
            if !node.items.is_empty() {
                stats.deepest_item_depth = stats.deepest_item_depth.max(node.depth);
            }
        }
        stats
    }
}

impl<K: fmt::Debug> fmt::Debug for Octree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Octree")
            .field("config", &self.config)
            .field("items", &self.locations.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "octree_tests.rs"]
mod tests;
