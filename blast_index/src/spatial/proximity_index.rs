/// Proximity index abstraction.
///
/// A ProximityIndex tracks item identities by their bounds and answers
/// sphere queries. Implementations are the Octree and the brute-force
/// LinearIndex.
///
/// Ownership: the caller (typically the level's explosion manager) creates
/// and owns the index, and passes it by reference to whatever issues queries.

use std::fmt;
use std::hash::Hash;
use glam::Vec3;
use super::bounds::Bounds;
use super::octree::{Octree, UpdateReport};
use super::provider::BoundsProvider;

/// Trait for indexes answering "which items lie within radius R of P".
pub trait ProximityIndex<K> {
    /// Track an item with explicit bounds. Returns false if rejected.
    fn insert_bounds(&mut self, key: K, bounds: Bounds) -> bool;

    /// Replace a tracked item's bounds. Returns false if untracked or rejected.
    fn relocate(&mut self, key: K, bounds: Bounds) -> bool;

    /// Stop tracking an item. Returns false if untracked.
    fn remove(&mut self, key: K) -> bool;

    /// Re-synchronize every tracked item with `provider`.
    fn update(&mut self, provider: &dyn BoundsProvider<K>) -> UpdateReport;

    /// Append every item whose tracked bounds touch the sphere to `results`.
    fn intersect_sphere_into(&self, center: Vec3, radius: f32, results: &mut Vec<K>);

    /// Number of tracked items.
    fn len(&self) -> usize;

    /// Remove every item.
    fn clear(&mut self);

    /// Whether no item is tracked.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Owned snapshot of the items touching the sphere.
    fn intersect_sphere(&self, center: Vec3, radius: f32) -> Vec<K> {
        let mut results = Vec::new();
        self.intersect_sphere_into(center, radius, &mut results);
        results
    }
}

impl<K> ProximityIndex<K> for Octree<K>
where
    K: Copy + Eq + Hash + fmt::Debug,
{
    fn insert_bounds(&mut self, key: K, bounds: Bounds) -> bool {
        Octree::insert_bounds(self, key, bounds)
    }

    fn relocate(&mut self, key: K, bounds: Bounds) -> bool {
        Octree::relocate(self, key, bounds)
    }

    fn remove(&mut self, key: K) -> bool {
        Octree::remove(self, key)
    }

    fn update(&mut self, provider: &dyn BoundsProvider<K>) -> UpdateReport {
        Octree::update(self, provider)
    }

    fn intersect_sphere_into(&self, center: Vec3, radius: f32, results: &mut Vec<K>) {
        Octree::intersect_sphere_into(self, center, radius, results)
    }

    fn len(&self) -> usize {
        Octree::len(self)
    }

    fn clear(&mut self) {
        Octree::clear(self)
    }
}
