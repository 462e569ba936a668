/// Brute-force proximity index.
///
/// Tests every tracked item against the sphere (O(n) per query). Suitable
/// for small scenes or as a baseline for comparison with the Octree.
/// It has no bounded universe: any finite bounds are accepted.

use std::hash::Hash;
use glam::Vec3;
use rustc_hash::FxHashMap;
use super::bounds::Bounds;
use super::octree::UpdateReport;
use super::provider::BoundsProvider;
use super::proximity_index::ProximityIndex;

/// Flat map of item -> bounds, scanned linearly.
#[derive(Debug, Clone)]
pub struct LinearIndex<K> {
    items: FxHashMap<K, Bounds>,
}

impl<K: Copy + Eq + Hash> LinearIndex<K> {
    pub fn new() -> Self {
        Self { items: FxHashMap::default() }
    }

    /// Tracked bounds of an item
    pub fn bounds_of(&self, key: K) -> Option<Bounds> {
        self.items.get(&key).copied()
    }
}

impl<K: Copy + Eq + Hash> Default for LinearIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash> ProximityIndex<K> for LinearIndex<K> {
    fn insert_bounds(&mut self, key: K, bounds: Bounds) -> bool {
        if !bounds.center.is_finite() || !bounds.extents.is_finite() {
            return false;
        }
        self.items.insert(key, bounds);
        true
    }

    fn relocate(&mut self, key: K, bounds: Bounds) -> bool {
        if !bounds.center.is_finite() || !bounds.extents.is_finite() {
            return false;
        }
        match self.items.get_mut(&key) {
            Some(tracked) => {
                *tracked = bounds;
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, key: K) -> bool {
        self.items.remove(&key).is_some()
    }

    fn update(&mut self, provider: &dyn BoundsProvider<K>) -> UpdateReport {
        let mut report = UpdateReport::default();
        let keys: Vec<K> = self.items.keys().copied().collect();

        for key in keys {
            match provider.bounds(key) {
                None => {
                    self.items.remove(&key);
                    report.removed += 1;
                }
                Some(bounds) if self.items.get(&key) == Some(&bounds) => {
                    report.unchanged += 1;
                }
                Some(bounds) => {
                    if self.relocate(key, bounds) {
                        report.relocated += 1;
                    } else {
                        report.rejected += 1;
                    }
                }
            }
        }
        report
    }

    fn intersect_sphere_into(&self, center: Vec3, radius: f32, results: &mut Vec<K>) {
        results.extend(
            self.items.iter()
                .filter(|(_, bounds)| bounds.intersects_sphere(center, radius))
                .map(|(&key, _)| key),
        );
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}
