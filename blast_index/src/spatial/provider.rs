/// Provider contract between the index and the simulation.
///
/// The index never owns simulated objects. It only holds their identity
/// and the bounds it last observed, and asks a provider for fresh bounds
/// when inserting or re-synchronizing.

use glam::Vec3;
use slotmap::{Key, SlotMap};
use super::bounds::Bounds;

/// Source of current-frame bounds for item identities.
///
/// Returning `None` means the item no longer exists (destroyed elsewhere in
/// the simulation since the last tick). The octree drops such items
/// silently during [`Octree::update`](super::Octree::update).
pub trait BoundsProvider<K> {
    /// Current bounds of `key`, or `None` if the item is gone.
    fn bounds(&self, key: K) -> Option<Bounds>;
}

/// A simulated object that can be placed in the index.
pub trait Spatial {
    /// World-space position
    fn position(&self) -> Vec3;

    /// World-space extent, if the object knows one (mesh or collider bounds)
    fn extent(&self) -> Option<Bounds> {
        None
    }

    /// Bounds used for indexing.
    ///
    /// Degenerates to a zero-size box at `position()` when no extent is known.
    fn bounds(&self) -> Bounds {
        self.extent().unwrap_or_else(|| Bounds::from_point(self.position()))
    }
}

impl<K: Key, T: Spatial> BoundsProvider<K> for SlotMap<K, T> {
    fn bounds(&self, key: K) -> Option<Bounds> {
        self.get(key).map(Spatial::bounds)
    }
}

impl<K, F> BoundsProvider<K> for F
where
    F: Fn(K) -> Option<Bounds>,
{
    fn bounds(&self, key: K) -> Option<Bounds> {
        self(key)
    }
}
