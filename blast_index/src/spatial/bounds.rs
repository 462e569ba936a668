/// Axis-aligned bounding box arithmetic.
///
/// Bounds are immutable values stored as center + half-extents. Every
/// operation returns a new value; nothing mutates in place.

use glam::Vec3;

/// Axis-Aligned Bounding Box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Center point (x, y, z)
    pub center: Vec3,
    /// Half-extents along each axis (never negative)
    pub extents: Vec3,
}

impl Bounds {
    /// Create bounds from a center and half-extents.
    ///
    /// Negative extents are folded to their absolute value.
    pub fn new(center: Vec3, extents: Vec3) -> Self {
        Self { center, extents: extents.abs() }
    }

    /// Create bounds from two opposite corners (in any order).
    pub fn from_min_max(a: Vec3, b: Vec3) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self {
            center: (min + max) * 0.5,
            extents: (max - min) * 0.5,
        }
    }

    /// Zero-size bounds at a point.
    ///
    /// Used for items that report a position but no geometric extent.
    pub fn from_point(point: Vec3) -> Self {
        Self { center: point, extents: Vec3::ZERO }
    }

    /// Cube centered at `center` with the given edge length.
    pub fn cube(center: Vec3, edge: f32) -> Self {
        Self::new(center, Vec3::splat(edge * 0.5))
    }

    /// Minimum corner
    pub fn min(&self) -> Vec3 {
        self.center - self.extents
    }

    /// Maximum corner
    pub fn max(&self) -> Vec3 {
        self.center + self.extents
    }

    /// Full edge lengths
    pub fn size(&self) -> Vec3 {
        self.extents * 2.0
    }

    /// Test if this box fully encloses `inner` (touching faces count).
    pub fn encloses(&self, inner: &Bounds) -> bool {
        let (min, max) = (self.min(), self.max());
        let (inner_min, inner_max) = (inner.min(), inner.max());
        min.x <= inner_min.x && max.x >= inner_max.x
        && min.y <= inner_min.y && max.y >= inner_max.y
        && min.z <= inner_min.z && max.z >= inner_max.z
    }

    /// Test if this box overlaps or touches another box.
    pub fn intersects(&self, other: &Bounds) -> bool {
        let (min, max) = (self.min(), self.max());
        let (other_min, other_max) = (other.min(), other.max());
        min.x <= other_max.x && max.x >= other_min.x
        && min.y <= other_max.y && max.y >= other_min.y
        && min.z <= other_max.z && max.z >= other_min.z
    }

    /// Smallest box enclosing both boxes.
    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::from_min_max(self.min().min(other.min()), self.max().max(other.max()))
    }

    /// Squared distance from `point` to the nearest point of the box.
    ///
    /// Zero when the point is inside. No square root is taken so callers
    /// compare against `radius²`.
    pub fn squared_distance(&self, point: Vec3) -> f32 {
        let outside = ((point - self.center).abs() - self.extents).max(Vec3::ZERO);
        outside.length_squared()
    }

    /// Squared distance from `point` to the farthest corner of the box.
    ///
    /// If this is within `radius²`, every point of the box lies inside the
    /// sphere.
    pub fn max_squared_distance(&self, point: Vec3) -> f32 {
        let far = (point - self.center).abs() + self.extents;
        far.length_squared()
    }

    /// Test if the box touches the sphere (inclusive).
    ///
    /// A negative or NaN radius describes an empty sphere and never matches.
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        radius >= 0.0 && self.squared_distance(center) <= radius * radius
    }

    /// Bounds of octant `octant` (0-7) after halving along all three axes.
    ///
    /// Octant bit layout: bit0 = X, bit1 = Y, bit2 = Z.
    /// - 0 = negative side, 1 = positive side for each axis.
    pub fn split(&self, octant: u8) -> Bounds {
        let half = self.extents * 0.5;
        let sign = Vec3::new(
            if octant & 1 == 0 { -1.0 } else { 1.0 },
            if octant & 2 == 0 { -1.0 } else { 1.0 },
            if octant & 4 == 0 { -1.0 } else { 1.0 },
        );
        Bounds {
            center: self.center + sign * half,
            extents: half,
        }
    }

    /// Octant of this box whose half-space contains `point`.
    ///
    /// Points on a splitting plane select the positive side.
    pub fn octant_of(&self, point: Vec3) -> u8 {
        ((point.x >= self.center.x) as u8)
            | (((point.y >= self.center.y) as u8) << 1)
            | (((point.z >= self.center.z) as u8) << 2)
    }
}

#[cfg(test)]
#[path = "bounds_tests.rs"]
mod tests;
