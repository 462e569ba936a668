/// Octree configuration.
///
/// Fixed for the lifetime of an octree. The root is a cube centered at the
/// origin with edge `min_size × 2^max_depth`, so cells at `max_depth` have
/// edge `min_size`.

use glam::Vec3;
use crate::error::Result;
use crate::index_bail;
use super::bounds::Bounds;

/// Deepest tree accepted by [`OctreeConfig::validate`].
///
/// Matches the f32 mantissa width: up to this depth every split plane is
/// exactly representable relative to the root.
pub const MAX_SUPPORTED_DEPTH: u32 = f32::MANTISSA_DIGITS;

/// Depth ceiling and leaf cell size of an octree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OctreeConfig {
    /// Maximum tree depth (root = 0). Must be in `1..=MAX_SUPPORTED_DEPTH`.
    pub max_depth: u32,
    /// Edge length of a cell at `max_depth`. Must be finite and > 0, and
    /// small enough that the root edge stays finite.
    pub min_size: f32,
}

impl OctreeConfig {
    /// Create a configuration (not validated until used).
    pub fn new(max_depth: u32, min_size: f32) -> Self {
        Self { max_depth, min_size }
    }

    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if `max_depth` is 0 or above
    /// `MAX_SUPPORTED_DEPTH`, if `min_size` is not a positive finite number,
    /// or if the resulting root edge overflows to infinity.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            index_bail!("blast::OctreeConfig", "max_depth must be >= 1 (got 0)");
        }
        if self.max_depth > MAX_SUPPORTED_DEPTH {
            index_bail!("blast::OctreeConfig",
                "max_depth must be <= {} (got {})", MAX_SUPPORTED_DEPTH, self.max_depth);
        }
        if !self.min_size.is_finite() || self.min_size <= 0.0 {
            index_bail!("blast::OctreeConfig",
                "min_size must be a positive finite number (got {})", self.min_size);
        }
        if !self.root_edge().is_finite() {
            index_bail!("blast::OctreeConfig",
                "root edge min_size * 2^max_depth is not finite (min_size {}, max_depth {})",
                self.min_size, self.max_depth);
        }
        Ok(())
    }

    /// Edge length of the root cube: `min_size × 2^max_depth`
    ///
    /// Saturates to infinity instead of overflowing for depths no valid
    /// configuration can have.
    pub fn root_edge(&self) -> f32 {
        let exponent = i32::try_from(self.max_depth).unwrap_or(i32::MAX);
        self.min_size * 2f32.powi(exponent)
    }

    /// Root bounds: cube of edge `root_edge()` centered at the origin
    pub fn root_bounds(&self) -> Bounds {
        Bounds::cube(Vec3::ZERO, self.root_edge())
    }
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self::new(6, 1.0)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
