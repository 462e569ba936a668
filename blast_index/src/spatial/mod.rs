//! Spatial indexing module
//!
//! Provides the bounds arithmetic, the provider contract with the
//! simulation, and the proximity indexes (octree and brute-force scan).

mod bounds;
mod provider;
mod config;
mod node;
mod octree;
mod linear_index;
mod proximity_index;

pub use bounds::Bounds;
pub use provider::{BoundsProvider, Spatial};
pub use config::{OctreeConfig, MAX_SUPPORTED_DEPTH};
pub use octree::{Octree, OctreeStats, UpdateReport};
pub use linear_index::LinearIndex;
pub use proximity_index::ProximityIndex;
