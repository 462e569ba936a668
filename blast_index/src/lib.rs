/*!
# Blast Index

Dynamic octree for blast-radius queries.

This crate answers "which simulated objects lie within radius R of point P"
for explosion and area-effect events, and keeps that answer correct as
objects move, spawn and despawn between ticks. Placement is maintained
incrementally: every tracked item has a back-reference to the node holding
it, so removal and local moves never rebuild the tree from the root.

## Architecture

- **Bounds**: axis-aligned box arithmetic (containment, sphere distance, octant split)
- **BoundsProvider / Spatial**: contract with the simulation that owns the objects
- **Octree**: lazily subdivided octree plus the identity caches
- **LinearIndex**: brute-force reference index with the same query contract
- **ProximityIndex**: trait implemented by both, used by consumers

The index is single-threaded and owned by its caller. A typical consumer
calls [`Octree::update`](blast::Octree::update) once per query episode, then
issues one or more [`Octree::intersect_sphere`](blast::Octree::intersect_sphere)
queries.
*/

// Internal modules
mod error;
mod diagnostics;
pub mod log;
pub mod spatial;

// Main blast namespace module
pub mod blast {
    // Error types
    pub use crate::error::{Error, Result};

    // Global log sink
    pub use crate::diagnostics::Diagnostics;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // index_* macros are exported at the crate root, not here
    }

    // Spatial index types
    pub use crate::spatial::{
        Bounds, BoundsProvider, Spatial,
        Octree, OctreeConfig, OctreeStats, UpdateReport, MAX_SUPPORTED_DEPTH,
        LinearIndex, ProximityIndex,
    };
}

// Re-export math library at crate root
pub use glam;
