/// Debris world: stand-in for the physics engine.
///
/// Owns the simulated bodies in a SlotMap so keys stay stable across
/// despawns. Integrates velocities with a fixed timestep and despawns
/// bodies that leave the arena.

use blast_index::blast::{Bounds, Spatial};
use glam::Vec3;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable key for a debris body.
    pub struct DebrisKey;
}

/// A rigid chunk of debris.
#[derive(Debug, Clone)]
pub struct Debris {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Half edge of the chunk's box, 0 for point-like particles
    pub half_size: f32,
    pub mass: f32,
}

impl Spatial for Debris {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn extent(&self) -> Option<Bounds> {
        (self.half_size > 0.0).then(|| Bounds::new(self.position, Vec3::splat(self.half_size)))
    }
}

/// Collection of debris plus the integration step.
pub struct World {
    bodies: SlotMap<DebrisKey, Debris>,
    gravity: Vec3,
    arena: Bounds,
}

impl World {
    pub fn new(gravity: Vec3, arena: Bounds) -> Self {
        Self {
            bodies: SlotMap::with_key(),
            gravity,
            arena,
        }
    }

    /// Lay out a `n × n` grid of chunks resting on the ground plane.
    pub fn spawn_grid(&mut self, n: u32, spacing: f32) -> Vec<DebrisKey> {
        let offset = (n as f32 - 1.0) * spacing * 0.5;
        let mut keys = Vec::with_capacity((n * n) as usize);
        for i in 0..n {
            for j in 0..n {
                let position = Vec3::new(i as f32 * spacing - offset, 0.5, j as f32 * spacing - offset);
                // Every third chunk is a point-like particle
                let half_size = if (i + j) % 3 == 0 { 0.0 } else { 0.5 };
                keys.push(self.bodies.insert(Debris {
                    position,
                    velocity: Vec3::ZERO,
                    half_size,
                    mass: 1.0 + half_size * 4.0,
                }));
            }
        }
        keys
    }

    pub fn bodies(&self) -> &SlotMap<DebrisKey, Debris> {
        &self.bodies
    }

    pub fn body_mut(&mut self, key: DebrisKey) -> Option<&mut Debris> {
        self.bodies.get_mut(key)
    }

    /// Advance the simulation by `dt` seconds; returns how many bodies despawned.
    pub fn step(&mut self, dt: f32) -> usize {
        let gravity = self.gravity;
        for body in self.bodies.values_mut() {
            // Resting bodies stay put until something pushes them
            if body.velocity == Vec3::ZERO {
                continue;
            }
            body.velocity += gravity * dt;
            body.position += body.velocity * dt;

            // Ground contact at y = 0 with heavy damping
            if body.position.y < body.half_size {
                body.position.y = body.half_size;
                body.velocity = Vec3::new(body.velocity.x * 0.5, 0.0, body.velocity.z * 0.5);
                if body.velocity.length_squared() < 0.01 {
                    body.velocity = Vec3::ZERO;
                }
            }
        }

        let before = self.bodies.len();
        let arena = self.arena;
        self.bodies.retain(|_, body| arena.encloses(&body.bounds()));
        before - self.bodies.len()
    }
}
