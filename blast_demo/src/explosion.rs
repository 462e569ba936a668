/// Explosion handling: the consumer side of the proximity index.
///
/// Per explosion event: re-synchronize the index once, query the blast
/// sphere, then push every hit body away from the center. How hard a body
/// is pushed is this module's business, not the index's.

use blast_index::blast::{ProximityIndex, Spatial};
use blast_index::index_warn;
use glam::Vec3;
use crate::world::{DebrisKey, World};

/// "Explosion occurred at P with magnitude M"
#[derive(Debug, Clone, Copy)]
pub struct ExplosionEvent {
    pub center: Vec3,
    pub radius: f32,
    /// Impulse applied to every body inside the radius
    pub impulse: f32,
}

/// Result of one handled explosion.
#[derive(Debug, Default)]
pub struct BlastOutcome {
    pub hits: Vec<DebrisKey>,
    pub despawned_before_query: usize,
}

/// Owns the proximity index for the level and reacts to explosion events.
pub struct ExplosionHandler {
    index: Box<dyn ProximityIndex<DebrisKey>>,
    /// Reused result buffer
    hits: Vec<DebrisKey>,
    /// Bodies the index refused at construction (outside its universe)
    rejected: usize,
}

impl ExplosionHandler {
    /// Build the handler and index every body currently in `world`.
    ///
    /// Bodies the index rejects are never hit by an explosion; they are
    /// counted and reported once.
    pub fn new(mut index: Box<dyn ProximityIndex<DebrisKey>>, world: &World) -> Self {
        let rejected = world.bodies()
            .iter()
            .filter(|(key, body)| !index.insert_bounds(*key, body.bounds()))
            .count();

        if rejected > 0 {
            index_warn!("blast::demo",
                "{} of {} bodies lie outside the index and will not be tracked",
                rejected, world.bodies().len());
        }

        Self { index, hits: Vec::new(), rejected }
    }

    pub fn tracked(&self) -> usize {
        self.index.len()
    }

    /// Bodies refused by the index when the handler was built
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Handle one explosion: update, query, apply impulses.
    pub fn handle(&mut self, event: &ExplosionEvent, world: &mut World) -> BlastOutcome {
        let report = self.index.update(world.bodies());

        self.hits.clear();
        self.index.intersect_sphere_into(event.center, event.radius, &mut self.hits);

        for &key in &self.hits {
            if let Some(body) = world.body_mut(key) {
                let away = (body.position - event.center).try_normalize().unwrap_or(Vec3::Y);
                // Lift everything a little so bodies leave the ground
                let direction = (away + Vec3::Y * 0.5).normalize();
                body.velocity += direction * (event.impulse / body.mass);
            }
        }

        BlastOutcome {
            hits: self.hits.clone(),
            despawned_before_query: report.removed,
        }
    }
}

#[cfg(test)]
#[path = "explosion_tests.rs"]
mod tests;
