use blast_index::blast::{Bounds, LinearIndex, Octree, ProximityIndex};
use glam::Vec3;
use crate::world::World;
use super::*;

fn small_world() -> (World, Vec<DebrisKey>) {
    let mut world = World::new(Vec3::new(0.0, -9.81, 0.0), Bounds::cube(Vec3::ZERO, 60.0));
    // 3x3 grid on x/z in {-2, 0, 2}, resting at y = 0.5
    let keys = world.spawn_grid(3, 2.0);
    (world, keys)
}

fn indexes() -> Vec<Box<dyn ProximityIndex<DebrisKey>>> {
    vec![
        Box::new(Octree::<DebrisKey>::new(4, 2.0).unwrap()),
        Box::new(LinearIndex::<DebrisKey>::new()),
    ]
}

#[test]
fn test_handler_tracks_every_body() {
    for index in indexes() {
        let (world, keys) = small_world();
        let handler = ExplosionHandler::new(index, &world);
        assert_eq!(handler.tracked(), keys.len());
        assert_eq!(handler.rejected(), 0);
    }
}

#[test]
fn test_bodies_outside_the_octree_are_counted_as_rejected() {
    let mut world = World::new(Vec3::ZERO, Bounds::cube(Vec3::ZERO, 200.0));
    let keys = world.spawn_grid(3, 2.0);
    // Inside the arena, outside the octree universe [-16, 16]^3
    if let Some(body) = world.body_mut(keys[0]) {
        body.position = Vec3::new(50.0, 0.5, 0.0);
    }

    let octree = ExplosionHandler::new(Box::new(Octree::<DebrisKey>::new(4, 2.0).unwrap()), &world);
    assert_eq!(octree.rejected(), 1);
    assert_eq!(octree.tracked(), keys.len() - 1);

    // The brute-force index has no universe
    let linear = ExplosionHandler::new(Box::new(LinearIndex::<DebrisKey>::new()), &world);
    assert_eq!(linear.rejected(), 0);
    assert_eq!(linear.tracked(), keys.len());
}

#[test]
fn test_blast_hits_only_bodies_in_radius() {
    for index in indexes() {
        let (mut world, keys) = small_world();
        let center_key = keys[4];
        let mut handler = ExplosionHandler::new(index, &world);

        let event = ExplosionEvent { center: Vec3::new(0.0, 0.5, 0.0), radius: 1.0, impulse: 6.0 };
        let outcome = handler.handle(&event, &mut world);

        assert_eq!(outcome.hits, vec![center_key]);
        assert_eq!(outcome.despawned_before_query, 0);

        // Body sits at the blast center: pushed straight up, impulse / mass (3.0)
        let velocity = world.bodies()[center_key].velocity;
        assert!((velocity - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);
    }
}

#[test]
fn test_bodies_leaving_the_arena_are_dropped_before_query() {
    for index in indexes() {
        let (mut world, keys) = small_world();
        let mut handler = ExplosionHandler::new(index, &world);

        if let Some(body) = world.body_mut(keys[0]) {
            body.position = Vec3::new(100.0, 0.5, 0.0);
        }
        assert_eq!(world.step(0.0), 1);

        let event = ExplosionEvent { center: Vec3::ZERO, radius: 10.0, impulse: 1.0 };
        let outcome = handler.handle(&event, &mut world);

        assert_eq!(outcome.despawned_before_query, 1);
        assert_eq!(outcome.hits.len(), keys.len() - 1);
        assert!(!outcome.hits.contains(&keys[0]));
        assert_eq!(handler.tracked(), keys.len() - 1);
    }
}
