//! Unit tests for node.rs

use glam::Vec3;
use rustc_hash::FxHashMap;
use super::{NodeArena, Relocation, ROOT};
use crate::spatial::bounds::Bounds;

/// Root cube of edge 16 centered at the origin, 4 levels (leaf edge 1)
fn make_arena() -> NodeArena<u32> {
    NodeArena::new(Bounds::cube(Vec3::ZERO, 16.0), 4)
}

fn point(x: f32, y: f32, z: f32) -> Bounds {
    Bounds::from_point(Vec3::new(x, y, z))
}

#[test]
fn test_new_arena_is_single_leaf() {
    let arena = make_arena();
    assert_eq!(arena.len(), 1);
    assert!(arena.node(ROOT).first_child.is_none());
    assert_eq!(arena.node(ROOT).depth, 0);
}

#[test]
fn test_insert_point_descends_to_max_depth() {
    let mut arena = make_arena();
    let node = arena.insert(ROOT, 1, &point(0.5, 0.5, 0.5)).unwrap();

    let holder = arena.node(node);
    assert_eq!(holder.depth, 4);
    assert_eq!(holder.bounds.min(), Vec3::ZERO);
    assert_eq!(holder.bounds.max(), Vec3::ONE);
    assert_eq!(holder.items, vec![1]);
    // One level of 8 children allocated per descent step
    assert_eq!(arena.len(), 1 + 8 * 4);
}

#[test]
fn test_straddling_item_stays_resident_without_subdividing() {
    let mut arena = make_arena();
    let straddling = Bounds::from_min_max(Vec3::splat(-1.0), Vec3::splat(1.0));

    let node = arena.insert(ROOT, 7, &straddling).unwrap();

    assert_eq!(node, ROOT);
    assert_eq!(arena.len(), 1);
}

#[test]
fn test_straddling_item_below_root() {
    let mut arena = make_arena();
    // Inside octant 7 of the root, straddles the split planes of that child
    let item = Bounds::from_min_max(Vec3::splat(3.0), Vec3::splat(5.0));

    let node = arena.insert(ROOT, 3, &item).unwrap();

    assert_eq!(arena.node(node).depth, 1);
    assert_eq!(arena.node(node).bounds.min(), Vec3::ZERO);
}

#[test]
fn test_insert_outside_root_is_rejected() {
    let mut arena = make_arena();

    assert!(arena.insert(ROOT, 1, &point(9.0, 0.0, 0.0)).is_none());
    let crossing = Bounds::from_min_max(Vec3::splat(6.0), Vec3::splat(10.0));
    assert!(arena.insert(ROOT, 2, &crossing).is_none());

    assert_eq!(arena.len(), 1);
    assert!(arena.node(ROOT).items.is_empty());
}

#[test]
fn test_items_on_root_faces_are_accepted() {
    let mut arena = make_arena();
    assert!(arena.insert(ROOT, 1, &point(8.0, 8.0, 8.0)).is_some());
    assert!(arena.insert(ROOT, 2, &point(-8.0, -8.0, -8.0)).is_some());
}

#[test]
fn test_remove() {
    let mut arena = make_arena();
    let node = arena.insert(ROOT, 1, &point(1.5, 1.5, 1.5)).unwrap();
    arena.insert(ROOT, 2, &point(1.5, 1.5, 1.5)).unwrap();

    assert!(arena.remove(node, 1));
    assert!(!arena.remove(node, 1));
    assert_eq!(arena.node(node).items, vec![2]);
    // Subdivision is never undone
    assert_eq!(arena.len(), 1 + 8 * 4);
}

#[test]
fn test_enclosing_ancestor_walks_up() {
    let mut arena = make_arena();
    let node = arena.insert(ROOT, 1, &point(0.5, 0.5, 0.5)).unwrap();

    assert_eq!(arena.enclosing_ancestor(node, &point(0.25, 0.75, 0.5)), Some(node));

    let ancestor = arena.enclosing_ancestor(node, &point(3.0, 3.0, 3.0)).unwrap();
    assert_eq!(arena.node(ancestor).depth, 2);

    assert_eq!(arena.enclosing_ancestor(node, &point(-0.5, 0.5, 0.5)), Some(ROOT));
    assert_eq!(arena.enclosing_ancestor(node, &point(20.0, 0.0, 0.0)), None);
}

#[test]
fn test_relocate_across_octants() {
    let mut arena = make_arena();
    let from = arena.insert(ROOT, 1, &point(0.5, 0.5, 0.5)).unwrap();

    let moved = point(-6.5, -6.5, -6.5);
    let Relocation::Moved(to) = arena.relocate(from, 1, &moved) else {
        panic!("relocation within the root must succeed");
    };

    assert_ne!(from, to);
    assert!(arena.node(from).items.is_empty());
    assert_eq!(arena.node(to).items, vec![1]);
    assert_eq!(arena.node(to).depth, 4);
    assert!(arena.node(to).bounds.encloses(&moved));
}

#[test]
fn test_relocate_pushes_deeper() {
    let mut arena = make_arena();
    let large = Bounds::from_min_max(Vec3::splat(-1.0), Vec3::splat(1.0));
    let from = arena.insert(ROOT, 1, &large).unwrap();
    assert_eq!(from, ROOT);

    // Shrinks into a single leaf cell of octant 7
    let Relocation::Moved(to) = arena.relocate(from, 1, &point(0.5, 0.5, 0.5)) else {
        panic!("relocation within the root must succeed");
    };
    assert_eq!(arena.node(to).depth, 4);
    assert!(arena.node(ROOT).items.is_empty());
}

#[test]
fn test_relocate_outside_root_leaves_item_in_place() {
    let mut arena = make_arena();
    let from = arena.insert(ROOT, 1, &point(0.5, 0.5, 0.5)).unwrap();

    assert_eq!(arena.relocate(from, 1, &point(100.0, 0.0, 0.0)), Relocation::OutsideRoot);
    assert_eq!(arena.node(from).items, vec![1]);
}

#[test]
fn test_relocate_from_wrong_node_fails() {
    let mut arena = make_arena();
    let from = arena.insert(ROOT, 1, &point(0.5, 0.5, 0.5)).unwrap();

    assert_eq!(arena.relocate(ROOT, 1, &point(-0.5, 0.5, 0.5)), Relocation::NotResident);
    assert_eq!(arena.node(from).items, vec![1]);
}

#[test]
fn test_intersect_sphere_prunes_and_tests_items() {
    let mut arena = make_arena();
    let mut bounds = FxHashMap::default();
    for (key, b) in [
        (1, point(-7.0, -7.0, -7.0)),
        (2, point(0.0, 0.0, 0.0)),
        (3, point(7.0, 7.0, 7.0)),
        (4, Bounds::from_min_max(Vec3::splat(-2.0), Vec3::splat(2.0))),
    ] {
        arena.insert(ROOT, key, &b).unwrap();
        bounds.insert(key, b);
    }
    let lookup = |key: u32| bounds.get(&key).copied();

    let mut results = Vec::new();
    arena.intersect_sphere(ROOT, Vec3::ZERO, 1.0, &lookup, &mut results);
    results.sort();
    assert_eq!(results, vec![2, 4]);

    results.clear();
    arena.intersect_sphere(ROOT, Vec3::new(7.0, 7.0, 6.0), 1.0, &lookup, &mut results);
    assert_eq!(results, vec![3]);

    results.clear();
    arena.intersect_sphere(ROOT, Vec3::ZERO, 400.0, &lookup, &mut results);
    results.sort();
    assert_eq!(results, vec![1, 2, 3, 4]);
}

#[test]
fn test_collect_all() {
    let mut arena = make_arena();
    arena.insert(ROOT, 1, &point(1.0, 1.0, 1.0)).unwrap();
    arena.insert(ROOT, 2, &point(-3.0, 2.0, 5.0)).unwrap();
    arena.insert(ROOT, 3, &Bounds::cube(Vec3::ZERO, 4.0)).unwrap();

    let mut results = Vec::new();
    arena.collect_all(ROOT, &mut results);
    results.sort();
    assert_eq!(results, vec![1, 2, 3]);
}

#[test]
fn test_reset() {
    let mut arena = make_arena();
    arena.insert(ROOT, 1, &point(1.0, 1.0, 1.0)).unwrap();
    arena.reset();

    assert_eq!(arena.len(), 1);
    assert!(arena.node(ROOT).items.is_empty());
    assert_eq!(arena.node(ROOT).bounds, Bounds::cube(Vec3::ZERO, 16.0));
}
