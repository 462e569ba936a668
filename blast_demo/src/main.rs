/// Blast demo: scripted explosions over a debris field.
///
/// Runs the same scenario against the octree and against the brute-force
/// index and reports the hits of every explosion. Both must agree.

mod explosion;
mod world;

use blast_index::blast::{Bounds, Diagnostics, LinearIndex, Octree, OctreeConfig, log::LogSeverity};
use blast_index::{index_error, index_info};
use glam::Vec3;
use explosion::{ExplosionEvent, ExplosionHandler};
use world::{DebrisKey, World};

const SOURCE: &str = "blast::demo";
const TICKS: u32 = 240;
const DT: f32 = 1.0 / 60.0;

fn build_world() -> World {
    let mut world = World::new(
        Vec3::new(0.0, -9.81, 0.0),
        Bounds::cube(Vec3::ZERO, 120.0),
    );
    world.spawn_grid(24, 2.0);
    world
}

/// Explosions fired on given ticks
fn script() -> Vec<(u32, ExplosionEvent)> {
    vec![
        (10, ExplosionEvent { center: Vec3::new(0.0, 0.0, 0.0), radius: 6.0, impulse: 12.0 }),
        (60, ExplosionEvent { center: Vec3::new(-10.0, 0.5, 8.0), radius: 4.0, impulse: 20.0 }),
        (90, ExplosionEvent { center: Vec3::new(12.0, 0.0, -12.0), radius: 9.0, impulse: 8.0 }),
        (150, ExplosionEvent { center: Vec3::new(0.0, 2.0, 0.0), radius: 15.0, impulse: 30.0 }),
        (220, ExplosionEvent { center: Vec3::new(5.0, 0.0, 5.0), radius: 3.0, impulse: 5.0 }),
    ]
}

/// Play the script; returns the sorted hits of every explosion.
fn run(label: &str, mut handler_for: impl FnMut(&World) -> ExplosionHandler) -> Vec<Vec<DebrisKey>> {
    let mut world = build_world();
    let mut handler = handler_for(&world);
    let script = script();
    let mut all_hits = Vec::new();
    let mut despawned = 0;

    index_info!(SOURCE, "[{}] tracking {} bodies ({} rejected)",
        label, handler.tracked(), handler.rejected());

    for tick in 0..TICKS {
        for (_, event) in script.iter().filter(|(at, _)| *at == tick) {
            let mut outcome = handler.handle(event, &mut world);
            outcome.hits.sort();
            index_info!(SOURCE,
                "[{}] tick {:>3}: blast at {:?} r={} hit {} bodies ({} despawned since last query)",
                label, tick, event.center, event.radius, outcome.hits.len(),
                outcome.despawned_before_query);
            all_hits.push(outcome.hits);
        }
        despawned += world.step(DT);
    }

    index_info!(SOURCE, "[{}] done: {} bodies left the arena", label, despawned);
    all_hits
}

fn main() {
    Diagnostics::set_min_severity(LogSeverity::Info);

    let config = OctreeConfig::new(6, 2.0);
    let octree_hits = run("octree", |world| {
        match Octree::<DebrisKey>::with_config(config) {
            Ok(octree) => ExplosionHandler::new(Box::new(octree), world),
            Err(err) => {
                index_error!(SOURCE, "octree setup failed: {}", err);
                std::process::exit(1);
            }
        }
    });
    let linear_hits = run("linear", |world| {
        ExplosionHandler::new(Box::new(LinearIndex::<DebrisKey>::new()), world)
    });

    if octree_hits == linear_hits {
        index_info!(SOURCE, "octree and brute force agree");
    } else {
        index_error!(SOURCE, "octree and brute force disagree");
        std::process::exit(1);
    }
}
