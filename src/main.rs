//! Circle Physics - native demo
//!
//! Builds a seeded race track (drones, checkpoints, rocks), flies the drones
//! around it and logs checkpoint progress.
//!
//! Usage: `circle-physics [config.json] [seed]`

use circle_physics::{BodyHandle, OwnerTag, PhysicsConfig, World};
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

const DRONE_RADIUS: f32 = 40.0;
const CP_RADIUS: f32 = 125.0;
const TRACK_RADIUS: f32 = 1500.0;
const CHECKPOINTS: u32 = 6;
const DRONES: u32 = 4;
const ROCKS: u32 = 12;
const FRAMES: u32 = 1200;
/// Velocity added per frame toward the next checkpoint
const THRUST: f32 = 1.5;

struct Drone {
    handle: BodyHandle,
    next_cp: u32,
    passed: u32,
}

fn main() {
    env_logger::init();
    log::info!("Circle Physics demo starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match PhysicsConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => PhysicsConfig::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(404);
    log::info!("Seed {seed}, config {config:?}");

    let mut rng = Pcg32::seed_from_u64(seed);
    let mut world = World::new(config);
    let checkpoints = build_track(&mut world, &mut rng);
    let mut drones = spawn_drones(&mut world, checkpoints[0]);

    let mut total_resolved = 0;
    for frame in 0..FRAMES {
        steer(&mut world, &drones, &checkpoints);

        let mut crossings = Vec::new();
        let stats = world.step(|drone, other, is_sensor| {
            if let (true, Some(OwnerTag(player)), Some(OwnerTag(cp))) =
                (is_sensor, drone.owner, other.owner)
            {
                crossings.push((player, cp));
            }
        });
        total_resolved += stats.resolved;

        for (player, cp) in crossings {
            let Some(drone) = drones.get_mut(player as usize) else {
                continue;
            };
            if drone.next_cp == cp {
                drone.passed += 1;
                drone.next_cp = (cp + 1) % CHECKPOINTS;
                log::info!("Frame {frame}: drone {player} passed checkpoint {cp}");
            }
        }
    }

    for (player, drone) in drones.iter().enumerate() {
        let laps = drone.passed / CHECKPOINTS;
        log::info!(
            "Drone {player}: {} checkpoints ({laps} laps), next {}",
            drone.passed,
            drone.next_cp
        );
    }
    log::info!("{total_resolved} contacts resolved over {FRAMES} frames");

    for (handle, body) in world.registry().iter() {
        log::debug!(
            "{:?} #{}: pos {} vel {}",
            body.category(),
            handle.index(),
            body.pos,
            body.vel
        );
    }
}

/// Checkpoints evenly spaced on a ring, rocks scattered between them
fn build_track(world: &mut World, rng: &mut Pcg32) -> Vec<Vec2> {
    let checkpoints: Vec<Vec2> = (0..CHECKPOINTS)
        .map(|i| {
            let theta = i as f32 / CHECKPOINTS as f32 * std::f32::consts::TAU;
            Vec2::new(theta.cos(), theta.sin()) * TRACK_RADIUS
        })
        .collect();

    for (i, cp) in checkpoints.iter().enumerate() {
        let body = World::create_body(cp.x, cp.y, CP_RADIUS, 1.0, true, false)
            .with_owner(OwnerTag(i as u32));
        world.add(body);
    }

    let mut placed = 0;
    let mut attempts = 0;
    while placed < ROCKS && attempts < ROCKS * 20 {
        attempts += 1;
        let r = rng.random_range(50.0..150.0);
        let theta = rng.random_range(0.0..std::f32::consts::TAU);
        let dist = rng.random_range(TRACK_RADIUS * 0.5..TRACK_RADIUS * 1.5);
        let pos = Vec2::new(theta.cos(), theta.sin()) * dist;
        if checkpoints
            .iter()
            .any(|cp| cp.distance(pos) < CP_RADIUS + r + DRONE_RADIUS * 3.0)
        {
            continue;
        }
        world.add(World::create_body(pos.x, pos.y, r, 100.0, false, false));
        placed += 1;
    }
    log::info!("Track: {} checkpoints, {placed} rocks", checkpoints.len());

    checkpoints
}

/// Drones lined up behind the start checkpoint
fn spawn_drones(world: &mut World, start: Vec2) -> Vec<Drone> {
    (0..DRONES)
        .map(|i| {
            let offset = Vec2::new(-(i as f32 % 2.0) * 100.0, i as f32 * 100.0 - 150.0);
            let pos = start + offset - Vec2::new(300.0, 0.0);
            let body = World::create_body(pos.x, pos.y, DRONE_RADIUS, 1.0, false, true)
                .with_owner(OwnerTag(i));
            Drone {
                handle: world.add(body),
                next_cp: 0,
                passed: 0,
            }
        })
        .collect()
}

fn steer(world: &mut World, drones: &[Drone], checkpoints: &[Vec2]) {
    for drone in drones {
        let target = checkpoints[drone.next_cp as usize];
        if let Some(body) = world.body_mut(drone.handle) {
            let dir = (target - body.pos).normalize_or_zero();
            body.vel += dir * THRUST;
            body.face_towards(target);
        }
    }
}
