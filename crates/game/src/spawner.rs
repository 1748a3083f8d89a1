//! Enemy spawning for both game modes.
//!
//! Survival runs in waves: wave 1 has [`FIRST_WAVE_SIZE`] enemies and every
//! following wave adds [`WAVE_INCREMENT`]. A new wave only starts once the
//! previous one has been wiped out. Target practice keeps [`TARGET_COUNT`]
//! static targets standing on a fixed set of candidate spots.

use engine_core::Vec3;
use rand::prelude::*;

use crate::arena::Arena;
use crate::enemies::{EnemyKind, EnemyManager};

pub const FIRST_WAVE_SIZE: usize = 5;
pub const WAVE_INCREMENT: usize = 2;

/// Spawn ring around the player.
pub const MIN_SPAWN_DISTANCE: f32 = 10.0;
pub const MAX_SPAWN_DISTANCE: f32 = 20.0;

/// Targets standing at once in target practice.
pub const TARGET_COUNT: usize = 8;

/// Ground-plane spots a practice target may occupy, all in front of the spawn point.
pub const TARGET_POSITIONS: [(f32, f32); 12] = [
    (0.0, -10.0),
    (-3.0, -8.0),
    (3.0, -8.0),
    (-3.0, -14.0),
    (3.0, -14.0),
    (0.0, -17.0),
    (-9.0, -10.0),
    (9.0, -10.0),
    (-6.0, -16.0),
    (6.0, -16.0),
    (-9.0, -18.0),
    (9.0, -18.0),
];

/// Bearings tried before falling back to one that points into the arena.
const SPAWN_ATTEMPTS: usize = 16;

/// Two positions closer than this on the ground plane share a spot.
const SPOT_TOLERANCE: f32 = 0.1;

/// Number of enemies in survival wave `wave` (1-based).
pub fn wave_size(wave: u32) -> usize {
    FIRST_WAVE_SIZE + WAVE_INCREMENT * wave.saturating_sub(1) as usize
}

fn flat_distance(a: Vec3, b: Vec3) -> f32 {
    Vec3::new(a.x - b.x, 0.0, a.z - b.z).length()
}

fn same_spot(a: Vec3, b: Vec3) -> bool {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    dx * dx + dz * dz < SPOT_TOLERANCE * SPOT_TOLERANCE
}

/// Places enemies and practice targets.
pub struct Spawner {
    /// Current survival wave (0 before the first wave starts).
    pub wave: u32,
    rng: StdRng,
}

impl Spawner {
    pub fn new(rng: StdRng) -> Self {
        Self { wave: 0, rng }
    }

    pub fn reset(&mut self) {
        self.wave = 0;
    }

    /// Advance to the next wave and spawn it around `player_pos`. Returns the new wave number.
    pub fn start_next_wave(&mut self, enemies: &mut EnemyManager, arena: &Arena, player_pos: Vec3) -> u32 {
        self.wave += 1;
        let count = wave_size(self.wave);
        for _ in 0..count {
            let kind = EnemyKind::ALL[self.rng.gen_range(0..EnemyKind::ALL.len())];
            let position = self.random_spawn_position(arena, player_pos, kind);
            enemies.spawn(kind, position);
        }
        log::info!("Wave {} started with {} enemies", self.wave, count);
        self.wave
    }

    /// A point 10-20 m from the player, kept on the floor and out of obstacles.
    /// Bearings whose resolved point ends up closer than [`MIN_SPAWN_DISTANCE`]
    /// (cut short by a wall or an obstacle) are rerolled; after
    /// [`SPAWN_ATTEMPTS`] misses the enemy is placed toward the arena centre.
    fn random_spawn_position(&mut self, arena: &Arena, player_pos: Vec3, kind: EnemyKind) -> Vec3 {
        let radius = kind.stats().size * 0.5;
        for _ in 0..SPAWN_ATTEMPTS {
            let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
            let distance = self.rng.gen_range(MIN_SPAWN_DISTANCE..MAX_SPAWN_DISTANCE);
            let bearing = Vec3::new(angle.cos(), 0.0, angle.sin());
            let candidate = arena.resolve(player_pos + bearing * distance, radius);
            if flat_distance(candidate, player_pos) >= MIN_SPAWN_DISTANCE {
                return candidate;
            }
        }

        let mut inward = Vec3::new(-player_pos.x, 0.0, -player_pos.z).normalize_or_zero();
        if inward == Vec3::ZERO {
            inward = Vec3::NEG_Z;
        }
        let distance = self.rng.gen_range(MIN_SPAWN_DISTANCE..MAX_SPAWN_DISTANCE);
        arena.resolve(player_pos + inward * distance, radius)
    }

    /// Spawn practice targets on free spots until [`TARGET_COUNT`] stand. The spot
    /// matching `vacated` is skipped. Returns how many were spawned.
    pub fn fill_targets(&mut self, enemies: &mut EnemyManager, vacated: Option<Vec3>) -> usize {
        let mut spawned = 0;
        while enemies.len() < TARGET_COUNT {
            let occupied = enemies.positions();
            let free: Vec<Vec3> = TARGET_POSITIONS
                .iter()
                .map(|&(x, z)| Vec3::new(x, 0.0, z))
                .filter(|spot| !occupied.iter().any(|p| same_spot(*p, *spot)))
                .filter(|spot| vacated.map_or(true, |v| !same_spot(v, *spot)))
                .collect();

            let Some(spot) = free.choose(&mut self.rng) else {
                log::warn!("No free target spot left ({} standing)", enemies.len());
                break;
            };
            enemies.spawn_target(*spot);
            spawned += 1;
        }
        spawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::ARENA_HALF_SIZE as ARENA_LIMIT;

    fn spawner(seed: u64) -> Spawner {
        Spawner::new(StdRng::seed_from_u64(seed))
    }

    #[test]
    fn waves_grow_by_fixed_increment() {
        assert_eq!(wave_size(1), 5);
        for wave in 1..20 {
            assert_eq!(wave_size(wave + 1), wave_size(wave) + WAVE_INCREMENT);
        }
    }

    #[test]
    fn wave_spawns_in_ring_and_clear_of_obstacles() {
        let arena = Arena::new();
        let mut enemies = EnemyManager::new();
        let mut spawner = spawner(3);
        let player = Vec3::new(0.0, 1.5, 0.0);

        assert_eq!(spawner.start_next_wave(&mut enemies, &arena, player), 1);
        assert_eq!(enemies.len(), 5);
        assert_eq!(spawner.start_next_wave(&mut enemies, &arena, player), 2);
        assert_eq!(enemies.len(), 12);

        for view in enemies.views() {
            let p = view.position;
            assert!(p.x.abs() <= ARENA_LIMIT && p.z.abs() <= ARENA_LIMIT);
            let flat = Vec3::new(p.x, 0.0, p.z).length();
            // Obstacle push-out can shift a spawn by at most a couple of metres.
            assert!(flat > MIN_SPAWN_DISTANCE - 3.0 && flat < MAX_SPAWN_DISTANCE + 3.0, "{:?}", p);
            assert_eq!(p.y, view.kind.stats().size);
        }
    }

    #[test]
    fn corner_spawns_stay_inside_and_clear_of_the_player() {
        let corner = Vec3::new(50.0, 1.5, 50.0);
        for seed in 0..20 {
            for arena in [Arena::empty(), Arena::new()] {
                let mut enemies = EnemyManager::new();
                let mut spawner = spawner(seed);
                spawner.start_next_wave(&mut enemies, &arena, corner);

                for view in enemies.views() {
                    let p = view.position;
                    assert!(p.x.abs() <= ARENA_LIMIT && p.z.abs() <= ARENA_LIMIT, "{:?}", p);
                    let d = flat_distance(p, corner);
                    assert!(d >= MIN_SPAWN_DISTANCE, "seed {} spawned {:?} only {} m away", seed, p, d);
                    assert!(d > view.kind.contact_distance());
                }

                // Nobody is in reach on the first frame, and nobody leaves the floor.
                assert_eq!(enemies.update(0.05, corner, &arena), 0);
                for p in enemies.positions() {
                    assert!(p.x.abs() <= ARENA_LIMIT && p.z.abs() <= ARENA_LIMIT, "{:?}", p);
                }
            }
        }
    }

    #[test]
    fn fill_targets_uses_distinct_candidate_spots() {
        let mut enemies = EnemyManager::new();
        let mut spawner = spawner(5);
        assert_eq!(spawner.fill_targets(&mut enemies, None), TARGET_COUNT);
        assert_eq!(enemies.len(), TARGET_COUNT);

        let positions = enemies.positions();
        for (i, a) in positions.iter().enumerate() {
            assert!(TARGET_POSITIONS
                .iter()
                .any(|&(x, z)| same_spot(*a, Vec3::new(x, 0.0, z))));
            for b in &positions[i + 1..] {
                assert!(!same_spot(*a, *b));
            }
        }
        assert_eq!(spawner.fill_targets(&mut enemies, None), 0);
    }

    #[test]
    fn replacement_avoids_vacated_spot() {
        for seed in 0..16 {
            let mut enemies = EnemyManager::new();
            let mut spawner = spawner(seed);
            spawner.fill_targets(&mut enemies, None);

            let positions = enemies.positions();
            let victim = positions[0];
            let entity = enemies
                .raycast(Vec3::new(victim.x, 1.0, victim.z + 5.0), Vec3::NEG_Z, 100.0)
                .map(|hit| hit.entity)
                .unwrap();
            enemies.apply_damage(entity, 1000);

            assert_eq!(spawner.fill_targets(&mut enemies, Some(victim)), 1);
            assert_eq!(enemies.len(), TARGET_COUNT);
            assert!(!enemies.positions().iter().any(|p| same_spot(*p, victim)));
        }
    }
}
