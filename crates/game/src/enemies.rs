//! Enemy types, per-kind stats and the enemy set.
//!
//! Every enemy is one ECS entity with a [`Transform`], [`Health`], [`Enemy`]
//! and [`AIComponent`]. Kinds differ only by the constants in [`ENEMY_STATS`].
//! An entity is despawned the moment its health reaches zero, so the world only
//! ever holds living enemies.

use engine_core::{AIComponent, AIState, Health, Transform, Vec3};
use hecs::{Entity, World};
use physics::ray_box;

use crate::arena::Arena;
use crate::player::PLAYER_RADIUS;

/// Extra reach beyond body contact at which an enemy can hit the player.
const ATTACK_REACH: f32 = 0.5;

/// Enemy variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    /// Baseline grunt.
    Normal,
    /// Quick and fragile.
    Fast,
    /// Slow, heavily armoured, hits hard.
    Tank,
}

/// Per-kind constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub health: u32,
    /// Ground speed in m/s.
    pub speed: f32,
    /// Body width/depth; the body is `2 * size` tall.
    pub size: f32,
    pub score: u32,
    pub attack_damage: u32,
    pub attack_cooldown: f32,
    /// Body colour [r, g, b].
    pub color: [f32; 3],
}

/// Lookup table indexed by [`EnemyKind::index`].
pub const ENEMY_STATS: [EnemyStats; 3] = [
    EnemyStats {
        health: 100,
        speed: 1.0,
        size: 1.0,
        score: 10,
        attack_damage: 10,
        attack_cooldown: 1.0,
        color: [1.0, 0.0, 0.0],
    },
    EnemyStats {
        health: 50,
        speed: 2.0,
        size: 0.8,
        score: 5,
        attack_damage: 5,
        attack_cooldown: 0.6,
        color: [1.0, 0.5, 0.0],
    },
    EnemyStats {
        health: 150,
        speed: 0.5,
        size: 1.5,
        score: 15,
        attack_damage: 25,
        attack_cooldown: 2.0,
        color: [0.5, 0.0, 1.0],
    },
];

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Normal, EnemyKind::Fast, EnemyKind::Tank];

    pub fn index(&self) -> usize {
        match self {
            EnemyKind::Normal => 0,
            EnemyKind::Fast => 1,
            EnemyKind::Tank => 2,
        }
    }

    pub fn stats(&self) -> &'static EnemyStats {
        &ENEMY_STATS[self.index()]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Normal => "Normal",
            EnemyKind::Fast => "Fast",
            EnemyKind::Tank => "Tank",
        }
    }

    /// Half extents of the hit box.
    pub fn half_extents(&self) -> Vec3 {
        let size = self.stats().size;
        Vec3::new(size * 0.5, size, size * 0.5)
    }

    /// Center-to-center distance (ground plane) at which the body touches the player.
    pub fn contact_distance(&self) -> f32 {
        self.stats().size + PLAYER_RADIUS
    }
}

/// Enemy component.
#[derive(Debug, Clone, Copy)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub speed: f32,
    pub score: u32,
}

impl Enemy {
    pub fn new(kind: EnemyKind) -> Self {
        let stats = kind.stats();
        Self {
            kind,
            speed: stats.speed,
            score: stats.score,
        }
    }
}

/// An enemy killed by a hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kill {
    pub kind: EnemyKind,
    pub position: Vec3,
    pub score: u32,
}

/// Result of applying damage to one enemy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Still standing with this much health left.
    Wounded(u32),
    Killed(Kill),
}

/// Nearest enemy along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyHit {
    pub entity: Entity,
    pub distance: f32,
}

/// Read-only per-enemy data for drawing.
#[derive(Debug, Clone, Copy)]
pub struct EnemyView {
    pub kind: EnemyKind,
    pub position: Vec3,
    pub health_fraction: f32,
}

/// Owns all living enemies.
pub struct EnemyManager {
    world: World,
}

impl Default for EnemyManager {
    fn default() -> Self {
        Self::new()
    }
}

impl EnemyManager {
    pub fn new() -> Self {
        Self { world: World::new() }
    }

    /// Spawn a pursuing enemy standing on the ground at `ground_position` (y ignored).
    pub fn spawn(&mut self, kind: EnemyKind, ground_position: Vec3) -> Entity {
        let attack_range = kind.contact_distance() + ATTACK_REACH;
        self.spawn_with_ai(
            kind,
            ground_position,
            AIComponent::new(attack_range, kind.stats().attack_cooldown),
        )
    }

    /// Spawn a stationary practice target.
    pub fn spawn_target(&mut self, ground_position: Vec3) -> Entity {
        self.spawn_with_ai(EnemyKind::Normal, ground_position, AIComponent::idle())
    }

    fn spawn_with_ai(&mut self, kind: EnemyKind, ground_position: Vec3, ai: AIComponent) -> Entity {
        let stats = kind.stats();
        let position = Vec3::new(ground_position.x, stats.size, ground_position.z);
        self.world.spawn((
            Transform {
                position,
                scale: Vec3::new(stats.size, stats.size * 2.0, stats.size),
                ..Default::default()
            },
            Health::new(stats.health),
            Enemy::new(kind),
            ai,
        ))
    }

    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.world.clear();
    }

    /// Ground-plane positions of every enemy.
    pub fn positions(&self) -> Vec<Vec3> {
        self.world
            .query::<&Transform>()
            .iter()
            .map(|(_, t)| t.position)
            .collect()
    }

    /// Snapshot for the renderer.
    pub fn views(&self) -> Vec<EnemyView> {
        self.world
            .query::<(&Transform, &Health, &Enemy)>()
            .iter()
            .map(|(_, (transform, health, enemy))| EnemyView {
                kind: enemy.kind,
                position: transform.position,
                health_fraction: health.percentage(),
            })
            .collect()
    }

    /// Reduce an enemy's health by `damage` (saturating at zero). A kill despawns it.
    pub fn apply_damage(&mut self, entity: Entity, damage: u32) -> Option<DamageOutcome> {
        let remaining = {
            let mut health = self.world.get::<&mut Health>(entity).ok()?;
            health.take_damage(damage);
            health.current
        };
        if remaining > 0 {
            return Some(DamageOutcome::Wounded(remaining));
        }

        let kill = {
            let enemy = self.world.get::<&Enemy>(entity).ok()?;
            let transform = self.world.get::<&Transform>(entity).ok()?;
            Kill {
                kind: enemy.kind,
                position: transform.position,
                score: enemy.score,
            }
        };
        self.world.despawn(entity).ok();
        log::debug!("{:?} enemy destroyed at {:?}", kill.kind, kill.position);
        Some(DamageOutcome::Killed(kill))
    }

    /// Nearest enemy whose hit box the ray enters within `max_distance`.
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<EnemyHit> {
        let mut closest: Option<EnemyHit> = None;
        for (entity, (transform, enemy)) in self.world.query::<(&Transform, &Enemy)>().iter() {
            let Some(distance) = ray_box(
                origin,
                direction,
                transform.position,
                enemy.kind.half_extents(),
                max_distance,
            ) else {
                continue;
            };
            if closest.map_or(true, |c| distance < c.distance) {
                closest = Some(EnemyHit { entity, distance });
            }
        }
        closest
    }

    /// Move pursuing enemies toward `player_pos` on the ground plane. Enemies
    /// stop at body contact and are kept out of obstacles. Returns the total
    /// damage dealt to the player by enemies whose attack came off cooldown.
    pub fn update(&mut self, dt: f32, player_pos: Vec3, arena: &Arena) -> u32 {
        let mut damage_to_player = 0;
        let target = Vec3::new(player_pos.x, 0.0, player_pos.z);

        for (_, (transform, enemy, ai)) in self
            .world
            .query_mut::<(&mut Transform, &Enemy, &mut AIComponent)>()
        {
            if ai.state == AIState::Idle {
                continue;
            }
            ai.update_cooldown(dt);

            let contact = enemy.kind.contact_distance();
            let flat = Vec3::new(transform.position.x, 0.0, transform.position.z);
            let to_player = target - flat;
            let distance = to_player.length();

            let next = if distance > contact {
                let step = (enemy.speed * dt).min(distance - contact);
                let moved = flat + to_player / distance * step;
                keep_clear_of(Vec3::new(moved.x, transform.position.y, moved.z), target, contact)
            } else {
                keep_clear_of(transform.position, target, contact)
            };
            // Obstacles and walls win over the contact gap.
            transform.position = arena.resolve(next, enemy.kind.stats().size * 0.5);

            let flat = Vec3::new(transform.position.x, 0.0, transform.position.z);
            ai.state = if flat.distance(target) <= ai.attack_range {
                AIState::Attacking
            } else {
                AIState::Chasing
            };

            if ai.can_attack() {
                ai.trigger_attack();
                damage_to_player += enemy.kind.stats().attack_damage;
                log::debug!("{:?} enemy hit the player for {}", enemy.kind, enemy.kind.stats().attack_damage);
            }
        }

        damage_to_player
    }
}

/// Push `position` (ground-plane) out to at least `min_distance` from `center`.
fn keep_clear_of(position: Vec3, center: Vec3, min_distance: f32) -> Vec3 {
    let offset = Vec3::new(position.x - center.x, 0.0, position.z - center.z);
    let distance = offset.length();
    if distance >= min_distance {
        return position;
    }
    let dir = if distance > 1e-4 { offset / distance } else { Vec3::Z };
    let pushed = center + dir * min_distance;
    Vec3::new(pushed.x, position.y, pushed.z)
}

#[cfg(test)]
impl EnemyManager {
    pub(crate) fn contains(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }

    pub(crate) fn health(&self, entity: Entity) -> Option<u32> {
        self.world.get::<&Health>(entity).ok().map(|h| h.current)
    }

    pub(crate) fn position(&self, entity: Entity) -> Option<Vec3> {
        self.world.get::<&Transform>(entity).ok().map(|t| t.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Obstacle;

    #[test]
    fn stats_table_matches_kinds() {
        assert_eq!(EnemyKind::Normal.stats().health, 100);
        assert_eq!(EnemyKind::Fast.stats().health, 50);
        assert_eq!(EnemyKind::Tank.stats().health, 150);
        assert_eq!(EnemyKind::Normal.stats().score, 10);
        assert_eq!(EnemyKind::Fast.stats().speed, 2.0);
    }

    #[test]
    fn spawn_stands_on_ground() {
        let mut enemies = EnemyManager::new();
        let e = enemies.spawn(EnemyKind::Tank, Vec3::new(3.0, 9.0, -4.0));
        assert_eq!(enemies.position(e), Some(Vec3::new(3.0, 1.5, -4.0)));
        assert_eq!(enemies.health(e), Some(150));
    }

    #[test]
    fn damage_saturates_and_kill_removes() {
        let mut enemies = EnemyManager::new();
        let e = enemies.spawn(EnemyKind::Fast, Vec3::new(0.0, 0.0, -5.0));

        assert_eq!(enemies.apply_damage(e, 30), Some(DamageOutcome::Wounded(20)));
        assert_eq!(enemies.health(e), Some(20));

        match enemies.apply_damage(e, 35) {
            Some(DamageOutcome::Killed(kill)) => {
                assert_eq!(kill.kind, EnemyKind::Fast);
                assert_eq!(kill.score, 5);
            }
            other => panic!("expected a kill, got {:?}", other),
        }
        assert!(!enemies.contains(e));
        assert!(enemies.is_empty());
        assert_eq!(enemies.apply_damage(e, 10), None);
    }

    #[test]
    fn raycast_picks_nearest() {
        let mut enemies = EnemyManager::new();
        let far = enemies.spawn(EnemyKind::Normal, Vec3::new(0.0, 0.0, -20.0));
        let near = enemies.spawn(EnemyKind::Normal, Vec3::new(0.0, 0.0, -8.0));
        let eye = Vec3::new(0.0, 1.5, 0.0);

        let hit = enemies.raycast(eye, Vec3::NEG_Z, 100.0).unwrap();
        assert_eq!(hit.entity, near);
        assert!((hit.distance - 7.5).abs() < 1e-4);

        enemies.apply_damage(near, 1000);
        assert_eq!(enemies.raycast(eye, Vec3::NEG_Z, 100.0).unwrap().entity, far);
        assert!(enemies.raycast(eye, Vec3::NEG_Z, 10.0).is_none());
    }

    #[test]
    fn enemies_pursue_and_stop_at_contact() {
        let arena = Arena::empty();
        let mut enemies = EnemyManager::new();
        let e = enemies.spawn(EnemyKind::Fast, Vec3::new(0.0, 0.0, -10.0));
        let player = Vec3::new(0.0, 1.5, 0.0);

        enemies.update(1.0, player, &arena);
        let p = enemies.position(e).unwrap();
        assert!((p.z + 8.0).abs() < 1e-4, "moved 2 m toward the player, got {:?}", p);
        assert_eq!(p.y, 0.8);

        for _ in 0..20 {
            enemies.update(1.0, player, &arena);
        }
        let p = enemies.position(e).unwrap();
        let flat = Vec3::new(p.x, 0.0, p.z);
        assert!((flat.length() - EnemyKind::Fast.contact_distance()).abs() < 1e-4);
    }

    #[test]
    fn targets_never_move_or_attack() {
        let arena = Arena::empty();
        let mut enemies = EnemyManager::new();
        let t = enemies.spawn_target(Vec3::new(0.0, 0.0, -1.0));
        let before = enemies.position(t);
        let damage = enemies.update(5.0, Vec3::new(0.0, 1.5, 0.0), &arena);
        assert_eq!(damage, 0);
        assert_eq!(enemies.position(t), before);
    }

    #[test]
    fn attacks_respect_cooldown() {
        let arena = Arena::empty();
        let mut enemies = EnemyManager::new();
        enemies.spawn(EnemyKind::Normal, Vec3::new(0.0, 0.0, -1.5));
        let player = Vec3::new(0.0, 1.5, 0.0);

        assert_eq!(enemies.update(0.1, player, &arena), 10);
        assert_eq!(enemies.update(0.5, player, &arena), 0);
        assert_eq!(enemies.update(0.6, player, &arena), 10);
    }

    #[test]
    fn enemies_are_kept_out_of_obstacles() {
        let arena = Arena::with_obstacles(&[Obstacle::new(0.0, -5.0, 2.0, 3.0, 2.0)]);

        let mut enemies = EnemyManager::new();
        let e = enemies.spawn(EnemyKind::Normal, Vec3::new(0.0, 0.0, -8.0));
        for _ in 0..40 {
            enemies.update(0.1, Vec3::new(0.0, 1.5, 0.0), &arena);
            let p = enemies.position(e).unwrap();
            let inside_x = p.x.abs() < 1.0 + 0.5;
            let inside_z = p.z > -6.0 - 0.5 && p.z < -4.0 + 0.5;
            assert!(!(inside_x && inside_z), "enemy entered obstacle at {:?}", p);
        }
    }

    #[test]
    fn contact_push_back_does_not_enter_walls() {
        // Enemy pressed against the near face of a box with the player just in front.
        let arena = Arena::with_obstacles(&[Obstacle::new(0.0, -5.0, 2.0, 3.0, 2.0)]);
        let mut enemies = EnemyManager::new();
        let e = enemies.spawn(EnemyKind::Normal, Vec3::new(0.0, 0.0, -3.5));
        let player = Vec3::new(0.0, 1.5, -2.4);

        for _ in 0..5 {
            enemies.update(0.1, player, &arena);
            let p = enemies.position(e).unwrap();
            let inside_x = p.x.abs() < 1.0 + 0.5;
            let inside_z = p.z > -6.0 - 0.5 && p.z < -4.0 + 0.5;
            assert!(!(inside_x && inside_z), "enemy pushed into obstacle at {:?}", p);
        }
    }

    #[test]
    fn contact_push_back_stays_on_the_floor() {
        let arena = Arena::empty();
        let mut enemies = EnemyManager::new();
        let e = enemies.spawn(EnemyKind::Tank, Vec3::new(49.5, 0.0, 49.5));
        enemies.update(0.1, Vec3::new(49.0, 1.5, 49.0), &arena);
        let p = enemies.position(e).unwrap();
        assert!(p.x <= 50.0 && p.z <= 50.0, "enemy left the floor at {:?}", p);
    }
}
