//! The per-frame game simulation.
//!
//! [`Simulation`] owns every piece of gameplay state. Each frame the binary
//! hands it the sampled [`FrameInput`] and a capped time step through
//! [`Simulation::tick`]; presentation then reads it back through the
//! accessors. Nothing here touches the window.

use engine_core::{Transform, Vec3};
use input::FrameInput;
use rand::prelude::*;

use crate::arena::Arena;
use crate::config::GameConfig;
use crate::effects::{Particle, ParticleSystem};
use crate::enemies::{DamageOutcome, EnemyManager, EnemyView, Kill};
use crate::player::PlayerController;
use crate::spawner::{Spawner, TARGET_COUNT};
use crate::state::{GameMode, GamePhase, KillFeed, ScreenShake};
use crate::weapons::{pellet_directions, TriggerResult};

/// Shake applied on every shot.
const SHOT_SHAKE_AMOUNT: f32 = 0.15;
const SHOT_SHAKE_DURATION: f32 = 0.2;

/// What a single trigger pull did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotReport {
    pub result: TriggerResult,
    /// Rays that struck an enemy.
    pub hits: u32,
    pub kills: u32,
}

impl ShotReport {
    fn empty(result: TriggerResult) -> Self {
        Self { result, hits: 0, kills: 0 }
    }
}

pub struct Simulation {
    pub(crate) phase: GamePhase,
    pub(crate) mode: Option<GameMode>,
    pub(crate) player: PlayerController,
    pub(crate) enemies: EnemyManager,
    pub(crate) spawner: Spawner,
    pub(crate) particles: ParticleSystem,
    pub(crate) feed: KillFeed,
    pub(crate) shake: ScreenShake,
    pub(crate) arena: Arena,
    pub(crate) score: u32,
    pub(crate) kills: u32,
    final_score: u32,
    best_score: u32,
    pointer_locked: bool,
    rng: StdRng,
    elapsed: f32,
}

impl Simulation {
    pub fn new(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => {
                log::info!("Using fixed RNG seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };
        Self::with_rng(rng, Arena::new(), config.sensitivity)
    }

    /// Deterministic simulation over the standard arena.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), Arena::new(), 1.0)
    }

    fn with_rng(mut rng: StdRng, arena: Arena, sensitivity: f32) -> Self {
        let spawner = Spawner::new(StdRng::seed_from_u64(rng.gen()));
        let particles = ParticleSystem::new(StdRng::seed_from_u64(rng.gen()));
        Self {
            phase: GamePhase::MainMenu,
            mode: None,
            player: PlayerController::new(sensitivity),
            enemies: EnemyManager::new(),
            spawner,
            particles,
            feed: KillFeed::new(),
            shake: ScreenShake::new(),
            arena,
            score: 0,
            kills: 0,
            final_score: 0,
            best_score: 0,
            pointer_locked: false,
            rng,
            elapsed: 0.0,
        }
    }

    // ── Phase transitions ───────────────────────────────────────────────

    /// Begin a run in `mode`. Only valid from the main menu.
    pub fn start(&mut self, mode: GameMode) -> bool {
        if self.phase != GamePhase::MainMenu {
            return false;
        }

        self.mode = Some(mode);
        self.score = 0;
        self.kills = 0;
        self.player.reset();
        self.enemies.clear();
        self.spawner.reset();
        self.particles.clear();
        self.feed.clear();
        self.shake = ScreenShake::new();

        match mode {
            GameMode::TargetPractice => {
                self.spawner.fill_targets(&mut self.enemies, None);
            }
            GameMode::Survival => self.next_wave(),
        }

        self.phase = GamePhase::Playing;
        self.pointer_locked = true;
        log::info!("Started {}", mode.name());
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::Paused;
        self.pointer_locked = false;
        log::info!("Paused");
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != GamePhase::Paused {
            return false;
        }
        self.phase = GamePhase::Playing;
        self.pointer_locked = true;
        log::info!("Resumed");
        true
    }

    /// Abandon a paused run and go back to the menu.
    pub fn quit_to_menu(&mut self) -> bool {
        if self.phase != GamePhase::Paused {
            return false;
        }
        self.enemies.clear();
        self.particles.clear();
        self.feed.clear();
        self.phase = GamePhase::MainMenu;
        log::info!("Run abandoned with score {}", self.score);
        true
    }

    /// Leave the game-over screen.
    pub fn acknowledge(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.enemies.clear();
        self.particles.clear();
        self.feed.clear();
        self.phase = GamePhase::MainMenu;
        true
    }

    fn end_run(&mut self) {
        self.phase = GamePhase::GameOver;
        self.pointer_locked = false;
        self.final_score = self.score;
        if self.score > self.best_score {
            self.best_score = self.score;
        }
        log::info!(
            "Game over: score {} ({} kills), best {}",
            self.final_score,
            self.kills,
            self.best_score
        );
    }

    // ── Frame ───────────────────────────────────────────────────────────

    /// Handle input, then advance the world by `dt`.
    pub fn tick(&mut self, input: &FrameInput, dt: f32) {
        self.handle_input(input, dt);
        self.update(dt);
    }

    pub fn handle_input(&mut self, input: &FrameInput, dt: f32) {
        match self.phase {
            GamePhase::MainMenu => {
                if let Some(mode) = input.weapon_slot.and_then(GameMode::from_menu_slot) {
                    self.start(mode);
                }
            }
            GamePhase::Playing => {
                if input.pause {
                    self.pause();
                    return;
                }
                self.player.look(input.look_delta);
                self.player.walk(input.movement, dt, &self.arena);
                if let Some(slot) = input.weapon_slot {
                    self.player.select_weapon(slot);
                }
                if input.reload {
                    self.player.weapon_mut().start_reload();
                }
                if input.fire {
                    self.fire();
                }
            }
            GamePhase::Paused => {
                if input.pause {
                    self.resume();
                } else if input.quit_to_menu {
                    self.quit_to_menu();
                }
            }
            GamePhase::GameOver => {
                if input.confirm {
                    self.acknowledge();
                }
            }
        }
    }

    /// Pull the trigger of the active weapon. Each pellet damages the nearest
    /// enemy on its ray, unless an obstacle is closer.
    pub fn fire(&mut self) -> ShotReport {
        if self.phase != GamePhase::Playing {
            return ShotReport::empty(TriggerResult::Blocked);
        }

        let result = self.player.weapon_mut().trigger();
        if result != TriggerResult::Fired {
            return ShotReport::empty(result);
        }
        self.shake.trigger(SHOT_SHAKE_AMOUNT, SHOT_SHAKE_DURATION);

        let config = self.player.weapon().config();
        let origin = self.player.position();
        let mut report = ShotReport::empty(result);

        for direction in pellet_directions(config, self.player.forward(), &mut self.rng) {
            let Some(hit) = self.enemies.raycast(origin, direction, config.range) else {
                continue;
            };
            if hit.distance >= self.arena.occlusion_distance(origin, direction, config.range) {
                continue;
            }
            report.hits += 1;
            if let Some(DamageOutcome::Killed(kill)) = self.enemies.apply_damage(hit.entity, config.damage) {
                report.kills += 1;
                self.on_kill(kill);
            }
        }
        report
    }

    fn on_kill(&mut self, kill: Kill) {
        self.score += kill.score;
        self.kills += 1;
        self.feed.success(format!("Eliminated {} Enemy", kill.kind.name()));
        self.particles.burst(kill.position, kill.kind.stats().color);

        if self.mode == Some(GameMode::TargetPractice) {
            self.spawner.fill_targets(&mut self.enemies, Some(kill.position));
        }
    }

    fn next_wave(&mut self) {
        let wave = self
            .spawner
            .start_next_wave(&mut self.enemies, &self.arena, self.player.position());
        self.feed.warning(format!("Wave {} Starting!", wave));
    }

    /// Advance timers, AI and effects. Does nothing outside of play.
    pub fn update(&mut self, dt: f32) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.elapsed += dt;

        self.player.update_weapons(dt);

        let damage = self
            .enemies
            .update(dt, self.player.position(), &self.arena);
        if damage > 0 {
            self.player.take_damage(damage);
            log::debug!("Player took {} damage ({} left)", damage, self.player.health.current);
        }

        self.particles.update(dt);
        self.feed.update(dt);
        self.shake.update(dt, self.elapsed);

        match self.mode {
            Some(GameMode::TargetPractice) if self.enemies.len() < TARGET_COUNT => {
                self.spawner.fill_targets(&mut self.enemies, None);
            }
            Some(GameMode::Survival) if self.enemies.is_empty() => self.next_wave(),
            _ => {}
        }

        if self.player.is_dead() {
            self.end_run();
        }
    }

    // ── Read-only views ─────────────────────────────────────────────────

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn wave(&self) -> u32 {
        self.spawner.wave
    }

    pub fn final_score(&self) -> u32 {
        self.final_score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Whether the window should hold the pointer captured.
    pub fn pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn enemies(&self) -> Vec<EnemyView> {
        self.enemies.views()
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles.particles
    }

    pub fn feed(&self) -> &KillFeed {
        &self.feed
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Camera pose including screen shake.
    pub fn camera(&self) -> Transform {
        let mut camera = self.player.transform;
        camera.position += self.shake.offset;
        camera
    }
}
