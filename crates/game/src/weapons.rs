//! Weapon definitions and per-weapon ammo/reload state.

use glam::{EulerRot, Quat, Vec3};
use rand::Rng;

/// Weapon types available to the player, in slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeaponKind {
    /// Sidearm - accurate, moderate damage.
    Pistol,
    /// Assault rifle - fast fire, big magazine.
    Rifle,
    /// Shotgun - pellet spread, devastating up close.
    Shotgun,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 3] = [WeaponKind::Pistol, WeaponKind::Rifle, WeaponKind::Shotgun];

    pub fn config(&self) -> &'static WeaponConfig {
        match self {
            WeaponKind::Pistol => &PISTOL,
            WeaponKind::Rifle => &RIFLE,
            WeaponKind::Shotgun => &SHOTGUN,
        }
    }
}

/// Immutable stats for one weapon type.
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponConfig {
    pub name: &'static str,
    /// Damage per ray (per pellet for the shotgun).
    pub damage: u32,
    /// Seconds between shots.
    pub fire_rate: f32,
    pub magazine_size: u32,
    /// Reserve ammo at the start of a run.
    pub reserve_ammo: u32,
    pub reload_time: f32,
    /// Maximum deviation per axis, in radians.
    pub spread: f32,
    pub pellets: u32,
    pub range: f32,
}

pub const PISTOL: WeaponConfig = WeaponConfig {
    name: "Pistol",
    damage: 35,
    fire_rate: 0.3,
    magazine_size: 12,
    reserve_ammo: 36,
    reload_time: 1.5,
    spread: 0.01,
    pellets: 1,
    range: 100.0,
};

pub const RIFLE: WeaponConfig = WeaponConfig {
    name: "Rifle",
    damage: 25,
    fire_rate: 0.15,
    magazine_size: 30,
    reserve_ammo: 90,
    reload_time: 2.0,
    spread: 0.005,
    pellets: 1,
    range: 150.0,
};

pub const SHOTGUN: WeaponConfig = WeaponConfig {
    name: "Shotgun",
    damage: 20,
    fire_rate: 0.8,
    magazine_size: 8,
    reserve_ammo: 24,
    reload_time: 2.5,
    spread: 0.05,
    pellets: 6,
    range: 40.0,
};

/// Outcome of pulling the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerResult {
    /// A round was consumed; cast the rays.
    Fired,
    /// The magazine was empty, so a reload began instead.
    ReloadStarted,
    /// Nothing happened (cooldown, mid-reload, or completely out of ammo).
    Blocked,
}

/// Weapon instance with current state.
#[derive(Debug, Clone)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub current_ammo: u32,
    pub reserve_ammo: u32,

    // State
    pub fire_cooldown: f32,
    pub reload_timer: f32,
    pub is_reloading: bool,
}

impl Weapon {
    pub fn new(kind: WeaponKind) -> Self {
        let config = kind.config();
        Self {
            kind,
            current_ammo: config.magazine_size,
            reserve_ammo: config.reserve_ammo,
            fire_cooldown: 0.0,
            reload_timer: 0.0,
            is_reloading: false,
        }
    }

    pub fn config(&self) -> &'static WeaponConfig {
        self.kind.config()
    }

    /// Tick the fire cooldown, and the reload timer when this is the `active` weapon.
    pub fn update(&mut self, dt: f32, active: bool) {
        if self.fire_cooldown > 0.0 {
            self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
        }

        if active && self.is_reloading {
            self.reload_timer -= dt;
            if self.reload_timer <= 0.0 {
                self.finish_reload();
            }
        }
    }

    /// Pull the trigger. Consumes a round when possible; an empty magazine
    /// starts a reload instead.
    pub fn trigger(&mut self) -> TriggerResult {
        if self.is_reloading || self.fire_cooldown > 0.0 {
            return TriggerResult::Blocked;
        }
        if self.current_ammo == 0 {
            return if self.start_reload() {
                TriggerResult::ReloadStarted
            } else {
                TriggerResult::Blocked
            };
        }

        self.current_ammo -= 1;
        self.fire_cooldown = self.config().fire_rate;
        TriggerResult::Fired
    }

    /// Start reloading. Returns false (and changes nothing) if already reloading,
    /// out of reserve ammo, or the magazine is full.
    pub fn start_reload(&mut self) -> bool {
        if self.is_reloading || self.reserve_ammo == 0 || self.current_ammo >= self.config().magazine_size {
            return false;
        }

        self.is_reloading = true;
        self.reload_timer = self.config().reload_time;
        true
    }

    /// Abort a reload in progress (e.g. on weapon switch). No ammo moves.
    pub fn cancel_reload(&mut self) {
        self.is_reloading = false;
        self.reload_timer = 0.0;
    }

    /// Finish reloading.
    fn finish_reload(&mut self) {
        let needed = self.config().magazine_size.saturating_sub(self.current_ammo);
        let available = needed.min(self.reserve_ammo);

        self.current_ammo += available;
        self.reserve_ammo -= available;
        self.is_reloading = false;
        self.reload_timer = 0.0;
        log::debug!(
            "{} reloaded: {} / {}",
            self.config().name,
            self.current_ammo,
            self.reserve_ammo
        );
    }

    /// Should an idle, empty weapon begin reloading on its own?
    pub fn needs_auto_reload(&self) -> bool {
        self.current_ammo == 0 && !self.is_reloading && self.reserve_ammo > 0
    }

    /// Reload progress in `[0, 1]`, or 0 when not reloading.
    pub fn reload_progress(&self) -> f32 {
        if !self.is_reloading {
            return 0.0;
        }
        let total = self.config().reload_time;
        (1.0 - self.reload_timer / total).clamp(0.0, 1.0)
    }

    /// Get ammo display string.
    pub fn ammo_display(&self) -> String {
        if self.is_reloading {
            format!("{} / {} [RELOADING]", self.current_ammo, self.reserve_ammo)
        } else {
            format!("{} / {}", self.current_ammo, self.reserve_ammo)
        }
    }
}

/// Directions for each pellet of one shot: `forward` perturbed by up to
/// `config.spread` radians of pitch and yaw per pellet.
pub fn pellet_directions(config: &WeaponConfig, forward: Vec3, rng: &mut impl Rng) -> Vec<Vec3> {
    (0..config.pellets.max(1))
        .map(|_| {
            if config.spread <= 0.0 {
                return forward.normalize_or_zero();
            }
            let spread_x = rng.gen_range(-config.spread..config.spread);
            let spread_y = rng.gen_range(-config.spread..config.spread);
            let spread_rotation = Quat::from_euler(EulerRot::XYZ, spread_x, spread_y, 0.0);
            (spread_rotation * forward).normalize_or_zero()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn fire_consumes_round_and_sets_cooldown() {
        let mut pistol = Weapon::new(WeaponKind::Pistol);
        assert_eq!(pistol.trigger(), TriggerResult::Fired);
        assert_eq!(pistol.current_ammo, 11);
        assert_eq!(pistol.trigger(), TriggerResult::Blocked);
        assert_eq!(pistol.current_ammo, 11);

        pistol.update(0.31, true);
        assert_eq!(pistol.trigger(), TriggerResult::Fired);
        assert_eq!(pistol.current_ammo, 10);
    }

    #[test]
    fn empty_magazine_triggers_reload() {
        let mut rifle = Weapon::new(WeaponKind::Rifle);
        rifle.current_ammo = 0;
        assert_eq!(rifle.trigger(), TriggerResult::ReloadStarted);
        assert!(rifle.is_reloading);

        // Ammo is not available until the timer elapses.
        rifle.update(1.0, true);
        assert_eq!(rifle.current_ammo, 0);
        assert_eq!(rifle.trigger(), TriggerResult::Blocked);

        rifle.update(1.1, true);
        assert!(!rifle.is_reloading);
        assert_eq!(rifle.current_ammo, 30);
        assert_eq!(rifle.reserve_ammo, 60);
    }

    #[test]
    fn fully_empty_weapon_is_a_noop() {
        let mut shotgun = Weapon::new(WeaponKind::Shotgun);
        shotgun.current_ammo = 0;
        shotgun.reserve_ammo = 0;
        let before = shotgun.clone();

        assert_eq!(shotgun.trigger(), TriggerResult::Blocked);
        assert_eq!(shotgun.current_ammo, before.current_ammo);
        assert_eq!(shotgun.reserve_ammo, before.reserve_ammo);
        assert_eq!(shotgun.fire_cooldown, before.fire_cooldown);
        assert!(!shotgun.is_reloading);
    }

    #[test]
    fn reload_moves_only_what_reserve_has() {
        let mut pistol = Weapon::new(WeaponKind::Pistol);
        pistol.current_ammo = 2;
        pistol.reserve_ammo = 4;
        assert!(pistol.start_reload());
        pistol.update(2.0, true);
        assert_eq!(pistol.current_ammo, 6);
        assert_eq!(pistol.reserve_ammo, 0);
    }

    #[test]
    fn reload_rejected_when_full_or_busy() {
        let mut pistol = Weapon::new(WeaponKind::Pistol);
        assert!(!pistol.start_reload());

        pistol.current_ammo = 5;
        assert!(pistol.start_reload());
        assert!(!pistol.start_reload());
    }

    #[test]
    fn inactive_weapon_does_not_reload() {
        let mut rifle = Weapon::new(WeaponKind::Rifle);
        rifle.current_ammo = 0;
        rifle.start_reload();
        rifle.update(5.0, false);
        assert!(rifle.is_reloading);
        assert_eq!(rifle.current_ammo, 0);
    }

    #[test]
    fn cancel_reload_keeps_ammo() {
        let mut shotgun = Weapon::new(WeaponKind::Shotgun);
        shotgun.current_ammo = 3;
        shotgun.start_reload();
        shotgun.cancel_reload();
        shotgun.update(5.0, true);
        assert_eq!(shotgun.current_ammo, 3);
        assert_eq!(shotgun.reserve_ammo, 24);
    }

    #[test]
    fn magazine_never_exceeds_capacity() {
        for kind in WeaponKind::ALL {
            let mut weapon = Weapon::new(kind);
            let capacity = kind.config().magazine_size;
            for _ in 0..200 {
                if weapon.trigger() == TriggerResult::Blocked && !weapon.is_reloading {
                    weapon.start_reload();
                }
                weapon.update(0.5, true);
                assert!(weapon.current_ammo <= capacity, "{:?} over capacity", kind);
            }
        }
    }

    #[test]
    fn shotgun_pellets_stay_within_spread() {
        let mut rng = StdRng::seed_from_u64(7);
        let dirs = pellet_directions(&SHOTGUN, Vec3::NEG_Z, &mut rng);
        assert_eq!(dirs.len(), 6);
        for d in dirs {
            assert!((d.length() - 1.0).abs() < 1e-5);
            // Two axes of at most 0.05 rad each.
            assert!(d.angle_between(Vec3::NEG_Z) <= 0.05 * std::f32::consts::SQRT_2 + 1e-4);
        }
    }

    #[test]
    fn ammo_display_marks_reload() {
        let mut pistol = Weapon::new(WeaponKind::Pistol);
        assert_eq!(pistol.ammo_display(), "12 / 36");
        pistol.current_ammo = 0;
        pistol.start_reload();
        assert_eq!(pistol.ammo_display(), "0 / 36 [RELOADING]");
    }
}
