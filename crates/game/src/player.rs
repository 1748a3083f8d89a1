//! Player controller and state.

use engine_core::{Health, Transform, Vec2, Vec3};

use crate::arena::Arena;
use crate::weapons::{Weapon, WeaponKind};

/// Camera height above the floor.
pub const EYE_HEIGHT: f32 = 1.5;
/// Collision radius on the ground plane.
pub const PLAYER_RADIUS: f32 = 0.5;
pub const MOVE_SPEED: f32 = 5.0;
pub const MAX_HEALTH: u32 = 100;
/// Base mouse sensitivity in degrees per pixel, scaled by the configured multiplier.
pub const BASE_SENSITIVITY_DEG: f32 = 0.2;

const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Player controller handling movement, view and loadout.
pub struct PlayerController {
    pub transform: Transform,
    pub yaw: f32,
    pub pitch: f32,
    pub health: Health,
    /// One weapon per slot, in [`WeaponKind::ALL`] order.
    pub weapons: [Weapon; 3],
    pub current_weapon: usize,
    /// Radians of rotation per pixel of mouse motion.
    sensitivity: f32,
}

impl PlayerController {
    pub fn new(sensitivity_multiplier: f32) -> Self {
        Self {
            transform: Transform::from_position(Vec3::new(0.0, EYE_HEIGHT, 0.0)),
            yaw: 0.0,
            pitch: 0.0,
            health: Health::new(MAX_HEALTH),
            weapons: WeaponKind::ALL.map(Weapon::new),
            current_weapon: 0,
            sensitivity: BASE_SENSITIVITY_DEG.to_radians() * sensitivity_multiplier,
        }
    }

    /// Back to spawn with full health and a fresh loadout. Sensitivity is kept.
    pub fn reset(&mut self) {
        *self = Self {
            sensitivity: self.sensitivity,
            ..Self::new(1.0)
        };
    }

    /// Apply mouse motion in pixels. Moving the mouse right turns right; up looks up.
    pub fn look(&mut self, delta: Vec2) {
        self.yaw -= delta.x * self.sensitivity;
        self.pitch = (self.pitch - delta.y * self.sensitivity).clamp(-MAX_PITCH, MAX_PITCH);
        self.sync_rotation();
    }

    pub fn set_view(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-MAX_PITCH, MAX_PITCH);
        self.sync_rotation();
    }

    fn sync_rotation(&mut self) {
        self.transform = Transform::from_yaw_pitch(self.transform.position, self.yaw, self.pitch);
    }

    /// Walk on the ground plane relative to the view yaw. `movement` is
    /// strafe (x) and forward (y), already normalized.
    pub fn walk(&mut self, movement: Vec2, dt: f32, arena: &Arena) {
        let forward = self.transform.forward();
        let right = self.transform.right();
        let forward_flat = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
        let right_flat = Vec3::new(right.x, 0.0, right.z).normalize_or_zero();

        let direction = forward_flat * movement.y + right_flat * movement.x;
        if direction.length_squared() > 0.0 {
            let step = direction.normalize() * MOVE_SPEED * dt;
            self.transform.translate(step);
        }
        self.transform.position = arena.resolve(self.transform.position, PLAYER_RADIUS);
        self.transform.position.y = EYE_HEIGHT;
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn forward(&self) -> Vec3 {
        self.transform.forward()
    }

    pub fn weapon(&self) -> &Weapon {
        &self.weapons[self.current_weapon]
    }

    pub fn weapon_mut(&mut self) -> &mut Weapon {
        &mut self.weapons[self.current_weapon]
    }

    /// Switch to `slot`, cancelling any reload on the weapon being put away.
    /// Returns false for an unknown slot or the slot already in hand.
    pub fn select_weapon(&mut self, slot: usize) -> bool {
        if slot >= self.weapons.len() || slot == self.current_weapon {
            return false;
        }
        self.weapon_mut().cancel_reload();
        self.current_weapon = slot;
        log::debug!("Switched to {}", self.weapon().config().name);
        true
    }

    /// Tick every weapon's cooldown and the active weapon's reload. Starts a
    /// reload on its own when the active magazine runs dry.
    pub fn update_weapons(&mut self, dt: f32) {
        let active = self.current_weapon;
        for (i, weapon) in self.weapons.iter_mut().enumerate() {
            weapon.update(dt, i == active);
        }
        let weapon = self.weapon_mut();
        if weapon.needs_auto_reload() && weapon.fire_cooldown <= 0.0 {
            weapon.start_reload();
        }
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health.take_damage(amount);
    }

    pub fn is_dead(&self) -> bool {
        self.health.is_dead()
    }
}
