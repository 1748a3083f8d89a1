//! Common ECS components used across the engine.

/// Health component for damageable entities. Hit points are whole numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Subtract `amount`, saturating at zero.
    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn is_dead(&self) -> bool {
        self.current == 0
    }

    pub fn percentage(&self) -> f32 {
        if self.max == 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

/// AI state for enemies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AIState {
    /// Stationary; never moves or attacks (practice targets).
    #[default]
    Idle,
    Chasing,
    Attacking,
}

/// Component storing AI behavior state.
#[derive(Debug, Clone, Copy, Default)]
pub struct AIComponent {
    pub state: AIState,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub current_cooldown: f32,
}

impl AIComponent {
    pub fn new(attack_range: f32, attack_cooldown: f32) -> Self {
        Self {
            state: AIState::Chasing,
            attack_range,
            attack_cooldown,
            current_cooldown: 0.0,
        }
    }

    /// An AI that never leaves `Idle`.
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn can_attack(&self) -> bool {
        self.state == AIState::Attacking && self.current_cooldown <= 0.0
    }

    pub fn trigger_attack(&mut self) {
        self.current_cooldown = self.attack_cooldown;
    }

    pub fn update_cooldown(&mut self, dt: f32) {
        self.current_cooldown = (self.current_cooldown - dt).max(0.0);
    }
}

/// Lifetime component for temporary entities (particles, feed messages).
#[derive(Debug, Clone, Copy)]
pub struct Lifetime {
    pub remaining: f32,
    pub total: f32,
}

impl Lifetime {
    pub fn new(seconds: f32) -> Self {
        Self {
            remaining: seconds,
            total: seconds,
        }
    }

    /// Tick down; returns true once expired.
    pub fn update(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.remaining <= 0.0
    }

    /// Remaining fraction in `[0, 1]` (used for fade-out alpha).
    pub fn fraction(&self) -> f32 {
        if self.total <= 0.0 {
            return 0.0;
        }
        (self.remaining / self.total).clamp(0.0, 1.0)
    }
}
