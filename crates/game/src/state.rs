//! Game state types: phases, modes, kill feed and screen shake.

use glam::Vec3;

/// Top-level phase of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Playing,
    Paused,
    /// The run ended; waits for acknowledgement before returning to the menu.
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Static targets that respawn forever.
    TargetPractice,
    /// Escalating waves of pursuing enemies.
    Survival,
}

impl GameMode {
    pub fn name(&self) -> &'static str {
        match self {
            GameMode::TargetPractice => "Target Practice",
            GameMode::Survival => "Survival",
        }
    }

    /// Menu key mapping: 1 = target practice, 2 = survival.
    pub fn from_menu_slot(slot: usize) -> Option<Self> {
        match slot {
            0 => Some(GameMode::TargetPractice),
            1 => Some(GameMode::Survival),
            _ => None,
        }
    }
}

/// Camera shake after firing. Decays linearly to zero over its duration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScreenShake {
    pub amount: f32,
    pub remaining: f32,
    duration: f32,
    pub offset: Vec3,
}

impl ScreenShake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a shake, keeping the stronger of the current and the new one.
    pub fn trigger(&mut self, amount: f32, duration: f32) {
        if amount >= self.current_amount() {
            self.amount = amount;
            self.duration = duration;
            self.remaining = duration;
        }
    }

    fn current_amount(&self) -> f32 {
        if self.remaining <= 0.0 || self.duration <= 0.0 {
            return 0.0;
        }
        self.amount * (self.remaining / self.duration)
    }

    /// Advance the shake. `time` drives the oscillation so the offset is deterministic.
    pub fn update(&mut self, dt: f32, time: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
        let strength = self.current_amount();
        if strength > 0.0 {
            self.offset = Vec3::new(
                (time * 173.7).sin() * strength,
                (time * 259.3).cos() * strength,
                0.0,
            );
        } else {
            self.offset = Vec3::ZERO;
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }
}

/// A message on the kill feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedMessage {
    pub text: String,
    pub color: [f32; 4],
    pub time_remaining: f32,
}

/// Short-lived event messages shown in the corner of the HUD.
#[derive(Debug, Clone)]
pub struct KillFeed {
    pub messages: Vec<FeedMessage>,
    pub max_visible: usize,
    default_duration: f32,
}

impl Default for KillFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl KillFeed {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            max_visible: 5,
            default_duration: 3.0,
        }
    }

    pub fn push(&mut self, text: impl Into<String>, color: [f32; 4]) {
        self.messages.push(FeedMessage {
            text: text.into(),
            color,
            time_remaining: self.default_duration,
        });
        if self.messages.len() > 50 {
            self.messages.remove(0);
        }
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(text, [0.3, 1.0, 0.3, 1.0]);
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.push(text, [1.0, 0.9, 0.3, 1.0]);
    }

    pub fn update(&mut self, dt: f32) {
        for msg in &mut self.messages {
            msg.time_remaining -= dt;
        }
        self.messages.retain(|m| m.time_remaining > 0.0);
    }

    /// The oldest live messages, up to `max_visible`.
    pub fn visible(&self) -> impl Iterator<Item = &FeedMessage> {
        self.messages.iter().take(self.max_visible)
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
