//! HUD (Heads-Up Display) data for each frame.
//! Built read-only from the simulation after it has been updated.

use crate::simulation::Simulation;
use crate::state::{GameMode, GamePhase};

pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const GREY: [f32; 4] = [0.8, 0.8, 0.8, 1.0];
pub const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
pub const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
pub const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
pub const ORANGE: [f32; 4] = [1.0, 0.55, 0.0, 1.0];
pub const CYAN: [f32; 4] = [0.0, 1.0, 1.0, 1.0];

/// White above 5 rounds, yellow while any remain, red when empty.
pub fn ammo_color(rounds: u32) -> [f32; 4] {
    if rounds > 5 {
        WHITE
    } else if rounds > 0 {
        YELLOW
    } else {
        RED
    }
}

/// Green above 60 %, yellow above 30 %, red below. Used for the player and enemy bars.
pub fn health_color(fraction: f32) -> [f32; 4] {
    if fraction > 0.6 {
        GREEN
    } else if fraction > 0.3 {
        YELLOW
    } else {
        RED
    }
}

/// One line of text with its colour.
#[derive(Debug, Clone, PartialEq)]
pub struct HudLine {
    pub text: String,
    pub color: [f32; 4],
}

impl HudLine {
    fn new(text: impl Into<String>, color: [f32; 4]) -> Self {
        Self { text: text.into(), color }
    }
}

/// Everything drawn over the 3D view for one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum HudData {
    Menu {
        title: HudLine,
        subtitle: HudLine,
        options: Vec<HudLine>,
        controls: HudLine,
        best_score: Option<HudLine>,
    },
    Playing(PlayingHud),
    Paused {
        title: HudLine,
        options: Vec<HudLine>,
    },
    GameOver {
        title: HudLine,
        final_score: HudLine,
        best_score: HudLine,
        prompt: HudLine,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayingHud {
    pub show_crosshair: bool,
    pub ammo: HudLine,
    pub weapon_name: HudLine,
    pub reload_progress: f32,
    pub health: HudLine,
    pub score: HudLine,
    /// Survival only.
    pub wave: Option<HudLine>,
    pub kill_feed: Vec<HudLine>,
}

impl HudData {
    pub fn from_simulation(sim: &Simulation) -> Self {
        match sim.phase() {
            GamePhase::MainMenu => HudData::Menu {
                title: HudLine::new("ARENA FPS", ORANGE),
                subtitle: HudLine::new("Choose a mode", WHITE),
                options: vec![
                    HudLine::new(format!("1: {}", GameMode::TargetPractice.name()), GREEN),
                    HudLine::new(format!("2: {}", GameMode::Survival.name()), RED),
                ],
                controls: HudLine::new(
                    "WASD: Move | Mouse: Look | Click: Shoot | R: Reload | 1/2/3: Weapons",
                    GREY,
                ),
                best_score: (sim.best_score() > 0)
                    .then(|| HudLine::new(format!("Best: {}", sim.best_score()), CYAN)),
            },
            GamePhase::Playing => HudData::Playing(Self::playing(sim)),
            GamePhase::Paused => HudData::Paused {
                title: HudLine::new("PAUSED", YELLOW),
                options: vec![
                    HudLine::new("P/ESC: Resume", WHITE),
                    HudLine::new("M: Main Menu", WHITE),
                ],
            },
            GamePhase::GameOver => HudData::GameOver {
                title: HudLine::new("GAME OVER", RED),
                final_score: HudLine::new(format!("Final Score: {}", sim.final_score()), WHITE),
                best_score: HudLine::new(format!("Best: {}", sim.best_score()), CYAN),
                prompt: HudLine::new("Enter/Space/Click: Main Menu", GREY),
            },
        }
    }

    fn playing(sim: &Simulation) -> PlayingHud {
        let player = sim.player();
        let weapon = player.weapon();
        PlayingHud {
            show_crosshair: true,
            ammo: HudLine::new(weapon.ammo_display(), ammo_color(weapon.current_ammo)),
            weapon_name: HudLine::new(weapon.config().name, GREY),
            reload_progress: weapon.reload_progress(),
            health: HudLine::new(
                format!("HP: {}", player.health.current),
                health_color(player.health.percentage()),
            ),
            score: HudLine::new(format!("Score: {} | Kills: {}", sim.score(), sim.kills()), WHITE),
            wave: (sim.mode() == Some(GameMode::Survival))
                .then(|| HudLine::new(format!("Wave: {}", sim.wave()), CYAN)),
            kill_feed: sim
                .feed()
                .visible()
                .map(|m| HudLine::new(m.text.clone(), m.color))
                .collect(),
        }
    }

    /// One-line summary, used for the window title.
    pub fn summary(&self) -> String {
        match self {
            HudData::Menu { best_score, .. } => match best_score {
                Some(best) => format!("Arena FPS | 1: Target Practice  2: Survival | {}", best.text),
                None => "Arena FPS | 1: Target Practice  2: Survival".to_string(),
            },
            HudData::Playing(hud) => {
                let mut s = format!(
                    "{} {} | {} | {}",
                    hud.weapon_name.text, hud.ammo.text, hud.health.text, hud.score.text
                );
                if let Some(wave) = &hud.wave {
                    s.push_str(" | ");
                    s.push_str(&wave.text);
                }
                if let Some(latest) = hud.kill_feed.last() {
                    s.push_str(" | ");
                    s.push_str(&latest.text);
                }
                s
            }
            HudData::Paused { .. } => "Arena FPS | PAUSED | P/ESC: Resume  M: Main Menu".to_string(),
            HudData::GameOver { final_score, best_score, .. } => {
                format!("Arena FPS | GAME OVER | {} | {}", final_score.text, best_score.text)
            }
        }
    }
}
