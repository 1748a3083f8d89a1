//! Gameplay for the arena shooter: weapons, enemies, spawning, effects and
//! the phase machine, all driven through [`simulation::Simulation`].

pub mod arena;
pub mod config;
pub mod effects;
pub mod enemies;
pub mod hud;
pub mod player;
pub mod simulation;
pub mod spawner;
pub mod state;
pub mod weapons;

pub use simulation::Simulation;
