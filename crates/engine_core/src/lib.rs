//! Core engine types and utilities for the arena shooter.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Transform and spatial components
//! - Frame time management
//! - Common component types for the enemy ECS

pub mod components;
pub mod time;
pub mod transform;

pub use components::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Quat, Vec2, Vec3};
pub use hecs::{Entity, World};
