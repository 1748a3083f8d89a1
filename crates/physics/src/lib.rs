//! Arena collision queries using Rapier3D: static obstacles, ray casts and
//! overlap resolution.

pub mod physics_world;
pub mod raycast;

pub use physics_world::*;
pub use raycast::*;

// Re-export Rapier for downstream crates
pub use rapier3d;

pub use rapier3d::prelude::ColliderHandle;
