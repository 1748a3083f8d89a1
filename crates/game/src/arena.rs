//! The play area: a flat square floor with static box obstacles.

use engine_core::Vec3;
use physics::PhysicsWorld;

/// Half the side length of the square floor, in metres.
pub const ARENA_HALF_SIZE: f32 = 50.0;

/// One box obstacle standing on the floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    /// Ground-plane position of the box centre (y is ignored).
    pub x: f32,
    pub z: f32,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Obstacle {
    pub const fn new(x: f32, z: f32, width: f32, height: f32, depth: f32) -> Self {
        Self { x, z, width, height, depth }
    }

    pub fn center(&self) -> Vec3 {
        Vec3::new(self.x, self.height * 0.5, self.z)
    }

    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(self.width * 0.5, self.height * 0.5, self.depth * 0.5)
    }
}

/// Fixed obstacle layout. The player spawns at the origin facing -Z.
pub const OBSTACLES: [Obstacle; 7] = [
    Obstacle::new(6.0, -10.0, 2.0, 3.0, 2.0),
    Obstacle::new(-6.0, -10.0, 2.0, 3.0, 2.0),
    Obstacle::new(0.0, -22.0, 3.0, 3.0, 3.0),
    Obstacle::new(-12.0, -14.0, 2.0, 4.0, 2.0),
    Obstacle::new(12.0, -14.0, 2.0, 4.0, 2.0),
    Obstacle::new(-4.0, 5.0, 2.0, 3.0, 2.0),
    Obstacle::new(4.0, 5.0, 2.0, 3.0, 2.0),
];

/// Floor bounds plus the collision world holding the obstacles.
pub struct Arena {
    physics: PhysicsWorld,
    half_size: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Arena {
    /// The standard arena with the fixed obstacle layout.
    pub fn new() -> Self {
        Self::with_obstacles(&OBSTACLES)
    }

    pub fn with_obstacles(obstacles: &[Obstacle]) -> Self {
        let mut physics = PhysicsWorld::new();
        for obstacle in obstacles {
            physics.add_static_cuboid(obstacle.center(), obstacle.half_extents());
        }
        physics.update_query_pipeline();
        log::info!("Arena ready with {} obstacles", obstacles.len());

        Self {
            physics,
            half_size: ARENA_HALF_SIZE,
        }
    }

    /// An arena with no obstacles.
    pub fn empty() -> Self {
        Self::with_obstacles(&[])
    }

    /// Clamp a position to the floor on X and Z.
    pub fn clamp(&self, position: Vec3) -> Vec3 {
        Vec3::new(
            position.x.clamp(-self.half_size, self.half_size),
            position.y,
            position.z.clamp(-self.half_size, self.half_size),
        )
    }

    /// Clamp to the floor, then push a circle of `radius` out of obstacles.
    pub fn resolve(&self, position: Vec3, radius: f32) -> Vec3 {
        let pushed = self.physics.push_out_horizontal(self.clamp(position), radius);
        self.clamp(pushed)
    }

    /// Distance to the first obstacle along a ray, or `max_distance` if nothing blocks it.
    pub fn occlusion_distance(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> f32 {
        self.physics
            .raycast(origin, direction, max_distance)
            .map_or(max_distance, |hit| hit.distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_keeps_height() {
        let arena = Arena::empty();
        let p = arena.clamp(Vec3::new(80.0, 1.5, -70.0));
        assert_eq!(p, Vec3::new(50.0, 1.5, -50.0));
    }

    #[test]
    fn resolve_pushes_out_of_obstacles() {
        let arena = Arena::new();
        // Inside the obstacle at (6, -10), nearest its +X face.
        let p = arena.resolve(Vec3::new(6.8, 1.5, -10.0), 0.5);
        assert!((p.x - 7.5).abs() < 1e-4, "got {:?}", p);
    }

    #[test]
    fn obstacles_block_rays() {
        let arena = Arena::new();
        let eye = Vec3::new(0.0, 1.5, 0.0);
        // Straight down the middle to the box at z = -22 (front face at -20.5).
        let d = arena.occlusion_distance(eye, Vec3::NEG_Z, 100.0);
        assert!((d - 20.5).abs() < 1e-3);
        // Looking up into the sky.
        assert_eq!(arena.occlusion_distance(eye, Vec3::Y, 100.0), 100.0);
    }
}
