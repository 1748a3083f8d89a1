//! Raycasting for weapon hit detection and queries.

use crate::PhysicsWorld;
use engine_core::Vec3;
use rapier3d::prelude::*;

/// Result of a raycast query against the obstacle colliders.
#[derive(Debug, Clone, Copy)]
pub struct RaycastHit {
    /// The collider that was hit.
    pub collider: ColliderHandle,
    /// Distance along the ray to the hit point.
    pub distance: f32,
    /// World position of the hit.
    pub point: Vec3,
    /// Surface normal at the hit point.
    pub normal: Vec3,
}

impl PhysicsWorld {
    /// Cast a ray and return the first obstacle hit.
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RaycastHit> {
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );

        let filter = QueryFilter::default();

        self.query_pipeline
            .cast_ray_and_get_normal(
                &self.rigid_body_set,
                &self.collider_set,
                &ray,
                max_distance,
                true,
                filter,
            )
            .map(|(collider, intersection)| {
                let point = ray.point_at(intersection.time_of_impact);
                RaycastHit {
                    collider,
                    distance: intersection.time_of_impact,
                    point: Vec3::new(point.x, point.y, point.z),
                    normal: Vec3::new(
                        intersection.normal.x,
                        intersection.normal.y,
                        intersection.normal.z,
                    ),
                }
            })
    }

    /// Find all colliders within a sphere.
    pub fn overlap_sphere(&self, center: Vec3, radius: f32) -> Vec<ColliderHandle> {
        let shape = Ball::new(radius);
        let shape_pos = Isometry::translation(center.x, center.y, center.z);
        let filter = QueryFilter::default();

        let mut results = Vec::new();
        self.query_pipeline.intersections_with_shape(
            &self.rigid_body_set,
            &self.collider_set,
            &shape_pos,
            &shape,
            filter,
            |collider| {
                results.push(collider);
                true // Continue searching
            },
        );

        results
    }
}

/// Slab test of a ray against an axis-aligned box. Returns the entry distance
/// along `direction` (which must be normalized), `0.0` when the origin is inside
/// the box, or `None` when the box is missed or further than `max_distance`.
pub fn ray_box(
    origin: Vec3,
    direction: Vec3,
    center: Vec3,
    half_extents: Vec3,
    max_distance: f32,
) -> Option<f32> {
    let min = center - half_extents;
    let max = center + half_extents;
    let mut t_enter = 0.0_f32;
    let mut t_exit = max_distance;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        if d.abs() < 1e-8 {
            // Parallel to this slab: must already be between the planes.
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let mut t0 = (min[axis] - o) * inv;
        let mut t1 = (max[axis] - o) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_enter = t_enter.max(t0);
        t_exit = t_exit.min(t1);
        if t_enter > t_exit {
            return None;
        }
    }

    Some(t_enter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_box_hits_front_face() {
        let t = ray_box(
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::NEG_Z,
            Vec3::new(0.0, 1.0, -10.0),
            Vec3::new(0.5, 1.0, 0.5),
            100.0,
        );
        assert!((t.unwrap() - 9.5).abs() < 1e-5);
    }

    #[test]
    fn ray_box_respects_range_and_direction() {
        let center = Vec3::new(0.0, 1.0, -10.0);
        let half = Vec3::splat(0.5);
        assert!(ray_box(Vec3::Y, Vec3::NEG_Z, center, half, 5.0).is_none());
        assert!(ray_box(Vec3::Y, Vec3::Z, center, half, 100.0).is_none());
        assert!(ray_box(Vec3::new(2.0, 1.0, 0.0), Vec3::NEG_Z, center, half, 100.0).is_none());
    }

    #[test]
    fn ray_box_inside_returns_zero() {
        let t = ray_box(Vec3::ZERO, Vec3::X, Vec3::ZERO, Vec3::ONE, 10.0);
        assert_eq!(t, Some(0.0));
    }

    #[test]
    fn raycast_reports_obstacle_distance() {
        let mut physics = PhysicsWorld::new();
        physics.add_static_cuboid(Vec3::new(0.0, 1.5, -5.0), Vec3::new(1.0, 1.5, 1.0));
        physics.update_query_pipeline();

        let hit = physics
            .raycast(Vec3::new(0.0, 1.5, 0.0), Vec3::NEG_Z, 100.0)
            .expect("ray should hit the box");
        assert!((hit.distance - 4.0).abs() < 1e-3);
        assert!(hit.normal.z > 0.9);

        // Beside the box the ray is clear.
        assert!(physics.raycast(Vec3::new(3.0, 1.5, 0.0), Vec3::NEG_Z, 10.0).is_none());
    }

    #[test]
    fn overlap_sphere_finds_touching_obstacles() {
        let mut physics = PhysicsWorld::new();
        let handle = physics.add_static_cuboid(Vec3::ZERO, Vec3::ONE);
        physics.update_query_pipeline();
        assert_eq!(physics.overlap_sphere(Vec3::new(1.2, 0.0, 0.0), 0.5), vec![handle]);
        assert!(physics.overlap_sphere(Vec3::new(3.0, 0.0, 0.0), 0.5).is_empty());
    }
}
