//! Physics world management with Rapier3D.
//!
//! The arena only has static geometry, so the world never steps: it is a
//! collider set plus a query pipeline used for ray casts and overlap tests.
//! Call [`PhysicsWorld::update_query_pipeline`] after adding colliders.

use engine_core::Vec3;
use rapier3d::prelude::*;

/// Obstacles block everything.
fn obstacle_collision_groups() -> InteractionGroups {
    InteractionGroups::new(Group::GROUP_1, Group::ALL)
}

/// Static collision world for the arena.
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub query_pipeline: QueryPipeline,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsWorld {
    /// Create an empty physics world.
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Update query pipeline for raycasting.
    pub fn update_query_pipeline(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Add a static axis-aligned box obstacle. No parent body; collider is fixed in world.
    /// `center`: world position of the box center. `half_extents`: half sizes in X, Y, Z.
    pub fn add_static_cuboid(&mut self, center: Vec3, half_extents: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![center.x, center.y, center.z])
            .collision_groups(obstacle_collision_groups())
            .build();
        let handle = self.collider_set.insert(collider);
        log::debug!("Added obstacle at {:?} (half extents {:?})", center, half_extents);
        handle
    }

    /// Push a circle of `radius` (on the XZ ground plane) out of every obstacle it
    /// overlaps. The Y coordinate is left untouched. Each obstacle is resolved
    /// along its axis of least penetration.
    pub fn push_out_horizontal(&self, position: Vec3, radius: f32) -> Vec3 {
        let mut resolved = position;
        for handle in self.overlap_sphere(position, radius) {
            let Some(collider) = self.collider_set.get(handle) else {
                continue;
            };
            let aabb = collider.compute_aabb();
            let min_x = aabb.mins.x - radius;
            let max_x = aabb.maxs.x + radius;
            let min_z = aabb.mins.z - radius;
            let max_z = aabb.maxs.z + radius;

            if resolved.x <= min_x || resolved.x >= max_x || resolved.z <= min_z || resolved.z >= max_z {
                continue;
            }

            let to_min_x = resolved.x - min_x;
            let to_max_x = max_x - resolved.x;
            let to_min_z = resolved.z - min_z;
            let to_max_z = max_z - resolved.z;
            let least = to_min_x.min(to_max_x).min(to_min_z).min(to_max_z);

            if least == to_min_x {
                resolved.x = min_x;
            } else if least == to_max_x {
                resolved.x = max_x;
            } else if least == to_min_z {
                resolved.z = min_z;
            } else {
                resolved.z = max_z;
            }
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with_box() -> PhysicsWorld {
        let mut physics = PhysicsWorld::new();
        physics.add_static_cuboid(Vec3::new(0.0, 1.5, -5.0), Vec3::new(1.0, 1.5, 1.0));
        physics.update_query_pipeline();
        physics
    }

    #[test]
    fn push_out_moves_circle_to_nearest_face() {
        let physics = world_with_box();
        // Slightly inside the +X face.
        let pushed = physics.push_out_horizontal(Vec3::new(1.2, 1.0, -5.0), 0.5);
        assert!((pushed.x - 1.5).abs() < 1e-4);
        assert!((pushed.z + 5.0).abs() < 1e-4);
        assert_eq!(pushed.y, 1.0);
    }

    #[test]
    fn push_out_leaves_clear_positions_alone() {
        let physics = world_with_box();
        let p = Vec3::new(4.0, 1.0, -5.0);
        assert_eq!(physics.push_out_horizontal(p, 0.5), p);
    }
}
