//! Death-burst particles.

use engine_core::{Lifetime, Vec3};
use rand::prelude::*;

/// Particles per burst.
pub const BURST_COUNT: usize = 15;
/// Downward acceleration, m/s^2.
pub const PARTICLE_GRAVITY: f32 = 10.0;

pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub color: [f32; 3],
    pub lifetime: Lifetime,
}

impl Particle {
    /// Fade-out alpha in `[0, 1]`.
    pub fn alpha(&self) -> f32 {
        self.lifetime.fraction()
    }
}

/// Short-lived debris spawned where an enemy dies.
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
    rng: StdRng,
}

impl ParticleSystem {
    pub fn new(rng: StdRng) -> Self {
        Self { particles: Vec::new(), rng }
    }

    pub fn burst(&mut self, position: Vec3, color: [f32; 3]) {
        for _ in 0..BURST_COUNT {
            let velocity = Vec3::new(
                self.rng.gen_range(-3.0..=3.0),
                self.rng.gen_range(0.0..=3.0),
                self.rng.gen_range(-3.0..=3.0),
            );
            self.particles.push(Particle {
                position,
                velocity,
                color,
                lifetime: Lifetime::new(self.rng.gen_range(0.3..=0.7)),
            });
        }
    }

    pub fn update(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.position += p.velocity * dt;
            p.velocity.y -= PARTICLE_GRAVITY * dt;
        }
        self.particles.retain_mut(|p| !p.lifetime.update(dt));
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system() -> ParticleSystem {
        ParticleSystem::new(StdRng::seed_from_u64(9))
    }

    #[test]
    fn burst_spawns_within_ranges() {
        let mut fx = system();
        fx.burst(Vec3::new(1.0, 1.0, -5.0), [1.0, 0.0, 0.0]);
        assert_eq!(fx.len(), BURST_COUNT);
        for p in &fx.particles {
            assert!(p.velocity.x.abs() <= 3.0 && p.velocity.z.abs() <= 3.0);
            assert!((0.0..=3.0).contains(&p.velocity.y));
            assert!((0.3..=0.7).contains(&p.lifetime.total));
            assert_eq!(p.alpha(), 1.0);
        }
    }

    #[test]
    fn gravity_pulls_particles_down() {
        let mut fx = system();
        fx.burst(Vec3::ZERO, [1.0; 3]);
        let before: Vec<f32> = fx.particles.iter().map(|p| p.velocity.y).collect();
        fx.update(0.1);
        for (p, vy) in fx.particles.iter().zip(before) {
            assert!((p.velocity.y - (vy - 1.0)).abs() < 1e-5);
        }
    }

    #[test]
    fn particles_expire() {
        let mut fx = system();
        fx.burst(Vec3::ZERO, [1.0; 3]);
        fx.update(0.2);
        assert_eq!(fx.len(), BURST_COUNT);
        fx.update(0.6);
        assert!(fx.is_empty());
    }
}
