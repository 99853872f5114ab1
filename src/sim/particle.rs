//! Decorative particles (never affect gameplay)

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{PARTICLE_DECAY, PARTICLE_DRIFT, PARTICLE_SPEED};

/// Color tag the host maps to a palette entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleColor {
    Spring,
    Bouncy,
    Debris,
    Dash,
    Death,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: ParticleColor,
    /// 0-1, decreases every tick
    pub life: f32,
}

/// All live particles, capped at `max_particles`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
    pub max_particles: usize,
}

impl ParticleSystem {
    pub fn new(max_particles: usize) -> Self {
        Self {
            particles: Vec::with_capacity(max_particles),
            max_particles,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Burst of `count` particles at `pos`, trimmed to the remaining budget
    pub fn spawn<R: Rng + ?Sized>(&mut self, pos: Vec2, color: ParticleColor, count: usize, rng: &mut R) {
        let room = self.max_particles.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            let vel = Vec2::new(
                rng.random_range(-PARTICLE_SPEED..=PARTICLE_SPEED),
                rng.random_range(-PARTICLE_SPEED..=PARTICLE_SPEED),
            );
            self.particles.push(Particle {
                pos,
                vel,
                color,
                life: 1.0,
            });
        }
    }

    /// Move, drift and age every particle, dropping expired ones.
    ///
    /// Life decays by a fixed amount per tick regardless of `_dt`.
    pub fn step(&mut self, _dt: f32) {
        for particle in self.particles.iter_mut() {
            particle.pos += particle.vel;
            particle.vel.y += PARTICLE_DRIFT;
            particle.life -= PARTICLE_DECAY;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_velocity_range() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut system = ParticleSystem::new(256);
        system.spawn(Vec2::new(10.0, 20.0), ParticleColor::Spring, 100, &mut rng);

        assert_eq!(system.len(), 100);
        for p in system.iter() {
            assert_eq!(p.pos, Vec2::new(10.0, 20.0));
            assert_eq!(p.life, 1.0);
            assert!(p.vel.x.abs() <= 3.0 && p.vel.y.abs() <= 3.0);
        }
    }

    #[test]
    fn test_spawn_respects_cap() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut system = ParticleSystem::new(10);
        system.spawn(Vec2::ZERO, ParticleColor::Dash, 8, &mut rng);
        system.spawn(Vec2::ZERO, ParticleColor::Dash, 8, &mut rng);
        assert_eq!(system.len(), 10);

        let mut disabled = ParticleSystem::new(0);
        disabled.spawn(Vec2::ZERO, ParticleColor::Death, 8, &mut rng);
        assert!(disabled.is_empty());
    }

    #[test]
    fn test_step_moves_and_drifts() {
        let mut system = ParticleSystem::new(4);
        system.particles.push(Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, -2.0),
            color: ParticleColor::Debris,
            life: 1.0,
        });
        system.step(1.0 / 60.0);

        let p = &system.particles[0];
        assert_eq!(p.pos, Vec2::new(1.0, -2.0));
        assert!((p.vel.y - (-1.9)).abs() < 1e-5);
        assert!((p.life - 0.98).abs() < 1e-5);
    }

    #[test]
    fn test_decay_ignores_dt() {
        let mut fast = ParticleSystem::new(4);
        let mut slow = ParticleSystem::new(4);
        let mut rng = Pcg32::seed_from_u64(1);
        fast.spawn(Vec2::ZERO, ParticleColor::Bouncy, 1, &mut rng);
        slow.particles = fast.particles.clone();

        fast.step(0.001);
        slow.step(0.5);
        assert_eq!(fast.particles[0].life, slow.particles[0].life);
    }

    #[test]
    fn test_particles_expire_after_fifty_ticks() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut system = ParticleSystem::new(16);
        system.spawn(Vec2::ZERO, ParticleColor::Death, 16, &mut rng);

        for _ in 0..49 {
            system.step(1.0 / 60.0);
        }
        assert_eq!(system.len(), 16);
        // Float accumulation may leave a sliver of life after 50 ticks
        for _ in 0..2 {
            system.step(1.0 / 60.0);
        }
        assert!(system.is_empty());
    }
}
