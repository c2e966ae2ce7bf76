//! A single drifting particle with edge wraparound.

use glam::Vec2;

use super::color::ParticleColor;
use crate::core::rng::Rng;

/// One transformation particle. Advances by its velocity every fixed step
/// (velocities are in units per step at the 60 Hz reference rate) and wraps
/// at the viewport edges.
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub opacity: f32,
    pub color: ParticleColor,
}

impl Particle {
    /// Spawn a particle uniformly inside the viewport: velocity in [-1, 1]
    /// per axis, size in [1, 4], opacity in [0, 0.5].
    pub fn random(rng: &mut Rng, viewport: Vec2) -> Self {
        Self {
            pos: Vec2::new(
                rng.next_range(0.0, viewport.x),
                rng.next_range(0.0, viewport.y),
            ),
            vel: Vec2::new(rng.next_range(-1.0, 1.0), rng.next_range(-1.0, 1.0)),
            size: rng.next_range(1.0, 4.0),
            opacity: rng.next_range(0.0, 0.5),
            color: ParticleColor::random(rng),
        }
    }

    /// Advance one fixed step and wrap into `bounds`.
    pub fn advance(&mut self, bounds: Vec2) {
        self.pos += self.vel;

        if self.pos.x < 0.0 {
            self.pos.x = bounds.x;
        } else if self.pos.x > bounds.x {
            self.pos.x = 0.0;
        }
        if self.pos.y < 0.0 {
            self.pos.y = bounds.y;
        } else if self.pos.y > bounds.y {
            self.pos.y = 0.0;
        }
    }
}
