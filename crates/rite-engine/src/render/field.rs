//! The transformation particle field: population scales with the
//! transformation level, particles drift with wraparound, and near pairs are
//! joined by fading lines.

use glam::Vec2;

use super::buffer::RenderBuffer;
use super::particle::Particle;
use crate::api::config::RitualConfig;
use crate::core::rng::Rng;

/// Peak alpha of a connecting line at zero distance.
const LINK_ALPHA: f32 = 0.1;

pub struct ParticleField {
    particles: Vec<Particle>,
    per_level: usize,
    link_distance: f32,
    bounds: Vec2,
}

impl ParticleField {
    pub fn new(config: &RitualConfig) -> Self {
        Self {
            particles: Vec::new(),
            per_level: config.particles_per_level,
            link_distance: config.link_distance,
            bounds: Vec2::new(config.world_width, config.world_height),
        }
    }

    /// Match the population to the transformation level. Growth spawns new
    /// random particles; existing ones keep their motion.
    pub fn set_level(&mut self, level: u32, rng: &mut Rng) {
        let target = self.per_level * level as usize;
        while self.particles.len() < target {
            self.particles.push(Particle::random(rng, self.bounds));
        }
        self.particles.truncate(target);
    }

    /// New viewport bounds. Particles outside re-wrap on the next advance.
    pub fn resize(&mut self, bounds: Vec2) {
        self.bounds = bounds;
    }

    /// Advance one fixed step.
    pub fn tick(&mut self) {
        for p in &mut self.particles {
            p.advance(self.bounds);
        }
    }

    /// Pack particles and their connecting lines into the frame buffer.
    /// The pair scan is O(n²); population stays in the low hundreds.
    pub fn pack(&self, buf: &mut RenderBuffer) {
        for p in &self.particles {
            let (r, g, b) = p.color.rgb();
            buf.push_instance(p.pos, p.size, r, g, b, p.opacity);
        }

        for i in 0..self.particles.len() {
            for j in (i + 1)..self.particles.len() {
                let a = &self.particles[i];
                let b = &self.particles[j];
                let distance = a.pos.distance(b.pos);
                if distance < self.link_distance {
                    let alpha = LINK_ALPHA * (1.0 - distance / self.link_distance);
                    buf.push_line(a.pos, b.pos, alpha);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }
}
