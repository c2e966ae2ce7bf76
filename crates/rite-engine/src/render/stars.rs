//! Background starfields: static white dots with staggered sine pulses,
//! scattered behind the portal and mirror screens.

use std::f32::consts::TAU;

use glam::Vec2;

use super::buffer::RenderBuffer;
use crate::api::config::RitualConfig;
use crate::core::rng::Rng;

const STAR_SIZE: f32 = 1.0;

/// One star: position stored as viewport fractions so a resize rescales the
/// whole field for free.
#[derive(Debug, Clone)]
struct Star {
    frac: Vec2,
    /// Pulse stagger in seconds.
    delay: f32,
    /// Full pulse period in seconds.
    period: f32,
    peak_opacity: f32,
}

pub struct StarField {
    stars: Vec<Star>,
    time: f32,
}

impl StarField {
    /// The 50-star field behind the portal screen.
    pub fn portal(config: &RitualConfig, rng: &mut Rng) -> Self {
        Self::scatter(config.portal_stars, 3.0, 2.0, 5.0, 0.7, rng)
    }

    /// The 20-star ambient field over the mirror.
    pub fn mirror(config: &RitualConfig, rng: &mut Rng) -> Self {
        Self::scatter(config.mirror_stars, 2.0, 1.0, 3.0, 0.5, rng)
    }

    fn scatter(
        count: usize,
        max_delay: f32,
        min_period: f32,
        max_period: f32,
        max_peak: f32,
        rng: &mut Rng,
    ) -> Self {
        let stars = (0..count)
            .map(|_| Star {
                frac: Vec2::new(rng.next_f32(), rng.next_f32()),
                delay: rng.next_range(0.0, max_delay),
                period: rng.next_range(min_period, max_period),
                peak_opacity: rng.next_range(0.0, max_peak),
            })
            .collect();
        Self { stars, time: 0.0 }
    }

    pub fn tick(&mut self, dt: f32) {
        self.time += dt;
    }

    /// Pack the field into the frame buffer at the current pulse phase.
    pub fn pack(&self, buf: &mut RenderBuffer, viewport: Vec2) {
        for star in &self.stars {
            let t = (self.time - star.delay).max(0.0);
            let pulse = 0.5 * (1.0 - (TAU * t / star.period).cos());
            buf.push_instance(
                star.frac * viewport,
                STAR_SIZE,
                1.0,
                1.0,
                1.0,
                star.peak_opacity * pulse,
            );
        }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::protocol::BufferLayout;

    fn buffer() -> RenderBuffer {
        RenderBuffer::new(BufferLayout {
            max_instances: 128,
            max_line_vertices: 4,
            max_events: 4,
        })
    }

    #[test]
    fn portal_and_mirror_counts() {
        let cfg = RitualConfig::default();
        let mut rng = Rng::new(6);
        assert_eq!(StarField::portal(&cfg, &mut rng).len(), 50);
        assert_eq!(StarField::mirror(&cfg, &mut rng).len(), 20);
    }

    #[test]
    fn stars_scale_with_viewport() {
        let cfg = RitualConfig::default();
        let mut rng = Rng::new(6);
        let field = StarField::mirror(&cfg, &mut rng);

        let mut small = buffer();
        field.pack(&mut small, Vec2::new(100.0, 100.0));
        let mut large = buffer();
        field.pack(&mut large, Vec2::new(1000.0, 1000.0));

        let first = |b: &RenderBuffer| unsafe { (*b.instances_ptr(), *b.instances_ptr().add(1)) };
        let (sx, sy) = first(&small);
        let (lx, ly) = first(&large);
        assert!((lx - sx * 10.0).abs() < 1e-3);
        assert!((ly - sy * 10.0).abs() < 1e-3);
    }

    #[test]
    fn pulse_starts_dark_and_brightens() {
        let cfg = RitualConfig::default();
        let mut rng = Rng::new(6);
        let mut field = StarField::mirror(&cfg, &mut rng);

        let alpha_sum = |f: &StarField| {
            let mut buf = buffer();
            f.pack(&mut buf, Vec2::new(500.0, 500.0));
            (0..buf.instance_count())
                .map(|i| unsafe {
                    *buf.instances_ptr()
                        .add(i * crate::bridge::protocol::INSTANCE_FLOATS + 6)
                })
                .sum::<f32>()
        };

        let dark = alpha_sum(&field);
        field.tick(1.0);
        let lit = alpha_sum(&field);
        assert!(lit > dark);
    }
}
