//! The metamorphosis vortex: a rotating, breathing ring of hue-cycling
//! points around the viewport center.

use std::f32::consts::TAU;

use glam::Vec2;

use super::buffer::RenderBuffer;
use super::color::hsl_to_rgb;
use crate::api::config::RitualConfig;

const BASE_RADIUS: f32 = 100.0;
const RADIUS_SWING: f32 = 50.0;
const POINT_SIZE: f32 = 2.0;
const POINT_ALPHA: f32 = 0.3;

pub struct Vortex {
    points: usize,
    time: f32,
}

impl Vortex {
    pub fn new(config: &RitualConfig) -> Self {
        Self {
            points: config.vortex_points,
            time: 0.0,
        }
    }

    /// Advance the swirl clock.
    pub fn tick(&mut self, dt: f32) {
        self.time += dt;
    }

    /// Pack the ring into the frame buffer around `center`.
    pub fn pack(&self, buf: &mut RenderBuffer, center: Vec2) {
        let t = self.time;
        for i in 0..self.points {
            let angle = (i as f32 / self.points as f32) * TAU + t;
            let radius = BASE_RADIUS + (t + i as f32 * 0.1).sin() * RADIUS_SWING;
            let pos = center + Vec2::new(angle.cos(), angle.sin()) * radius;

            let hue = (i as f32 * 2.0 + t * 50.0) % 360.0;
            let (r, g, b) = hsl_to_rgb(hue, 0.7, 0.6);
            buf.push_instance(pos, POINT_SIZE, r, g, b, POINT_ALPHA);
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }
}
