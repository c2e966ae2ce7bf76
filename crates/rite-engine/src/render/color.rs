//! Colors for the canvas layer: the fixed particle palette and the HSL math
//! the vortex hue-cycling needs.

use crate::core::rng::Rng;

/// The three particle colors of the experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleColor {
    /// #8B5CF6
    Violet,
    /// #EC4899
    Pink,
    /// #3B82F6
    Blue,
}

impl ParticleColor {
    pub const ALL: [ParticleColor; 3] = [Self::Violet, Self::Pink, Self::Blue];

    pub fn random(rng: &mut Rng) -> Self {
        Self::ALL[rng.next_int(3) as usize]
    }

    /// Normalized RGB components.
    pub fn rgb(self) -> (f32, f32, f32) {
        match self {
            Self::Violet => (139.0 / 255.0, 92.0 / 255.0, 246.0 / 255.0),
            Self::Pink => (236.0 / 255.0, 72.0 / 255.0, 153.0 / 255.0),
            Self::Blue => (59.0 / 255.0, 130.0 / 255.0, 246.0 / 255.0),
        }
    }
}

/// Convert HSL (hue in degrees, saturation/lightness in [0, 1]) to
/// normalized RGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    let h = h.rem_euclid(360.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;
    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    (r + m, g + m, b + m)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn palette_matches_hex() {
        let (r, g, b) = ParticleColor::Violet.rgb();
        assert!(close(r * 255.0, 139.0) && close(g * 255.0, 92.0) && close(b * 255.0, 246.0));
    }

    #[test]
    fn random_covers_palette() {
        let mut rng = Rng::new(4);
        let mut seen = [false; 3];
        for _ in 0..100 {
            match ParticleColor::random(&mut rng) {
                ParticleColor::Violet => seen[0] = true,
                ParticleColor::Pink => seen[1] = true,
                ParticleColor::Blue => seen[2] = true,
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn hsl_primaries() {
        let (r, g, b) = hsl_to_rgb(0.0, 1.0, 0.5);
        assert!(close(r, 1.0) && close(g, 0.0) && close(b, 0.0));
        let (r, g, b) = hsl_to_rgb(120.0, 1.0, 0.5);
        assert!(close(r, 0.0) && close(g, 1.0) && close(b, 0.0));
        let (r, g, b) = hsl_to_rgb(240.0, 1.0, 0.5);
        assert!(close(r, 0.0) && close(g, 0.0) && close(b, 1.0));
    }

    #[test]
    fn hsl_wraps_hue() {
        let a = hsl_to_rgb(370.0, 0.7, 0.6);
        let b = hsl_to_rgb(10.0, 0.7, 0.6);
        assert!(close(a.0, b.0) && close(a.1, b.1) && close(a.2, b.2));
    }

    #[test]
    fn hsl_zero_saturation_is_gray() {
        let (r, g, b) = hsl_to_rgb(123.0, 0.0, 0.25);
        assert!(close(r, 0.25) && close(g, 0.25) && close(b, 0.25));
    }
}
