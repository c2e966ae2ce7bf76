// extensions/fade.rs
//
// Opacity envelopes for transient overlays: ease in, hold, ease out.

use super::easing::Easing;

/// An opacity envelope over a fixed lifetime.
///
/// Whisper overlays fade in over one second, hold, then fade out over the
/// final second of a four-second life. This models that shape generically:
/// `[0, fade_in)` ramps up, `[fade_out_start, lifetime)` ramps down,
/// everything between holds at `peak`.
#[derive(Debug, Clone, Copy)]
pub struct FadeEnvelope {
    pub fade_in: f32,
    pub fade_out_start: f32,
    pub lifetime: f32,
    pub peak: f32,
    pub ease_in: Easing,
    pub ease_out: Easing,
}

impl FadeEnvelope {
    pub fn new(fade_in: f32, fade_out_start: f32, lifetime: f32, peak: f32) -> Self {
        debug_assert!(fade_in <= fade_out_start && fade_out_start <= lifetime);
        Self {
            fade_in,
            fade_out_start,
            lifetime,
            peak,
            ease_in: Easing::SineIn,
            ease_out: Easing::SineOut,
        }
    }

    /// Opacity at `age` seconds. Zero outside `[0, lifetime]`.
    pub fn opacity(&self, age: f32) -> f32 {
        if age < 0.0 || age >= self.lifetime {
            return 0.0;
        }
        if age < self.fade_in {
            self.peak * self.ease_in.apply(age / self.fade_in)
        } else if age < self.fade_out_start {
            self.peak
        } else {
            let span = self.lifetime - self.fade_out_start;
            self.peak * (1.0 - self.ease_out.apply((age - self.fade_out_start) / span))
        }
    }
}
