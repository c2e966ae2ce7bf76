//! The gate screen: instructional text, the whisper ritual, and the ripples
//! a detected whisper leaves behind.

use glam::Vec2;

use crate::api::config::RitualConfig;
use crate::api::types::OverlayId;
use crate::core::rng::Rng;
use crate::extensions::easing::Easing;
use crate::sensors::capability::Capabilities;

/// Expanding ring spawned where a whisper was heard.
#[derive(Debug, Clone)]
pub struct Ripple {
    pub id: OverlayId,
    pub pos: Vec2,
    pub age: f32,
}

impl Ripple {
    /// Ring radius at the current age, easing outward to 64 units.
    pub fn radius(&self, lifetime: f32) -> f32 {
        64.0 * Easing::QuadOut.apply(self.age / lifetime)
    }

    /// Ring opacity at the current age, fading from 0.3 to nothing.
    pub fn opacity(&self, lifetime: f32) -> f32 {
        0.3 * (1.0 - Easing::QuadOut.apply(self.age / lifetime))
    }
}

/// Gate logic for the arrival screen.
///
/// Listening must be explicitly begun, and only once the breath gate is open
/// and the host declared the speech capability. Transcripts are case-folded
/// and scanned for keyword containment; the first match is the whisper.
pub struct Portal {
    keywords: Vec<String>,
    breaths_required: u32,
    ripple_lifetime: f32,
    speech_available: bool,
    listening: bool,
    whisper_heard: bool,
    last_transcript: String,
    ripples: Vec<Ripple>,
    next_id: u32,
}

impl Portal {
    pub fn new(config: &RitualConfig, caps: Capabilities) -> Self {
        Self {
            keywords: config.keywords.iter().map(|k| k.to_lowercase()).collect(),
            breaths_required: config.breaths_required,
            ripple_lifetime: config.ripple_lifetime,
            speech_available: caps.speech,
            listening: false,
            whisper_heard: false,
            last_transcript: String::new(),
            ripples: Vec::new(),
            next_id: 1,
        }
    }

    /// Start the whisper ritual. Refused until the breath gate is open, when
    /// speech is unavailable, or once the whisper was already heard.
    pub fn begin_listening(&mut self, breath_count: u32) -> bool {
        if breath_count < self.breaths_required || self.whisper_heard {
            return false;
        }
        if !self.speech_available {
            log::info!("speech recognition unavailable, the whisper ritual stays silent");
            return false;
        }
        self.listening = true;
        true
    }

    /// Feed one transcript. Returns the ripple position if this transcript
    /// was the first to carry a keyword.
    pub fn hear(&mut self, transcript: &str, rng: &mut Rng, viewport: Vec2) -> Option<Vec2> {
        if !self.listening {
            return None;
        }
        let folded = transcript.to_lowercase();
        self.last_transcript = folded.clone();

        if self.whisper_heard || !self.contains_keyword(&folded) {
            return None;
        }
        self.whisper_heard = true;

        let pos = Vec2::new(
            rng.next_range(0.0, viewport.x),
            rng.next_range(0.0, viewport.y),
        );
        self.ripples.push(Ripple {
            id: OverlayId(self.next_id),
            pos,
            age: 0.0,
        });
        self.next_id += 1;
        Some(pos)
    }

    /// Whether a case-folded transcript contains any mystical keyword.
    pub fn contains_keyword(&self, folded: &str) -> bool {
        self.keywords.iter().any(|k| folded.contains(k.as_str()))
    }

    /// Age the ripples; expired ones are dropped.
    pub fn tick(&mut self, dt: f32) {
        let lifetime = self.ripple_lifetime;
        for r in &mut self.ripples {
            r.age += dt;
        }
        self.ripples.retain(|r| r.age < lifetime);
    }

    /// Instruction line for the current gate state.
    pub fn instruction(&self, breath_count: u32) -> String {
        if breath_count < self.breaths_required {
            format!(
                "Breathe deeply {} more times to awaken the portal",
                self.breaths_required - breath_count
            )
        } else if !self.whisper_heard {
            "Whisper the name of an ancestor, or speak of dreams and shadows".to_string()
        } else {
            "The ritual is complete. The mirror awaits...".to_string()
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn whisper_heard(&self) -> bool {
        self.whisper_heard
    }

    pub fn last_transcript(&self) -> &str {
        &self.last_transcript
    }

    pub fn ripples(&self) -> &[Ripple] {
        &self.ripples
    }

    pub fn ripple_lifetime(&self) -> f32 {
        self.ripple_lifetime
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn portal() -> Portal {
        Portal::new(&RitualConfig::default(), Capabilities::full())
    }

    fn viewport() -> Vec2 {
        Vec2::new(1280.0, 720.0)
    }

    #[test]
    fn listening_gated_on_breaths() {
        let mut p = portal();
        assert!(!p.begin_listening(2));
        assert!(p.begin_listening(3));
        assert!(p.is_listening());
    }

    #[test]
    fn listening_refused_without_speech() {
        let mut p = Portal::new(&RitualConfig::default(), Capabilities::new(true, false));
        assert!(!p.begin_listening(3));
    }

    #[test]
    fn keyword_containment_is_case_insensitive() {
        let p = portal();
        assert!(p.contains_keyword("my grandmother's spirit lives on"));
        assert!(p.contains_keyword(&"I DREAM of rivers".to_lowercase()));
        assert!(p.contains_keyword("shadows everywhere")); // substring match
        assert!(!p.contains_keyword("hello there"));
        assert!(!p.contains_keyword(""));
    }

    #[test]
    fn transcripts_ignored_until_listening() {
        let mut p = portal();
        let mut rng = Rng::new(1);
        assert_eq!(p.hear("the ancestor calls", &mut rng, viewport()), None);
        assert!(!p.whisper_heard());
    }

    #[test]
    fn first_match_fires_once_and_spawns_ripple() {
        let mut p = portal();
        let mut rng = Rng::new(1);
        p.begin_listening(3);

        assert_eq!(p.hear("just noise", &mut rng, viewport()), None);
        let pos = p.hear("I saw a Shadow", &mut rng, viewport());
        assert!(pos.is_some());
        assert!(p.whisper_heard());
        assert_eq!(p.ripples().len(), 1);

        // Later matches are display-only.
        assert_eq!(p.hear("another memory", &mut rng, viewport()), None);
        assert_eq!(p.last_transcript(), "another memory");
        assert_eq!(p.ripples().len(), 1);
    }

    #[test]
    fn ripple_lands_inside_viewport() {
        let mut p = portal();
        let mut rng = Rng::new(99);
        p.begin_listening(3);
        let pos = p.hear("mirror", &mut rng, viewport()).unwrap();
        assert!(pos.x >= 0.0 && pos.x < 1280.0);
        assert!(pos.y >= 0.0 && pos.y < 720.0);
    }

    #[test]
    fn ripples_expire_after_lifetime() {
        let mut p = portal();
        let mut rng = Rng::new(1);
        p.begin_listening(3);
        p.hear("whisper", &mut rng, viewport());

        p.tick(1.9);
        assert_eq!(p.ripples().len(), 1);
        p.tick(0.2);
        assert!(p.ripples().is_empty());
    }

    #[test]
    fn ripple_ring_grows_and_fades() {
        let r = Ripple {
            id: OverlayId(1),
            pos: Vec2::ZERO,
            age: 1.0,
        };
        assert!(r.radius(2.0) > 0.0);
        assert!(r.opacity(2.0) < 0.3);
    }

    #[test]
    fn instruction_follows_gate_state() {
        let mut p = portal();
        assert_eq!(
            p.instruction(1),
            "Breathe deeply 2 more times to awaken the portal"
        );
        assert_eq!(
            p.instruction(3),
            "Whisper the name of an ancestor, or speak of dreams and shadows"
        );
        let mut rng = Rng::new(1);
        p.begin_listening(3);
        p.hear("dream", &mut rng, viewport());
        assert_eq!(p.instruction(3), "The ritual is complete. The mirror awaits...");
    }
}
