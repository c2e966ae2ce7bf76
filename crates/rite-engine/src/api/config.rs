use serde::{Deserialize, Serialize};

/// Configuration for the ritual experience, injectable by the host page.
///
/// Every tunable the experience depends on lives here: gating thresholds,
/// choreography durations, spawn odds, content pools, and buffer capacities.
/// The defaults are the tuning the experience ships with; a JSON override
/// can replace any subset of fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RitualConfig {
    /// Viewport width in CSS pixels at startup.
    pub world_width: f32,
    /// Viewport height in CSS pixels at startup.
    pub world_height: f32,
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// RNG seed; a fixed seed replays the whole experience.
    pub seed: u64,

    /// Completed breath cycles required to open the whisper gate.
    pub breaths_required: u32,
    /// Transformations required to enter the final phase.
    pub transformations_required: u32,

    /// Amplitude (0-255) a sample must exceed to start a breath cycle.
    pub breath_threshold: u8,
    /// Seconds into the cycle at which the hold stage begins.
    pub breath_hold_at: f32,
    /// Seconds into the cycle at which the exhale stage begins.
    pub breath_exhale_at: f32,
    /// Total length of one breath cycle in seconds.
    pub breath_cycle_duration: f32,

    /// Delay between a mirror shatter and the reflection swap.
    pub reflection_delay: f32,

    /// Seconds between ancestral whisper spawn rolls.
    pub whisper_interval: f32,
    /// Probability that a roll spawns a whisper.
    pub whisper_chance: f32,
    /// Seconds a whisper overlay stays on screen.
    pub whisper_lifetime: f32,
    /// Seconds a ripple overlay stays on screen.
    pub ripple_lifetime: f32,

    /// Particles simulated per transformation level.
    pub particles_per_level: usize,
    /// Particles closer than this are joined by a line.
    pub link_distance: f32,
    /// Points in the metamorphosis vortex ring.
    pub vortex_points: usize,
    /// Background stars behind the portal screen.
    pub portal_stars: usize,
    /// Ambient stars over the mirror screen.
    pub mirror_stars: usize,

    /// Maximum render instances per frame.
    pub max_instances: usize,
    /// Maximum line vertices per frame.
    pub max_line_vertices: usize,
    /// Maximum ritual events per frame.
    pub max_events: usize,

    /// Keywords whose presence in a transcript counts as a whisper.
    pub keywords: Vec<String>,
    /// Reflection lines shown by the identity mirror.
    pub reflections: Vec<String>,
    /// Floating text lines spawned by the ancestral whisper field.
    pub ancestral_texts: Vec<String>,
}

impl Default for RitualConfig {
    fn default() -> Self {
        Self {
            world_width: 1280.0,
            world_height: 720.0,
            fixed_dt: 1.0 / 60.0,
            seed: 42,

            breaths_required: 3,
            transformations_required: 3,

            breath_threshold: 30,
            breath_hold_at: 2.0,
            breath_exhale_at: 3.0,
            breath_cycle_duration: 6.0,

            reflection_delay: 2.0,

            whisper_interval: 3.0,
            whisper_chance: 0.3,
            whisper_lifetime: 4.0,
            ripple_lifetime: 2.0,

            particles_per_level: 50,
            link_distance: 100.0,
            vortex_points: 200,
            portal_stars: 50,
            mirror_stars: 20,

            max_instances: 2048,
            max_line_vertices: 16384,
            max_events: 32,

            keywords: to_strings(&[
                "ancestor", "dream", "shadow", "memory", "spirit", "whisper", "mirror",
            ]),
            reflections: to_strings(&[
                "You are the echo of dreams your grandmother never spoke aloud",
                "In another life, you were the silence between thunderclaps",
                "Your mother's hopes see you as starlight that forgot how to fade",
                "You are what water remembers after it has forgotten the ocean",
                "In the language of shadows, your name means 'becoming'",
                "You exist in the space where memory meets prophecy",
                "Your reflection is older than your face, younger than your soul",
            ]),
            ancestral_texts: to_strings(&[
                "Remember the names they tried to erase",
                "Your blood carries stories untold",
                "We are the dreams that survived",
                "In forgetting, we become",
                "The roots remember what leaves forget",
                "Your face is a map of migrations",
                "We whisper through your midnight thoughts",
            ]),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl RitualConfig {
    /// Parse a config override from a JSON string.
    /// Absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
