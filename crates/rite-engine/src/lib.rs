pub mod api;
pub mod bridge;
pub mod core;
pub mod engine;
pub mod extensions;
pub mod render;
pub mod ritual;
pub mod sensors;

// Re-export key types at crate root for convenience
pub use crate::api::config::RitualConfig;
pub use crate::api::types::{OverlayId, RitualEvent};
pub use crate::bridge::protocol::{BufferLayout, INSTANCE_FLOATS, LINE_VERTEX_FLOATS};
pub use crate::core::rng::Rng;
pub use crate::core::time::FixedTimestep;
pub use crate::core::timeline::{Timeline, TimelineStep};
pub use crate::engine::{OverlaySnapshot, RitualEngine};
pub use crate::render::buffer::RenderBuffer;
pub use crate::render::color::ParticleColor;
pub use crate::render::field::ParticleField;
pub use crate::render::particle::Particle;
pub use crate::render::stars::StarField;
pub use crate::render::vortex::Vortex;
pub use crate::ritual::breath::{BreathDetector, BreathStage};
pub use crate::ritual::mirror::{IdentityMirror, MirrorCrack};
pub use crate::ritual::phase::{Phase, PhaseController, RitualState};
pub use crate::ritual::portal::{Portal, Ripple};
pub use crate::ritual::whisper::{Whisper, WhisperField};
pub use crate::sensors::capability::Capabilities;
pub use crate::sensors::queue::{SensorEvent, SensorQueue};
pub use crate::sensors::trigger::{AmplitudeTrigger, BreathTrigger, ManualOnlyTrigger};

// Extensions — decoupled optional helpers
pub use crate::extensions::{ease, lerp, Easing, FadeEnvelope};
