//! The engine facade: owns every ritual subsystem, applies sensor events,
//! advances fixed steps, and produces the per-frame outputs (render buffer,
//! event queue, overlay snapshot).

use glam::Vec2;
use serde::Serialize;

use crate::api::config::RitualConfig;
use crate::api::types::RitualEvent;
use crate::core::rng::Rng;
use crate::render::buffer::RenderBuffer;
use crate::render::field::ParticleField;
use crate::render::stars::StarField;
use crate::render::vortex::Vortex;
use crate::ritual::breath::BreathDetector;
use crate::ritual::mirror::IdentityMirror;
use crate::ritual::phase::{Phase, PhaseController};
use crate::ritual::portal::Portal;
use crate::ritual::whisper::WhisperField;
use crate::sensors::capability::Capabilities;
use crate::sensors::queue::SensorEvent;

/// Everything the DOM layer needs to render the non-canvas overlays,
/// serialized to JSON once per frame on request.
#[derive(Debug, Serialize)]
pub struct OverlaySnapshot {
    pub phase: &'static str,
    pub is_invoked: bool,
    pub breath_count: u32,
    pub breaths_offered: u32,
    pub transformation_level: u32,
    pub is_breathing: bool,
    pub is_listening: bool,
    pub whisper_received: bool,
    pub instruction: String,
    pub breath_instruction: &'static str,
    pub reflection: String,
    pub is_reflecting: bool,
    pub last_transcript: String,
    pub whispers: Vec<WhisperView>,
    pub ripples: Vec<RippleView>,
    pub cracks: Vec<CrackView>,
    /// Present only in the terminal phase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finale: Option<FinaleView>,
}

#[derive(Debug, Serialize)]
pub struct WhisperView {
    pub id: u32,
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub opacity: f32,
}

#[derive(Debug, Serialize)]
pub struct RippleView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub opacity: f32,
}

#[derive(Debug, Serialize)]
pub struct CrackView {
    pub id: u32,
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct FinaleView {
    pub title: &'static str,
    pub text: &'static str,
}

const FINALE_TITLE: &str = "BECOMING";
const FINALE_TEXT: &str = "You are no longer who you were when you arrived. \
                           The mirror has shown you what your dreams remember.";

/// The ritual experience.
pub struct RitualEngine {
    config: RitualConfig,
    rng: Rng,
    controller: PhaseController,
    breath: BreathDetector,
    portal: Portal,
    mirror: IdentityMirror,
    whispers: WhisperField,
    field: ParticleField,
    vortex: Vortex,
    portal_stars: StarField,
    mirror_stars: StarField,
    events: Vec<RitualEvent>,
    viewport: Vec2,
}

impl RitualEngine {
    pub fn new(config: RitualConfig, caps: Capabilities) -> Self {
        let mut rng = Rng::new(config.seed);
        let controller = PhaseController::new(config.breaths_required, config.transformations_required);
        let breath = BreathDetector::new(&config, caps);
        let portal = Portal::new(&config, caps);
        let mirror = IdentityMirror::new(&config, &mut rng);
        let whispers = WhisperField::new(&config);
        let field = ParticleField::new(&config);
        let vortex = Vortex::new(&config);
        let portal_stars = StarField::portal(&config, &mut rng);
        let mirror_stars = StarField::mirror(&config, &mut rng);
        let viewport = Vec2::new(config.world_width, config.world_height);

        log::info!(
            "ritual engine ready (microphone: {}, speech: {})",
            caps.microphone,
            caps.speech
        );

        Self {
            config,
            rng,
            controller,
            breath,
            portal,
            mirror,
            whispers,
            field,
            vortex,
            portal_stars,
            mirror_stars,
            events: Vec::new(),
            viewport,
        }
    }

    /// Drop the previous frame's transient outputs.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    /// Apply one sensor event.
    pub fn apply(&mut self, event: SensorEvent) {
        match event {
            SensorEvent::BreathSample { intensity } => {
                if let Some(stage) = self.breath.sample(intensity) {
                    self.push_event(RitualEvent::new(
                        RitualEvent::BREATH_STAGE,
                        stage.index() as f32,
                        0.0,
                        0.0,
                    ));
                }
            }
            SensorEvent::ManualBreath => {
                if let Some(stage) = self.breath.manual() {
                    self.push_event(RitualEvent::new(
                        RitualEvent::BREATH_STAGE,
                        stage.index() as f32,
                        0.0,
                        0.0,
                    ));
                }
            }
            SensorEvent::BeginListening => {
                self.portal.begin_listening(self.controller.breath_count());
            }
            SensorEvent::Transcript(text) => {
                if let Some(pos) = self.portal.hear(&text, &mut self.rng, self.viewport) {
                    self.push_event(RitualEvent::new(RitualEvent::WHISPER_RECEIVED, 0.0, 0.0, 0.0));
                    self.push_event(RitualEvent::new(
                        RitualEvent::RIPPLE_SPAWNED,
                        pos.x,
                        pos.y,
                        0.0,
                    ));
                    let transition = self.controller.record_whisper();
                    self.on_transition(transition);
                }
            }
            SensorEvent::Shatter => {
                if self.controller.phase() == Phase::Mirror {
                    self.mirror.shatter(&mut self.rng);
                }
            }
            SensorEvent::Resize { width, height } => {
                self.viewport = Vec2::new(width, height);
                self.field.resize(self.viewport);
            }
        }
    }

    /// Advance one fixed step of `config.fixed_dt` seconds.
    pub fn step(&mut self) {
        let dt = self.config.fixed_dt;

        // Breath choreography.
        let up = self.breath.tick(dt);
        if let Some(stage) = up.stage_entered {
            self.push_event(RitualEvent::new(
                RitualEvent::BREATH_STAGE,
                stage.index() as f32,
                0.0,
                0.0,
            ));
        }
        if up.completed {
            self.push_event(RitualEvent::new(
                RitualEvent::BREATH_COMPLETE,
                self.breath.cycles_completed() as f32,
                0.0,
                0.0,
            ));
            if self.controller.is_invoked() {
                // After invocation, breathing feeds the transformation.
                if self.controller.phase() == Phase::Mirror {
                    self.record_transformation();
                }
            } else {
                let transition = self.controller.record_breath();
                self.on_transition(transition);
            }
        }

        // Overlay ageing.
        self.portal.tick(dt);

        match self.controller.phase() {
            Phase::Arrival => {
                self.portal_stars.tick(dt);
            }
            Phase::Mirror => {
                self.mirror_stars.tick(dt);

                let up = self.mirror.tick(dt, &mut self.rng);
                if let Some(index) = up.reflection_changed {
                    self.push_event(RitualEvent::new(
                        RitualEvent::REFLECTION_CHANGED,
                        index as f32,
                        0.0,
                        0.0,
                    ));
                    self.record_transformation();
                }

                for (pos, text_index) in self.whispers.tick(dt, &mut self.rng, self.viewport) {
                    self.push_event(RitualEvent::new(
                        RitualEvent::WHISPER_SPAWNED,
                        pos.x,
                        pos.y,
                        text_index as f32,
                    ));
                }

                self.field.tick();
            }
            Phase::Metamorphosis => {
                self.vortex.tick(dt);
                self.field.tick();
            }
        }
    }

    /// Pack the current frame into the render buffer.
    pub fn render(&self, buf: &mut RenderBuffer) {
        buf.clear();
        match self.controller.phase() {
            Phase::Arrival => self.portal_stars.pack(buf, self.viewport),
            Phase::Mirror => {
                self.mirror_stars.pack(buf, self.viewport);
                self.field.pack(buf);
            }
            Phase::Metamorphosis => {
                self.vortex.pack(buf, self.viewport / 2.0);
                self.field.pack(buf);
            }
        }
        buf.finish_frame(self.viewport, self.controller.phase(), self.events.len());
    }

    /// Build the DOM overlay snapshot.
    pub fn snapshot(&self) -> OverlaySnapshot {
        let phase = self.controller.phase();
        OverlaySnapshot {
            phase: match phase {
                Phase::Arrival => "arrival",
                Phase::Mirror => "mirror",
                Phase::Metamorphosis => "metamorphosis",
            },
            is_invoked: self.controller.is_invoked(),
            breath_count: self.controller.breath_count(),
            breaths_offered: self.breath.cycles_completed(),
            transformation_level: self.controller.transformation_level(),
            is_breathing: self.breath.is_breathing(),
            is_listening: self.portal.is_listening(),
            whisper_received: self.portal.whisper_heard(),
            instruction: self.portal.instruction(self.controller.breath_count()),
            breath_instruction: self.breath.instruction(),
            reflection: self.mirror.reflection().to_string(),
            is_reflecting: self.mirror.is_reflecting(),
            last_transcript: self.portal.last_transcript().to_string(),
            whispers: self
                .whispers
                .whispers()
                .iter()
                .map(|w| WhisperView {
                    id: w.id.0,
                    text: self.whispers.text(w).to_string(),
                    x: w.pos.x,
                    y: w.pos.y,
                    opacity: self.whispers.opacity(w),
                })
                .collect(),
            ripples: self
                .portal
                .ripples()
                .iter()
                .map(|r| RippleView {
                    id: r.id.0,
                    x: r.pos.x,
                    y: r.pos.y,
                    radius: r.radius(self.portal.ripple_lifetime()),
                    opacity: r.opacity(self.portal.ripple_lifetime()),
                })
                .collect(),
            cracks: self
                .mirror
                .cracks()
                .iter()
                .map(|c| CrackView {
                    id: c.id.0,
                    path: c.path.clone(),
                })
                .collect(),
            finale: (phase == Phase::Metamorphosis).then_some(FinaleView {
                title: FINALE_TITLE,
                text: FINALE_TEXT,
            }),
        }
    }

    // ---- Accessors ----

    pub fn config(&self) -> &RitualConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    pub fn breath_count(&self) -> u32 {
        self.controller.breath_count()
    }

    pub fn transformation_level(&self) -> u32 {
        self.controller.transformation_level()
    }

    pub fn is_breathing(&self) -> bool {
        self.breath.is_breathing()
    }

    pub fn is_listening(&self) -> bool {
        self.portal.is_listening()
    }

    pub fn particle_count(&self) -> usize {
        self.field.len()
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn events(&self) -> &[RitualEvent] {
        &self.events
    }

    fn record_transformation(&mut self) {
        let transition = self.controller.record_transformation();
        self.field
            .set_level(self.controller.transformation_level(), &mut self.rng);
        self.on_transition(transition);
    }

    fn on_transition(&mut self, transition: Option<Phase>) {
        let Some(phase) = transition else { return };
        self.push_event(RitualEvent::new(
            RitualEvent::PHASE_CHANGED,
            phase.index() as f32,
            0.0,
            0.0,
        ));
        if phase == Phase::Metamorphosis {
            // The whisper field only lives on the mirror screen.
            self.whispers.clear();
        }
    }

    fn push_event(&mut self, event: RitualEvent) {
        if self.events.len() < self.config.max_events {
            self.events.push(event);
        }
    }
}
