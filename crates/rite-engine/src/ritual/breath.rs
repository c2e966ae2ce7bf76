//! Breath detection: amplitude samples (or a manual press) start a scripted
//! inhale/hold/exhale cycle driven by a timeline.

use crate::api::config::RitualConfig;
use crate::core::timeline::Timeline;
use crate::sensors::capability::Capabilities;
use crate::sensors::trigger::{select_trigger, BreathTrigger};

/// Stage within one breath cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathStage {
    Inhale,
    Hold,
    Exhale,
}

impl BreathStage {
    /// Stable index for the event protocol.
    pub fn index(self) -> u32 {
        match self {
            BreathStage::Inhale => 0,
            BreathStage::Hold => 1,
            BreathStage::Exhale => 2,
        }
    }
}

/// What one detector tick produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreathUpdate {
    /// A new stage was entered this tick.
    pub stage_entered: Option<BreathStage>,
    /// The cycle ran to completion this tick.
    pub completed: bool,
}

/// Watches the breath sensor and runs the scripted cycle.
///
/// Triggers are ignored while a cycle is in flight, so a sample stream that
/// stays above threshold starts one cycle, not many. The same rule covers
/// rapid manual presses.
pub struct BreathDetector {
    trigger: Box<dyn BreathTrigger>,
    cycle: Timeline<BreathStage>,
    cycles_completed: u32,
}

impl BreathDetector {
    pub fn new(config: &RitualConfig, caps: Capabilities) -> Self {
        let stops = vec![
            (0.0, BreathStage::Inhale),
            (config.breath_hold_at, BreathStage::Hold),
            (config.breath_exhale_at, BreathStage::Exhale),
        ];
        Self {
            trigger: select_trigger(caps, config.breath_threshold),
            cycle: Timeline::new(stops, config.breath_cycle_duration),
            cycles_completed: 0,
        }
    }

    /// Feed one amplitude sample. Returns the stage entered if it started a cycle.
    pub fn sample(&mut self, intensity: u8) -> Option<BreathStage> {
        if self.cycle.is_running() {
            return None;
        }
        if self.trigger.on_sample(intensity) {
            self.cycle.start()
        } else {
            None
        }
    }

    /// Feed a manual press. Returns the stage entered if it started a cycle.
    pub fn manual(&mut self) -> Option<BreathStage> {
        if self.cycle.is_running() {
            return None;
        }
        if self.trigger.on_manual() {
            self.cycle.start()
        } else {
            None
        }
    }

    /// Advance the cycle by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> BreathUpdate {
        let step = self.cycle.tick(dt);
        if step.completed {
            self.cycles_completed += 1;
        }
        BreathUpdate {
            stage_entered: step.entered,
            completed: step.completed,
        }
    }

    /// Whether a cycle is currently in flight.
    pub fn is_breathing(&self) -> bool {
        self.cycle.is_running()
    }

    /// The current stage, if a cycle is in flight.
    pub fn stage(&self) -> Option<BreathStage> {
        self.cycle.current()
    }

    /// Cycles completed since startup ("Breaths offered: N").
    pub fn cycles_completed(&self) -> u32 {
        self.cycles_completed
    }

    /// The instruction line shown beside the breath button.
    pub fn instruction(&self) -> &'static str {
        match self.stage() {
            Some(BreathStage::Inhale) => "Breathe in deeply...",
            Some(BreathStage::Hold) => "Hold...",
            Some(BreathStage::Exhale) => "Release slowly...",
            None => "Click to breathe with the portal",
        }
    }
}
