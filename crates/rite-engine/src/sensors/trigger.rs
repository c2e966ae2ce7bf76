use super::capability::Capabilities;

/// Decides whether a sensor input starts a breath cycle.
///
/// Two implementations, selected once at startup from the declared
/// capabilities: an amplitude threshold over microphone samples, or a
/// manual-only stub when no microphone was granted. The manual button works
/// in both modes.
pub trait BreathTrigger {
    /// React to one amplitude sample (0-255). True starts a cycle.
    fn on_sample(&mut self, intensity: u8) -> bool;

    /// React to a manual press. True starts a cycle.
    fn on_manual(&mut self) -> bool {
        true
    }
}

/// Microphone-backed trigger: fires when a sample crosses the threshold.
#[derive(Debug, Clone)]
pub struct AmplitudeTrigger {
    threshold: u8,
}

impl AmplitudeTrigger {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }
}

impl BreathTrigger for AmplitudeTrigger {
    fn on_sample(&mut self, intensity: u8) -> bool {
        intensity > self.threshold
    }
}

/// Stub trigger for hosts without microphone access: samples never fire.
#[derive(Debug, Clone, Default)]
pub struct ManualOnlyTrigger;

impl BreathTrigger for ManualOnlyTrigger {
    fn on_sample(&mut self, _intensity: u8) -> bool {
        false
    }
}

/// Pick the trigger implementation for the declared capabilities.
pub fn select_trigger(caps: Capabilities, threshold: u8) -> Box<dyn BreathTrigger> {
    if caps.microphone {
        Box::new(AmplitudeTrigger::new(threshold))
    } else {
        log::info!("no microphone capability, breath detection is manual only");
        Box::new(ManualOnlyTrigger)
    }
}
