//! The ritual's global progression: a three-phase state machine advanced by
//! breath, whisper, and transformation events.

/// Named stage of the overall experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// The gate screen: breathing and whispering open the portal.
    #[default]
    Arrival,
    /// The mirror screen: shatters accumulate transformation.
    Mirror,
    /// Terminal phase: the vortex.
    Metamorphosis,
}

impl Phase {
    /// Stable index for the event protocol.
    pub fn index(self) -> u32 {
        match self {
            Phase::Arrival => 0,
            Phase::Mirror => 1,
            Phase::Metamorphosis => 2,
        }
    }
}

/// Everything the phase controller tracks.
///
/// Counters are monotonically non-decreasing and the phase only moves
/// forward; there are no error states and no way back.
#[derive(Debug, Clone, Copy, Default)]
pub struct RitualState {
    pub breath_count: u32,
    pub whisper_received: bool,
    pub is_invoked: bool,
    pub phase: Phase,
    pub transformation_level: u32,
}

/// Owns the ritual state and applies the transition rules.
///
/// `Arrival -> Mirror` once enough breaths are logged AND a whisper was
/// heard, in either order. `Mirror -> Metamorphosis` on the transformation
/// that reaches the required level. Each transition fires exactly once.
#[derive(Debug, Clone)]
pub struct PhaseController {
    state: RitualState,
    breaths_required: u32,
    transformations_required: u32,
}

impl PhaseController {
    pub fn new(breaths_required: u32, transformations_required: u32) -> Self {
        Self {
            state: RitualState::default(),
            breaths_required,
            transformations_required,
        }
    }

    pub fn state(&self) -> &RitualState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn breath_count(&self) -> u32 {
        self.state.breath_count
    }

    pub fn whisper_received(&self) -> bool {
        self.state.whisper_received
    }

    pub fn is_invoked(&self) -> bool {
        self.state.is_invoked
    }

    pub fn transformation_level(&self) -> u32 {
        self.state.transformation_level
    }

    /// Breaths still owed before the whisper gate opens.
    pub fn breaths_remaining(&self) -> u32 {
        self.breaths_required.saturating_sub(self.state.breath_count)
    }

    /// Log one completed breath cycle.
    /// Returns the phase entered if this event completed the invocation.
    pub fn record_breath(&mut self) -> Option<Phase> {
        self.state.breath_count += 1;
        self.check_invocation()
    }

    /// Log the whisper. Idempotent.
    /// Returns the phase entered if this event completed the invocation.
    pub fn record_whisper(&mut self) -> Option<Phase> {
        self.state.whisper_received = true;
        self.check_invocation()
    }

    /// Log one transformation unit.
    /// Returns the phase entered if this event reached the final threshold.
    pub fn record_transformation(&mut self) -> Option<Phase> {
        self.state.transformation_level += 1;
        if self.state.phase == Phase::Mirror
            && self.state.transformation_level >= self.transformations_required
        {
            self.state.phase = Phase::Metamorphosis;
            log::info!(
                "metamorphosis begins at level {}",
                self.state.transformation_level
            );
            return Some(Phase::Metamorphosis);
        }
        None
    }

    fn check_invocation(&mut self) -> Option<Phase> {
        if !self.state.is_invoked
            && self.state.breath_count >= self.breaths_required
            && self.state.whisper_received
        {
            self.state.is_invoked = true;
            self.state.phase = Phase::Mirror;
            log::info!("portal invoked after {} breaths", self.state.breath_count);
            Some(Phase::Mirror)
        } else {
            None
        }
    }
}
