use bytemuck::{Pod, Zeroable};

/// Unique identifier for a transient overlay (whisper, ripple, crack).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(pub u32);

/// A ritual event communicated from Rust to the page via a flat buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct RitualEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl RitualEvent {
    pub const FLOATS: usize = 4;

    /// Breath cycle entered a new stage. `a` = stage index.
    pub const BREATH_STAGE: f32 = 1.0;
    /// One full breath cycle completed. `a` = cycles completed so far.
    pub const BREATH_COMPLETE: f32 = 2.0;
    /// A mystical keyword was heard. No payload.
    pub const WHISPER_RECEIVED: f32 = 3.0;
    /// The experience advanced a phase. `a` = new phase index.
    pub const PHASE_CHANGED: f32 = 4.0;
    /// The mirror swapped its reflection. `a` = new pool index.
    pub const REFLECTION_CHANGED: f32 = 5.0;
    /// A ripple spawned. `a`, `b` = position.
    pub const RIPPLE_SPAWNED: f32 = 6.0;
    /// A floating whisper spawned. `a`, `b` = position, `c` = pool index.
    pub const WHISPER_SPAWNED: f32 = 7.0;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}
