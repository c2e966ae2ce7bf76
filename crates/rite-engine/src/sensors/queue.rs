/// Sensor and interaction events the engine understands.
/// The page samples the browser APIs and pushes plain data; no raw audio or
/// platform handles cross this boundary.
#[derive(Debug, Clone)]
pub enum SensorEvent {
    /// One microphone amplitude sample on a 0-255 scale
    /// (mean of the low-frequency FFT bins, computed by the page).
    BreathSample { intensity: u8 },
    /// The breath button was pressed.
    ManualBreath,
    /// The "Begin Whisper Ritual" button was pressed.
    BeginListening,
    /// An incremental speech-recognition transcript.
    Transcript(String),
    /// The "Shatter and Reform" button was pressed.
    Shatter,
    /// The viewport was resized.
    Resize { width: f32, height: f32 },
}

/// A queue of sensor events.
/// JS writes events into the queue; the engine drains them each tick.
pub struct SensorQueue {
    events: Vec<SensorEvent>,
}

impl SensorQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new sensor event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: SensorEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<SensorEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &SensorEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for SensorQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = SensorQueue::new();
        q.push(SensorEvent::BreathSample { intensity: 44 });
        q.push(SensorEvent::Transcript("the shadow speaks".into()));
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn drain_preserves_order() {
        let mut q = SensorQueue::new();
        q.push(SensorEvent::ManualBreath);
        q.push(SensorEvent::Shatter);
        let events = q.drain();
        assert!(matches!(events[0], SensorEvent::ManualBreath));
        assert!(matches!(events[1], SensorEvent::Shatter));
    }
}
