/// Optional browser capabilities, declared once at startup.
///
/// The page probes `getUserMedia` and `SpeechRecognition` before
/// initialization and passes the result here; the engine never probes at
/// runtime. A denied or missing capability selects the degraded path
/// (manual breath button, whisper stage that never completes via speech).
#[derive(Debug, Clone, Copy, Default)]
pub struct Capabilities {
    /// Microphone amplitude samples will arrive.
    pub microphone: bool,
    /// Speech transcripts will arrive.
    pub speech: bool,
}

impl Capabilities {
    pub fn new(microphone: bool, speech: bool) -> Self {
        Self { microphone, speech }
    }

    /// Everything available — the full experience.
    pub fn full() -> Self {
        Self {
            microphone: true,
            speech: true,
        }
    }
}
