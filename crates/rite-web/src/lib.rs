//! wasm-bindgen exports for the ritual experience.
//!
//! The page owns the browser APIs: it probes microphone/speech support,
//! samples amplitudes, forwards transcripts and button presses, and reads
//! the flat render buffers back by pointer every frame.

pub mod runner;

pub use runner::RitualRunner;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use rite_engine::{Capabilities, RitualConfig, SensorEvent};

thread_local! {
    static RUNNER: RefCell<Option<RitualRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut RitualRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Ritual not initialized. Call ritual_init() first.");
        f(runner)
    })
}

fn install(mut config: RitualConfig, width: f32, height: f32, caps: Capabilities) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    config.world_width = width;
    config.world_height = height;

    let runner = RitualRunner::new(config, caps);
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("rite: initialized ({width}x{height})");
}

/// Initialize with default configuration.
#[wasm_bindgen]
pub fn ritual_init(width: f32, height: f32, has_microphone: bool, has_speech: bool) {
    install(
        RitualConfig::default(),
        width,
        height,
        Capabilities::new(has_microphone, has_speech),
    );
}

/// Initialize with a JSON config override. Unparseable JSON falls back to
/// the defaults (logged, not fatal).
#[wasm_bindgen]
pub fn ritual_init_with_config(
    json: &str,
    width: f32,
    height: f32,
    has_microphone: bool,
    has_speech: bool,
) {
    let config = RitualConfig::from_json(json).unwrap_or_else(|err| {
        log::warn!("config override rejected ({err}), using defaults");
        RitualConfig::default()
    });
    install(config, width, height, Capabilities::new(has_microphone, has_speech));
}

/// Advance one frame. `dt` is the animation-frame delta in seconds.
#[wasm_bindgen]
pub fn ritual_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

// ---- Sensor inputs ----

#[wasm_bindgen]
pub fn ritual_breath_sample(intensity: u8) {
    with_runner(|r| r.push_sensor(SensorEvent::BreathSample { intensity }));
}

#[wasm_bindgen]
pub fn ritual_manual_breath() {
    with_runner(|r| r.push_sensor(SensorEvent::ManualBreath));
}

#[wasm_bindgen]
pub fn ritual_begin_listening() {
    with_runner(|r| r.push_sensor(SensorEvent::BeginListening));
}

#[wasm_bindgen]
pub fn ritual_transcript(text: &str) {
    with_runner(|r| r.push_sensor(SensorEvent::Transcript(text.to_string())));
}

#[wasm_bindgen]
pub fn ritual_shatter() {
    with_runner(|r| r.push_sensor(SensorEvent::Shatter));
}

#[wasm_bindgen]
pub fn ritual_resize(width: f32, height: f32) {
    with_runner(|r| r.push_sensor(SensorEvent::Resize { width, height }));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_header_ptr() -> *const f32 {
    with_runner(|r| r.header_ptr())
}

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count())
}

#[wasm_bindgen]
pub fn get_lines_ptr() -> *const f32 {
    with_runner(|r| r.lines_ptr())
}

#[wasm_bindgen]
pub fn get_line_vertex_count() -> u32 {
    with_runner(|r| r.line_vertex_count())
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner(|r| r.events_ptr())
}

#[wasm_bindgen]
pub fn get_event_count() -> u32 {
    with_runner(|r| r.event_count())
}

#[wasm_bindgen]
pub fn get_overlay_snapshot() -> String {
    with_runner(|r| r.snapshot_json())
}

// ---- Capacity accessors ----

#[wasm_bindgen]
pub fn get_max_instances() -> u32 {
    with_runner(|r| r.max_instances())
}

#[wasm_bindgen]
pub fn get_max_line_vertices() -> u32 {
    with_runner(|r| r.max_line_vertices())
}

#[wasm_bindgen]
pub fn get_max_events() -> u32 {
    with_runner(|r| r.max_events())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats())
}

// ---- Scalar state accessors ----

#[wasm_bindgen]
pub fn get_phase() -> u32 {
    with_runner(|r| r.engine().phase().index())
}

#[wasm_bindgen]
pub fn get_breath_count() -> u32 {
    with_runner(|r| r.engine().breath_count())
}

#[wasm_bindgen]
pub fn get_transformation_level() -> u32 {
    with_runner(|r| r.engine().transformation_level())
}

#[wasm_bindgen]
pub fn get_is_breathing() -> bool {
    with_runner(|r| r.engine().is_breathing())
}

#[wasm_bindgen]
pub fn get_is_listening() -> bool {
    with_runner(|r| r.engine().is_listening())
}

#[wasm_bindgen]
pub fn get_world_width() -> f32 {
    with_runner(|r| r.engine().viewport().x)
}

#[wasm_bindgen]
pub fn get_world_height() -> f32 {
    with_runner(|r| r.engine().viewport().y)
}
