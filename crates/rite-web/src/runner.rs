use rite_engine::{
    BufferLayout, Capabilities, FixedTimestep, RenderBuffer, RitualConfig, RitualEngine,
    RitualEvent, SensorEvent, SensorQueue,
};

/// Wires the ritual engine to the browser loop.
///
/// JS pushes sensor events between frames and calls `tick` from
/// `requestAnimationFrame`; the runner drains the queue, advances the fixed
/// timestep, and repacks the flat buffers the canvas renderer reads.
pub struct RitualRunner {
    engine: RitualEngine,
    sensors: SensorQueue,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    layout: BufferLayout,
}

impl RitualRunner {
    pub fn new(config: RitualConfig, caps: Capabilities) -> Self {
        let layout = BufferLayout::from_config(&config);
        let timestep = FixedTimestep::new(config.fixed_dt);
        let mut render_buffer = RenderBuffer::new(layout);
        render_buffer.write_capacities(layout.max_events);

        Self {
            engine: RitualEngine::new(config, caps),
            sensors: SensorQueue::new(),
            render_buffer,
            timestep,
            layout,
        }
    }

    /// Push a sensor event into the queue.
    pub fn push_sensor(&mut self, event: SensorEvent) {
        self.sensors.push(event);
    }

    /// Run one frame: drain sensors, step the simulation, repack buffers.
    pub fn tick(&mut self, dt: f32) {
        self.engine.clear_frame_data();

        for event in self.sensors.drain() {
            self.engine.apply(event);
        }

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.engine.step();
        }

        self.engine.render(&mut self.render_buffer);
    }

    pub fn engine(&self) -> &RitualEngine {
        &self.engine
    }

    /// Overlay snapshot as JSON for the DOM layer.
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.engine.snapshot()).unwrap_or_else(|err| {
            log::warn!("overlay snapshot failed to serialize: {err}");
            "{}".to_string()
        })
    }

    // ---- Pointer accessors for the WASM boundary ----

    pub fn header_ptr(&self) -> *const f32 {
        self.render_buffer.header_ptr()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count() as u32
    }

    pub fn lines_ptr(&self) -> *const f32 {
        self.render_buffer.lines_ptr()
    }

    pub fn line_vertex_count(&self) -> u32 {
        self.render_buffer.line_vertex_count() as u32
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.engine.events().as_ptr() as *const f32
    }

    pub fn event_count(&self) -> u32 {
        self.engine.events().len() as u32
    }

    // ---- Capacity accessors ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_line_vertices(&self) -> u32 {
        self.layout.max_line_vertices as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.total_floats() as u32
    }

    pub fn event_floats(&self) -> u32 {
        RitualEvent::FLOATS as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rite_engine::Phase;

    fn runner() -> RitualRunner {
        RitualRunner::new(RitualConfig::default(), Capabilities::full())
    }

    #[test]
    fn queued_sensors_apply_on_tick() {
        let mut r = runner();
        r.push_sensor(SensorEvent::ManualBreath);
        assert!(!r.engine().is_breathing());
        r.tick(1.0 / 60.0);
        assert!(r.engine().is_breathing());
    }

    #[test]
    fn frames_advance_the_cycle() {
        let mut r = runner();
        r.push_sensor(SensorEvent::ManualBreath);
        // ~6.2 seconds of 60 Hz frames completes one cycle.
        for _ in 0..372 {
            r.tick(1.0 / 60.0);
        }
        assert_eq!(r.engine().breath_count(), 1);
        assert_eq!(r.engine().phase(), Phase::Arrival);
    }

    #[test]
    fn buffers_are_populated() {
        let mut r = runner();
        r.tick(1.0 / 60.0);
        // The arrival starfield fills the instance buffer.
        assert_eq!(r.instance_count(), 50);
        assert!(r.max_instances() >= r.instance_count());
    }

    #[test]
    fn snapshot_json_is_valid() {
        let mut r = runner();
        r.tick(1.0 / 60.0);
        let json = r.snapshot_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "arrival");
    }
}
