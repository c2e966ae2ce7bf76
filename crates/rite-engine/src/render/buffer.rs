//! Preallocated flat buffers the page reads by pointer each frame.

use glam::Vec2;

use crate::bridge::protocol::{
    self, BufferLayout, HEADER_FLOATS, INSTANCE_FLOATS, LINE_VERTEX_FLOATS,
};
use crate::ritual::phase::Phase;

/// Per-frame render output: a header, point instances, and line vertices.
///
/// Overflow beyond the declared capacities is dropped silently; the header
/// counts always describe what was actually written.
pub struct RenderBuffer {
    header: [f32; HEADER_FLOATS],
    instances: Vec<f32>,
    lines: Vec<f32>,
    max_instances: usize,
    max_line_vertices: usize,
    instance_count: usize,
    line_vertex_count: usize,
    frame: u64,
}

impl RenderBuffer {
    pub fn new(layout: BufferLayout) -> Self {
        Self {
            header: [0.0; HEADER_FLOATS],
            instances: vec![0.0; layout.max_instances * INSTANCE_FLOATS],
            lines: vec![0.0; layout.max_line_vertices * LINE_VERTEX_FLOATS],
            max_instances: layout.max_instances,
            max_line_vertices: layout.max_line_vertices,
            instance_count: 0,
            line_vertex_count: 0,
            frame: 0,
        }
    }

    /// Reset counts for a new frame.
    pub fn clear(&mut self) {
        self.instance_count = 0;
        self.line_vertex_count = 0;
    }

    /// Append one point instance.
    pub fn push_instance(&mut self, pos: Vec2, size: f32, r: f32, g: f32, b: f32, a: f32) {
        if self.instance_count >= self.max_instances {
            return;
        }
        let base = self.instance_count * INSTANCE_FLOATS;
        self.instances[base] = pos.x;
        self.instances[base + 1] = pos.y;
        self.instances[base + 2] = size;
        self.instances[base + 3] = r;
        self.instances[base + 4] = g;
        self.instances[base + 5] = b;
        self.instances[base + 6] = a;
        self.instance_count += 1;
    }

    /// Append one line segment (two vertices sharing an alpha).
    pub fn push_line(&mut self, from: Vec2, to: Vec2, alpha: f32) {
        if self.line_vertex_count + 2 > self.max_line_vertices {
            return;
        }
        for (i, v) in [from, to].iter().enumerate() {
            let base = (self.line_vertex_count + i) * LINE_VERTEX_FLOATS;
            self.lines[base] = v.x;
            self.lines[base + 1] = v.y;
            self.lines[base + 2] = alpha;
        }
        self.line_vertex_count += 2;
    }

    /// Stamp the header after a frame's pushes.
    pub fn finish_frame(&mut self, viewport: Vec2, phase: Phase, event_count: usize) {
        self.frame = self.frame.wrapping_add(1);
        self.header[protocol::HEADER_FRAME_COUNTER] = self.frame as f32;
        self.header[protocol::HEADER_MAX_INSTANCES] = self.max_instances as f32;
        self.header[protocol::HEADER_INSTANCE_COUNT] = self.instance_count as f32;
        self.header[protocol::HEADER_MAX_LINE_VERTICES] = self.max_line_vertices as f32;
        self.header[protocol::HEADER_LINE_VERTEX_COUNT] = self.line_vertex_count as f32;
        self.header[protocol::HEADER_WORLD_WIDTH] = viewport.x;
        self.header[protocol::HEADER_WORLD_HEIGHT] = viewport.y;
        self.header[protocol::HEADER_EVENT_COUNT] = event_count as f32;
        self.header[protocol::HEADER_PHASE] = phase.index() as f32;
        self.header[protocol::HEADER_PROTOCOL_VERSION] = protocol::PROTOCOL_VERSION;
    }

    /// Stamp the capacity fields once at init.
    pub fn write_capacities(&mut self, max_events: usize) {
        self.header[protocol::HEADER_MAX_INSTANCES] = self.max_instances as f32;
        self.header[protocol::HEADER_MAX_LINE_VERTICES] = self.max_line_vertices as f32;
        self.header[protocol::HEADER_MAX_EVENTS] = max_events as f32;
        self.header[protocol::HEADER_PROTOCOL_VERSION] = protocol::PROTOCOL_VERSION;
    }

    // ---- Pointer accessors for the WASM boundary ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr()
    }

    pub fn lines_ptr(&self) -> *const f32 {
        self.lines.as_ptr()
    }

    pub fn instance_count(&self) -> usize {
        self.instance_count
    }

    pub fn line_vertex_count(&self) -> usize {
        self.line_vertex_count
    }

    pub fn max_instances(&self) -> usize {
        self.max_instances
    }

    pub fn max_line_vertices(&self) -> usize {
        self.max_line_vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> RenderBuffer {
        RenderBuffer::new(BufferLayout {
            max_instances: 2,
            max_line_vertices: 4,
            max_events: 4,
        })
    }

    #[test]
    fn pushes_and_counts() {
        let mut buf = small();
        buf.push_instance(Vec2::new(1.0, 2.0), 3.0, 0.1, 0.2, 0.3, 0.4);
        assert_eq!(buf.instance_count(), 1);
        buf.push_line(Vec2::ZERO, Vec2::ONE, 0.5);
        assert_eq!(buf.line_vertex_count(), 2);
    }

    #[test]
    fn overflow_is_dropped() {
        let mut buf = small();
        for _ in 0..5 {
            buf.push_instance(Vec2::ZERO, 1.0, 0.0, 0.0, 0.0, 1.0);
        }
        assert_eq!(buf.instance_count(), 2);

        for _ in 0..5 {
            buf.push_line(Vec2::ZERO, Vec2::ONE, 0.1);
        }
        assert_eq!(buf.line_vertex_count(), 4);
    }

    #[test]
    fn clear_resets_counts() {
        let mut buf = small();
        buf.push_instance(Vec2::ZERO, 1.0, 0.0, 0.0, 0.0, 1.0);
        buf.clear();
        assert_eq!(buf.instance_count(), 0);
        assert_eq!(buf.line_vertex_count(), 0);
    }

    #[test]
    fn header_reflects_frame() {
        let mut buf = small();
        buf.push_instance(Vec2::ZERO, 1.0, 0.0, 0.0, 0.0, 1.0);
        buf.finish_frame(Vec2::new(800.0, 600.0), Phase::Mirror, 3);

        assert_eq!(buf.header[protocol::HEADER_INSTANCE_COUNT], 1.0);
        assert_eq!(buf.header[protocol::HEADER_WORLD_WIDTH], 800.0);
        assert_eq!(buf.header[protocol::HEADER_PHASE], 1.0);
        assert_eq!(buf.header[protocol::HEADER_EVENT_COUNT], 3.0);
        assert_eq!(buf.header[protocol::HEADER_FRAME_COUNTER], 1.0);
    }
}
