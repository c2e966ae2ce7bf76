/// Flat-buffer layout shared with the canvas renderer.
/// Must stay in sync with the TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Instances: max_instances × 7 floats]      x, y, size, r, g, b, a
/// [Line vertices: max_line_vertices × 3]     x, y, a
/// [Events: max_events × 4 floats]            kind, a, b, c
/// ```
///
/// Capacities are written into the header at init; the page reads them to
/// compute offsets dynamically.
use crate::api::config::RitualConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_MAX_INSTANCES: usize = 1;
pub const HEADER_INSTANCE_COUNT: usize = 2;
pub const HEADER_MAX_LINE_VERTICES: usize = 3;
pub const HEADER_LINE_VERTEX_COUNT: usize = 4;
pub const HEADER_WORLD_WIDTH: usize = 5;
pub const HEADER_WORLD_HEIGHT: usize = 6;
pub const HEADER_MAX_EVENTS: usize = 7;
pub const HEADER_EVENT_COUNT: usize = 8;
pub const HEADER_PHASE: usize = 9;
pub const HEADER_PROTOCOL_VERSION: usize = 10;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per render instance: x, y, size, r, g, b, a.
pub const INSTANCE_FLOATS: usize = 7;

/// Floats per line vertex: x, y, alpha.
pub const LINE_VERTEX_FLOATS: usize = 3;

/// Buffer capacities resolved from the config.
#[derive(Debug, Clone, Copy)]
pub struct BufferLayout {
    pub max_instances: usize,
    pub max_line_vertices: usize,
    pub max_events: usize,
}

impl BufferLayout {
    pub fn from_config(config: &RitualConfig) -> Self {
        Self {
            max_instances: config.max_instances,
            max_line_vertices: config.max_line_vertices,
            max_events: config.max_events,
        }
    }

    /// Total floats across header, instances, line vertices, and events.
    pub fn total_floats(&self) -> usize {
        HEADER_FLOATS
            + self.max_instances * INSTANCE_FLOATS
            + self.max_line_vertices * LINE_VERTEX_FLOATS
            + self.max_events * crate::api::types::RitualEvent::FLOATS
    }
}
