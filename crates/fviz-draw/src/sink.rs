#![forbid(unsafe_code)]

//! Capability interface between layout emission and the embedding.

use fviz_core::geometry::Point;

/// One emitted draw circle: center and diameter in viewport units, plus
/// the hue fraction (of a full turn, in `[0, 1)`) identifying its leaf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub center: Point,
    pub diameter: f64,
    pub hue: f64,
}

/// One emitted debug circle: markers and bounding outlines, black at the
/// given stroke and fill opacities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugCommand {
    pub center: Point,
    pub diameter: f64,
    pub stroke_alpha: f64,
    pub fill_alpha: f64,
}

/// Sink for emitted circles.
///
/// The emitter hands every circle to the sink in a deterministic order;
/// the embedding decides how a hue fraction or a debug alpha becomes
/// pixels. Implementations must not reorder within one emission.
pub trait CircleSink {
    /// A leaf-point circle, colored by hue fraction.
    fn draw_circle(&mut self, center: Point, diameter: f64, hue: f64);
    /// A debug marker or bounding outline.
    fn debug_circle(&mut self, center: Point, diameter: f64, stroke_alpha: f64, fill_alpha: f64);
}

/// Sink that records every command, for tests and headless captures.
#[derive(Debug, Default)]
pub struct CollectSink {
    pub draws: Vec<DrawCommand>,
    pub debugs: Vec<DebugCommand>,
}

impl CollectSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all recorded commands, keeping the allocations.
    pub fn clear(&mut self) {
        self.draws.clear();
        self.debugs.clear();
    }
}

impl CircleSink for CollectSink {
    fn draw_circle(&mut self, center: Point, diameter: f64, hue: f64) {
        self.draws.push(DrawCommand { center, diameter, hue });
    }

    fn debug_circle(&mut self, center: Point, diameter: f64, stroke_alpha: f64, fill_alpha: f64) {
        self.debugs.push(DebugCommand { center, diameter, stroke_alpha, fill_alpha });
    }
}

// ---------------------------------------------------------------------------
