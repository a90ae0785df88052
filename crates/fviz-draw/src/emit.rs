#![forbid(unsafe_code)]

//! Draw-state generation: walk a placed tree and emit viewport circles.
//!
//! The walk is depth-first in child order, so the draw sequence is stable
//! for unchanged subtrees between recomputations. Terminal nodes emit one
//! draw circle per leaf point; in debug mode every terminal adds a center
//! marker before its points and a point marker after each draw circle, and
//! every node appends its bounding outline after its subtree's output.
//!
//! A zero-sized viewport collapses every circle to size zero at the
//! viewport center; emission itself never fails.

use fviz_core::fit::FitTransform;
use fviz_core::geometry::Point;
use fviz_core::tree::CircleTree;

use crate::sink::CircleSink;

/// Fraction of the fitted point spacing a leaf circle fills.
pub const LEAF_DIAMETER_FRACTION: f64 = 0.9;
/// Fixed pixel diameter of debug markers.
pub const DEBUG_MARKER_DIAMETER: f64 = 8.0;
/// Fill opacity of the terminal-center debug marker.
pub const CENTER_MARKER_FILL_ALPHA: f64 = 0.4;
/// Fill opacity of the per-point debug marker.
pub const POINT_MARKER_FILL_ALPHA: f64 = 1.0;
/// Stroke opacity of the bounding-circle debug outline.
pub const BOUNDS_STROKE_ALPHA: f64 = 0.4;

// ---------------------------------------------------------------------------

/// Viewport extent in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Side of the centered square the unit layout maps onto.
    #[inline]
    #[must_use]
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Pixel center of the viewport.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Map a normalized layout point into viewport pixels.
    ///
    /// `(0.5, 0.5)` lands on the viewport center; both axes scale by the
    /// shorter viewport side, keeping the layout square.
    #[must_use]
    pub fn project(&self, normalized: Point) -> Point {
        let side = self.min_side();
        Point::new(
            (normalized.x - 0.5) * side + self.width / 2.0,
            (normalized.y - 0.5) * side + self.height / 2.0,
        )
    }
}

// ---------------------------------------------------------------------------

/// Emit the draw state for a placed and fitted tree.
///
/// `debug` adds the marker and bounding-outline circles on top of the
/// leaf-point draw circles.
pub fn emit_layout(
    tree: &CircleTree,
    fit: &FitTransform,
    viewport: Viewport,
    debug: bool,
    sink: &mut dyn CircleSink,
) {
    emit_node(tree, tree.root(), fit, viewport, debug, sink);
}

fn emit_node(
    tree: &CircleTree,
    index: usize,
    fit: &FitTransform,
    viewport: Viewport,
    debug: bool,
    sink: &mut dyn CircleSink,
) {
    let node = tree.node(index);
    let px_per_unit = viewport.min_side() / fit.scale;

    if node.is_terminal() {
        let leaf_diameter = LEAF_DIAMETER_FRACTION * fit.spacing * px_per_unit;

        if debug {
            let center = viewport.project(fit.normalize(node.center));
            sink.debug_circle(center, DEBUG_MARKER_DIAMETER, 0.0, CENTER_MARKER_FILL_ALPHA);
        }

        for i in 0..node.points.len() {
            let at = viewport.project(fit.normalize(tree.point_at(index, i)));
            let hue = (node.id + i as u64) as f64 / tree.total_ids() as f64;
            sink.draw_circle(at, leaf_diameter, hue);

            if debug {
                sink.debug_circle(at, DEBUG_MARKER_DIAMETER, 0.0, POINT_MARKER_FILL_ALPHA);
            }
        }
    } else {
        for &child in &node.children {
            emit_node(tree, child, fit, viewport, debug, sink);
        }
    }

    if debug {
        let center = viewport.project(fit.normalize(node.center));
        let diameter = 2.0 * node.radius * px_per_unit;
        sink.debug_circle(center, diameter, BOUNDS_STROKE_ALPHA, 0.0);
    }
}

// ---------------------------------------------------------------------------
