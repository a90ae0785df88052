#![forbid(unsafe_code)]

//! The engine facade: recomputation, animation, and rendered state.
//!
//! All work is synchronous on the calling thread. An integer change or a
//! debug toggle rebuilds the layout and starts a transition from the
//! currently rendered (possibly mid-interpolation) visuals; a resize
//! regenerates viewport geometry and settles immediately. The embedding
//! drives the transition by calling [`Engine::tick`] on its timer and
//! reading [`Engine::current_draw_circles`] each frame.

use fviz_core::factor::{FactorError, factorize};
use fviz_core::fit::{FitTransform, fit};
use fviz_core::geometry::{Point, RectF};
use fviz_core::place::place;
use fviz_core::tree::CircleTree;
use fviz_draw::emit::{Viewport, emit_layout};
use fviz_draw::sink::CircleSink;
use fviz_draw::Rgba;
use tracing::debug;

use crate::config::EngineConfig;
use crate::transition::{CircleVisual, Transition};

/// Factor a freshly constructed engine starts from.
const INITIAL_FACTOR: u64 = 4;

// ---------------------------------------------------------------------------

/// Sink that materializes emission into concrete visuals, applying the
/// configured palette.
struct VisualCollector {
    saturation: f64,
    value: f64,
    draws: Vec<CircleVisual>,
    debugs: Vec<CircleVisual>,
}

impl VisualCollector {
    fn new(saturation: f64, value: f64) -> Self {
        Self {
            saturation,
            value,
            draws: Vec::new(),
            debugs: Vec::new(),
        }
    }
}

impl CircleSink for VisualCollector {
    fn draw_circle(&mut self, center: Point, diameter: f64, hue: f64) {
        self.draws.push(CircleVisual {
            rect: RectF::from_center(center, diameter, diameter),
            stroke: Rgba::TRANSPARENT,
            fill: Rgba::from_hsv(360.0 * hue, self.saturation, self.value),
        });
    }

    fn debug_circle(&mut self, center: Point, diameter: f64, stroke_alpha: f64, fill_alpha: f64) {
        self.debugs.push(CircleVisual {
            rect: RectF::from_center(center, diameter, diameter),
            stroke: Rgba::BLACK.with_opacity(stroke_alpha),
            fill: Rgba::BLACK.with_opacity(fill_alpha),
        });
    }
}

// ---------------------------------------------------------------------------

/// Tick-driven layout engine for one view.
///
/// Owns one mutable tree plus the current and previous draw states; every
/// entry point runs to completion on the calling thread, so the engine is
/// single-threaded by construction. A fresh engine holds the initial
/// factor computed but not animated, with debug emission off and a zero
/// viewport until the embedding reports one.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    factor: u64,
    factors: Vec<u64>,
    debug: bool,
    viewport: Viewport,
    tree: CircleTree,
    transform: FitTransform,
    transition: Transition,
    debug_circles: Vec<CircleVisual>,
    steps_done: u32,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    /// Build an engine with the initial factor laid out for a zero-sized
    /// viewport.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let factors = vec![2, 2];
        let mut tree = CircleTree::build(&factors);
        place(&mut tree);
        let transform = fit(&tree);

        let mut engine = Self {
            config,
            factor: INITIAL_FACTOR,
            factors,
            debug: false,
            viewport: Viewport::default(),
            tree,
            transform,
            transition: Transition::new(),
            debug_circles: Vec::new(),
            steps_done: 0,
        };
        engine.regenerate(false);
        engine
    }

    /// Recompute the layout for a new integer and start a transition.
    ///
    /// Zero is rejected without touching any state; setting the current
    /// factor again is a no-op.
    pub fn set_factor(&mut self, n: u64) -> Result<(), FactorError> {
        if n == self.factor {
            return Ok(());
        }

        let factors = factorize(n)?;
        self.factor = n;
        self.factors = factors;
        self.rebuild();
        self.regenerate(true);
        Ok(())
    }

    /// Toggle debug emission, re-running the draw-state pipeline.
    pub fn set_debug(&mut self, enabled: bool) {
        if enabled == self.debug {
            return;
        }
        self.debug = enabled;
        self.regenerate(true);
    }

    /// Adopt a new viewport, regenerating geometry at final state.
    ///
    /// Any in-flight transition settles; the layout itself only depends on
    /// the factorization, so the tree is not rebuilt.
    pub fn on_resize(&mut self, width: f64, height: f64) {
        self.viewport = Viewport::new(width, height);
        self.regenerate(false);
    }

    /// Advance the animation one step; returns whether anything moved.
    ///
    /// On the final step every animation baseline is dropped, so later
    /// renders show only target state.
    pub fn tick(&mut self) -> bool {
        if !self.is_animating() {
            return false;
        }

        self.steps_done += 1;
        if self.steps_done >= self.config.anim_iterations {
            self.transition.clear_previous();
            debug!(steps = self.steps_done, "transition complete");
        }
        true
    }

    /// Rendered draw circles for the current frame, interpolated while a
    /// transition is in flight.
    #[must_use]
    pub fn current_draw_circles(&self) -> Vec<CircleVisual> {
        self.transition.interpolate(self.steps_done, self.config.anim_iterations)
    }

    /// Debug circles for the current frame. Never interpolated; empty
    /// unless debug emission is on.
    #[must_use]
    pub fn current_debug_circles(&self) -> &[CircleVisual] {
        &self.debug_circles
    }

    /// The number and its factor expression, e.g. `("12", "2x2x3")`.
    ///
    /// Inputs with fewer than two factors (primes and 1) read `"Prime"`.
    #[must_use]
    pub fn factor_label(&self) -> (String, String) {
        let number = self.factor.to_string();
        let expression = if self.factors.len() > 1 {
            self.factors
                .iter()
                .map(|f| f.to_string())
                .collect::<Vec<_>>()
                .join("x")
        } else {
            "Prime".to_string()
        };
        (number, expression)
    }

    /// Current factor.
    #[must_use]
    pub fn factor(&self) -> u64 {
        self.factor
    }

    /// Prime factors of the current factor, ascending.
    #[must_use]
    pub fn factors(&self) -> &[u64] {
        &self.factors
    }

    /// Whether a transition still has steps to run.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.steps_done < self.config.anim_iterations
    }

    /// Viewport last reported by the embedding.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    // -----------------------------------------------------------------------

    fn rebuild(&mut self) {
        self.tree = CircleTree::build(&self.factors);
        place(&mut self.tree);
        self.transform = fit(&self.tree);
        debug!(
            factor = self.factor,
            nodes = self.tree.len(),
            leaves = self.tree.total_ids(),
            "layout recomputed"
        );
    }

    /// Regenerate draw state for the current tree, viewport, and debug
    /// flag. `animate` pairs the new targets against the currently
    /// rendered visuals; otherwise the new state installs settled.
    fn regenerate(&mut self, animate: bool) {
        let previous = if animate && self.config.anim_iterations > 0 {
            self.current_draw_circles()
        } else {
            Vec::new()
        };

        let mut collector = VisualCollector::new(self.config.hsv_saturation, self.config.hsv_value);
        emit_layout(&self.tree, &self.transform, self.viewport, self.debug, &mut collector);
        self.debug_circles = collector.debugs;

        self.transition.apply_new_state(collector.draws, &previous, self.viewport.center());
        self.steps_done = if previous.is_empty() {
            self.config.anim_iterations
        } else {
            0
        };

        debug!(
            circles = self.transition.len(),
            animate = !previous.is_empty(),
            "draw state regenerated"
        );
    }
}

// ---------------------------------------------------------------------------
