#![forbid(unsafe_code)]

//! Positional pairing of successive draw-circle generations.
//!
//! Each recomputation replaces the whole draw list. Instead of diffing by
//! identity, `new[i]` pairs with the previously rendered `old[i]`; the
//! draw order is stable for unchanged tree prefixes, so matching circles
//! keep their sequence positions across recomputations. Surplus old
//! circles become fade-out entries that shrink to nothing at the viewport
//! center; brand-new circles carry no previous state and render at their
//! final appearance immediately.

use fviz_core::geometry::{Point, RectF, lerp};
use fviz_draw::Rgba;

/// Side of the collapsed target square a surplus circle shrinks to.
const FADE_OUT_SIZE: f64 = 0.1;

/// Rendered appearance of one circle: bounding rectangle plus colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleVisual {
    pub rect: RectF,
    pub stroke: Rgba,
    pub fill: Rgba,
}

impl CircleVisual {
    /// Interpolate toward `to`.
    ///
    /// The rectangle's center and size move independently and recombine,
    /// so a circle both travels and grows linearly; colors interpolate per
    /// channel, alpha included.
    #[must_use]
    pub fn lerp(&self, to: &CircleVisual, t: f64) -> CircleVisual {
        let center = Point::new(
            lerp(self.rect.center().x, to.rect.center().x, t),
            lerp(self.rect.center().y, to.rect.center().y, t),
        );
        let width = lerp(self.rect.width, to.rect.width, t);
        let height = lerp(self.rect.height, to.rect.height, t);

        CircleVisual {
            rect: RectF::from_center(center, width, height),
            stroke: self.stroke.lerp(to.stroke, t),
            fill: self.fill.lerp(to.fill, t),
        }
    }
}

/// One animated draw circle: the target visual plus the previous visual it
/// interpolates from. `None` means render the target immediately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCircle {
    pub target: CircleVisual,
    pub prev: Option<CircleVisual>,
}

/// The current generation of draw circles and their animation baselines.
#[derive(Debug, Default)]
pub struct Transition {
    circles: Vec<DrawCircle>,
}

impl Transition {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the draw list with `targets`, pairing positionally against
    /// the previously rendered visuals.
    ///
    /// Old circles beyond the new length are appended as fade-out entries
    /// collapsing to a transparent near-zero square at `fade_center`. Pass
    /// an empty `previous` to install the targets without any animation
    /// baseline.
    pub fn apply_new_state(
        &mut self,
        targets: Vec<CircleVisual>,
        previous: &[CircleVisual],
        fade_center: Point,
    ) {
        let shared = targets.len().min(previous.len());

        let mut circles = Vec::with_capacity(targets.len().max(previous.len()));
        for (i, target) in targets.into_iter().enumerate() {
            let prev = if i < shared { Some(previous[i]) } else { None };
            circles.push(DrawCircle { target, prev });
        }

        for &old in &previous[shared..] {
            circles.push(DrawCircle {
                target: CircleVisual {
                    rect: RectF::from_center(fade_center, FADE_OUT_SIZE, FADE_OUT_SIZE),
                    stroke: Rgba::TRANSPARENT,
                    fill: Rgba::TRANSPARENT,
                },
                prev: Some(old),
            });
        }

        self.circles = circles;
    }

    /// Rendered visuals at `step` of `total` interpolation steps.
    ///
    /// `step >= total` (and a zero `total`) render every circle at its
    /// target; circles without a baseline always do.
    #[must_use]
    pub fn interpolate(&self, step: u32, total: u32) -> Vec<CircleVisual> {
        let t = if total == 0 {
            1.0
        } else {
            f64::from(step.min(total)) / f64::from(total)
        };

        self.circles
            .iter()
            .map(|circle| match &circle.prev {
                Some(prev) if t < 1.0 => prev.lerp(&circle.target, t),
                _ => circle.target,
            })
            .collect()
    }

    /// Drop every animation baseline; subsequent renders show only the
    /// target state.
    pub fn clear_previous(&mut self) {
        for circle in &mut self.circles {
            circle.prev = None;
        }
    }

    /// The paired circles of the current generation.
    #[must_use]
    pub fn circles(&self) -> &[DrawCircle] {
        &self.circles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.circles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }
}

// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn visual(x: f64, y: f64, size: f64, fill: Rgba) -> CircleVisual {
        CircleVisual {
            rect: RectF::from_center(Point::new(x, y), size, size),
            stroke: Rgba::TRANSPARENT,
            fill,
        }
    }

    // --- Visual interpolation ---

    #[test]
    fn lerp_moves_center_and_size_independently() {
        let from = visual(0.0, 0.0, 10.0, Rgba::BLACK);
        let to = visual(10.0, 20.0, 30.0, Rgba::WHITE);

        let mid = from.lerp(&to, 0.5);
        let center = mid.rect.center();
        assert!((center.x - 5.0).abs() < 1e-12);
        assert!((center.y - 10.0).abs() < 1e-12);
        assert!((mid.rect.width - 20.0).abs() < 1e-12);
        assert!((mid.rect.height - 20.0).abs() < 1e-12);
        assert_eq!(mid.fill, Rgba::rgba(128, 128, 128, 255));
    }

    #[test]
    fn lerp_endpoints_reproduce_the_inputs() {
        let from = visual(1.0, 2.0, 3.0, Rgba::rgba(10, 20, 30, 40));
        let to = visual(4.0, 5.0, 6.0, Rgba::rgba(50, 60, 70, 80));
        assert_eq!(from.lerp(&to, 0.0), from);
        assert_eq!(from.lerp(&to, 1.0), to);
    }

    // --- Pairing ---

    #[test]
    fn shrinking_generation_appends_fade_outs() {
        let old: Vec<_> = (0..5).map(|i| visual(i as f64, 0.0, 4.0, Rgba::BLACK)).collect();
        let new: Vec<_> = (0..3).map(|i| visual(i as f64, 1.0, 4.0, Rgba::WHITE)).collect();

        let mut transition = Transition::new();
        transition.apply_new_state(new, &old, Point::new(50.0, 50.0));

        assert_eq!(transition.len(), 5);
        for (i, circle) in transition.circles().iter().take(3).enumerate() {
            assert_eq!(circle.prev, Some(old[i]));
        }
        for circle in &transition.circles()[3..] {
            let target = circle.target;
            assert_eq!(target.fill, Rgba::TRANSPARENT);
            assert_eq!(target.stroke, Rgba::TRANSPARENT);
            let center = target.rect.center();
            assert!((center.x - 50.0).abs() < 1e-12);
            assert!((center.y - 50.0).abs() < 1e-12);
            assert!((target.rect.width - FADE_OUT_SIZE).abs() < 1e-12);
            assert!(circle.prev.is_some());
        }
    }

    #[test]
    fn growing_generation_renders_new_circles_immediately() {
        let old: Vec<_> = (0..2).map(|i| visual(i as f64, 0.0, 4.0, Rgba::BLACK)).collect();
        let new: Vec<_> = (0..4).map(|i| visual(i as f64, 1.0, 4.0, Rgba::WHITE)).collect();

        let mut transition = Transition::new();
        transition.apply_new_state(new.clone(), &old, Point::new(0.0, 0.0));

        assert_eq!(transition.len(), 4);
        assert!(transition.circles()[0].prev.is_some());
        assert!(transition.circles()[1].prev.is_some());
        assert!(transition.circles()[2].prev.is_none());
        assert!(transition.circles()[3].prev.is_none());

        // No baseline: rendered at target from step zero.
        let start = transition.interpolate(0, 100);
        assert_eq!(start[2], new[2]);
        assert_eq!(start[3], new[3]);
    }

    // --- Stepping ---

    #[test]
    fn interpolation_runs_from_baseline_to_target() {
        let old = vec![visual(0.0, 0.0, 10.0, Rgba::BLACK)];
        let new = vec![visual(100.0, 0.0, 10.0, Rgba::BLACK)];

        let mut transition = Transition::new();
        transition.apply_new_state(new.clone(), &old, Point::new(0.0, 0.0));

        let start = transition.interpolate(0, 100);
        assert_eq!(start[0], old[0]);

        let quarter = transition.interpolate(25, 100);
        assert!((quarter[0].rect.center().x - 25.0).abs() < 1e-9);

        let done = transition.interpolate(100, 100);
        assert_eq!(done[0], new[0]);

        // Steps beyond the end clamp to the target.
        let past = transition.interpolate(250, 100);
        assert_eq!(past[0], new[0]);
    }

    #[test]
    fn zero_total_steps_renders_targets() {
        let old = vec![visual(0.0, 0.0, 10.0, Rgba::BLACK)];
        let new = vec![visual(9.0, 9.0, 2.0, Rgba::WHITE)];

        let mut transition = Transition::new();
        transition.apply_new_state(new.clone(), &old, Point::new(0.0, 0.0));
        assert_eq!(transition.interpolate(0, 0), new);
    }

    #[test]
    fn clear_previous_drops_every_baseline() {
        let old: Vec<_> = (0..4).map(|i| visual(i as f64, 0.0, 2.0, Rgba::BLACK)).collect();
        let new: Vec<_> = (0..2).map(|i| visual(i as f64, 1.0, 2.0, Rgba::WHITE)).collect();

        let mut transition = Transition::new();
        transition.apply_new_state(new, &old, Point::new(0.0, 0.0));
        transition.clear_previous();

        assert!(transition.circles().iter().all(|c| c.prev.is_none()));
        let rendered = transition.interpolate(0, 100);
        assert_eq!(rendered.len(), 4);
        assert_eq!(rendered[0], transition.circles()[0].target);
    }
}
