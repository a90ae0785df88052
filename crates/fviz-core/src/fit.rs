#![forbid(unsafe_code)]

//! Fit normalization: the global transform that maps the placed tree into
//! a canonical unit square.
//!
//! The spacing `s` is the tightest leaf-point distance (a square of side
//! `s` around every point stays free of its neighbors); the scale is the
//! larger extent of the bounding box after padding each side by `s / 2`.
//! Degenerate inputs (a single point, coincident points) fall back to
//! `s = 1 / pointCount` so the outputs stay finite.

use crate::geometry::Point;
use crate::tree::CircleTree;

/// Coincident-point floor for the squared spacing.
const SPACING_FLOOR: f64 = 1e-6;

/// Global sizing basis computed by [`fit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitTransform {
    /// Tightest leaf-point spacing (fallback `1 / pointCount`).
    pub spacing: f64,
    /// Larger extent of the padded bounding box.
    pub scale: f64,
    /// Center of the padded bounding box.
    pub box_center: Point,
}

impl FitTransform {
    /// Map an absolute layout position into the normalized unit square.
    #[inline]
    #[must_use]
    pub fn normalize(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.box_center.x) / self.scale + 0.5,
            (p.y - self.box_center.y) / self.scale + 0.5,
        )
    }

    /// Normalized diameter of one leaf circle before viewport scaling.
    #[inline]
    #[must_use]
    pub fn spacing_ratio(&self) -> f64 {
        self.spacing / self.scale
    }
}

/// Compute the sizing basis for a placed tree.
///
/// Walks every leaf point once for the bounding box and pairwise for the
/// tightest spacing. The squared-distance accumulator starts at 2.0, the
/// upper bound inside the unit frame.
#[must_use]
pub fn fit(tree: &CircleTree) -> FitTransform {
    let mut points = Vec::new();
    tree.leaf_points_into(tree.root(), &mut points);

    let mut min_sq: f64 = 2.0;
    let mut min_x: f64 = 0.5;
    let mut min_y: f64 = 0.5;
    let mut max_x: f64 = 0.5;
    let mut max_y: f64 = 0.5;

    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            min_sq = min_sq.min(a.distance_sq(*b));
        }
        min_x = min_x.min(a.x);
        min_y = min_y.min(a.y);
        max_x = max_x.max(a.x);
        max_y = max_y.max(a.y);
    }

    let count = points.len().max(1);
    let spacing = if points.len() >= 2 && min_sq > SPACING_FLOOR {
        min_sq.sqrt()
    } else {
        1.0 / count as f64
    };

    let min_x = min_x - spacing / 2.0;
    let min_y = min_y - spacing / 2.0;
    let max_x = max_x + spacing / 2.0;
    let max_y = max_y + spacing / 2.0;

    let width = max_x - min_x;
    let height = max_y - min_y;
    let scale = width.max(height);
    let box_center = Point::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);

    crate::debug!(spacing, scale, points = count, "fit computed");

    FitTransform {
        spacing,
        scale,
        box_center,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::place::place;

    fn fitted(factors: &[u64]) -> (CircleTree, FitTransform) {
        let mut tree = CircleTree::build(factors);
        place(&mut tree);
        let transform = fit(&tree);
        (tree, transform)
    }

    fn min_distance(points: &[Point]) -> f64 {
        let mut best = f64::INFINITY;
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                best = best.min(a.distance(*b));
            }
        }
        best
    }

    // --- Spacing ---

    #[test]
    fn spacing_matches_tightest_pair() {
        let (tree, transform) = fitted(&[7]);
        let mut points = Vec::new();
        tree.leaf_points_into(tree.root(), &mut points);

        assert!((transform.spacing - min_distance(&points)).abs() < 1e-12);
    }

    #[test]
    fn single_point_falls_back_to_unit_spacing() {
        let (_, transform) = fitted(&[]);
        assert!((transform.spacing - 1.0).abs() < 1e-12);
        assert!((transform.scale - 1.0).abs() < 1e-12);
        assert!((transform.box_center.x - 0.5).abs() < 1e-12);
        assert!((transform.box_center.y - 0.5).abs() < 1e-12);
    }

    #[test]
    fn outputs_are_always_finite() {
        for n in [1u64, 2, 3, 4, 5, 6, 12, 30, 64] {
            let factors = crate::factor::factorize(n).unwrap();
            let (_, transform) = fitted(&factors);
            assert!(transform.spacing.is_finite() && transform.spacing > 0.0);
            assert!(transform.scale.is_finite() && transform.scale > 0.0);
            assert!(transform.box_center.x.is_finite());
            assert!(transform.box_center.y.is_finite());
        }
    }

    // --- Normalization ---

    #[test]
    fn normalize_round_trips_the_spacing() {
        let (tree, transform) = fitted(&[2, 3]);
        let mut points = Vec::new();
        tree.leaf_points_into(tree.root(), &mut points);

        let normalized: Vec<Point> = points.iter().map(|&p| transform.normalize(p)).collect();
        assert!((min_distance(&normalized) - transform.spacing_ratio()).abs() < 1e-9);
    }

    #[test]
    fn normalized_points_stay_in_the_unit_square() {
        for n in [4u64, 7, 12, 36, 60] {
            let factors = crate::factor::factorize(n).unwrap();
            let (tree, transform) = fitted(&factors);
            let mut points = Vec::new();
            tree.leaf_points_into(tree.root(), &mut points);

            for p in points {
                let q = transform.normalize(p);
                assert!(q.x > 0.0 && q.x < 1.0, "x out of range: {q:?}");
                assert!(q.y > 0.0 && q.y < 1.0, "y out of range: {q:?}");
            }
        }
    }

    #[test]
    fn box_center_maps_to_frame_center() {
        let (_, transform) = fitted(&[3, 5]);
        let center = transform.normalize(transform.box_center);
        assert!((center.x - 0.5).abs() < 1e-12);
        assert!((center.y - 0.5).abs() < 1e-12);
    }

    // --- Determinism ---

    #[test]
    fn fit_is_idempotent_on_an_unmodified_tree() {
        let mut tree = CircleTree::build(&[2, 2, 3]);
        place(&mut tree);
        let first = fit(&tree);
        let second = fit(&tree);
        assert_eq!(first, second);
    }
}
