#![forbid(unsafe_code)]

//! Depth-first placement of the circle tree.
//!
//! Terminal nodes spread their points evenly on the unit circle starting at
//! the node's inherited angle. Composite nodes place each child's subtree
//! around their own center and converge the packing radius with a damped
//! fixed-point iteration: the radius grows while leaf points of different
//! children sit closer than the tightest spacing found inside any single
//! child, and shrinks while they sit further apart.
//!
//! # Invariants
//!
//! 1. After `place`, every node's `center`/`radius` is absolute in the root
//!    frame (root at (0.5, 0.5) with radius 0.5).
//! 2. For every composite node, leaf points of different children end at
//!    distance >= 2 * (target radius - [`CONVERGENCE_THRESHOLD`]).
//! 3. Placement is deterministic: the same tree shape always produces the
//!    same geometry.
//!
//! # Failure Modes
//!
//! - Non-convergence: the solve stops after [`MAX_SOLVE_ITERATIONS`] steps
//!   and keeps the best radius reached; a warning is logged.
//! - A node with fewer than two children (or no cross-child point pairs)
//!   skips the solve and keeps the canonical center.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::geometry::{Point, Vec2};
use crate::tree::CircleTree;

/// Hard cap on radius-solve iterations per node.
pub const MAX_SOLVE_ITERATIONS: u32 = 1000;

/// The solve stops once the candidate radius is within this distance of the
/// target radius.
pub const CONVERGENCE_THRESHOLD: f64 = 1e-3;

/// Place the whole tree, depth-first from the root.
pub fn place(tree: &mut CircleTree) {
    place_node(tree, tree.root());
}

fn place_node(tree: &mut CircleTree, index: usize) {
    if tree.node(index).is_terminal() {
        place_points(tree, index);
    } else {
        place_children(tree, index);
    }
}

/// Spread a terminal node's points on its unit circle.
fn place_points(tree: &mut CircleTree, index: usize) {
    let node = tree.node_mut(index);
    node.center = Point::new(0.5, 0.5);
    node.radius = 0.5;

    let count = node.points.len();
    if count > 1 {
        let step = TAU / count as f64;
        let mut angle = node.angle;
        for point in &mut node.points {
            *point = Vec2::from_angle(angle);
            angle += step;
        }
    } else if count == 1 {
        node.points[0] = Vec2::ZERO;
    }
}

/// Orient and recurse into children, then converge the packing radius.
fn place_children(tree: &mut CircleTree, index: usize) {
    let children = tree.node(index).children.clone();
    let count = children.len();
    let step = TAU / count as f64;
    let parent_angle = tree.node(index).angle;
    let parent_size = tree.node(index).size();

    for &child in &children {
        let slot = parent_angle + tree.node(child).index_in_parent as f64 * step;

        // A 2-way split inside a 2-way split rotates the child's internal
        // layout by a quarter turn; the child's position keeps the slot
        // angle either way.
        let child_size = tree.node(child).size();
        tree.node_mut(child).angle = if parent_size == 2 && child_size == 2 {
            slot + FRAC_PI_2
        } else {
            slot
        };

        place_node(tree, child);
    }

    tree.node_mut(index).center = Point::new(0.5, 0.5);
    tree.node_mut(index).radius = 0.5;

    if count < 2 {
        return;
    }
    let Some(spacing) = min_child_point_spacing(tree, &children) else {
        return;
    };
    let target_radius = spacing / 2.0;

    solve_radius(tree, index, &children, parent_angle, step, target_radius);
}

/// Damped fixed-point iteration on the node's radius.
fn solve_radius(
    tree: &mut CircleTree,
    index: usize,
    children: &[usize],
    parent_angle: f64,
    step: f64,
    target_radius: f64,
) {
    let mut child_points: Vec<Vec<Point>> = vec![Vec::new(); children.len()];
    let mut converged = false;

    for _ in 0..MAX_SOLVE_ITERATIONS {
        let center = tree.node(index).center;
        let radius = tree.node(index).radius;
        for &child in children {
            let slot = parent_angle + tree.node(child).index_in_parent as f64 * step;
            let position = center + Vec2::from_angle(slot) * radius;
            tree.move_subtree_to(child, position);
        }

        for (buffer, &child) in child_points.iter_mut().zip(children) {
            buffer.clear();
            tree.leaf_points_into(child, buffer);
        }
        let Some(separation) = min_cross_child_distance(&child_points) else {
            // No cross-child pairs, nothing to converge on.
            converged = true;
            break;
        };

        let candidate_radius = separation / 2.0;
        let discrepancy = (candidate_radius - target_radius).abs();
        if discrepancy < CONVERGENCE_THRESHOLD {
            converged = true;
            break;
        }

        if candidate_radius < target_radius {
            tree.node_mut(index).radius += discrepancy / 2.0;
        } else {
            tree.node_mut(index).radius -= discrepancy / 2.0;
        }
    }

    if converged {
        crate::trace!(
            node = index,
            depth = tree.depth(index),
            radius = tree.node(index).radius,
            "radius solve converged"
        );
    } else {
        crate::warn!(
            node = index,
            depth = tree.depth(index),
            target_radius,
            radius = tree.node(index).radius,
            "radius solve hit the iteration cap; keeping best radius"
        );
    }
}

/// Tightest leaf-point spacing inside any single child subtree.
fn min_child_point_spacing(tree: &CircleTree, children: &[usize]) -> Option<f64> {
    let mut buffer = Vec::new();
    let mut best: Option<f64> = None;
    for &child in children {
        buffer.clear();
        tree.leaf_points_into(child, &mut buffer);
        if let Some(distance) = min_pairwise_distance(&buffer) {
            best = Some(best.map_or(distance, |b: f64| b.min(distance)));
        }
    }
    best
}

fn min_pairwise_distance(points: &[Point]) -> Option<f64> {
    let mut best_sq = f64::INFINITY;
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            best_sq = best_sq.min(a.distance_sq(*b));
        }
    }
    best_sq.is_finite().then(|| best_sq.sqrt())
}

/// Minimum distance between leaf points of different children.
fn min_cross_child_distance(groups: &[Vec<Point>]) -> Option<f64> {
    let mut best_sq = f64::INFINITY;
    for (i, group) in groups.iter().enumerate() {
        for other in &groups[i + 1..] {
            for a in group {
                for b in other {
                    best_sq = best_sq.min(a.distance_sq(*b));
                }
            }
        }
    }
    best_sq.is_finite().then(|| best_sq.sqrt())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
