#![forbid(unsafe_code)]

//! The recursive circle tree built from a factor sequence.
//!
//! Nodes live in an arena (`Vec<CircleNode>`) addressed by index, with
//! parent indices instead of back-pointers. A node is either composite
//! (`children` populated) or terminal (`points` populated); terminal nodes
//! reserve one global id per point, assigned in build order.
//!
//! # Invariants
//!
//! 1. Exactly one of `children`/`points` is non-empty per node (the empty
//!    factor sequence maps to a single terminal point).
//! 2. The root is always index 0 and carries the fixed root angle.
//! 3. Global ids cover `0..total_ids` with no gaps; `total_ids` equals the
//!    product of the factor sequence (1 for the empty sequence).
//! 4. A rebuild starts the id counter at 0; ids are never reused across
//!    builds of different trees.

use crate::geometry::{Point, Vec2};

/// Angle the root inherits, pointing "up" in the y-down viewport frame.
pub const ROOT_ANGLE: f64 = -std::f64::consts::FRAC_PI_2;

/// One node of the layout tree.
#[derive(Debug, Clone)]
pub struct CircleNode {
    /// Arena index of the parent; `None` for the root.
    pub parent: Option<usize>,
    /// Arena indices of children, in creation order (composite nodes).
    pub children: Vec<usize>,
    /// Unit offsets from `center`, scaled by `radius` (terminal nodes).
    pub points: Vec<Vec2>,
    /// Absolute center in the layout frame once placed.
    pub center: Point,
    /// Circle radius in the layout frame.
    pub radius: f64,
    /// Polar angle this node was placed at; orients its own sub-layout.
    pub angle: f64,
    /// Position among siblings.
    pub index_in_parent: usize,
    /// First reserved global id (terminal nodes; 0 otherwise).
    pub id: u64,
}

impl CircleNode {
    fn new(parent: Option<usize>, index_in_parent: usize) -> Self {
        Self {
            parent,
            children: Vec::new(),
            points: Vec::new(),
            center: Point::new(0.0, 0.0),
            radius: 0.5,
            angle: ROOT_ANGLE,
            index_in_parent,
            id: 0,
        }
    }

    /// Whether this node holds points rather than children.
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.children.is_empty()
    }

    /// Sub-element count: children for composite nodes, points for
    /// terminal ones.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.children.len().max(self.points.len())
    }
}

/// Arena tree of circle nodes for one factor sequence.
#[derive(Debug, Clone)]
pub struct CircleTree {
    nodes: Vec<CircleNode>,
    total_ids: u64,
}

impl CircleTree {
    /// Build the tree for a factor sequence.
    ///
    /// A single-element sequence gives one terminal node with that many
    /// points; the empty sequence gives one terminal node with a single
    /// centered point. Otherwise the first factor is the branching factor
    /// and the remainder recurses into each child. The id counter is local
    /// to this call.
    #[must_use]
    pub fn build(factors: &[u64]) -> Self {
        let mut nodes = Vec::new();
        let mut next_id = 0;
        Self::build_node(&mut nodes, factors, None, 0, &mut next_id);
        Self {
            nodes,
            total_ids: next_id,
        }
    }

    fn build_node(
        nodes: &mut Vec<CircleNode>,
        factors: &[u64],
        parent: Option<usize>,
        index_in_parent: usize,
        next_id: &mut u64,
    ) -> usize {
        let index = nodes.len();
        nodes.push(CircleNode::new(parent, index_in_parent));

        if factors.len() > 1 {
            let branch = factors[0] as usize;
            let rest = &factors[1..];
            for i in 0..branch {
                let child = Self::build_node(nodes, rest, Some(index), i, next_id);
                nodes[index].children.push(child);
            }
        } else {
            let count = factors.first().copied().unwrap_or(1);
            nodes[index].id = *next_id;
            *next_id += count;
            nodes[index].points = vec![Vec2::ZERO; count as usize];
        }

        index
    }

    /// Arena index of the root node.
    #[inline]
    #[must_use]
    pub fn root(&self) -> usize {
        0
    }

    /// Number of nodes in the arena.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty (never true for a built tree).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total reserved global ids; equals the leaf-point count and the
    /// denominator of the hue fraction.
    #[inline]
    #[must_use]
    pub fn total_ids(&self) -> u64 {
        self.total_ids
    }

    /// Borrow a node.
    #[inline]
    #[must_use]
    pub fn node(&self, index: usize) -> &CircleNode {
        &self.nodes[index]
    }

    /// Mutably borrow a node.
    #[inline]
    pub fn node_mut(&mut self, index: usize) -> &mut CircleNode {
        &mut self.nodes[index]
    }

    /// Depth of a node (root is 0), via parent links.
    #[must_use]
    pub fn depth(&self, index: usize) -> usize {
        let mut depth = 0;
        let mut current = index;
        while let Some(parent) = self.nodes[current].parent {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Absolute position of one leaf point of a terminal node.
    #[inline]
    #[must_use]
    pub fn point_at(&self, index: usize, point_index: usize) -> Point {
        let node = &self.nodes[index];
        node.center + node.points[point_index] * node.radius
    }

    /// Append the absolute positions of every leaf point in the subtree,
    /// in traversal order.
    pub fn leaf_points_into(&self, index: usize, out: &mut Vec<Point>) {
        let node = &self.nodes[index];
        for &child in &node.children {
            self.leaf_points_into(child, out);
        }
        for i in 0..node.points.len() {
            out.push(self.point_at(index, i));
        }
    }

    /// Translate a whole subtree by `delta`.
    pub fn move_subtree(&mut self, index: usize, delta: Vec2) {
        let mut stack = vec![index];
        while let Some(current) = stack.pop() {
            self.nodes[current].center += delta;
            stack.extend(self.nodes[current].children.iter().copied());
        }
    }

    /// Move a subtree so the node's center lands on `target`.
    pub fn move_subtree_to(&mut self, index: usize, target: Point) {
        let delta = target - self.nodes[index].center;
        self.move_subtree(index, delta);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
