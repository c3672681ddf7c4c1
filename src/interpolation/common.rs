//! Common utilities for interpolation kernels.
//!
//! This module provides the search ellipse shared by every kernel that
//! restricts itself to a neighbourhood of the grid node.

use crate::index::PointIndex;
use crate::points::Points;

/// Squared distance under which a point is treated as coincident with the
/// grid node.
pub const COINCIDENT_DISTANCE_SQ: f64 = 0.000_000_000_000_1;

/// Rotated search ellipse centred on the grid node.
///
/// `radius1` is the semi-axis along X and `radius2` along Y before rotation
/// by `angle` (radians). A point at offset `(dx, dy)` is rotated into the
/// ellipse frame and is inside iff `r2²·dx'² + r1²·dy'² ≤ r1²·r2²`, boundary
/// included. With both radii zero every point passes the test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchEllipse {
    radius1: f64,
    radius2: f64,
    radius1_sq: f64,
    radius2_sq: f64,
    r12: f64,
    rotated: bool,
    cos: f64,
    sin: f64,
}

impl SearchEllipse {
    pub fn new(radius1: f64, radius2: f64, angle: f64) -> Self {
        let radius1_sq = radius1 * radius1;
        let radius2_sq = radius2 * radius2;
        let rotated = angle != 0.0;
        Self {
            radius1,
            radius2,
            radius1_sq,
            radius2_sq,
            r12: radius1_sq * radius2_sq,
            rotated,
            cos: if rotated { angle.cos() } else { 0.0 },
            sin: if rotated { angle.sin() } else { 0.0 },
        }
    }

    /// Rotate an offset into the ellipse frame.
    #[inline]
    pub fn rotate(&self, dx: f64, dy: f64) -> (f64, f64) {
        if self.rotated {
            (dx * self.cos + dy * self.sin, dy * self.cos - dx * self.sin)
        } else {
            (dx, dy)
        }
    }

    /// Inclusion test on an already rotated offset.
    #[inline]
    pub fn contains_rotated(&self, dx: f64, dy: f64) -> bool {
        self.radius2_sq * dx * dx + self.radius1_sq * dy * dy <= self.r12
    }

    /// Inclusion test on a raw offset.
    #[inline]
    pub fn contains(&self, dx: f64, dy: f64) -> bool {
        let (dx, dy) = self.rotate(dx, dy);
        self.contains_rotated(dx, dy)
    }

    /// Whether the ellipse is an axis-aligned circle of non-zero radius, the
    /// only shape a square range query on the index can prefilter.
    pub fn is_indexable_circle(&self) -> bool {
        !self.rotated && self.radius1 == self.radius2 && self.radius1 != 0.0
    }

    pub fn radius1(&self) -> f64 {
        self.radius1
    }

    pub fn radius2(&self) -> f64 {
        self.radius2
    }
}

/// Build an index for `ellipse` when it pays off: an indexable circle and
/// more than `threshold` points.
pub fn index_for_ellipse(
    ellipse: &SearchEllipse,
    points: &Points<'_>,
    threshold: usize,
) -> Option<PointIndex> {
    if points.len() > threshold && ellipse.is_indexable_circle() {
        Some(PointIndex::build(points))
    } else {
        None
    }
}

/// Call `visit(i, dx', dy')` for every point inside the ellipse around
/// `(x, y)`, in input order. `dx'`, `dy'` are the rotated offsets.
pub fn visit_ellipse<F>(
    ellipse: &SearchEllipse,
    index: Option<&PointIndex>,
    points: &Points<'_>,
    x: f64,
    y: f64,
    mut visit: F,
) where
    F: FnMut(usize, f64, f64),
{
    match index {
        Some(index) => {
            let mut candidates = Vec::new();
            index.query_square(points, x, y, ellipse.radius1(), &mut candidates);
            for i in candidates {
                let (dx, dy) = points.offset(i, x, y);
                if ellipse.contains_rotated(dx, dy) {
                    visit(i, dx, dy);
                }
            }
        }
        None => {
            for i in 0..points.len() {
                let (dx, dy) = points.offset(i, x, y);
                let (dx, dy) = ellipse.rotate(dx, dy);
                if ellipse.contains_rotated(dx, dy) {
                    visit(i, dx, dy);
                }
            }
        }
    }
}
