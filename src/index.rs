//! Static 2-D k-d tree over point indices.
//!
//! Used by the ellipse-search kernels to avoid scanning every point for
//! every cell. The tree stores only indices into the caller's coordinate
//! slices, so it never copies the points. Range queries return matching
//! indices sorted in input order, which keeps indexed and brute-force scans
//! interchangeable (same visiting order, same tie-breaking).

use crate::points::Points;

/// Implicit k-d tree: `order` is arranged so that the median of every
/// sub-slice is the splitting node and its halves are the subtrees.
#[derive(Debug, Clone)]
pub struct PointIndex {
    order: Vec<usize>,
    extent: (f64, f64, f64, f64),
    initial_search_radius: f64,
}

impl PointIndex {
    /// Build the tree. O(n log n).
    pub fn build(points: &Points<'_>) -> Self {
        let mut order: Vec<usize> = (0..points.len()).collect();
        build_recursive(points, &mut order, 0);

        let extent = points.extent().unwrap_or((0.0, 0.0, 0.0, 0.0));
        // Typical spacing between points, assuming a rather uniform spread.
        let initial_search_radius = if points.is_empty() {
            0.0
        } else {
            ((extent.2 - extent.0) * (extent.3 - extent.1) / points.len() as f64).sqrt()
        };

        Self {
            order,
            extent,
            initial_search_radius,
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Bounding rectangle of the indexed points `(min_x, min_y, max_x, max_y)`.
    pub fn extent(&self) -> (f64, f64, f64, f64) {
        self.extent
    }

    /// Starting half-width for expanding nearest-point searches.
    pub fn initial_search_radius(&self) -> f64 {
        self.initial_search_radius
    }

    /// Indices of points inside the closed rectangle, ascending.
    pub fn query_rect(
        &self,
        points: &Points<'_>,
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
        out: &mut Vec<usize>,
    ) {
        out.clear();
        let rect = [min_x, min_y, max_x, max_y];
        query_recursive(points, &self.order, 0, &rect, out);
        out.sort_unstable();
    }

    /// Indices of points inside the square of half-width `half` centred on
    /// `(x, y)`, ascending.
    pub fn query_square(&self, points: &Points<'_>, x: f64, y: f64, half: f64, out: &mut Vec<usize>) {
        self.query_rect(points, x - half, y - half, x + half, y + half, out);
    }
}

#[inline]
fn coordinate(points: &Points<'_>, i: usize, axis: usize) -> f64 {
    if axis == 0 {
        points.x()[i]
    } else {
        points.y()[i]
    }
}

fn build_recursive(points: &Points<'_>, order: &mut [usize], depth: usize) {
    if order.len() <= 1 {
        return;
    }
    let axis = depth % 2;
    let mid = order.len() / 2;
    order.select_nth_unstable_by(mid, |&a, &b| {
        coordinate(points, a, axis).total_cmp(&coordinate(points, b, axis))
    });
    let (left, right) = order.split_at_mut(mid);
    build_recursive(points, left, depth + 1);
    build_recursive(points, &mut right[1..], depth + 1);
}

fn query_recursive(
    points: &Points<'_>,
    order: &[usize],
    depth: usize,
    rect: &[f64; 4],
    out: &mut Vec<usize>,
) {
    if order.is_empty() {
        return;
    }
    let axis = depth % 2;
    let mid = order.len() / 2;
    let i = order[mid];
    let (px, py) = (points.x()[i], points.y()[i]);

    if px >= rect[0] && px <= rect[2] && py >= rect[1] && py <= rect[3] {
        out.push(i);
    }

    let split = if axis == 0 { px } else { py };
    let (lo, hi) = if axis == 0 {
        (rect[0], rect[2])
    } else {
        (rect[1], rect[3])
    };

    // total_cmp ordering puts everything left of the median at or below it.
    if lo <= split {
        query_recursive(points, &order[..mid], depth + 1, rect, out);
    }
    if hi >= split {
        query_recursive(points, &order[mid + 1..], depth + 1, rect, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lattice(n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let mut x = Vec::new();
        let mut y = Vec::new();
        let mut z = Vec::new();
        for j in 0..n {
            for i in 0..n {
                x.push(i as f64);
                y.push(j as f64);
                z.push((i * j) as f64);
            }
        }
        (x, y, z)
    }

    #[test]
    fn test_query_matches_brute_force() {
        let (x, y, z) = lattice(12);
        let points = Points::new(&x, &y, &z).unwrap();
        let index = PointIndex::build(&points);
        assert_eq!(index.len(), 144);

        let mut found = Vec::new();
        for &(cx, cy, half) in &[(5.5, 5.5, 2.0), (0.0, 0.0, 1.0), (11.0, 3.0, 0.0), (-5.0, -5.0, 1.0)] {
            index.query_square(&points, cx, cy, half, &mut found);
            let expected: Vec<usize> = (0..points.len())
                .filter(|&i| {
                    (x[i] - cx).abs() <= half && (y[i] - cy).abs() <= half
                })
                .collect();
            assert_eq!(found, expected, "query at ({}, {}) half {}", cx, cy, half);
        }
    }

    #[test]
    fn test_duplicate_coordinates() {
        let x = vec![1.0; 9];
        let y = vec![2.0; 9];
        let z: Vec<f64> = (0..9).map(|v| v as f64).collect();
        let points = Points::new(&x, &y, &z).unwrap();
        let index = PointIndex::build(&points);

        let mut found = Vec::new();
        index.query_square(&points, 1.0, 2.0, 0.0, &mut found);
        assert_eq!(found, (0..9).collect::<Vec<_>>());
        assert_eq!(index.initial_search_radius(), 0.0);
    }

    #[test]
    fn test_initial_search_radius() {
        let (x, y, z) = lattice(11);
        let points = Points::new(&x, &y, &z).unwrap();
        let index = PointIndex::build(&points);
        assert_eq!(index.extent(), (0.0, 0.0, 10.0, 10.0));
        let expected = (100.0f64 / 121.0).sqrt();
        assert!((index.initial_search_radius() - expected).abs() < 1e-12);
    }
}
