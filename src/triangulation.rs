//! Delaunay triangulation of the input points.
//!
//! Built once per context by a radial sweep with edge flips, so the mesh
//! always spans the full convex hull of the input. Every
//! triangle keeps precomputed barycentric coefficients so that locating a
//! grid node and weighting its three vertices is a handful of multiplies.

use std::collections::HashSet;

use crate::points::Points;

/// Barycentric coordinates below `-EPSILON` put a node outside a triangle.
const EPSILON: f64 = 1e-10;

/// One triangle, vertices given as indices into the input points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [usize; 3],
    // l1 = mul1x * (x - x2) + mul1y * (y - y2), same for l2, l3 = 1 - l1 - l2.
    mul1x: f64,
    mul1y: f64,
    mul2x: f64,
    mul2y: f64,
    x2: f64,
    y2: f64,
    bounds: [f64; 4],
}

impl Triangle {
    fn new(points: &Points<'_>, vertices: [usize; 3]) -> Option<Self> {
        let (x, y) = (points.x(), points.y());
        let (x0, y0) = (x[vertices[0]], y[vertices[0]]);
        let (x1, y1) = (x[vertices[1]], y[vertices[1]]);
        let (x2, y2) = (x[vertices[2]], y[vertices[2]]);

        let det = (y1 - y2) * (x0 - x2) + (x2 - x1) * (y0 - y2);
        if det == 0.0 || !det.is_finite() {
            return None;
        }

        Some(Self {
            vertices,
            mul1x: (y1 - y2) / det,
            mul1y: (x2 - x1) / det,
            mul2x: (y2 - y0) / det,
            mul2y: (x0 - x2) / det,
            x2,
            y2,
            bounds: [
                x0.min(x1).min(x2),
                y0.min(y1).min(y2),
                x0.max(x1).max(x2),
                y0.max(y1).max(y2),
            ],
        })
    }

    /// Barycentric weights of `(x, y)` with respect to the three vertices.
    pub fn barycentric(&self, x: f64, y: f64) -> [f64; 3] {
        let dx = x - self.x2;
        let dy = y - self.y2;
        let l1 = self.mul1x * dx + self.mul1y * dy;
        let l2 = self.mul2x * dx + self.mul2y * dy;
        [l1, l2, 1.0 - l1 - l2]
    }

    fn may_contain(&self, x: f64, y: f64) -> bool {
        x >= self.bounds[0] - EPSILON
            && x <= self.bounds[2] + EPSILON
            && y >= self.bounds[1] - EPSILON
            && y <= self.bounds[3] + EPSILON
    }
}

/// Delaunay triangulation over a point set.
#[derive(Debug, Clone, Default)]
pub struct Triangulation {
    triangles: Vec<Triangle>,
}

impl Triangulation {
    /// Triangulate `points`.
    ///
    /// Repeated coordinates keep their first occurrence only. Fewer than
    /// three distinct points, or all of them collinear, give an empty
    /// triangulation.
    pub fn build(points: &Points<'_>) -> Self {
        let (x, y) = (points.x(), points.y());
        let mut seen = HashSet::with_capacity(points.len());
        let unique: Vec<usize> = (0..points.len())
            .filter(|&i| seen.insert((x[i].to_bits(), y[i].to_bits())))
            .collect();

        let triangles = delaunay(x, y, &unique)
            .into_iter()
            .filter_map(|v| Triangle::new(points, v))
            .collect();

        Self { triangles }
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// First triangle containing `(x, y)` with its barycentric weights.
    pub fn locate(&self, x: f64, y: f64) -> Option<(&Triangle, [f64; 3])> {
        self.triangles
            .iter()
            .filter(|t| t.may_contain(x, y))
            .find_map(|t| {
                let weights = t.barycentric(x, y);
                if weights.iter().all(|&w| w >= -EPSILON) {
                    Some((t, weights))
                } else {
                    None
                }
            })
    }
}

const NONE: usize = usize::MAX;

fn next_halfedge(e: usize) -> usize {
    if e % 3 == 2 {
        e - 2
    } else {
        e + 1
    }
}

fn prev_halfedge(e: usize) -> usize {
    if e % 3 == 0 {
        e + 2
    } else {
        e - 1
    }
}

/// `true` when `p, q, r` turn counter-clockwise.
fn ccw(p: (f64, f64), q: (f64, f64), r: (f64, f64)) -> bool {
    (q.0 - p.0) * (r.1 - p.1) - (q.1 - p.1) * (r.0 - p.0) > 0.0
}

/// Offset of the circumcentre of `a, b, c` from `a`.
fn circumdelta(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> (f64, f64) {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let (ex, ey) = (c.0 - a.0, c.1 - a.1);
    let bl = dx * dx + dy * dy;
    let cl = ex * ex + ey * ey;
    let d = 0.5 / (dx * ey - dy * ex);
    ((ey * bl - dy * cl) * d, (dx * cl - ex * bl) * d)
}

fn circumradius_sq(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> f64 {
    let (x, y) = circumdelta(a, b, c);
    x * x + y * y
}

/// `true` when `p` lies strictly inside the circumcircle of the clockwise
/// triangle `a, b, c`.
fn in_circle(a: (f64, f64), b: (f64, f64), c: (f64, f64), p: (f64, f64)) -> bool {
    let (dx, dy) = (a.0 - p.0, a.1 - p.1);
    let (ex, ey) = (b.0 - p.0, b.1 - p.1);
    let (fx, fy) = (c.0 - p.0, c.1 - p.1);
    let ap = dx * dx + dy * dy;
    let bp = ex * ex + ey * ey;
    let cp = fx * fx + fy * fy;
    dx * (ey * cp - bp * fy) - dy * (ex * cp - bp * fx) + ap * (ex * fy - ey * fx) < 0.0
}

/// Closest point to `target`, skipping index `skip`. The first one wins ties.
fn closest(coords: &[(f64, f64)], target: (f64, f64), skip: usize) -> Option<usize> {
    coords
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != skip)
        .map(|(i, &(px, py))| (i, (px - target.0).powi(2) + (py - target.1).powi(2)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// Half-edge mesh grown by a radial sweep: points are added in order of
/// distance from the seed circumcentre, each one outside the current convex
/// hull, and every new triangle is legalized by edge flips. The hull is
/// therefore the exact convex hull of the input.
///
/// Triangles are stored clockwise. `halfedges[e]` is the opposite half-edge
/// of `e`, or `NONE` on the hull.
struct Mesh<'a> {
    coords: &'a [(f64, f64)],
    triangles: Vec<usize>,
    halfedges: Vec<usize>,
    hull_next: Vec<usize>,
    hull_prev: Vec<usize>,
    // Hull half-edge leaving each hull vertex.
    hull_tri: Vec<usize>,
    hull_start: usize,
}

impl<'a> Mesh<'a> {
    /// `None` when fewer than three points are given or all are collinear.
    fn build(coords: &'a [(f64, f64)]) -> Option<Self> {
        let n = coords.len();
        if n < 3 {
            return None;
        }

        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for &(px, py) in coords {
            min_x = min_x.min(px);
            min_y = min_y.min(py);
            max_x = max_x.max(px);
            max_y = max_y.max(py);
        }
        let middle = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);

        let i0 = closest(coords, middle, NONE)?;
        let mut i1 = closest(coords, coords[i0], i0)?;
        let mut i2 = NONE;
        let mut smallest = f64::INFINITY;
        for (i, &p) in coords.iter().enumerate() {
            if i == i0 || i == i1 {
                continue;
            }
            let r = circumradius_sq(coords[i0], coords[i1], p);
            if r < smallest {
                smallest = r;
                i2 = i;
            }
        }
        if i2 == NONE {
            return None;
        }
        if ccw(coords[i0], coords[i1], coords[i2]) {
            std::mem::swap(&mut i1, &mut i2);
        }

        let (ox, oy) = circumdelta(coords[i0], coords[i1], coords[i2]);
        let center = (coords[i0].0 + ox, coords[i0].1 + oy);
        let distances: Vec<f64> = coords
            .iter()
            .map(|&(px, py)| (px - center.0).powi(2) + (py - center.1).powi(2))
            .collect();
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| distances[a].total_cmp(&distances[b]));

        let capacity = 3 * (2 * n - 5);
        let mut mesh = Self {
            coords,
            triangles: Vec::with_capacity(capacity),
            halfedges: Vec::with_capacity(capacity),
            hull_next: vec![NONE; n],
            hull_prev: vec![NONE; n],
            hull_tri: vec![NONE; n],
            hull_start: i0,
        };

        mesh.hull_next[i0] = i1;
        mesh.hull_prev[i2] = i1;
        mesh.hull_next[i1] = i2;
        mesh.hull_prev[i0] = i2;
        mesh.hull_next[i2] = i0;
        mesh.hull_prev[i1] = i0;
        mesh.hull_tri[i0] = 0;
        mesh.hull_tri[i1] = 1;
        mesh.hull_tri[i2] = 2;
        mesh.add_triangle(i0, i1, i2, NONE, NONE, NONE);

        for i in order {
            if i == i0 || i == i1 || i == i2 {
                continue;
            }
            mesh.insert(i);
        }

        Some(mesh)
    }

    fn insert(&mut self, i: usize) {
        let p = self.coords[i];

        // First hull edge that sees `p`.
        let start = self.hull_start;
        let mut e = start;
        loop {
            if ccw(p, self.coords[e], self.coords[self.hull_next[e]]) {
                break;
            }
            e = self.hull_next[e];
            if e == start {
                return;
            }
        }

        let mut t = self.add_triangle(e, i, self.hull_next[e], NONE, NONE, self.hull_tri[e]);
        self.hull_tri[i] = self.legalize(t + 2);
        self.hull_tri[e] = t;

        let mut n = self.hull_next[e];
        loop {
            let q = self.hull_next[n];
            if !ccw(p, self.coords[n], self.coords[q]) {
                break;
            }
            t = self.add_triangle(n, i, q, self.hull_tri[i], NONE, self.hull_tri[n]);
            self.hull_tri[i] = self.legalize(t + 2);
            self.hull_next[n] = n;
            n = q;
        }

        // Edges before `start` can only be visible when the scan stopped on it.
        if e == start {
            loop {
                let q = self.hull_prev[e];
                if !ccw(p, self.coords[q], self.coords[e]) {
                    break;
                }
                t = self.add_triangle(q, i, e, NONE, self.hull_tri[e], self.hull_tri[q]);
                self.legalize(t + 2);
                self.hull_tri[q] = t;
                self.hull_next[e] = e;
                e = q;
            }
        }

        self.hull_start = e;
        self.hull_prev[i] = e;
        self.hull_next[e] = i;
        self.hull_prev[n] = i;
        self.hull_next[i] = n;
    }

    fn add_triangle(
        &mut self,
        i0: usize,
        i1: usize,
        i2: usize,
        a: usize,
        b: usize,
        c: usize,
    ) -> usize {
        let t = self.triangles.len();
        self.triangles.extend_from_slice(&[i0, i1, i2]);
        self.halfedges.extend_from_slice(&[a, b, c]);
        for (k, opposite) in [a, b, c].into_iter().enumerate() {
            if opposite != NONE {
                self.halfedges[opposite] = t + k;
            }
        }
        t
    }

    fn link(&mut self, a: usize, b: usize) {
        self.halfedges[a] = b;
        if b != NONE {
            self.halfedges[b] = a;
        }
    }

    /// Flip `a` while the opposite vertex falls inside its circumcircle.
    /// Returns the half-edge that ends up in place of `prev(a)`.
    fn legalize(&mut self, a: usize) -> usize {
        let b = self.halfedges[a];
        let ar = prev_halfedge(a);
        if b == NONE {
            return ar;
        }

        let al = next_halfedge(a);
        let bl = prev_halfedge(b);
        let p0 = self.triangles[ar];
        let pr = self.triangles[a];
        let pl = self.triangles[al];
        let p1 = self.triangles[bl];

        let c = self.coords;
        if !in_circle(c[p0], c[pr], c[pl], c[p1]) {
            return ar;
        }

        self.triangles[a] = p1;
        self.triangles[b] = p0;
        let hbl = self.halfedges[bl];
        let har = self.halfedges[ar];

        // The flipped edge was on the hull: repoint the hull entry.
        if hbl == NONE {
            let mut e = self.hull_start;
            loop {
                if self.hull_tri[e] == bl {
                    self.hull_tri[e] = a;
                    break;
                }
                e = self.hull_prev[e];
                if e == self.hull_start {
                    break;
                }
            }
        }

        self.link(a, hbl);
        self.link(b, har);
        self.link(ar, bl);

        let br = next_halfedge(b);
        self.legalize(a);
        self.legalize(br)
    }
}

/// Delaunay triangles over the points selected by `subset`. Returned
/// vertices index the full coordinate slices.
fn delaunay(x: &[f64], y: &[f64], subset: &[usize]) -> Vec<[usize; 3]> {
    let coords: Vec<(f64, f64)> = subset.iter().map(|&i| (x[i], y[i])).collect();
    match Mesh::build(&coords) {
        Some(mesh) => mesh
            .triangles
            .chunks_exact(3)
            .map(|t| [subset[t[0]], subset[t[1]], subset[t[2]]])
            .collect(),
        None => Vec::new(),
    }
}
