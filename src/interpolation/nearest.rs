//! Nearest neighbor interpolation.
//!
//! Takes the value of the closest point inside the search ellipse. When
//! several points are equally close the last one in input order wins.
//! With an index and zero radii the search grows outwards from the node
//! until it finds a point, so unbounded queries stay cheap on large inputs.

use super::common::{index_for_ellipse, visit_ellipse, SearchEllipse};
use super::Interpolator;
use crate::error::Result;
use crate::index::PointIndex;
use crate::options::NearestNeighborOptions;
use crate::points::Points;

/// Nearest neighbor interpolator
#[derive(Debug, Clone)]
pub struct NearestNeighbor {
    options: NearestNeighborOptions,
    ellipse: SearchEllipse,
    index: Option<PointIndex>,
}

impl NearestNeighbor {
    pub fn new(options: &NearestNeighborOptions, points: &Points<'_>, threshold: usize) -> Self {
        let ellipse = SearchEllipse::new(options.radius1, options.radius2, options.angle);
        let unbounded = options.radius1 == 0.0 && options.radius2 == 0.0;
        let index = if unbounded && points.len() > threshold {
            Some(PointIndex::build(points))
        } else {
            index_for_ellipse(&ellipse, points, threshold)
        };
        Self {
            options: *options,
            ellipse,
            index,
        }
    }

    /// Always index the points, regardless of their number.
    pub(crate) fn indexed(options: &NearestNeighborOptions, points: &Points<'_>) -> Self {
        Self::new(options, points, 0)
    }

    pub fn uses_index(&self) -> bool {
        self.index.is_some()
    }

    fn nearest_in_ellipse(&self, index: Option<&PointIndex>, points: &Points<'_>, x: f64, y: f64) -> f64 {
        let z = points.z();
        let mut best = f64::MAX;
        let mut value = self.options.nodata;
        visit_ellipse(&self.ellipse, index, points, x, y, |i, dx, dy| {
            let r2 = dx * dx + dy * dy;
            if r2 <= best {
                best = r2;
                value = z[i];
            }
        });
        value
    }

    fn nearest_expanding(&self, index: &PointIndex, points: &Points<'_>, x: f64, y: f64) -> f64 {
        let z = points.z();
        let mut found = Vec::new();
        let mut half = index.initial_search_radius();

        while half > 0.0 && half.is_finite() {
            index.query_square(points, x, y, half, &mut found);
            if !found.is_empty() {
                // The nearest point found so far is at most half * sqrt(2)
                // away, and anything closer lies in the widened square.
                index.query_square(points, x, y, half * std::f64::consts::SQRT_2, &mut found);
                let mut best = f64::MAX;
                let mut value = self.options.nodata;
                for &i in &found {
                    let (dx, dy) = points.offset(i, x, y);
                    let r2 = dx * dx + dy * dy;
                    if r2 <= best {
                        best = r2;
                        value = z[i];
                    }
                }
                return value;
            }
            half *= 2.0;
        }

        // Degenerate spread (all points on a line or at one spot).
        self.nearest_in_ellipse(None, points, x, y)
    }
}

impl Interpolator for NearestNeighbor {
    fn interpolate(&self, points: &Points<'_>, x: f64, y: f64) -> Result<f64> {
        let value = match &self.index {
            Some(index) if self.ellipse.is_indexable_circle() => {
                self.nearest_in_ellipse(Some(index), points, x, y)
            }
            Some(index) if self.options.radius1 == 0.0 && self.options.radius2 == 0.0 => {
                self.nearest_expanding(index, points, x, y)
            }
            _ => self.nearest_in_ellipse(None, points, x, y),
        };
        Ok(value)
    }

    fn name(&self) -> &str {
        "nearest"
    }
}
