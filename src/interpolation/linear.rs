//! Linear interpolation inside the Delaunay triangulation of the points.
//!
//! Nodes inside a triangle blend its three vertex values with barycentric
//! weights, reproducing planar data exactly. Nodes outside the hull fall
//! back to nearest neighbor, optionally within a radius, or get `nodata`.

use super::nearest::NearestNeighbor;
use super::Interpolator;
use crate::error::Result;
use crate::options::{LinearOptions, NearestNeighborOptions};
use crate::points::Points;
use crate::triangulation::Triangulation;

/// Triangulation-based linear interpolator
#[derive(Debug, Clone)]
pub struct Linear {
    options: LinearOptions,
    triangulation: Triangulation,
    outside: Option<NearestNeighbor>,
}

impl Linear {
    pub fn new(options: &LinearOptions, points: &Points<'_>) -> Self {
        let outside = if options.radius == 0.0 {
            None
        } else {
            // A negative radius means no limit.
            let radius = options.radius.max(0.0);
            Some(NearestNeighbor::indexed(
                &NearestNeighborOptions {
                    radius1: radius,
                    radius2: radius,
                    angle: 0.0,
                    nodata: options.nodata,
                },
                points,
            ))
        };

        Self {
            options: *options,
            triangulation: Triangulation::build(points),
            outside,
        }
    }

    pub fn triangulation(&self) -> &Triangulation {
        &self.triangulation
    }

    pub fn uses_index(&self) -> bool {
        self.outside.as_ref().is_some_and(NearestNeighbor::uses_index)
    }
}

impl Interpolator for Linear {
    fn interpolate(&self, points: &Points<'_>, x: f64, y: f64) -> Result<f64> {
        if let Some((triangle, weights)) = self.triangulation.locate(x, y) {
            let z = points.z();
            let [a, b, c] = triangle.vertices;
            return Ok(weights[0] * z[a] + weights[1] * z[b] + weights[2] * z[c]);
        }

        match &self.outside {
            Some(nearest) => nearest.interpolate(points, x, y),
            None => Ok(self.options.nodata),
        }
    }

    fn name(&self) -> &str {
        "linear"
    }
}
