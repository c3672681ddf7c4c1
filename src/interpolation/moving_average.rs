//! Moving average over the search ellipse.

use super::common::{index_for_ellipse, visit_ellipse, SearchEllipse};
use super::Interpolator;
use crate::error::Result;
use crate::index::PointIndex;
use crate::options::MovingAverageOptions;
use crate::points::Points;

/// Arithmetic mean of the point values inside the search ellipse.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    options: MovingAverageOptions,
    ellipse: SearchEllipse,
    index: Option<PointIndex>,
}

impl MovingAverage {
    pub fn new(options: &MovingAverageOptions, points: &Points<'_>, threshold: usize) -> Self {
        let ellipse = SearchEllipse::new(options.radius1, options.radius2, options.angle);
        Self {
            options: *options,
            index: index_for_ellipse(&ellipse, points, threshold),
            ellipse,
        }
    }

    pub fn uses_index(&self) -> bool {
        self.index.is_some()
    }
}

impl Interpolator for MovingAverage {
    fn interpolate(&self, points: &Points<'_>, x: f64, y: f64) -> Result<f64> {
        let z = points.z();
        let mut sum = 0.0;
        let mut n = 0usize;
        visit_ellipse(&self.ellipse, self.index.as_ref(), points, x, y, |i, _, _| {
            sum += z[i];
            n += 1;
        });

        if n == 0 || n < self.options.min_points as usize {
            Ok(self.options.nodata)
        } else {
            Ok(sum / n as f64)
        }
    }

    fn name(&self) -> &str {
        "average"
    }
}
