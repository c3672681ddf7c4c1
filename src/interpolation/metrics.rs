//! Data metrics over the search ellipse.
//!
//! These do not interpolate; they describe the points found around each
//! node: extremes, spread, count, and how far the points lie from the node
//! and from each other.

use super::common::{index_for_ellipse, visit_ellipse, SearchEllipse};
use super::Interpolator;
use crate::error::Result;
use crate::index::PointIndex;
use crate::options::DataMetricsOptions;
use crate::points::Points;

/// Which statistic a [`DataMetric`] computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Minimum,
    Maximum,
    Range,
    Count,
    /// Mean distance from the node to the points found.
    AverageDistance,
    /// Mean distance between every pair of points found.
    AverageDistancePts,
}

impl MetricKind {
    pub fn name(self) -> &'static str {
        match self {
            MetricKind::Minimum => "minimum",
            MetricKind::Maximum => "maximum",
            MetricKind::Range => "range",
            MetricKind::Count => "count",
            MetricKind::AverageDistance => "average_distance",
            MetricKind::AverageDistancePts => "average_distance_pts",
        }
    }
}

/// A statistic over the points inside the search ellipse.
#[derive(Debug, Clone)]
pub struct DataMetric {
    kind: MetricKind,
    options: DataMetricsOptions,
    ellipse: SearchEllipse,
    index: Option<PointIndex>,
}

impl DataMetric {
    pub fn new(
        kind: MetricKind,
        options: &DataMetricsOptions,
        points: &Points<'_>,
        threshold: usize,
    ) -> Self {
        let ellipse = SearchEllipse::new(options.radius1, options.radius2, options.angle);
        Self {
            kind,
            options: *options,
            index: index_for_ellipse(&ellipse, points, threshold),
            ellipse,
        }
    }

    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    pub fn uses_index(&self) -> bool {
        self.index.is_some()
    }

    fn finish(&self, n: usize, value: f64) -> f64 {
        if n == 0 || n < self.options.min_points as usize {
            self.options.nodata
        } else {
            value
        }
    }

    fn extremes(&self, points: &Points<'_>, x: f64, y: f64) -> (usize, f64, f64) {
        let z = points.z();
        let mut n = 0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        visit_ellipse(&self.ellipse, self.index.as_ref(), points, x, y, |i, _, _| {
            min = min.min(z[i]);
            max = max.max(z[i]);
            n += 1;
        });
        (n, min, max)
    }

    fn average_distance(&self, points: &Points<'_>, x: f64, y: f64) -> f64 {
        let mut n = 0;
        let mut sum = 0.0;
        visit_ellipse(&self.ellipse, self.index.as_ref(), points, x, y, |_, dx, dy| {
            sum += (dx * dx + dy * dy).sqrt();
            n += 1;
        });
        self.finish(n, sum / n as f64)
    }

    // Pairs, not points, are checked against min_points.
    fn average_distance_between_points(&self, points: &Points<'_>, x: f64, y: f64) -> f64 {
        let mut inside = Vec::new();
        visit_ellipse(&self.ellipse, self.index.as_ref(), points, x, y, |i, _, _| {
            inside.push(i)
        });

        let (px, py) = (points.x(), points.y());
        let mut pairs = 0usize;
        let mut sum = 0.0;
        for (k, &i) in inside.iter().enumerate() {
            for &j in &inside[k + 1..] {
                let dx = px[j] - px[i];
                let dy = py[j] - py[i];
                sum += (dx * dx + dy * dy).sqrt();
                pairs += 1;
            }
        }
        self.finish(pairs, sum / pairs as f64)
    }
}

impl Interpolator for DataMetric {
    fn interpolate(&self, points: &Points<'_>, x: f64, y: f64) -> Result<f64> {
        let value = match self.kind {
            MetricKind::Minimum => {
                let (n, min, _) = self.extremes(points, x, y);
                self.finish(n, min)
            }
            MetricKind::Maximum => {
                let (n, _, max) = self.extremes(points, x, y);
                self.finish(n, max)
            }
            MetricKind::Range => {
                let (n, min, max) = self.extremes(points, x, y);
                self.finish(n, max - min)
            }
            MetricKind::Count => {
                let (n, _, _) = self.extremes(points, x, y);
                if n < self.options.min_points as usize {
                    self.options.nodata
                } else {
                    n as f64
                }
            }
            MetricKind::AverageDistance => self.average_distance(points, x, y),
            MetricKind::AverageDistancePts => self.average_distance_between_points(points, x, y),
        };
        Ok(value)
    }

    fn name(&self) -> &str {
        self.kind.name()
    }
}
