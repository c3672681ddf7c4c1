//! Interpolation kernels for scattered points.
//!
//! Each kernel estimates one grid node from the input points. Kernels are
//! prepared once per context (search ellipse, optional point index,
//! triangulation) and then queried for every node, possibly from several
//! threads at once.

pub mod common;
pub mod inverse_distance;
pub mod linear;
pub mod metrics;
pub mod moving_average;
pub mod nearest;

use crate::error::Result;
use crate::options::AlgorithmParameters;
use crate::points::Points;

pub use inverse_distance::{InverseDistanceNearestNeighbor, InverseDistanceToAPower};
pub use linear::Linear;
pub use metrics::{DataMetric, MetricKind};
pub use moving_average::MovingAverage;
pub use nearest::NearestNeighbor;

/// Trait for interpolation methods
pub trait Interpolator: Sync {
    /// Estimate the value at `(x, y)` from `points`.
    fn interpolate(&self, points: &Points<'_>, x: f64, y: f64) -> Result<f64>;

    /// Get the name of this interpolation method
    fn name(&self) -> &str;
}

/// A prepared kernel for any supported algorithm.
#[derive(Debug)]
pub enum GridKernel {
    InverseDistance(InverseDistanceToAPower),
    InverseDistanceNearestNeighbor(InverseDistanceNearestNeighbor),
    MovingAverage(MovingAverage),
    NearestNeighbor(NearestNeighbor),
    Metric(DataMetric),
    Linear(Linear),
}

impl GridKernel {
    /// Prepare the kernel for `parameters`. Point indexes are built when the
    /// search shape allows it and there are more than `point_count_threshold`
    /// points.
    pub fn prepare(
        parameters: &AlgorithmParameters,
        points: &Points<'_>,
        point_count_threshold: usize,
    ) -> Self {
        match parameters {
            AlgorithmParameters::InverseDistanceToAPower(o) => {
                GridKernel::InverseDistance(InverseDistanceToAPower::new(o))
            }
            AlgorithmParameters::InverseDistanceToAPowerNearestNeighbor(o) => {
                GridKernel::InverseDistanceNearestNeighbor(InverseDistanceNearestNeighbor::new(
                    o, points,
                ))
            }
            AlgorithmParameters::MovingAverage(o) => {
                GridKernel::MovingAverage(MovingAverage::new(o, points, point_count_threshold))
            }
            AlgorithmParameters::NearestNeighbor(o) => {
                GridKernel::NearestNeighbor(NearestNeighbor::new(o, points, point_count_threshold))
            }
            AlgorithmParameters::MetricMinimum(o) => GridKernel::Metric(DataMetric::new(
                MetricKind::Minimum,
                o,
                points,
                point_count_threshold,
            )),
            AlgorithmParameters::MetricMaximum(o) => GridKernel::Metric(DataMetric::new(
                MetricKind::Maximum,
                o,
                points,
                point_count_threshold,
            )),
            AlgorithmParameters::MetricRange(o) => GridKernel::Metric(DataMetric::new(
                MetricKind::Range,
                o,
                points,
                point_count_threshold,
            )),
            AlgorithmParameters::MetricCount(o) => GridKernel::Metric(DataMetric::new(
                MetricKind::Count,
                o,
                points,
                point_count_threshold,
            )),
            AlgorithmParameters::MetricAverageDistance(o) => GridKernel::Metric(DataMetric::new(
                MetricKind::AverageDistance,
                o,
                points,
                point_count_threshold,
            )),
            AlgorithmParameters::MetricAverageDistancePts(o) => {
                GridKernel::Metric(DataMetric::new(
                    MetricKind::AverageDistancePts,
                    o,
                    points,
                    point_count_threshold,
                ))
            }
            AlgorithmParameters::Linear(o) => GridKernel::Linear(Linear::new(o, points)),
        }
    }

    /// Whether the kernel answers queries through a point index.
    pub fn uses_index(&self) -> bool {
        match self {
            GridKernel::InverseDistance(_) => false,
            GridKernel::InverseDistanceNearestNeighbor(k) => k.uses_index(),
            GridKernel::MovingAverage(k) => k.uses_index(),
            GridKernel::NearestNeighbor(k) => k.uses_index(),
            GridKernel::Metric(k) => k.uses_index(),
            GridKernel::Linear(k) => k.uses_index(),
        }
    }
}

impl Interpolator for GridKernel {
    fn interpolate(&self, points: &Points<'_>, x: f64, y: f64) -> Result<f64> {
        match self {
            GridKernel::InverseDistance(k) => k.interpolate(points, x, y),
            GridKernel::InverseDistanceNearestNeighbor(k) => k.interpolate(points, x, y),
            GridKernel::MovingAverage(k) => k.interpolate(points, x, y),
            GridKernel::NearestNeighbor(k) => k.interpolate(points, x, y),
            GridKernel::Metric(k) => k.interpolate(points, x, y),
            GridKernel::Linear(k) => k.interpolate(points, x, y),
        }
    }

    fn name(&self) -> &str {
        match self {
            GridKernel::InverseDistance(k) => k.name(),
            GridKernel::InverseDistanceNearestNeighbor(k) => k.name(),
            GridKernel::MovingAverage(k) => k.name(),
            GridKernel::NearestNeighbor(k) => k.name(),
            GridKernel::Metric(k) => k.name(),
            GridKernel::Linear(k) => k.name(),
        }
    }
}
