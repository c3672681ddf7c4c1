//! Inverse distance to a power.
//!
//! Weighted average of point values with weights `1 / r^power`, where the
//! distance `r` includes the smoothing term. A point coincident with the
//! node returns its value directly.

use super::common::{SearchEllipse, COINCIDENT_DISTANCE_SQ};
use super::Interpolator;
use crate::error::Result;
use crate::index::PointIndex;
use crate::options::{InverseDistanceNearestNeighborOptions, InverseDistanceOptions};
use crate::points::Points;

#[inline]
fn inverse_weight(r2: f64, power_div2: f64) -> f64 {
    if power_div2 == 1.0 {
        1.0 / r2
    } else {
        1.0 / r2.powf(power_div2)
    }
}

/// Inverse distance to a power over all points or a search ellipse.
#[derive(Debug, Clone)]
pub struct InverseDistanceToAPower {
    options: InverseDistanceOptions,
    ellipse: SearchEllipse,
    power_div2: f64,
    smoothing_sq: f64,
}

impl InverseDistanceToAPower {
    pub fn new(options: &InverseDistanceOptions) -> Self {
        Self {
            options: *options,
            ellipse: SearchEllipse::new(options.radius1, options.radius2, options.angle),
            power_div2: options.power / 2.0,
            smoothing_sq: options.smoothing * options.smoothing,
        }
    }

    fn searches_ellipse(&self) -> bool {
        self.options.radius1 != 0.0 || self.options.radius2 != 0.0
    }

    fn interpolate_all(&self, points: &Points<'_>, x: f64, y: f64) -> f64 {
        let z = points.z();
        let mut nominator = 0.0;
        let mut denominator = 0.0;

        for i in 0..points.len() {
            let (dx, dy) = points.offset(i, x, y);
            let r2 = dx * dx + dy * dy + self.smoothing_sq;
            if r2 < COINCIDENT_DISTANCE_SQ {
                return z[i];
            }
            let w = inverse_weight(r2, self.power_div2);
            nominator += w * z[i];
            denominator += w;
        }

        if denominator == 0.0 {
            self.options.nodata
        } else {
            nominator / denominator
        }
    }

    fn interpolate_ellipse(&self, points: &Points<'_>, x: f64, y: f64) -> f64 {
        let z = points.z();
        let max_points = self.options.max_points as usize;
        let mut nominator = 0.0;
        let mut denominator = 0.0;
        let mut n = 0usize;

        for i in 0..points.len() {
            let (dx, dy) = points.offset(i, x, y);
            let r2 = dx * dx + dy * dy + self.smoothing_sq;
            if !self.ellipse.contains(dx, dy) {
                continue;
            }
            if r2 < COINCIDENT_DISTANCE_SQ {
                return z[i];
            }
            let w = inverse_weight(r2, self.power_div2);
            nominator += w * z[i];
            denominator += w;
            n += 1;
            // Contributions are accepted until the count exceeds the limit,
            // so up to max_points + 1 points take part.
            if max_points > 0 && n > max_points {
                break;
            }
        }

        if n < self.options.min_points as usize || denominator == 0.0 {
            self.options.nodata
        } else {
            nominator / denominator
        }
    }
}

impl Interpolator for InverseDistanceToAPower {
    fn interpolate(&self, points: &Points<'_>, x: f64, y: f64) -> Result<f64> {
        Ok(if self.searches_ellipse() {
            self.interpolate_ellipse(points, x, y)
        } else {
            self.interpolate_all(points, x, y)
        })
    }

    fn name(&self) -> &str {
        "invdist"
    }
}

/// Inverse distance to a power over the closest points within a circle.
///
/// Candidates within `radius` are ordered by smoothed distance and the
/// nearest `max_points` (0 = all) are averaged. Fewer than `min_points`
/// candidates give `nodata`.
#[derive(Debug, Clone)]
pub struct InverseDistanceNearestNeighbor {
    options: InverseDistanceNearestNeighborOptions,
    index: Option<PointIndex>,
    power_div2: f64,
    smoothing_sq: f64,
    radius_sq: f64,
}

impl InverseDistanceNearestNeighbor {
    pub fn new(options: &InverseDistanceNearestNeighborOptions, points: &Points<'_>) -> Self {
        Self {
            options: *options,
            index: (!points.is_empty()).then(|| PointIndex::build(points)),
            power_div2: options.power / 2.0,
            smoothing_sq: options.smoothing * options.smoothing,
            radius_sq: options.radius * options.radius,
        }
    }

    pub fn uses_index(&self) -> bool {
        self.index.is_some()
    }

    /// Candidates `(smoothed r², value)` in input order, or the value of a
    /// coincident point.
    fn collect(&self, points: &Points<'_>, x: f64, y: f64) -> std::result::Result<Vec<(f64, f64)>, f64> {
        let z = points.z();
        let mut candidates = Vec::new();
        let mut consider = |i: usize| -> std::result::Result<(), f64> {
            let (dx, dy) = points.offset(i, x, y);
            let r2 = dx * dx + dy * dy;
            if r2 > self.radius_sq {
                return Ok(());
            }
            let smoothed = r2 + self.smoothing_sq;
            if smoothed < COINCIDENT_DISTANCE_SQ {
                return Err(z[i]);
            }
            candidates.push((smoothed, z[i]));
            Ok(())
        };

        match &self.index {
            Some(index) => {
                let mut found = Vec::new();
                index.query_square(points, x, y, self.options.radius, &mut found);
                for i in found {
                    consider(i)?;
                }
            }
            None => {
                for i in 0..points.len() {
                    consider(i)?;
                }
            }
        }
        Ok(candidates)
    }
}

impl Interpolator for InverseDistanceNearestNeighbor {
    fn interpolate(&self, points: &Points<'_>, x: f64, y: f64) -> Result<f64> {
        let mut candidates = match self.collect(points, x, y) {
            Ok(candidates) => candidates,
            Err(coincident) => return Ok(coincident),
        };

        // Stable sort: equal distances keep input order.
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0));
        let max_points = self.options.max_points as usize;
        if max_points > 0 {
            candidates.truncate(max_points);
        }

        let mut nominator = 0.0;
        let mut denominator = 0.0;
        for &(r2, value) in &candidates {
            let w = inverse_weight(r2, self.power_div2);
            nominator += w * value;
            denominator += w;
        }

        if candidates.len() < self.options.min_points as usize || denominator == 0.0 {
            Ok(self.options.nodata)
        } else {
            Ok(nominator / denominator)
        }
    }

    fn name(&self) -> &str {
        "invdistnn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idw(options: InverseDistanceOptions) -> InverseDistanceToAPower {
        InverseDistanceToAPower::new(&options)
    }

    #[test]
    fn test_two_point_blend() {
        let x = [0.0, 4.0];
        let y = [0.0, 0.0];
        let z = [0.0, 100.0];
        let points = Points::new(&x, &y, &z).unwrap();
        let kernel = idw(InverseDistanceOptions::default());

        // d1 = 1, d2 = 3: 100 * d1² / (d1² + d2²) = 10
        let value = kernel.interpolate(&points, 1.0, 0.0).unwrap();
        assert!((value - 10.0).abs() < 1e-12);
        assert_eq!(kernel.interpolate(&points, 2.0, 0.0).unwrap(), 50.0);
    }

    #[test]
    fn test_coincident_point_is_exact() {
        let x = [1.0, 2.0, 3.0];
        let y = [1.0, 2.0, 3.0];
        let z = [7.0, 8.0, 9.0];
        let points = Points::new(&x, &y, &z).unwrap();
        let kernel = idw(InverseDistanceOptions::default());
        assert_eq!(kernel.interpolate(&points, 2.0, 2.0).unwrap(), 8.0);

        // Smoothing moves every point away from the node.
        let smoothed = idw(InverseDistanceOptions {
            smoothing: 1.0,
            ..Default::default()
        });
        let value = smoothed.interpolate(&points, 2.0, 2.0).unwrap();
        assert!(value != 8.0 && (value - 8.0).abs() < 0.5);
    }

    #[test]
    fn test_power_zero_is_plain_mean() {
        let x = [0.0, 10.0, 20.0];
        let y = [0.0, 5.0, 0.0];
        let z = [1.0, 2.0, 6.0];
        let points = Points::new(&x, &y, &z).unwrap();
        let kernel = idw(InverseDistanceOptions {
            power: 0.0,
            ..Default::default()
        });
        assert!((kernel.interpolate(&points, 3.0, 3.0).unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_ellipse_min_points_and_nodata() {
        let x = [0.0, 1.0, 10.0];
        let y = [0.0, 0.0, 0.0];
        let z = [2.0, 4.0, 100.0];
        let points = Points::new(&x, &y, &z).unwrap();
        let kernel = idw(InverseDistanceOptions {
            radius1: 2.0,
            radius2: 2.0,
            min_points: 2,
            nodata: -9999.0,
            ..Default::default()
        });
        // Only the first two points are inside, equally far from 0.5.
        assert!((kernel.interpolate(&points, 0.5, 0.0).unwrap() - 3.0).abs() < 1e-12);
        // Only the far point is near 9.5.
        assert_eq!(kernel.interpolate(&points, 9.5, 0.0).unwrap(), -9999.0);
    }

    #[test]
    fn test_ellipse_max_points_admits_one_extra() {
        let x = [1.0, -1.0, 0.0];
        let y = [0.0, 0.0, 1.0];
        let z = [10.0, 20.0, 90.0];
        let points = Points::new(&x, &y, &z).unwrap();
        let kernel = idw(InverseDistanceOptions {
            radius1: 5.0,
            radius2: 5.0,
            max_points: 1,
            ..Default::default()
        });
        // Two equidistant points are accepted before the scan stops.
        assert!((kernel.interpolate(&points, 0.0, 0.0).unwrap() - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_input_gives_nodata() {
        let points = Points::new(&[], &[], &[]).unwrap();
        let kernel = idw(InverseDistanceOptions {
            nodata: -1.0,
            ..Default::default()
        });
        assert_eq!(kernel.interpolate(&points, 0.0, 0.0).unwrap(), -1.0);
    }

    #[test]
    fn test_nearest_neighbor_variant() {
        let x = [0.0, 1.0, 2.0, 3.0, 0.5];
        let y = [0.0, 0.0, 0.0, 0.0, 0.0];
        let z = [10.0, 20.0, 30.0, 40.0, 50.0];
        let points = Points::new(&x, &y, &z).unwrap();

        let options = InverseDistanceNearestNeighborOptions {
            radius: 1.0,
            max_points: 2,
            nodata: -1.0,
            ..Default::default()
        };
        let kernel = InverseDistanceNearestNeighbor::new(&options, &points);
        assert!(kernel.uses_index());

        // Closest two to 0.4 are 0.5 (d=0.1) and 0.0 (d=0.4).
        let w1 = 1.0 / 0.01;
        let w2 = 1.0 / 0.16;
        let expected = (w1 * 50.0 + w2 * 10.0) / (w1 + w2);
        let value = kernel.interpolate(&points, 0.4, 0.0).unwrap();
        assert!((value - expected).abs() < 1e-9);

        assert_eq!(kernel.interpolate(&points, 1.0, 0.0).unwrap(), 20.0);
        assert_eq!(kernel.interpolate(&points, 10.0, 0.0).unwrap(), -1.0);

        let strict = InverseDistanceNearestNeighbor::new(
            &InverseDistanceNearestNeighborOptions {
                min_points: 3,
                ..options
            },
            &points,
        );
        assert_eq!(strict.interpolate(&points, 0.4, 0.0).unwrap(), -1.0);
    }
}
