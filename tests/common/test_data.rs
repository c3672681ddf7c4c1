//! Test data generation utilities.
//!
//! Deterministic scattered point sets with known patterns. No random
//! number generator: coordinates come from simple modular sequences so
//! failures reproduce exactly.

use gridder::PointCloud;
use std::path::Path;

/// Points on a regular `n × n` lattice over `[0, n-1]²` with `z = f(x, y)`.
pub fn lattice<F: Fn(f64, f64) -> f64>(n: usize, f: F) -> PointCloud {
    let mut cloud = PointCloud::default();
    for j in 0..n {
        for i in 0..n {
            let (x, y) = (i as f64, j as f64);
            cloud.push(x, y, f(x, y));
        }
    }
    cloud
}

/// `count` irregularly scattered points over `[0, size]²` with `z = f(x, y)`.
pub fn scattered<F: Fn(f64, f64) -> f64>(count: usize, size: f64, f: F) -> PointCloud {
    let mut cloud = PointCloud::default();
    for i in 0..count {
        // Low-discrepancy sequence: fractional parts of multiples of two
        // irrational steps.
        let x = ((i as f64 + 0.5) * 0.618_033_988_749_895).fract() * size;
        let y = ((i as f64 + 0.5) * 0.754_877_666_246_693).fract() * size;
        cloud.push(x, y, f(x, y));
    }
    cloud
}

/// Write `cloud` as a JSON list of `{"x", "y", "z"}` records.
#[allow(dead_code)]
pub fn write_point_file(path: &Path, cloud: &PointCloud) -> std::io::Result<()> {
    let records: Vec<serde_json::Value> = (0..cloud.len())
        .map(|i| serde_json::json!({ "x": cloud.x[i], "y": cloud.y[i], "z": cloud.z[i] }))
        .collect();
    std::fs::write(path, serde_json::to_string_pretty(&records)?)
}
