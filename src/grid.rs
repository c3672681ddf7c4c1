//! Grid driver.
//!
//! Walks the output grid row by row, asks the prepared kernel for every
//! cell centre, narrows each finished row into the caller's buffer and
//! reports progress after it. A [`GridContext`] prepares the kernel once for
//! a point set and can then fill any number of grids.

use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::error::{GridError, Result};
use crate::geometry::GridGeometry;
use crate::interpolation::{GridKernel, Interpolator};
use crate::options::AlgorithmParameters;
use crate::output::OutputBuffer;
use crate::points::Points;
use crate::progress::{row_fraction, Progress};

/// Upper bound on worker threads.
const MAX_THREADS: usize = 128;

fn default_threads() -> usize {
    1
}

fn default_point_count_threshold() -> usize {
    100
}

/// Engine tuning knobs. None of them change the computed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextOptions {
    /// Worker threads for row computation. 1 runs on the calling thread,
    /// 0 uses every available core.
    #[serde(default = "default_threads")]
    pub threads: usize,
    /// Ellipse-search kernels index the points when there are more than
    /// this many.
    #[serde(default = "default_point_count_threshold")]
    pub point_count_threshold: usize,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            threads: default_threads(),
            point_count_threshold: default_point_count_threshold(),
        }
    }
}

/// A kernel prepared for one point set.
#[derive(Debug)]
pub struct GridContext<'a> {
    parameters: AlgorithmParameters,
    points: Points<'a>,
    kernel: GridKernel,
    pool: Option<rayon::ThreadPool>,
}

impl<'a> GridContext<'a> {
    /// Validate `parameters` and prepare the kernel for `points`.
    pub fn new(
        parameters: &AlgorithmParameters,
        points: Points<'a>,
        options: &ContextOptions,
    ) -> Result<Self> {
        parameters.validate()?;

        let started = Instant::now();
        let kernel = GridKernel::prepare(parameters, &points, options.point_count_threshold);
        debug!(
            algorithm = kernel.name(),
            points = points.len(),
            indexed = kernel.uses_index(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Prepared gridding kernel"
        );

        let pool = match options.threads {
            1 => None,
            requested => {
                let threads = requested.min(MAX_THREADS);
                match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                    Ok(pool) => {
                        debug!(threads = pool.current_num_threads(), "Using worker threads");
                        Some(pool)
                    }
                    Err(e) => {
                        warn!(error = %e, "Could not start worker threads, gridding sequentially");
                        None
                    }
                }
            }
        };

        Ok(Self {
            parameters: *parameters,
            points,
            kernel,
            pool,
        })
    }

    pub fn parameters(&self) -> &AlgorithmParameters {
        &self.parameters
    }

    pub fn points(&self) -> &Points<'a> {
        &self.points
    }

    pub fn kernel(&self) -> &GridKernel {
        &self.kernel
    }

    /// Number of threads rows are computed on.
    pub fn threads(&self) -> usize {
        self.pool.as_ref().map_or(1, |p| p.current_num_threads())
    }

    /// Fill `output` with the grid described by `geometry`.
    pub fn process(
        &self,
        geometry: &GridGeometry,
        output: OutputBuffer<'_>,
        progress: Option<&mut dyn Progress>,
    ) -> Result<()> {
        let started = Instant::now();
        match &self.pool {
            Some(pool) => grid_parallel(pool, &self.kernel, &self.points, geometry, output, progress)?,
            None => grid_with_kernel(&self.kernel, &self.points, geometry, output, progress)?,
        }
        info!(
            algorithm = self.kernel.name(),
            columns = geometry.columns,
            rows = geometry.rows,
            points = self.points.len(),
            threads = self.threads(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Grid created"
        );
        Ok(())
    }

    /// Compute the grid as a `rows × columns` array of `f64`.
    pub fn process_to_array(
        &self,
        geometry: &GridGeometry,
        progress: Option<&mut dyn Progress>,
    ) -> Result<Array2<f64>> {
        geometry.validate()?;
        let mut values = vec![0.0f64; geometry.cell_count()];
        self.process(geometry, OutputBuffer::from(&mut values), progress)?;
        Array2::from_shape_vec((geometry.rows, geometry.columns), values)
            .map_err(|e| GridError::invalid("geometry", e.to_string()))
    }
}

/// Grid `points` onto `geometry` in one call.
pub fn create_grid(
    parameters: &AlgorithmParameters,
    points: Points<'_>,
    geometry: &GridGeometry,
    output: OutputBuffer<'_>,
    progress: Option<&mut dyn Progress>,
) -> Result<()> {
    geometry.validate()?;
    check_output(geometry, &output)?;
    GridContext::new(parameters, points, &ContextOptions::default())?.process(
        geometry, output, progress,
    )
}

fn check_output(geometry: &GridGeometry, output: &OutputBuffer<'_>) -> Result<()> {
    if output.len() < geometry.cell_count() {
        return Err(GridError::invalid(
            "output",
            format!(
                "Output buffer holds {} values, grid needs {} ({} x {})",
                output.len(),
                geometry.cell_count(),
                geometry.columns,
                geometry.rows
            ),
        ));
    }
    Ok(())
}

fn report_row(progress: &mut Option<&mut dyn Progress>, row: usize, rows: usize) -> Result<()> {
    if let Some(progress) = progress.as_mut() {
        if !progress.report(row_fraction(row, rows)) {
            debug!(row, rows, "Gridding interrupted by progress callback");
            return Err(GridError::UserInterrupt);
        }
    }
    Ok(())
}

fn compute_row<K: Interpolator + ?Sized>(
    kernel: &K,
    points: &Points<'_>,
    geometry: &GridGeometry,
    row: usize,
    scanline: &mut [f64],
) -> Result<()> {
    let y = geometry.row_center(row);
    for (column, value) in scanline.iter_mut().enumerate() {
        let x = geometry.column_center(column);
        *value = kernel
            .interpolate(points, x, y)
            .map_err(|e| GridError::ComputationFailure {
                row,
                column,
                message: e.to_string(),
            })?;
    }
    Ok(())
}

/// Run any kernel over the grid on the calling thread.
///
/// Rows are computed in increasing row order, starting at `y_min`. After
/// each row is stored the progress reporter gets `row / (rows - 1)`; a
/// `false` answer stops the run with [`GridError::UserInterrupt`] and leaves
/// the remaining rows untouched.
pub fn grid_with_kernel<K: Interpolator + ?Sized>(
    kernel: &K,
    points: &Points<'_>,
    geometry: &GridGeometry,
    mut output: OutputBuffer<'_>,
    mut progress: Option<&mut dyn Progress>,
) -> Result<()> {
    geometry.validate()?;
    check_output(geometry, &output)?;

    let columns = geometry.columns;
    let mut scanline = vec![0.0f64; columns];
    for row in 0..geometry.rows {
        compute_row(kernel, points, geometry, row, &mut scanline)?;
        output.store_row(row * columns, &scanline);
        report_row(&mut progress, row, geometry.rows)?;
    }
    Ok(())
}

// Rows are computed in batches the size of the pool, then stored and
// reported in order on the calling thread.
fn grid_parallel<K: Interpolator + ?Sized>(
    pool: &rayon::ThreadPool,
    kernel: &K,
    points: &Points<'_>,
    geometry: &GridGeometry,
    mut output: OutputBuffer<'_>,
    mut progress: Option<&mut dyn Progress>,
) -> Result<()> {
    geometry.validate()?;
    check_output(geometry, &output)?;

    let columns = geometry.columns;
    let rows = geometry.rows;
    let batch = pool.current_num_threads().max(1);

    let mut start = 0;
    while start < rows {
        let end = (start + batch).min(rows);
        let computed: Vec<Result<Vec<f64>>> = pool.install(|| {
            (start..end)
                .into_par_iter()
                .map(|row| {
                    let mut scanline = vec![0.0f64; columns];
                    compute_row(kernel, points, geometry, row, &mut scanline).map(|_| scanline)
                })
                .collect()
        });

        for (row, scanline) in (start..end).zip(computed) {
            let scanline = scanline?;
            output.store_row(row * columns, &scanline);
            report_row(&mut progress, row, rows)?;
        }
        start = end;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{InverseDistanceOptions, NearestNeighborOptions};

    fn four_by_one() -> GridGeometry {
        GridGeometry::new(0.0, 4.0, 0.0, 1.0, 4, 1)
    }

    #[test]
    fn test_create_grid_two_points() {
        let x = [0.0, 4.0];
        let y = [0.0, 0.0];
        let z = [0.0, 100.0];
        let points = Points::new(&x, &y, &z).unwrap();
        let mut out = vec![0.0f64; 4];
        let params = AlgorithmParameters::InverseDistanceToAPower(InverseDistanceOptions::default());
        create_grid(&params, points, &four_by_one(), (&mut out).into(), None).unwrap();

        // 100 * d1² / (d1² + d2²) with nodes on y = 0.5.
        let expected = [100.0 * 0.5 / 13.0, 100.0 * 2.5 / 9.0, 100.0 * 6.5 / 9.0, 100.0 * 12.5 / 13.0];
        for (got, want) in out.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "{} vs {}", got, want);
        }
    }

    #[test]
    fn test_rejects_bad_geometry_and_short_buffer() {
        let points = Points::new(&[0.0], &[0.0], &[1.0]).unwrap();
        let params = AlgorithmParameters::default();

        let mut out = vec![0u8; 4];
        let empty = GridGeometry::new(0.0, 1.0, 0.0, 1.0, 0, 4);
        let err = create_grid(&params, points, &empty, (&mut out).into(), None).unwrap_err();
        assert!(matches!(err, GridError::InvalidArgument { .. }));

        let mut short = vec![0u8; 3];
        let err = create_grid(&params, points, &four_by_one(), (&mut short).into(), None).unwrap_err();
        assert!(matches!(err, GridError::InvalidArgument { ref param, .. } if param == "output"));
    }

    #[test]
    fn test_kernel_failure_reports_cell() {
        struct FailsAt(f64);
        impl Interpolator for FailsAt {
            fn interpolate(&self, _points: &Points<'_>, x: f64, _y: f64) -> Result<f64> {
                if x > self.0 {
                    Err(GridError::invalid("x", "out of range"))
                } else {
                    Ok(x)
                }
            }
            fn name(&self) -> &str {
                "fails"
            }
        }

        let points = Points::new(&[], &[], &[]).unwrap();
        let mut out = vec![0.0f64; 4];
        let err = grid_with_kernel(&FailsAt(2.0), &points, &four_by_one(), (&mut out).into(), None)
            .unwrap_err();
        match err {
            GridError::ComputationFailure { row, column, .. } => {
                assert_eq!((row, column), (0, 2));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_row_zero_lies_along_y_min() {
        struct Northing;
        impl Interpolator for Northing {
            fn interpolate(&self, _points: &Points<'_>, _x: f64, y: f64) -> Result<f64> {
                Ok(y)
            }
            fn name(&self) -> &str {
                "northing"
            }
        }

        let points = Points::new(&[], &[], &[]).unwrap();
        let geometry = GridGeometry::new(0.0, 2.0, 10.0, 16.0, 2, 3);
        let mut out = vec![0.0f64; 6];
        let mut fractions = Vec::new();
        let mut progress = |fraction: f64| {
            fractions.push(fraction);
            true
        };
        grid_with_kernel(&Northing, &points, &geometry, (&mut out).into(), Some(&mut progress)).unwrap();

        assert_eq!(out, vec![11.0, 11.0, 13.0, 13.0, 15.0, 15.0]);
        assert_eq!(fractions, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_process_to_array_shape() {
        let x = [0.0, 10.0];
        let y = [0.0, 10.0];
        let z = [1.0, 2.0];
        let points = Points::new(&x, &y, &z).unwrap();
        let params = AlgorithmParameters::NearestNeighbor(NearestNeighborOptions::default());
        let context = GridContext::new(&params, points, &ContextOptions::default()).unwrap();
        assert_eq!(context.threads(), 1);

        let geometry = GridGeometry::new(0.0, 10.0, 0.0, 10.0, 3, 2);
        let grid = context.process_to_array(&geometry, None).unwrap();
        assert_eq!(grid.dim(), (2, 3));
        assert_eq!(grid[[0, 0]], 1.0);
        assert_eq!(grid[[1, 2]], 2.0);
    }

    #[test]
    fn test_invalid_parameters_rejected_by_context() {
        let points = Points::new(&[0.0], &[0.0], &[1.0]).unwrap();
        let params = AlgorithmParameters::InverseDistanceToAPower(InverseDistanceOptions {
            power: f64::NAN,
            ..Default::default()
        });
        assert!(GridContext::new(&params, points, &ContextOptions::default()).is_err());
    }
}
