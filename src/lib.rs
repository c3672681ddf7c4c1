//! # gridder
//!
//! Interpolation of scattered (x, y, z) samples onto a regular grid.
//!
//! Given a set of points, an output extent and size, and an algorithm with
//! its parameters, the engine fills a caller-owned buffer of any supported
//! numeric type with one value per grid cell.
//!
//! ## Algorithms
//!
//! - **Inverse distance to a power**, over all points or a search ellipse,
//!   and a nearest-neighbour variant limited to the closest points
//! - **Moving average** and **nearest neighbor** within a search ellipse
//! - **Data metrics**: minimum, maximum, range, count, average distance to
//!   the node and average distance between points
//! - **Linear** interpolation in a Delaunay triangulation
//!
//! ## Example
//!
//! ```
//! use gridder::{create_grid, AlgorithmParameters, GridGeometry, Points};
//!
//! let x = [0.0, 4.0];
//! let y = [0.0, 0.0];
//! let z = [0.0, 100.0];
//! let points = Points::new(&x, &y, &z)?;
//! let params: AlgorithmParameters = "invdist:power=2".parse()?;
//! let geometry = GridGeometry::new(0.0, 4.0, 0.0, 1.0, 4, 1);
//!
//! let mut grid = vec![0.0f32; 4];
//! create_grid(&params, points, &geometry, (&mut grid).into(), None)?;
//! assert!(grid[0] < grid[3]);
//! # Ok::<(), gridder::GridError>(())
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod index;
pub mod interpolation;
pub mod logging;
pub mod options;
pub mod output;
pub mod points;
pub mod progress;
pub mod triangulation;

pub use config::Config;
pub use document::GridDocument;
pub use error::{GridError, Result};
pub use geometry::GridGeometry;
pub use grid::{create_grid, grid_with_kernel, ContextOptions, GridContext};
pub use interpolation::{GridKernel, Interpolator};
pub use logging::{
    generate_run_id, init_tracing, log_error, log_grid_stats, log_operation_end,
    log_operation_start, log_timed_operation,
};
pub use options::{
    AlgorithmParameters, DataMetricsOptions, GridAlgorithm, InverseDistanceNearestNeighborOptions,
    InverseDistanceOptions, LinearOptions, MovingAverageOptions, NearestNeighborOptions,
};
pub use output::{GridValues, OutputBuffer, OutputElement, OutputType};
pub use points::{PointCloud, PointRecord, Points};
pub use progress::{NoProgress, Progress};
