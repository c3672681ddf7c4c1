//! Output grid geometry.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// Extent and size of the output grid.
///
/// The grid is a regular lattice of `columns × rows` cells covering
/// `[x_min, x_max] × [y_min, y_max]`. Cell `(col, row)` is centred on
/// `(x_min + (col + 0.5)·dx, y_min + (row + 0.5)·dy)`, so row 0 lies along
/// `y_min`. Callers that want a north-up raster flip the rows themselves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub columns: usize,
    pub rows: usize,
}

impl GridGeometry {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64, columns: usize, rows: usize) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
            columns,
            rows,
        }
    }

    /// Cell width.
    #[inline]
    pub fn dx(&self) -> f64 {
        (self.x_max - self.x_min) / self.columns as f64
    }

    /// Cell height.
    #[inline]
    pub fn dy(&self) -> f64 {
        (self.y_max - self.y_min) / self.rows as f64
    }

    /// Number of cells.
    pub fn cell_count(&self) -> usize {
        self.columns * self.rows
    }

    #[inline]
    pub fn column_center(&self, col: usize) -> f64 {
        self.x_min + (col as f64 + 0.5) * self.dx()
    }

    #[inline]
    pub fn row_center(&self, row: usize) -> f64 {
        self.y_min + (row as f64 + 0.5) * self.dy()
    }

    /// Real-world centre of cell `(col, row)`.
    pub fn cell_center(&self, col: usize, row: usize) -> (f64, f64) {
        (self.column_center(col), self.row_center(row))
    }

    /// Check that the grid has cells and a non-degenerate, finite extent.
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(GridError::invalid(
                "geometry",
                "Output raster dimensions should have non-zero size.",
            ));
        }
        if ![self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(GridError::invalid(
                "geometry",
                format!(
                    "Grid extent must be finite: x = [{}, {}], y = [{}, {}]",
                    self.x_min, self.x_max, self.y_min, self.y_max
                ),
            ));
        }
        if !(self.dx() > 0.0 && self.dy() > 0.0) {
            return Err(GridError::invalid(
                "geometry",
                format!(
                    "Grid extent is degenerate: x = [{}, {}], y = [{}, {}]",
                    self.x_min, self.x_max, self.y_min, self.y_max
                ),
            ));
        }
        Ok(())
    }
}
