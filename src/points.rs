//! Scattered input points.
//!
//! The engine reads points through [`Points`], a borrowed view over three
//! parallel coordinate slices. [`PointCloud`] is the owned form used by the
//! command-line front end; it deserializes from JSON either as a list of
//! `{"x", "y", "z"}` records or as three parallel arrays.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{GridError, Result};

/// Read-only view of N scattered samples stored as parallel X, Y, Z slices.
#[derive(Debug, Clone, Copy)]
pub struct Points<'a> {
    x: &'a [f64],
    y: &'a [f64],
    z: &'a [f64],
}

impl<'a> Points<'a> {
    /// Create a view, checking that the three slices have the same length.
    pub fn new(x: &'a [f64], y: &'a [f64], z: &'a [f64]) -> Result<Self> {
        if x.len() != y.len() || x.len() != z.len() {
            return Err(GridError::invalid(
                "points",
                format!(
                    "Coordinate arrays differ in length: x = {}, y = {}, z = {}",
                    x.len(),
                    y.len(),
                    z.len()
                ),
            ));
        }
        Ok(Self { x, y, z })
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    #[inline]
    pub fn x(&self) -> &'a [f64] {
        self.x
    }

    #[inline]
    pub fn y(&self) -> &'a [f64] {
        self.y
    }

    #[inline]
    pub fn z(&self) -> &'a [f64] {
        self.z
    }

    /// Offset of point `i` from `(x, y)`.
    #[inline]
    pub fn offset(&self, i: usize, x: f64, y: f64) -> (f64, f64) {
        (self.x[i] - x, self.y[i] - y)
    }

    /// Bounding rectangle `(min_x, min_y, max_x, max_y)`, `None` when empty.
    pub fn extent(&self) -> Option<(f64, f64, f64, f64)> {
        if self.is_empty() {
            return None;
        }
        let mut extent = (self.x[0], self.y[0], self.x[0], self.y[0]);
        for i in 1..self.len() {
            extent.0 = extent.0.min(self.x[i]);
            extent.1 = extent.1.min(self.y[i]);
            extent.2 = extent.2.max(self.x[i]);
            extent.3 = extent.3.max(self.y[i]);
        }
        Some(extent)
    }
}

/// One sample as it appears in a point file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Accepted JSON layouts for a point file
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PointFile {
    Records(Vec<PointRecord>),
    Columns { x: Vec<f64>, y: Vec<f64>, z: Vec<f64> },
}

/// Owned scattered point set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PointFile")]
pub struct PointCloud {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl TryFrom<PointFile> for PointCloud {
    type Error = String;

    fn try_from(file: PointFile) -> std::result::Result<Self, Self::Error> {
        match file {
            PointFile::Records(records) => Ok(records.into_iter().collect()),
            PointFile::Columns { x, y, z } => {
                if x.len() != y.len() || x.len() != z.len() {
                    return Err(format!(
                        "coordinate arrays differ in length: x = {}, y = {}, z = {}",
                        x.len(),
                        y.len(),
                        z.len()
                    ));
                }
                Ok(PointCloud { x, y, z })
            }
        }
    }
}

impl FromIterator<PointRecord> for PointCloud {
    fn from_iter<I: IntoIterator<Item = PointRecord>>(iter: I) -> Self {
        let mut cloud = PointCloud::default();
        for p in iter {
            cloud.push(p.x, p.y, p.z);
        }
        cloud
    }
}

impl PointCloud {
    pub fn push(&mut self, x: f64, y: f64, z: f64) {
        self.x.push(x);
        self.y.push(y);
        self.z.push(z);
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Borrow the cloud as a [`Points`] view.
    pub fn view(&self) -> Result<Points<'_>> {
        Points::new(&self.x, &self.y, &self.z)
    }

    /// Load a point file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let cloud: PointCloud = serde_json::from_str(&content)?;
        Ok(cloud)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_length_mismatch() {
        let x = [0.0, 1.0];
        let y = [0.0];
        let z = [1.0, 2.0];
        let err = Points::new(&x, &y, &z).unwrap_err();
        assert!(matches!(err, GridError::InvalidArgument { .. }));
    }

    #[test]
    fn test_points_extent() {
        let x = [2.0, -1.0, 4.0];
        let y = [0.5, 3.0, -2.0];
        let z = [0.0; 3];
        let points = Points::new(&x, &y, &z).unwrap();
        assert_eq!(points.extent(), Some((-1.0, -2.0, 4.0, 3.0)));

        let empty = Points::new(&[], &[], &[]).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.extent(), None);
    }

    #[test]
    fn test_point_cloud_json_layouts() {
        let records: PointCloud =
            serde_json::from_str(r#"[{"x": 0, "y": 1, "z": 2}, {"x": 3, "y": 4, "z": 5}]"#)
                .unwrap();
        let columns: PointCloud =
            serde_json::from_str(r#"{"x": [0, 3], "y": [1, 4], "z": [2, 5]}"#).unwrap();
        assert_eq!(records, columns);
        assert_eq!(records.len(), 2);
        assert_eq!(records.view().unwrap().z(), &[2.0, 5.0]);

        let ragged = serde_json::from_str::<PointCloud>(r#"{"x": [0], "y": [], "z": [1]}"#);
        assert!(ragged.is_err());
    }
}
