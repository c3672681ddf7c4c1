//! JSON document written by the command-line tool.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::geometry::GridGeometry;
use crate::options::AlgorithmParameters;
use crate::output::{GridValues, OutputType};

/// A finished grid with everything needed to place and interpret it.
/// Values are row-major, row 0 along `y_min`.
#[derive(Debug, Serialize)]
pub struct GridDocument {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    /// Option-string form of `parameters`
    pub algorithm: String,
    pub parameters: AlgorithmParameters,
    pub geometry: GridGeometry,
    pub output_type: OutputType,
    pub point_count: usize,
    pub values: GridValues,
}

impl GridDocument {
    pub fn new(
        run_id: String,
        parameters: AlgorithmParameters,
        geometry: GridGeometry,
        point_count: usize,
        values: GridValues,
    ) -> Self {
        Self {
            run_id,
            generated_at: Utc::now(),
            algorithm: parameters.to_option_string(),
            parameters,
            geometry,
            output_type: values.output_type(),
            point_count,
            values,
        }
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = BufWriter::new(writer);
        serde_json::to_writer(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.write_to(File::create(path)?)
    }
}
