//! gridder - interpolate scattered points onto a regular grid
//!
//! This is the main entry point for the gridder command-line tool.

use anyhow::Context;
use std::time::Instant;
use tracing::{debug, error, info};

use gridder::logging::{
    generate_run_id, init_tracing, log_error, log_grid_stats, log_operation_end,
    log_operation_start, log_timed_operation,
};
use gridder::{Config, GridContext, GridDocument, GridValues, PointCloud};

fn main() -> anyhow::Result<()> {
    let (config, points_path) = Config::load().context("Failed to load configuration")?;

    init_tracing(&config.log_level);
    info!("Starting gridder v{}", env!("CARGO_PKG_VERSION"));

    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    let run_id = generate_run_id();
    let cloud = log_timed_operation("load_points", || PointCloud::load(&points_path))
        .with_context(|| format!("Failed to load points from {}", points_path.display()))?;
    let points = cloud.view()?;
    info!(path = %points_path.display(), points = points.len(), "Points loaded");

    let parameters = config.parameters()?;
    let output_type = config.output_type()?;
    let geometry = config.geometry(points.extent())?;

    let context = GridContext::new(&parameters, points, &config.engine)?;
    log_grid_stats(
        parameters.algorithm().name(),
        points.len(),
        &geometry,
        output_type,
        context.threads(),
    );

    let mut values = GridValues::allocate(output_type, geometry.cell_count());
    let started = Instant::now();
    log_operation_start("grid", Some(&parameters.to_option_string()));

    let mut next_report = 0.0;
    let mut progress = |fraction: f64| {
        if fraction >= next_report {
            debug!(percent = (fraction * 100.0).round() as u32, "Gridding progress");
            next_report = fraction + 0.1;
        }
        true
    };
    let result = context.process(&geometry, values.as_buffer(), Some(&mut progress));
    log_operation_end("grid", started, result.is_ok());
    if let Err(e) = &result {
        log_error(e, "grid");
    }
    result?;

    let document = GridDocument::new(run_id, parameters, geometry, points.len(), values);
    match &config.output {
        Some(path) => {
            document
                .save(path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Grid written");
        }
        None => document.write_to(std::io::stdout().lock())?,
    }

    Ok(())
}
