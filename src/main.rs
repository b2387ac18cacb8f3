//! oiplot - batch renderer for OI reconstruction comparison figures
//!
//! This is the main entry point for the oiplot application.

use tracing::info;

use oiplot::{driver, init_tracing, log_error, Config, Result};

fn main() -> Result<()> {
    // Load configuration
    let config = Config::load().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        e
    })?;

    // Validate configuration before touching any input file
    config.validate().map_err(|e| {
        eprintln!("Invalid configuration: {}", e);
        e
    })?;

    init_tracing(&config.log_level);

    info!("Starting oiplot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        region = %config.region,
        model = %config.model,
        data_dir = %config.paths.data_dir.display(),
        figures_dir = %config.paths.figures_dir.display(),
        "Configuration loaded"
    );

    let outputs = driver::run(&config).map_err(|e| {
        log_error(&e, "figure generation");
        e
    })?;

    for path in &outputs {
        info!(figure = %path.display(), "Wrote figure");
    }

    Ok(())
}
