//! Batch driver: one invocation renders the three comparison figures for a
//! (region, model) pair.
//!
//! The driver discovers the configuration triplets, loads each one, derives
//! the surface diagnostics and composes the panels into the dynamic height,
//! velocity magnitude and Rossby number figures. All three PNGs are written
//! at the end of the run.

use ndarray::Axis;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use crate::colormaps::get_colormap;
use crate::config::{Config, Model, Region};
use crate::diagnostics::{dh_anomaly, shallowest_level, velocity_magnitude};
use crate::discovery::discover;
use crate::error::Result;
use crate::levels::{dh_levels, rossby_levels, speed_levels};
use crate::loader::load_config_fields;
use crate::logging::{log_operation_end, log_operation_start};
use crate::mapdecor::{Coastline, MapGeometry};
use crate::panels::FigureSet;

/// Deterministic output file name of one figure, e.g.
/// `DH_comp_Med_CMEMS_rec_stOI_cd.png`.
pub fn figure_name(prefix: &str, region: Region, model: Model) -> String {
    format!("{}_comp_{}_{}_rec_stOI_cd.png", prefix, region, model)
}

/// Render the three figures for the configured (region, model) pair.
///
/// Returns the paths of the written PNGs, in (dynamic height, velocity
/// magnitude, Rossby number) order.
pub fn run(config: &Config) -> Result<Vec<PathBuf>> {
    let start = Instant::now();
    let pair = format!("{} {}", config.region, config.model);
    log_operation_start("generate_figures", Some(&pair));

    let descriptors = discover(&config.paths.data_dir, config.region, config.model)?;
    info!(
        count = descriptors.len(),
        region = %config.region,
        model = %config.model,
        "Discovered configurations"
    );

    let geometry = MapGeometry::for_region(config.region);
    let coastline = match &config.paths.coastline {
        Some(path) => Coastline::from_geojson_file(path)?,
        None => Coastline::default(),
    };

    std::fs::create_dir_all(&config.paths.figures_dir)?;
    let dh_path = config
        .paths
        .figures_dir
        .join(figure_name("DH", config.region, config.model));
    let sp_path = config
        .paths
        .figures_dir
        .join(figure_name("Sp", config.region, config.model));
    let ro_path = config
        .paths
        .figures_dir
        .join(figure_name("Ro", config.region, config.model));

    let mut dh_figure = FigureSet::new(
        &dh_path,
        config.region,
        config.model,
        "reconstructed DH anomaly [dyn m]",
        get_colormap("balance")?,
    )?;
    let mut sp_figure = FigureSet::new(
        &sp_path,
        config.region,
        config.model,
        "reconstructed geostrophic velocity magnitude [m/s]",
        get_colormap("spectral_r")?,
    )?;
    let mut ro_figure = FigureSet::new(
        &ro_path,
        config.region,
        config.model,
        "reconstructed geostrophic Ro",
        get_colormap("balance")?,
    )?;

    for (index, descriptor) in descriptors.iter().enumerate() {
        info!(index, stem = %descriptor.stem, "Rendering configuration");

        let fields = load_config_fields(&config.paths.data_dir, &descriptor.stem)?;
        let depth = fields.depth.to_vec();
        let iz = shallowest_level(&depth)?;
        let lon = fields.lon.to_vec();
        let lat = fields.lat.to_vec();

        let dh_surface = dh_anomaly(fields.dh.index_axis(Axis(0), iz));
        let speed = velocity_magnitude(
            fields.ug.index_axis(Axis(0), iz),
            fields.vg.index_axis(Axis(0), iz),
        )?;
        let rossby = fields.rossby.index_axis(Axis(0), iz);

        let class = descriptor.config_class();
        let dh_lv = dh_levels(config.region, config.model, class)?;
        let sp_lv = speed_levels(config.region, config.model, class)?;
        let ro_lv = rossby_levels(config.region, config.model, class)?;

        dh_figure.compose_panel(
            index,
            descriptor,
            &geometry,
            &coastline,
            &lon,
            &lat,
            dh_surface.view(),
            &dh_lv,
        )?;
        sp_figure.compose_panel(
            index,
            descriptor,
            &geometry,
            &coastline,
            &lon,
            &lat,
            speed.view(),
            &sp_lv,
        )?;
        ro_figure.compose_panel(
            index,
            descriptor,
            &geometry,
            &coastline,
            &lon,
            &lat,
            rossby,
            &ro_lv,
        )?;
    }

    dh_figure.finish()?;
    sp_figure.finish()?;
    ro_figure.finish()?;

    log_operation_end("generate_figures", start, true);
    Ok(vec![dh_path, sp_path, ro_path])
}
