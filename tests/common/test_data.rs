//! Test data generation utilities.
//!
//! This module writes synthetic NetCDF configuration triplets with known
//! data patterns, shaped like the upstream OI pipeline output: one `_T.nc`
//! with the grid axes, one `_S.nc`, one `_derived_variables.nc`.

use std::path::Path;

// Use the netcdf crate's error type directly
use netcdf::Error;
type Result<T> = std::result::Result<T, Error>;

/// Grid size of the synthetic triplets: (nz, ny, nx).
pub const GRID: (usize, usize, usize) = (3, 8, 12);

/// Configuration stems with the fixed field layout (class character at byte
/// 9, vertical extent at 15..20, resolution at 25..29) for the subtropical
/// Atlantic CMEMS pairing. The classes anchor both shared colorbars.
pub fn atl_cmems_stems() -> Vec<&'static str> {
    vec![
        "Atl_conf_4_dep_0500m_res_05km_CMEMS_Sep",
        "Atl_conf_r_dep_1000m_res_10km_CMEMS_Sep",
    ]
}

/// Write one full configuration triplet under `dir`.
///
/// The axes cover the Atlantic study box, the shallowest depth level sits
/// first, and the field values stay inside the calibrated contour ranges.
/// `seed` varies the patterns between configurations.
pub fn create_config_triplet(dir: &Path, stem: &str, seed: f32) -> Result<()> {
    let (nz, ny, nx) = GRID;

    let lon_values: Vec<f32> = (0..nx)
        .map(|i| -48.90 + i as f32 * (1.3 / (nx - 1) as f32))
        .collect();
    let lat_values: Vec<f32> = (0..ny)
        .map(|j| 34.54 + j as f32 * (0.8 / (ny - 1) as f32))
        .collect();
    let depth_values = [5.0f32, 50.0, 100.0];

    // _T.nc: axes, temperature and its error
    let mut file = netcdf::create(dir.join(format!("{}_T.nc", stem)))?;
    file.add_dimension("depth", nz)?;
    file.add_dimension("latitude", ny)?;
    file.add_dimension("longitude", nx)?;
    {
        let mut var = file.add_variable::<f32>("depth", &["depth"])?;
        var.put_values(&depth_values, ..)?;
    }
    {
        let mut var = file.add_variable::<f32>("latitude", &["latitude"])?;
        var.put_attribute("units", "degrees_north")?;
        var.put_values(&lat_values, ..)?;
    }
    {
        let mut var = file.add_variable::<f32>("longitude", &["longitude"])?;
        var.put_attribute("units", "degrees_east")?;
        var.put_values(&lon_values, ..)?;
    }
    for name in ["ptem", "error"] {
        let mut var = file.add_variable::<f32>(name, &["depth", "latitude", "longitude"])?;
        var.put_values(&pattern(seed, 18.0, 2.0), ..)?;
    }
    drop(file);

    // _S.nc: salinity and its error
    let mut file = netcdf::create(dir.join(format!("{}_S.nc", stem)))?;
    file.add_dimension("depth", nz)?;
    file.add_dimension("latitude", ny)?;
    file.add_dimension("longitude", nx)?;
    for name in ["psal", "error"] {
        let mut var = file.add_variable::<f32>(name, &["depth", "latitude", "longitude"])?;
        var.put_values(&pattern(seed, 36.0, 0.5), ..)?;
    }
    drop(file);

    // _derived_variables.nc: the plotted fields
    let mut file = netcdf::create(dir.join(format!("{}_derived_variables.nc", stem)))?;
    file.add_dimension("depth", nz)?;
    file.add_dimension("latitude", ny)?;
    file.add_dimension("longitude", nx)?;
    for (name, base, amp) in [
        ("sig", 27.0, 0.5),
        ("dh", 1.0, 0.03),
        ("ug", 0.0, 0.1),
        ("vg", 0.0, 0.1),
        ("Rog", 0.0, 0.2),
        ("N", 0.005, 0.001),
    ] {
        let mut var = file.add_variable::<f32>(name, &["depth", "latitude", "longitude"])?;
        var.put_values(&pattern(seed, base, amp), ..)?;
    }
    drop(file);

    Ok(())
}

/// Smooth (depth, lat, lon) values centered on `base` with range `amp`.
fn pattern(seed: f32, base: f32, amp: f32) -> Vec<f32> {
    let (nz, ny, nx) = GRID;
    let mut values = Vec::with_capacity(nz * ny * nx);
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                let x = i as f32 / (nx - 1) as f32;
                let y = j as f32 / (ny - 1) as f32;
                let value =
                    base + amp * ((x - y) + 0.3 * (seed + k as f32 * 0.1).sin() * (x * y - 0.25));
                values.push(value);
            }
        }
    }
    values
}
