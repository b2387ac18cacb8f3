//! NetCDF field loading for one sampling configuration.
//!
//! Each configuration is a triplet sharing a stem: `<stem>_T.nc` carries
//! temperature, its interpolation error and the grid axes; `<stem>_S.nc`
//! carries salinity and its error; `<stem>_derived_variables.nc` carries
//! density, dynamic height, the geostrophic velocity components, the Rossby
//! number and the buoyancy frequency. All physical fields share one
//! (depth, lat, lon) grid.
//!
//! Files are opened, read fully into memory and dropped per configuration.
//! A missing file or variable is fatal; the figures cannot be produced
//! without every field.

use ndarray::{Array1, Array3, ArrayD};
use std::path::Path;
use tracing::debug;

use crate::error::{OiplotError, Result};

/// All fields of one configuration, unpacked into plain arrays.
///
/// Masked values are represented as NaN.
#[derive(Debug, Clone)]
pub struct ConfigFields {
    /// Longitude axis (degrees east)
    pub lon: Array1<f32>,
    /// Latitude axis (degrees north)
    pub lat: Array1<f32>,
    /// Depth axis (meters, positive down)
    pub depth: Array1<f32>,
    /// Potential temperature
    pub ptem: Array3<f32>,
    /// Temperature interpolation error
    pub ptem_error: Array3<f32>,
    /// Practical salinity
    pub psal: Array3<f32>,
    /// Salinity interpolation error
    pub psal_error: Array3<f32>,
    /// Potential density anomaly
    pub sig: Array3<f32>,
    /// Dynamic height
    pub dh: Array3<f32>,
    /// Zonal geostrophic velocity
    pub ug: Array3<f32>,
    /// Meridional geostrophic velocity
    pub vg: Array3<f32>,
    /// Geostrophic Rossby number
    pub rossby: Array3<f32>,
    /// Buoyancy frequency
    pub buoyancy: Array3<f32>,
}

/// Load the NetCDF triplet for one configuration stem.
pub fn load_config_fields(data_dir: &Path, stem: &str) -> Result<ConfigFields> {
    let (lon, lat, depth, ptem, ptem_error) = {
        let file = open_input(data_dir, &format!("{}_T.nc", stem))?;
        (
            read_axis(&file, "longitude")?,
            read_axis(&file, "latitude")?,
            read_1d(&file, "depth")?,
            read_3d(&file, "ptem")?,
            read_3d(&file, "error")?,
        )
    };

    let (psal, psal_error) = {
        let file = open_input(data_dir, &format!("{}_S.nc", stem))?;
        (read_3d(&file, "psal")?, read_3d(&file, "error")?)
    };

    let (sig, dh, ug, vg, rossby, buoyancy) = {
        let file = open_input(data_dir, &format!("{}_derived_variables.nc", stem))?;
        (
            read_3d(&file, "sig")?,
            read_3d(&file, "dh")?,
            read_3d(&file, "ug")?,
            read_3d(&file, "vg")?,
            read_3d(&file, "Rog")?,
            read_3d(&file, "N")?,
        )
    };

    let fields = ConfigFields {
        lon,
        lat,
        depth,
        ptem,
        ptem_error,
        psal,
        psal_error,
        sig,
        dh,
        ug,
        vg,
        rossby,
        buoyancy,
    };
    fields.validate_grid(stem)?;

    debug!(
        stem = stem,
        nz = fields.depth.len(),
        ny = fields.lat.len(),
        nx = fields.lon.len(),
        "Loaded configuration fields"
    );

    Ok(fields)
}

impl ConfigFields {
    /// Check that every physical field shares the coordinate grid shape.
    fn validate_grid(&self, stem: &str) -> Result<()> {
        let expected = (self.depth.len(), self.lat.len(), self.lon.len());
        let fields: [(&str, &Array3<f32>); 9] = [
            ("ptem", &self.ptem),
            ("error (T)", &self.ptem_error),
            ("psal", &self.psal),
            ("error (S)", &self.psal_error),
            ("sig", &self.sig),
            ("dh", &self.dh),
            ("ug", &self.ug),
            ("vg", &self.vg),
            ("Rog", &self.rossby),
        ];

        for (name, field) in fields {
            if field.dim() != expected {
                return Err(OiplotError::DataNotFound {
                    message: format!(
                        "Variable {} of configuration {} has shape {:?}, expected {:?}",
                        name,
                        stem,
                        field.dim(),
                        expected
                    ),
                });
            }
        }
        // N is defined between depth levels and may be one level short;
        // only the horizontal grid must agree.
        let (_, ny, nx) = self.buoyancy.dim();
        if (ny, nx) != (expected.1, expected.2) {
            return Err(OiplotError::DataNotFound {
                message: format!(
                    "Variable N of configuration {} has horizontal shape ({}, {}), expected ({}, {})",
                    stem, ny, nx, expected.1, expected.2
                ),
            });
        }
        Ok(())
    }
}

fn open_input(data_dir: &Path, file_name: &str) -> Result<netcdf::File> {
    let path = data_dir.join(file_name);
    if !path.exists() {
        return Err(OiplotError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }
    Ok(netcdf::open(&path)?)
}

/// The fill value of a variable, from `_FillValue` or `missing_value`.
fn fill_value(var: &netcdf::Variable) -> Option<f32> {
    use netcdf::AttributeValue;

    for name in ["_FillValue", "missing_value"] {
        let value = var.attribute(name).and_then(|attr| match attr.value().ok()? {
            AttributeValue::Float(v) => Some(v),
            AttributeValue::Double(v) => Some(v as f32),
            AttributeValue::Short(v) => Some(v as f32),
            AttributeValue::Int(v) => Some(v as f32),
            _ => None,
        });
        if value.is_some() {
            return value;
        }
    }
    None
}

/// Read a variable fully, as f32 with masked values unwrapped to NaN.
fn read_raw(file: &netcdf::File, name: &str) -> Result<ArrayD<f32>> {
    let var = file.variable(name).ok_or_else(|| OiplotError::DataNotFound {
        message: format!("Variable {} not found", name),
    })?;

    let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    let mut values: Vec<f32> = var.get_values::<f32, _>(..)?;

    if let Some(fv) = fill_value(&var) {
        for v in values.iter_mut() {
            if *v == fv {
                *v = f32::NAN;
            }
        }
    }

    Ok(ArrayD::from_shape_vec(shape, values)?)
}

/// Read a strictly 1-D variable.
fn read_1d(file: &netcdf::File, name: &str) -> Result<Array1<f32>> {
    Ok(read_raw(file, name)?.into_dimensionality()?)
}

/// Read a strictly 3-D (depth, lat, lon) variable.
fn read_3d(file: &netcdf::File, name: &str) -> Result<Array3<f32>> {
    Ok(read_raw(file, name)?.into_dimensionality()?)
}

/// Read a coordinate axis stored either as a 1-D vector or as a plaid 2-D
/// array (in which case the varying row or column is taken).
fn read_axis(file: &netcdf::File, name: &str) -> Result<Array1<f32>> {
    let raw = read_raw(file, name)?;
    match raw.ndim() {
        1 => Ok(raw.into_dimensionality()?),
        2 => {
            let grid: ndarray::Array2<f32> = raw.into_dimensionality()?;
            let axis = if name == "latitude" {
                grid.column(0).to_owned()
            } else {
                grid.row(0).to_owned()
            };
            Ok(axis)
        }
        n => Err(OiplotError::DataNotFound {
            message: format!("Coordinate {} has {} dimensions, expected 1 or 2", name, n),
        }),
    }
}
