//! Derived diagnostic fields.
//!
//! The upstream OI pipeline stores the geostrophic velocity components and
//! dynamic height; the plotted quantities (velocity magnitude, dynamic
//! height anomaly) are derived here, per depth level.

use ndarray::{Array2, ArrayView2};

use crate::error::{OiplotError, Result};

/// Elementwise Euclidean norm of the two velocity components.
///
/// NaN (missing) values in either component propagate to the result. A
/// shape mismatch between the components is fatal.
pub fn velocity_magnitude(u: ArrayView2<f32>, v: ArrayView2<f32>) -> Result<Array2<f32>> {
    if u.dim() != v.dim() {
        return Err(OiplotError::InvalidParameter {
            param: "velocity".to_string(),
            message: format!(
                "Velocity component shapes differ: ug is {:?}, vg is {:?}",
                u.dim(),
                v.dim()
            ),
        });
    }

    let mut magnitude = Array2::zeros(u.dim());
    ndarray::Zip::from(&mut magnitude)
        .and(&u)
        .and(&v)
        .for_each(|m, &a, &b| *m = (a * a + b * b).sqrt());
    Ok(magnitude)
}

/// Dynamic height anomaly: the field minus its NaN-ignoring spatial mean.
///
/// If every value is NaN the mean is undefined and the field is returned
/// unchanged (all NaN).
pub fn dh_anomaly(dh: ArrayView2<f32>) -> Array2<f32> {
    let mut sum = 0.0f64;
    let mut count = 0usize;
    for &v in dh.iter() {
        if v.is_finite() {
            sum += v as f64;
            count += 1;
        }
    }

    if count == 0 {
        return dh.to_owned();
    }

    let mean = (sum / count as f64) as f32;
    dh.mapv(|v| v - mean)
}

/// Index of the shallowest depth level.
///
/// Selects the index minimizing `|depth[i] - min(depth)|`, which resolves to
/// the shallowest level while tolerating unsorted depth axes.
pub fn shallowest_level(depth: &[f32]) -> Result<usize> {
    if depth.is_empty() {
        return Err(OiplotError::DataNotFound {
            message: "Depth axis is empty".to_string(),
        });
    }

    let shallowest = depth.iter().copied().fold(f32::INFINITY, f32::min);
    let (iz, _) = depth
        .iter()
        .map(|d| (d - shallowest).abs())
        .enumerate()
        .fold((0, f32::INFINITY), |(best_i, best_d), (i, d)| {
            if d < best_d {
                (i, d)
            } else {
                (best_i, best_d)
            }
        });
    Ok(iz)
}
