//! Colormap trait and filled-contour quantization.

use crate::error::{OiplotError, Result};

/// Trait for color mapping implementations
pub trait Colormap {
    /// Map a normalized value (0.0 to 1.0) to an RGBA color
    fn map_normalized(&self, value: f32) -> [u8; 4];

    /// Map a value to an RGBA color given the data range
    fn map(&self, value: f32, min: f32, max: f32) -> [u8; 4] {
        let normalized = if max > min {
            ((value - min) / (max - min)).clamp(0.0, 1.0)
        } else {
            0.5
        };
        self.map_normalized(normalized)
    }

    /// Get the name of this colormap
    fn name(&self) -> &str;
}

/// Get a colormap by name
pub fn get_colormap(name: &str) -> Result<Box<dyn Colormap>> {
    use super::{diverging::Balance, sequential::SpectralR};

    match name.to_lowercase().as_str() {
        "balance" => Ok(Box::new(Balance)),
        "spectral_r" => Ok(Box::new(SpectralR::new())),
        _ => Err(OiplotError::InvalidParameter {
            param: "colormap".to_string(),
            message: format!("Unknown colormap: {}", name),
        }),
    }
}

/// Color for a value under filled-contour quantization.
///
/// The value is binned into the half-open intervals between consecutive
/// levels (the top boundary is included in the last bin) and colored at the
/// bin midpoint of the normalized range. Values outside the level range, and
/// NaN, are unfilled and return `None`.
pub fn bin_color(colormap: &dyn Colormap, levels: &[f32], value: f32) -> Option<[u8; 4]> {
    if levels.len() < 2 || !value.is_finite() {
        return None;
    }

    let first = levels[0];
    let last = levels[levels.len() - 1];
    if value < first || value > last {
        return None;
    }

    let nbins = levels.len() - 1;
    let bin = if value >= last {
        nbins - 1
    } else {
        levels
            .windows(2)
            .position(|pair| value >= pair[0] && value < pair[1])?
    };

    let normalized = (bin as f32 + 0.5) / nbins as f32;
    Some(colormap.map_normalized(normalized))
}

/// Linear interpolation between two colors
pub fn lerp_color(c1: [u8; 3], c2: [u8; 3], t: f32) -> [u8; 3] {
    [
        (c1[0] as f32 * (1.0 - t) + c2[0] as f32 * t) as u8,
        (c1[1] as f32 * (1.0 - t) + c2[1] as f32 * t) as u8,
        (c1[2] as f32 * (1.0 - t) + c2[2] as f32 * t) as u8,
    ]
}

/// Interpolate within a table of RGB control points.
pub(super) fn sample_control_points(colors: &[[u8; 3]], value: f32) -> [u8; 4] {
    let value = value.clamp(0.0, 1.0);
    let position = value * (colors.len() - 1) as f32;
    let index = position.floor() as usize;

    if index >= colors.len() - 1 {
        let last = colors[colors.len() - 1];
        return [last[0], last[1], last[2], 255];
    }

    let t = position - index as f32;
    let rgb = lerp_color(colors[index], colors[index + 1], t);
    [rgb[0], rgb[1], rgb[2], 255]
}
