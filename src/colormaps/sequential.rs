//! Sequential colormaps.

use colorgrad::Gradient;

use super::colormap::Colormap;

/// Reversed matplotlib `Spectral` colormap - blue through yellow to red.
///
/// Velocity magnitude renders with this map, low speeds blue and high
/// speeds red.
pub struct SpectralR {
    gradient: Gradient,
}

impl SpectralR {
    pub fn new() -> Self {
        Self {
            gradient: colorgrad::spectral(),
        }
    }
}

impl Default for SpectralR {
    fn default() -> Self {
        Self::new()
    }
}

impl Colormap for SpectralR {
    fn map_normalized(&self, value: f32) -> [u8; 4] {
        let value = value.clamp(0.0, 1.0) as f64;
        // Spectral runs red to blue; the figures use the reversed scale
        self.gradient.at(1.0 - value).to_rgba8()
    }

    fn name(&self) -> &str {
        "spectral_r"
    }
}
