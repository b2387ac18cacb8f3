//! Diverging colormaps (two-hue progression with a light center).

use super::colormap::{sample_control_points, Colormap};

/// cmocean `balance` colormap - deep blue through near-white to deep red.
///
/// Control points sampled from the cmocean balance scale; zero-centered
/// fields (dynamic height anomaly, Rossby number) render with this map.
pub struct Balance;

impl Colormap for Balance {
    fn map_normalized(&self, value: f32) -> [u8; 4] {
        let colors = [
            [24, 28, 67], // Dark navy
            [35, 57, 106],
            [41, 87, 141],
            [52, 118, 164],
            [84, 148, 178],
            [124, 175, 190],
            [166, 200, 204],
            [207, 223, 221],
            [241, 240, 236], // Near-white center
            [235, 214, 199],
            [223, 184, 163],
            [210, 153, 128],
            [196, 122, 94],
            [179, 90, 64],
            [152, 59, 44],
            [117, 31, 33],
            [72, 13, 22], // Dark maroon
        ];

        sample_control_points(&colors, value)
    }

    fn name(&self) -> &str {
        "balance"
    }
}
