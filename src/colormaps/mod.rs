//! Colormap implementations for figure rendering.
//!
//! The comparison figures use two fixed color scales: the cmocean `balance`
//! diverging map for zero-centered fields (dynamic height anomaly, Rossby
//! number) and matplotlib's reversed `Spectral` for velocity magnitude.

pub mod colormap;
pub mod diverging;
pub mod sequential;

pub use colormap::{bin_color, get_colormap, Colormap};
pub use diverging::Balance;
pub use sequential::SpectralR;
