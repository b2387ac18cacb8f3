//! Contour-level calibration tables.
//!
//! The published comparison figures use hand-tuned contour levels per
//! (region, model, configuration class) so that all panels of one figure
//! share a color scale. These are calibration constants, not values derived
//! from the data; reproducing the figures requires reproducing them exactly.
//!
//! A (region, model) pair with no entry is an explicit configuration error
//! rather than a silent empty panel.

use crate::config::{Model, Region};
use crate::error::{OiplotError, Result};

/// The binary configuration split used by the calibration tables.
///
/// Configuration class `4` (the deep-section scenarios) was tuned separately
/// from every other class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigClass {
    /// Every configuration class other than '4'
    Standard,
    /// Configuration class '4'
    Class4,
}

impl ConfigClass {
    /// Classify a configuration from its class character.
    pub fn from_class_char(class: char) -> Self {
        if class == '4' {
            ConfigClass::Class4
        } else {
            ConfigClass::Standard
        }
    }
}

/// Whether the calibration tables define the given (region, model) pair.
///
/// WMOP covers only the Mediterranean; everything else is defined for both
/// regions.
pub fn is_calibrated(region: Region, model: Model) -> bool {
    !matches!((region, model), (Region::Atl, Model::Wmop))
}

fn uncalibrated(region: Region, model: Model) -> OiplotError {
    OiplotError::Config {
        message: format!(
            "No contour calibration exists for region {} with model {}",
            region, model
        ),
    }
}

/// Evenly spaced levels symmetric about zero, endpoints included.
///
/// Matches `numpy.linspace(-ext, ext, n)`.
pub fn linspace_symmetric(ext: f64, n: usize) -> Vec<f32> {
    debug_assert!(n >= 2);
    let step = 2.0 * ext / (n - 1) as f64;
    (0..n).map(|i| (-ext + i as f64 * step) as f32).collect()
}

/// Non-negative levels from zero with a fixed step, `stop` exclusive.
///
/// Matches `numpy.arange(0, stop, step)` including its length rule
/// `ceil(stop / step)` evaluated in double precision.
pub fn arange(stop: f64, step: f64) -> Vec<f32> {
    debug_assert!(step > 0.0 && stop > 0.0);
    let n = (stop / step).ceil() as usize;
    (0..n).map(|i| (i as f64 * step) as f32).collect()
}

/// Contour levels for the dynamic height anomaly panels.
pub fn dh_levels(region: Region, model: Model, class: ConfigClass) -> Result<Vec<f32>> {
    use ConfigClass::*;
    let (ext, n) = match (region, model, class) {
        (Region::Atl, Model::Enatl60, Standard) => (0.24, 13),
        (Region::Atl, Model::Enatl60, Class4) => (0.16, 17),
        (Region::Atl, Model::Cmems, Standard) => (0.07, 15),
        (Region::Atl, Model::Cmems, Class4) => (0.045, 19),
        (Region::Med, Model::Cmems, Standard) => (0.06, 13),
        (Region::Med, Model::Cmems, Class4) => (0.11, 12),
        (Region::Med, Model::Wmop, Standard) => (0.08, 17),
        (Region::Med, Model::Wmop, Class4) => (0.06, 13),
        (Region::Med, Model::Enatl60, Standard) => (0.11, 12),
        (Region::Med, Model::Enatl60, Class4) => (0.1, 11),
        (Region::Atl, Model::Wmop, _) => return Err(uncalibrated(region, model)),
    };
    Ok(linspace_symmetric(ext, n))
}

/// Contour levels for the geostrophic velocity magnitude panels.
pub fn speed_levels(region: Region, model: Model, class: ConfigClass) -> Result<Vec<f32>> {
    use ConfigClass::*;
    let (stop, step) = match (region, model, class) {
        (Region::Atl, Model::Enatl60, Standard) => (0.6, 0.05),
        (Region::Atl, Model::Enatl60, Class4) => (0.8, 0.05),
        (Region::Atl, Model::Cmems, Standard) => (0.32, 0.02),
        (Region::Atl, Model::Cmems, Class4) => (0.22, 0.02),
        (Region::Med, Model::Cmems, Standard) => (0.44, 0.02),
        (Region::Med, Model::Cmems, Class4) => (0.5, 0.04),
        (Region::Med, Model::Wmop, Standard) => (0.44, 0.02),
        (Region::Med, Model::Wmop, Class4) => (0.42, 0.02),
        (Region::Med, Model::Enatl60, Standard) => (0.46, 0.02),
        (Region::Med, Model::Enatl60, Class4) => (0.54, 0.04),
        (Region::Atl, Model::Wmop, _) => return Err(uncalibrated(region, model)),
    };
    Ok(arange(stop, step))
}

/// Contour levels for the geostrophic Rossby number panels.
pub fn rossby_levels(region: Region, model: Model, class: ConfigClass) -> Result<Vec<f32>> {
    use ConfigClass::*;
    let (ext, n) = match (region, model, class) {
        (Region::Atl, Model::Enatl60, Standard) => (0.3, 16),
        (Region::Atl, Model::Enatl60, Class4) => (0.4, 17),
        (Region::Atl, Model::Cmems, Standard) => (0.3, 16),
        (Region::Atl, Model::Cmems, Class4) => (0.3, 16),
        (Region::Med, Model::Cmems, Standard) => (0.24, 17),
        (Region::Med, Model::Cmems, Class4) => (0.26, 14),
        (Region::Med, Model::Wmop, Standard) => (0.2, 11),
        (Region::Med, Model::Wmop, Class4) => (0.3, 16),
        (Region::Med, Model::Enatl60, Standard) => (0.26, 14),
        (Region::Med, Model::Enatl60, Class4) => (0.26, 14),
        (Region::Atl, Model::Wmop, _) => return Err(uncalibrated(region, model)),
    };
    Ok(linspace_symmetric(ext, n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_strictly_increasing(levels: &[f32]) {
        for pair in levels.windows(2) {
            assert!(pair[0] < pair[1], "levels not increasing: {:?}", pair);
        }
    }

    fn assert_symmetric_about_zero(levels: &[f32]) {
        let n = levels.len();
        for i in 0..n {
            let mirrored = -levels[n - 1 - i];
            assert!(
                (levels[i] - mirrored).abs() < 1e-6,
                "levels not symmetric: {} vs {}",
                levels[i],
                mirrored
            );
        }
    }

    const CALIBRATED: [(Region, Model); 5] = [
        (Region::Atl, Model::Cmems),
        (Region::Atl, Model::Enatl60),
        (Region::Med, Model::Cmems),
        (Region::Med, Model::Wmop),
        (Region::Med, Model::Enatl60),
    ];

    #[test]
    fn test_linspace_symmetric_endpoints() {
        let levels = linspace_symmetric(0.24, 13);
        assert_eq!(levels.len(), 13);
        assert_eq!(levels[0], -0.24);
        assert_eq!(levels[12], 0.24);
        assert!((levels[6]).abs() < 1e-7);
    }

    #[test]
    fn test_arange_stop_exclusive() {
        // numpy.arange(0, 0.6, 0.05) ends at 0.55
        let levels = arange(0.6, 0.05);
        assert_eq!(levels.len(), 12);
        assert_eq!(levels[0], 0.0);
        assert!((levels[11] - 0.55).abs() < 1e-6);

        // and arange(0, 0.44, 0.02) ends at 0.42
        let levels = arange(0.44, 0.02);
        assert_eq!(levels.len(), 22);
        assert!((levels[21] - 0.42).abs() < 1e-6);
    }

    #[test]
    fn test_dh_levels_symmetric_and_increasing() {
        for (region, model) in CALIBRATED {
            for class in [ConfigClass::Standard, ConfigClass::Class4] {
                let levels = dh_levels(region, model, class).unwrap();
                assert_strictly_increasing(&levels);
                assert_symmetric_about_zero(&levels);
            }
        }
    }

    #[test]
    fn test_rossby_levels_symmetric_and_increasing() {
        for (region, model) in CALIBRATED {
            for class in [ConfigClass::Standard, ConfigClass::Class4] {
                let levels = rossby_levels(region, model, class).unwrap();
                assert_strictly_increasing(&levels);
                assert_symmetric_about_zero(&levels);
            }
        }
    }

    #[test]
    fn test_speed_levels_start_at_zero() {
        for (region, model) in CALIBRATED {
            for class in [ConfigClass::Standard, ConfigClass::Class4] {
                let levels = speed_levels(region, model, class).unwrap();
                assert_strictly_increasing(&levels);
                assert_eq!(levels[0], 0.0);
                assert!(levels.iter().all(|&l| l >= 0.0));
            }
        }
    }

    #[test]
    fn test_levels_deterministic() {
        let a = dh_levels(Region::Med, Model::Wmop, ConfigClass::Standard).unwrap();
        let b = dh_levels(Region::Med, Model::Wmop, ConfigClass::Standard).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_uncalibrated_pair_is_error() {
        assert!(!is_calibrated(Region::Atl, Model::Wmop));
        for class in [ConfigClass::Standard, ConfigClass::Class4] {
            assert!(dh_levels(Region::Atl, Model::Wmop, class).is_err());
            assert!(speed_levels(Region::Atl, Model::Wmop, class).is_err());
            assert!(rossby_levels(Region::Atl, Model::Wmop, class).is_err());
        }
    }

    #[test]
    fn test_class_split() {
        assert_eq!(ConfigClass::from_class_char('4'), ConfigClass::Class4);
        for c in ['1', '2', '3', '5', 'r'] {
            assert_eq!(ConfigClass::from_class_char(c), ConfigClass::Standard);
        }
    }

    #[test]
    fn test_published_class4_tables() {
        let dh = dh_levels(Region::Atl, Model::Enatl60, ConfigClass::Class4).unwrap();
        assert_eq!(dh.len(), 17);
        assert_eq!(dh[0], -0.16);

        let sp = speed_levels(Region::Med, Model::Enatl60, ConfigClass::Class4).unwrap();
        assert_eq!(sp.len(), 14);
        assert!((sp[13] - 0.52).abs() < 1e-6);

        let ro = rossby_levels(Region::Med, Model::Cmems, ConfigClass::Class4).unwrap();
        assert_eq!(ro.len(), 14);
        assert_eq!(ro[13], 0.26);
    }
}
