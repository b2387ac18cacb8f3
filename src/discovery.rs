//! Configuration file discovery and descriptor parsing.
//!
//! One sampling configuration produces a NetCDF triplet sharing a filename
//! stem: `<stem>_T.nc`, `<stem>_S.nc` and `<stem>_derived_variables.nc`.
//! Discovery globs the temperature files for a (region, model) pair, sorts
//! them lexicographically, and parses each stem once into a structured
//! [`ConfigDescriptor`]. All later stages work from the descriptor; nothing
//! slices the filename again.

use glob::glob;
use std::path::Path;

use crate::config::{Model, Region};
use crate::error::{OiplotError, Result};
use crate::levels::ConfigClass;

/// Letter suffix appended to the configuration class in the i-th panel
/// title. Fixed by panel position, not by configuration content.
const PANEL_SUFFIXES: [&str; 10] = ["", "a", "b", "c", "d", "b", "a", "", "", ""];

/// Byte offset of the configuration class character within a stem.
const CLASS_OFFSET: usize = 9;
/// Byte range of the vertical-extent token within a stem.
const EXTENT_RANGE: std::ops::Range<usize> = 15..20;
/// Byte range of the resolution token within a stem.
const RESOLUTION_RANGE: std::ops::Range<usize> = 25..29;
/// Class '3' configurations carry a wider resolution token.
const RESOLUTION_RANGE_CLASS3: std::ops::Range<usize> = 25..31;

/// One sampling configuration, parsed from its filename stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDescriptor {
    /// Filename stem shared by the NetCDF triplet
    pub stem: String,
    /// Single-character configuration class ('1'..'5' or 'r')
    pub class: char,
    /// Vertical-extent token (e.g. "1000m")
    pub extent: String,
    /// Horizontal-resolution token (e.g. "10km")
    pub resolution: String,
}

impl ConfigDescriptor {
    /// Parse a filename stem into a descriptor.
    ///
    /// The stems are fixed-layout: the class character sits at byte offset
    /// 9, the vertical extent at bytes 15..20 and the resolution at bytes
    /// 25..29 (25..31 for class '3'). Stems too short for those offsets are
    /// rejected.
    pub fn from_stem(stem: &str) -> Result<Self> {
        let malformed = |detail: &str| OiplotError::InvalidParameter {
            param: "stem".to_string(),
            message: format!("Malformed configuration stem '{}': {}", stem, detail),
        };

        if !stem.is_ascii() {
            return Err(malformed("stem is not ASCII"));
        }

        let class = stem
            .as_bytes()
            .get(CLASS_OFFSET)
            .map(|&b| b as char)
            .ok_or_else(|| malformed("missing configuration class character"))?;

        let resolution_range = if class == '3' {
            RESOLUTION_RANGE_CLASS3
        } else {
            RESOLUTION_RANGE
        };

        if stem.len() < resolution_range.end {
            return Err(malformed("stem too short for the resolution token"));
        }

        Ok(ConfigDescriptor {
            stem: stem.to_string(),
            class,
            extent: stem[EXTENT_RANGE].to_string(),
            resolution: stem[resolution_range].to_string(),
        })
    }

    /// The calibration-table class of this configuration.
    pub fn config_class(&self) -> ConfigClass {
        ConfigClass::from_class_char(self.class)
    }

    /// Panel title for this configuration when it occupies panel `index`,
    /// e.g. `2a (10km 1000m)`.
    pub fn panel_title(&self, index: usize) -> Result<String> {
        let suffix = PANEL_SUFFIXES
            .get(index)
            .ok_or_else(|| OiplotError::InvalidParameter {
                param: "index".to_string(),
                message: format!(
                    "Panel index {} exceeds the {}-panel figure layout",
                    index,
                    PANEL_SUFFIXES.len()
                ),
            })?;
        Ok(format!(
            "{}{} ({} {})",
            self.class, suffix, self.resolution, self.extent
        ))
    }
}

/// Discover all configurations for a (region, model) pair, in lexicographic
/// stem order, with the (Med, eNATL60) curation rule applied.
pub fn discover(data_dir: &Path, region: Region, model: Model) -> Result<Vec<ConfigDescriptor>> {
    let pattern = format!(
        "{}/{}*_{}*_T.nc",
        data_dir.display(),
        region,
        model
    );

    let mut stems = Vec::new();
    let entries = glob(&pattern).map_err(|e| OiplotError::InvalidParameter {
        param: "data_dir".to_string(),
        message: format!("Invalid glob pattern '{}': {}", pattern, e),
    })?;

    for entry in entries {
        let path = entry.map_err(|e| OiplotError::Io(e.into_error()))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| OiplotError::InvalidParameter {
                param: "data_dir".to_string(),
                message: format!("Non-UTF8 file name under {}", data_dir.display()),
            })?;
        if let Some(stem) = file_name.strip_suffix("_T.nc") {
            stems.push(stem.to_string());
        }
    }

    stems.sort();

    if stems.is_empty() {
        return Err(OiplotError::DataNotFound {
            message: format!("No configuration files match {}", pattern),
        });
    }

    let stems = apply_curation(stems, region, model);

    stems
        .iter()
        .map(|stem| ConfigDescriptor::from_stem(stem))
        .collect()
}

/// The (Med, eNATL60) file listing drops the two stems immediately before
/// the last and keeps the last unchanged. This reproduces the recorded
/// figure set exactly; it is a data-curation special case, not a general
/// policy.
pub(crate) fn apply_curation(stems: Vec<String>, region: Region, model: Model) -> Vec<String> {
    if region != Region::Med || model != Model::Enatl60 || stems.is_empty() {
        return stems;
    }

    let keep = stems.len().saturating_sub(3);
    let last = stems[stems.len() - 1].clone();
    let mut curated: Vec<String> = stems.into_iter().take(keep).collect();
    curated.push(last);
    curated
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // A stem with the fixed field layout:
    // class at byte 9, extent at 15..20, resolution at 25..29.
    const STEM: &str = "Med_conf_2_dep_1000m_res_10km_CMEMS_Sep";

    #[test]
    fn test_descriptor_parses_fixed_offsets() {
        let d = ConfigDescriptor::from_stem(STEM).unwrap();
        assert_eq!(d.class, '2');
        assert_eq!(d.extent, "1000m");
        assert_eq!(d.resolution, "10km");
        assert_eq!(d.stem, STEM);
    }

    #[test]
    fn test_descriptor_class3_wide_resolution() {
        let stem = "Med_conf_3_dep_1000m_res_10x20k_CMEMS_Sep";
        let d = ConfigDescriptor::from_stem(stem).unwrap();
        assert_eq!(d.class, '3');
        assert_eq!(d.resolution, "10x20k");
    }

    #[test]
    fn test_descriptor_rejects_short_stem() {
        assert!(ConfigDescriptor::from_stem("Med_conf").is_err());
        assert!(ConfigDescriptor::from_stem("Med_conf_2_dep_10").is_err());
    }

    #[test]
    fn test_panel_title_uses_position_suffix() {
        let d = ConfigDescriptor::from_stem(STEM).unwrap();
        assert_eq!(d.panel_title(0).unwrap(), "2 (10km 1000m)");
        assert_eq!(d.panel_title(1).unwrap(), "2a (10km 1000m)");
        assert_eq!(d.panel_title(4).unwrap(), "2d (10km 1000m)");
        assert_eq!(d.panel_title(9).unwrap(), "2 (10km 1000m)");
        assert!(d.panel_title(10).is_err());
    }

    fn stems(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_curation_only_med_enatl60() {
        let listing = stems(&["a", "b", "c", "d", "e", "f"]);
        assert_eq!(
            apply_curation(listing.clone(), Region::Med, Model::Cmems),
            listing
        );
        assert_eq!(
            apply_curation(listing.clone(), Region::Atl, Model::Enatl60),
            listing
        );
    }

    #[test]
    fn test_curation_drops_two_before_last() {
        let listing = stems(&["a", "b", "c", "d", "e", "f"]);
        assert_eq!(
            apply_curation(listing, Region::Med, Model::Enatl60),
            stems(&["a", "b", "c", "f"])
        );
        assert_eq!(
            apply_curation(stems(&["a", "b", "c", "d"]), Region::Med, Model::Enatl60),
            stems(&["a", "d"])
        );
    }

    #[test]
    fn test_curation_short_listings() {
        // Three or fewer entries: everything before the last is dropped
        assert_eq!(
            apply_curation(stems(&["a", "b", "c"]), Region::Med, Model::Enatl60),
            stems(&["c"])
        );
        assert_eq!(
            apply_curation(stems(&["a"]), Region::Med, Model::Enatl60),
            stems(&["a"])
        );
    }

    #[test]
    fn test_discover_sorted_and_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let names = [
            "Med_conf_2_dep_1000m_res_10km_CMEMS_Sep_T.nc",
            "Med_conf_1_dep_1000m_res_10km_CMEMS_Sep_T.nc",
            "Med_conf_4_dep_0500m_res_05km_CMEMS_Sep_T.nc",
        ];
        for name in names {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        // Files for other models or variables must not match
        std::fs::write(
            dir.path().join("Med_conf_1_dep_1000m_res_10km_WMOP_Sep_T.nc"),
            b"",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("Med_conf_1_dep_1000m_res_10km_CMEMS_Sep_S.nc"),
            b"",
        )
        .unwrap();

        let found = discover(dir.path(), Region::Med, Model::Cmems).unwrap();
        let found_stems: Vec<&str> = found.iter().map(|d| d.stem.as_str()).collect();
        assert_eq!(
            found_stems,
            vec![
                "Med_conf_1_dep_1000m_res_10km_CMEMS_Sep",
                "Med_conf_2_dep_1000m_res_10km_CMEMS_Sep",
                "Med_conf_4_dep_0500m_res_05km_CMEMS_Sep",
            ]
        );
        assert_eq!(found[2].class, '4');
    }

    #[test]
    fn test_discover_empty_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(dir.path(), Region::Atl, Model::Cmems).is_err());
    }
}
