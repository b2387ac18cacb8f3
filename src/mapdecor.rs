//! Region map decoration: fixed extents, graticule and coordinate labels.
//!
//! Every panel of a figure uses the same hardcoded geographic bounding box
//! for its region, so all configurations are visually comparable on one
//! extent. The boxes and graticule ranges are calibration constants of the
//! published figures.

use std::path::Path;

use crate::config::Region;
use crate::error::{OiplotError, Result};

/// Uniform padding (degrees) added around each region box.
pub const EXTENT_PADDING: f64 = 0.025;

/// Fixed map geometry of one region.
#[derive(Debug, Clone, PartialEq)]
pub struct MapGeometry {
    /// Unpadded bounding box, degrees: (lon_min, lon_max, lat_min, lat_max)
    pub bounds: (f64, f64, f64, f64),
    /// Inclusive integer-degree range of parallels drawn, 1 degree apart
    pub parallel_range: (i32, i32),
    /// Inclusive integer-degree range of meridians drawn, 1 degree apart
    pub meridian_range: (i32, i32),
}

impl MapGeometry {
    /// The geometry of a region. The boxes are the domains of the reference
    /// configurations (Atl: configuration 2, 15km 1000m; Med: configuration
    /// r, 10km 1000m).
    pub fn for_region(region: Region) -> Self {
        match region {
            Region::Atl => MapGeometry {
                bounds: (-48.91, -47.59843, 34.538803, 35.34936),
                parallel_range: (30, 39),
                meridian_range: (-50, -46),
            },
            Region::Med => MapGeometry {
                bounds: (1.45, 2.3868356, 39.87467, 40.397026),
                parallel_range: (34, 42),
                meridian_range: (-6, 6),
            },
        }
    }

    /// The plotted extent: the bounding box plus the uniform padding.
    pub fn padded_bounds(&self) -> (f64, f64, f64, f64) {
        let (lon_min, lon_max, lat_min, lat_max) = self.bounds;
        (
            lon_min - EXTENT_PADDING,
            lon_max + EXTENT_PADDING,
            lat_min - EXTENT_PADDING,
            lat_max + EXTENT_PADDING,
        )
    }

    /// Graticule meridian longitudes, in degrees.
    pub fn meridians(&self) -> Vec<f64> {
        (self.meridian_range.0..=self.meridian_range.1)
            .map(f64::from)
            .collect()
    }

    /// Graticule parallel latitudes, in degrees.
    pub fn parallels(&self) -> Vec<f64> {
        (self.parallel_range.0..=self.parallel_range.1)
            .map(f64::from)
            .collect()
    }
}

fn format_degrees(value: f64, positive: char, negative: char) -> String {
    let hemisphere = if value < 0.0 { negative } else { positive };
    let magnitude = value.abs();
    if (magnitude - magnitude.round()).abs() < 1e-9 {
        if magnitude == 0.0 {
            "0°".to_string()
        } else {
            format!("{}°{}", magnitude.round() as i64, hemisphere)
        }
    } else {
        format!("{:.1}°{}", magnitude, hemisphere)
    }
}

/// Geographic longitude label, e.g. `48°W` or `1.5°E`.
pub fn format_longitude(value: f64) -> String {
    format_degrees(value, 'E', 'W')
}

/// Geographic latitude label, e.g. `35°N`.
pub fn format_latitude(value: f64) -> String {
    format_degrees(value, 'N', 'S')
}

/// Coastline polylines drawn over every panel, in lon/lat degrees.
///
/// Both published region boxes are open ocean, so the overlay is optional;
/// when a GeoJSON file is configured its line geometries are drawn in every
/// panel.
#[derive(Debug, Clone, Default)]
pub struct Coastline {
    /// Polyline segments, each a sequence of (lon, lat) vertices
    pub segments: Vec<Vec<(f64, f64)>>,
}

impl Coastline {
    /// Load coastline segments from a GeoJSON file.
    ///
    /// LineString, MultiLineString and Polygon geometries contribute
    /// segments; other geometry types are ignored.
    pub fn from_geojson_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let root: serde_json::Value = serde_json::from_str(&content)?;

        let mut segments = Vec::new();
        let geometries: Vec<&serde_json::Value> = match root.get("features") {
            Some(features) => features
                .as_array()
                .map(|list| list.iter().filter_map(|f| f.get("geometry")).collect())
                .unwrap_or_default(),
            None => vec![&root],
        };

        for geometry in geometries {
            collect_segments(geometry, &mut segments)?;
        }

        Ok(Coastline { segments })
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

fn collect_segments(
    geometry: &serde_json::Value,
    segments: &mut Vec<Vec<(f64, f64)>>,
) -> Result<()> {
    let kind = geometry
        .get("type")
        .and_then(|t| t.as_str())
        .unwrap_or_default();
    let coords = match geometry.get("coordinates") {
        Some(c) => c,
        None => return Ok(()),
    };

    match kind {
        "LineString" => {
            segments.push(parse_line(coords)?);
        }
        "MultiLineString" | "Polygon" => {
            for line in coords.as_array().into_iter().flatten() {
                segments.push(parse_line(line)?);
            }
        }
        _ => {}
    }
    Ok(())
}

fn parse_line(line: &serde_json::Value) -> Result<Vec<(f64, f64)>> {
    let points = line
        .as_array()
        .ok_or_else(|| OiplotError::InvalidParameter {
            param: "coastline".to_string(),
            message: "GeoJSON line coordinates are not an array".to_string(),
        })?;

    points
        .iter()
        .map(|point| {
            let pair = point.as_array().filter(|p| p.len() >= 2).ok_or_else(|| {
                OiplotError::InvalidParameter {
                    param: "coastline".to_string(),
                    message: "GeoJSON position is not a [lon, lat] pair".to_string(),
                }
            })?;
            let lon = pair[0].as_f64().unwrap_or(f64::NAN);
            let lat = pair[1].as_f64().unwrap_or(f64::NAN);
            Ok((lon, lat))
        })
        .collect()
}
