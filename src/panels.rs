//! Panel composition for the comparison figures.
//!
//! One figure per diagnostic variable: a 4-row grid of three data columns
//! plus a narrow colorbar column (the 20:20:20:1 width ratios of the
//! published layout). Each configuration occupies a fixed cell determined by
//! its position in the sorted file listing, every panel shares its region's
//! map extent, and two designated configuration classes anchor the shared
//! colorbars.

use ndarray::ArrayView2;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

use crate::colormaps::{bin_color, Colormap};
use crate::config::{Model, Region};
use crate::discovery::ConfigDescriptor;
use crate::error::{OiplotError, Result};
use crate::mapdecor::{format_latitude, format_longitude, Coastline, MapGeometry};

/// Output resolution: 8 x 12 inches at 500 dpi.
pub const FIG_WIDTH: u32 = 4000;
/// Output resolution: 8 x 12 inches at 500 dpi.
pub const FIG_HEIGHT: u32 = 6000;

/// Base font size of the published figures, in points.
const FSIZE_PT: f64 = 12.0;
const DPI: f64 = 500.0;

/// Vertical strip reserved for the figure suptitle, in pixels.
const SUPTITLE_STRIP: u32 = 220;
/// Pixel gutter to the right of the colorbar column for its tick labels.
const LABEL_GUTTER: u32 = 320;

/// Grid cell (row, col) of the i-th discovered configuration. Fixed by
/// position alone, reproducing the published panel order.
pub const PANEL_CELLS: [(usize, usize); 10] = [
    (0, 1),
    (0, 2),
    (1, 0),
    (1, 1),
    (1, 2),
    (2, 1),
    (2, 0),
    (3, 0),
    (2, 2),
    (0, 0),
];

/// The grid cell of the i-th configuration.
pub fn panel_cell(index: usize) -> Result<(usize, usize)> {
    PANEL_CELLS
        .get(index)
        .copied()
        .ok_or_else(|| OiplotError::InvalidParameter {
            param: "index".to_string(),
            message: format!(
                "Panel index {} exceeds the {}-panel figure layout",
                index,
                PANEL_CELLS.len()
            ),
        })
}

fn pt_to_px(pt: f64) -> u32 {
    (pt * DPI / 72.0).round() as u32
}

/// One diagnostic variable's figure under construction.
///
/// The figure is created once, panels are added across the configuration
/// loop, and the PNG is written by [`FigureSet::finish`].
pub struct FigureSet<'a> {
    root: DrawingArea<BitMapBackend<'a>, Shift>,
    suptitle_area: DrawingArea<BitMapBackend<'a>, Shift>,
    /// 4 rows x 3 data columns, row-major
    panels: Vec<DrawingArea<BitMapBackend<'a>, Shift>>,
    /// Colorbar column, rows 0..3 (anchored by the 'r' configuration)
    cbar_tall: DrawingArea<BitMapBackend<'a>, Shift>,
    /// Colorbar column, row 3 (anchored by the '4' configuration)
    cbar_short: DrawingArea<BitMapBackend<'a>, Shift>,
    suptitle: String,
    suptitle_drawn: bool,
    colormap: Box<dyn Colormap>,
}

impl<'a> FigureSet<'a> {
    /// Create the figure for one diagnostic variable.
    pub fn new(
        path: &'a Path,
        region: Region,
        model: Model,
        description: &str,
        colormap: Box<dyn Colormap>,
    ) -> Result<Self> {
        let root = BitMapBackend::new(path, (FIG_WIDTH, FIG_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(OiplotError::render)?;

        let (suptitle_area, body) = root.split_vertically(SUPTITLE_STRIP);

        // 20:20:20:1 width ratios, with a gutter for the colorbar labels
        let (body_width, body_height) = body.dim_in_pixel();
        let unit = (body_width - LABEL_GUTTER) / 61;
        let data_width = 60 * unit;
        let (data_area, cbar_col) = body.split_horizontally(data_width);

        let col_breaks = [20 * unit, 40 * unit];
        let row_height = body_height / 4;
        let row_breaks = [row_height, 2 * row_height, 3 * row_height];
        let panels = data_area.split_by_breakpoints(col_breaks, row_breaks);

        let (cbar_tall, cbar_short) = cbar_col.split_vertically(3 * row_height);

        Ok(FigureSet {
            root,
            suptitle_area,
            panels,
            cbar_tall,
            cbar_short,
            suptitle: format!("{} {} - {}", region, model, description),
            suptitle_drawn: false,
            colormap,
        })
    }

    /// Render one configuration's field into its designated panel.
    ///
    /// Draws the map decoration, the filled contours, and the panel title;
    /// anchors a shared colorbar when the configuration class designates
    /// one. The suptitle is drawn with the first panel composed.
    #[allow(clippy::too_many_arguments)]
    pub fn compose_panel(
        &mut self,
        index: usize,
        descriptor: &ConfigDescriptor,
        geometry: &MapGeometry,
        coastline: &Coastline,
        lon: &[f32],
        lat: &[f32],
        field: ArrayView2<f32>,
        levels: &[f32],
    ) -> Result<()> {
        if field.dim() != (lat.len(), lon.len()) {
            return Err(OiplotError::InvalidParameter {
                param: "field".to_string(),
                message: format!(
                    "Field shape {:?} does not match the ({}, {}) grid",
                    field.dim(),
                    lat.len(),
                    lon.len()
                ),
            });
        }

        if !self.suptitle_drawn {
            self.draw_suptitle()?;
            self.suptitle_drawn = true;
        }

        let (row, col) = panel_cell(index)?;
        let area = &self.panels[row * 3 + col];

        let (lon_min, lon_max, lat_min, lat_max) = geometry.padded_bounds();
        let title = descriptor.panel_title(index)?;

        let mut chart = ChartBuilder::on(area)
            .margin(10)
            .caption(&title, ("sans-serif", pt_to_px(FSIZE_PT)))
            .x_label_area_size(pt_to_px(FSIZE_PT - 2.0) + 40)
            .y_label_area_size(3 * pt_to_px(FSIZE_PT - 2.0) + 40)
            .build_cartesian_2d(lon_min..lon_max, lat_min..lat_max)
            .map_err(OiplotError::render)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_labels(3)
            .y_labels(4)
            .x_label_formatter(&|v| format_longitude(*v))
            .y_label_formatter(&|v| format_latitude(*v))
            .label_style(("sans-serif", pt_to_px(FSIZE_PT - 2.0)))
            .axis_style(BLACK.stroke_width(2))
            .draw()
            .map_err(OiplotError::render)?;

        // Filled contours: one rectangle per grid cell, quantized to the
        // contour bins. Cells outside the level range stay unfilled.
        let colormap = self.colormap.as_ref();
        let ny = lat.len();
        let nx = lon.len();
        chart
            .draw_series(
                (0..ny.saturating_sub(1))
                    .flat_map(|j| (0..nx.saturating_sub(1)).map(move |i| (j, i)))
                    .filter_map(|(j, i)| {
                        bin_color(colormap, levels, field[[j, i]]).map(|rgba| {
                            Rectangle::new(
                                [
                                    (lon[i] as f64, lat[j] as f64),
                                    (lon[i + 1] as f64, lat[j + 1] as f64),
                                ],
                                RGBColor(rgba[0], rgba[1], rgba[2]).filled(),
                            )
                        })
                    }),
            )
            .map_err(OiplotError::render)?;

        // Graticule at 1 degree spacing, clipped to the map extent
        let grid_style = RGBColor(128, 128, 128).stroke_width(1);
        for meridian in geometry.meridians() {
            if meridian >= lon_min && meridian <= lon_max {
                chart
                    .draw_series(LineSeries::new(
                        [(meridian, lat_min), (meridian, lat_max)],
                        grid_style,
                    ))
                    .map_err(OiplotError::render)?;
            }
        }
        for parallel in geometry.parallels() {
            if parallel >= lat_min && parallel <= lat_max {
                chart
                    .draw_series(LineSeries::new(
                        [(lon_min, parallel), (lon_max, parallel)],
                        grid_style,
                    ))
                    .map_err(OiplotError::render)?;
            }
        }

        // Coastline overlay, when configured
        for segment in &coastline.segments {
            chart
                .draw_series(LineSeries::new(
                    segment.iter().copied(),
                    BLACK.stroke_width(2),
                ))
                .map_err(OiplotError::render)?;
        }

        // Shared colorbars, anchored by the two designated classes
        match descriptor.class {
            'r' => self.draw_colorbar(&self.cbar_tall, levels, 2)?,
            '4' => self.draw_colorbar(&self.cbar_short, levels, 4)?,
            _ => {}
        }

        Ok(())
    }

    fn draw_suptitle(&self) -> Result<()> {
        let (width, height) = self.suptitle_area.dim_in_pixel();
        let style = TextStyle::from(("sans-serif", pt_to_px(FSIZE_PT + 2.0)))
            .pos(Pos::new(HPos::Center, VPos::Center));
        self.suptitle_area
            .draw(&Text::new(
                self.suptitle.clone(),
                (width as i32 / 2, height as i32 / 2),
                style,
            ))
            .map_err(OiplotError::render)?;
        Ok(())
    }

    /// Vertical colorbar with one patch per contour bin and tick labels at
    /// every `tick_stride`-th level.
    fn draw_colorbar(
        &self,
        area: &DrawingArea<BitMapBackend<'a>, Shift>,
        levels: &[f32],
        tick_stride: usize,
    ) -> Result<()> {
        if levels.len() < 2 {
            return Err(OiplotError::InvalidParameter {
                param: "levels".to_string(),
                message: "A colorbar needs at least two contour levels".to_string(),
            });
        }

        let lev_min = levels[0] as f64;
        let lev_max = levels[levels.len() - 1] as f64;
        let nbins = levels.len() - 1;

        let mut chart = ChartBuilder::on(area)
            .margin_top(20)
            .margin_bottom(20)
            .build_cartesian_2d(0.0f64..1.0f64, lev_min..lev_max)
            .map_err(OiplotError::render)?;

        chart
            .draw_series(levels.windows(2).enumerate().map(|(k, pair)| {
                let rgba = self
                    .colormap
                    .map_normalized((k as f32 + 0.5) / nbins as f32);
                Rectangle::new(
                    [(0.0, pair[0] as f64), (0.25, pair[1] as f64)],
                    RGBColor(rgba[0], rgba[1], rgba[2]).filled(),
                )
            }))
            .map_err(OiplotError::render)?;

        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(0.0, lev_min), (0.25, lev_max)],
                BLACK.stroke_width(2),
            )))
            .map_err(OiplotError::render)?;

        let style = TextStyle::from(("sans-serif", pt_to_px(FSIZE_PT)))
            .pos(Pos::new(HPos::Left, VPos::Center));
        chart
            .draw_series(
                levels
                    .iter()
                    .step_by(tick_stride)
                    .map(|&level| Text::new(format_level(level), (0.32, level as f64), style.clone())),
            )
            .map_err(OiplotError::render)?;

        Ok(())
    }

    /// Write the PNG to disk.
    pub fn finish(self) -> Result<()> {
        self.root.present().map_err(OiplotError::render)
    }
}

/// Compact tick label for a contour level, e.g. `-0.24`, `0`, `0.05`.
fn format_level(level: f32) -> String {
    let rounded = (level as f64 * 1000.0).round() / 1000.0;
    format!("{}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormaps::get_colormap;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_panel_cells_fixed_by_position() {
        assert_eq!(panel_cell(0).unwrap(), (0, 1));
        assert_eq!(panel_cell(7).unwrap(), (3, 0));
        assert_eq!(panel_cell(9).unwrap(), (0, 0));
        assert!(panel_cell(10).is_err());
    }

    #[test]
    fn test_panel_cells_distinct() {
        let mut seen = std::collections::HashSet::new();
        for cell in PANEL_CELLS {
            assert!(seen.insert(cell), "cell {:?} assigned twice", cell);
            assert!(cell.0 < 4);
            assert!(cell.1 < 3);
        }
    }

    #[test]
    fn test_format_level() {
        assert_eq!(format_level(0.0), "0");
        assert_eq!(format_level(0.05), "0.05");
        assert_eq!(format_level(-0.24), "-0.24");
        assert_eq!(format_level(0.1), "0.1");
        // f32 noise rounds away
        assert_eq!(format_level(0.060000002), "0.06");
    }

    #[test]
    fn test_figure_set_renders_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panel_test.png");

        let descriptor = crate::discovery::ConfigDescriptor::from_stem(
            "Med_conf_r_dep_1000m_res_10km_CMEMS_Sep",
        )
        .unwrap();
        let geometry = MapGeometry::for_region(Region::Med);

        let lon: Vec<f32> = (0..8).map(|i| 1.46 + i as f32 * 0.12).collect();
        let lat: Vec<f32> = (0..6).map(|j| 39.88 + j as f32 * 0.1).collect();
        let field = ndarray::Array2::from_shape_fn((6, 8), |(j, i)| {
            0.04 * ((i as f32 / 8.0) - (j as f32 / 6.0))
        });
        let levels = crate::levels::dh_levels(
            Region::Med,
            Model::Cmems,
            crate::levels::ConfigClass::Standard,
        )
        .unwrap();

        {
            let mut figure = FigureSet::new(
                &path,
                Region::Med,
                Model::Cmems,
                "reconstructed DH anomaly [dyn m]",
                get_colormap("balance").unwrap(),
            )
            .unwrap();
            figure
                .compose_panel(
                    0,
                    &descriptor,
                    &geometry,
                    &Coastline::default(),
                    &lon,
                    &lat,
                    field.view(),
                    &levels,
                )
                .unwrap();
            figure.finish().unwrap();
        }

        let img = image::open(&path).unwrap();
        assert_eq!(img.width(), FIG_WIDTH);
        assert_eq!(img.height(), FIG_HEIGHT);
    }

    #[test]
    fn test_compose_panel_rejects_grid_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mismatch.png");

        let descriptor = crate::discovery::ConfigDescriptor::from_stem(
            "Med_conf_1_dep_1000m_res_10km_CMEMS_Sep",
        )
        .unwrap();
        let geometry = MapGeometry::for_region(Region::Med);
        let field = ndarray::Array2::<f32>::zeros((4, 4));
        let levels = [0.0f32, 0.1, 0.2];

        let mut figure = FigureSet::new(
            &path,
            Region::Med,
            Model::Cmems,
            "reconstructed DH anomaly [dyn m]",
            get_colormap("balance").unwrap(),
        )
        .unwrap();
        let result = figure.compose_panel(
            0,
            &descriptor,
            &geometry,
            &Coastline::default(),
            &[1.5, 1.6, 1.7],
            &[39.9, 40.0, 40.1],
            field.view(),
            &levels,
        );
        assert!(result.is_err());
    }
}
