// SPDX-License-Identifier: GPL-3.0-or-later
use anyhow::ensure;
use image::imageops::{self, FilterType};
use image::RgbaImage;

mod palette;
mod settings;

pub(crate) use settings::{RenderSettings, TemperatureRange};

use palette::Palette;

use crate::camera::{ThermalImage, GRID_HEIGHT, GRID_WIDTH};

/// Turns temperature grids into viewable images.
#[derive(Clone, Debug)]
pub(crate) struct Renderer {
    palette: Palette,
    range: TemperatureRange,
    display_width: u32,
    filter: FilterType,
}

impl Renderer {
    pub(crate) fn new(settings: &RenderSettings) -> anyhow::Result<Self> {
        let range = settings.range()?;
        ensure!(
            settings.palette_size > 1,
            "the palette must contain at least two colors"
        );
        ensure!(
            settings.display_width > 0,
            "the display width must be positive"
        );
        Ok(Self {
            palette: Palette::from_gradient(settings.colors, settings.palette_size),
            range,
            display_width: settings.display_width,
            filter: settings.scaling_method.into(),
        })
    }

    /// Map each grid cell to one pixel, in the same order the sensor reports the cells.
    fn colorize(&self, grid: &ThermalImage) -> RgbaImage {
        let mut colors = RgbaImage::new(grid.width(), grid.height());
        for (temperature, pixel) in grid.iter().zip(colors.pixels_mut()) {
            *pixel = self.palette.color_for(*temperature, &self.range);
        }
        colors
    }

    /// Render one frame: colorize the grid, then enlarge it with the configured filter.
    pub(crate) fn render(&self, grid: &ThermalImage) -> anyhow::Result<RgbaImage> {
        ensure!(
            grid.width() == GRID_WIDTH && grid.height() == GRID_HEIGHT,
            "expected a {}x{} grid, got {}x{}",
            GRID_WIDTH,
            GRID_HEIGHT,
            grid.width(),
            grid.height()
        );
        let colors = self.colorize(grid);
        // The source grid is square, so this comes out to display_width as well. Deriving
        // it keeps the aspect ratio honest if the grid constants ever change.
        let display_height = self.display_width * colors.height() / colors.width();
        Ok(imageops::resize(
            &colors,
            self.display_width,
            display_height,
            self.filter,
        ))
    }
}
