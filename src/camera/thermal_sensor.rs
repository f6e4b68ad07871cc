// SPDX-License-Identifier: GPL-3.0-or-later
use std::error::Error as StdError;

use anyhow::Context as _;
use embedded_hal::blocking::i2c;
use image::flat::{FlatSamples, SampleLayout};
use tracing::debug;

use super::ThermalImage;

/// The one operation the rest of the pipeline needs from a sensor: read the current grid.
///
/// Hardware modules and the synthetic generator both implement this, so the sampling task
/// does not care which one it was given.
pub(crate) trait ThermalSensor {
    /// Read the current temperature grid from the sensor.
    fn thermal_image(&mut self) -> anyhow::Result<ThermalImage>;
}

impl<I2C> ThermalSensor for amg88::GridEye<I2C>
where
    I2C: i2c::WriteRead,
    <I2C as i2c::WriteRead>::Error: 'static + StdError + Send + Sync,
{
    fn thermal_image(&mut self) -> anyhow::Result<ThermalImage> {
        let grid: ndarray::Array2<f32> = self
            .image()
            .context("Error retrieving thermal image from GridEYE")?;
        let (row_count, col_count) = grid.dim();
        let height = row_count as u32;
        let width = col_count as u32;
        // Force the layout to row-major. If it's already in that order, this is a noop
        // (and it *should* be in row-major order already).
        let grid = if grid.is_standard_layout() {
            grid
        } else {
            debug!("Reversing thermal image axes (not expected normally)");
            grid.reversed_axes()
        };
        let layout = SampleLayout::row_major_packed(1, width, height);
        let samples = FlatSamples {
            samples: grid.into_raw_vec(),
            layout,
            color_hint: None,
        };
        samples
            .try_into_buffer()
            // try_into_buffer uses a 2-tuple as the error type, with the actual Error being
            // the first item in the tuple.
            .map_err(|e| e.0)
            .context("Unable to convert sensor grid into an ImageBuffer")
    }
}
