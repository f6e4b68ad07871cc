// SPDX-License-Identifier: GPL-3.0-or-later
use image::{ImageBuffer, Luma};

mod i2c;
mod mock;
mod settings;
mod thermal_sensor;

pub(crate) use settings::{CameraSettings, CommonOptions};
pub(crate) use thermal_sensor::ThermalSensor;

/// Dimensions of the sensor grid, in cells.
pub(crate) const GRID_WIDTH: u32 = 8;
pub(crate) const GRID_HEIGHT: u32 = 8;

/// Images where each point is a temperature in degrees Celsius.
pub(crate) type ThermalImage = ImageBuffer<Luma<f32>, Vec<f32>>;
