// SPDX-License-Identifier: GPL-3.0-or-later
use image::Rgba;

use super::settings::TemperatureRange;

/// A color table sampled once from a continuous gradient.
///
/// Sampling up front keeps the per-pixel work in the render path to a single multiply and
/// an array lookup instead of a gradient evaluation for every cell of every frame.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Palette {
    colors: Vec<Rgba<u8>>,
}

impl Palette {
    /// Sample `count` evenly spaced colors from the gradient. `count` must be at least 2.
    pub(crate) fn from_gradient(gradient: colorous::Gradient, count: usize) -> Self {
        debug_assert!(count > 1, "a palette needs at least two colors");
        let colors = (0..count)
            .map(|i| {
                let color = gradient.eval_rational(i, count);
                Rgba([color.r, color.g, color.b, u8::MAX])
            })
            .collect();
        Self { colors }
    }

    pub(crate) fn len(&self) -> usize {
        self.colors.len()
    }

    pub(crate) fn color(&self, index: usize) -> Rgba<u8> {
        self.colors[index]
    }

    /// Map a temperature to a table index with a linear clamp-and-scale rule.
    ///
    /// Temperatures below the range map to the first entry and temperatures above it map
    /// to the last, so the result is always a valid index no matter what the sensor reads.
    pub(crate) fn index_for(&self, temperature: f32, range: &TemperatureRange) -> usize {
        if temperature < range.lower() {
            return 0;
        }
        let last = self.colors.len() - 1;
        let scaled = (temperature - range.lower()) * last as f32 / range.span();
        (scaled as usize).min(last)
    }

    pub(crate) fn color_for(&self, temperature: f32, range: &TemperatureRange) -> Rgba<u8> {
        self.color(self.index_for(temperature, range))
    }
}
