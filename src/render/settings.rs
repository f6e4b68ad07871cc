// SPDX-License-Identifier: GPL-3.0-or-later
use anyhow::ensure;
use image::imageops::FilterType;
use serde::Deserialize;

use crate::settings::gradient;

fn default_lower_limit() -> f32 {
    26.0
}

fn default_upper_limit() -> f32 {
    32.0
}

fn default_display_width() -> u32 {
    360
}

fn default_palette_size() -> usize {
    1024
}

fn default_colors() -> colorous::Gradient {
    colorous::TURBO
}

/// The temperature span mapped onto the palette.
///
/// Construction enforces that the span is not empty, so the scaling math downstream never
/// divides by zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TemperatureRange {
    lower: f32,
    upper: f32,
}

impl TemperatureRange {
    pub(crate) fn new(lower: f32, upper: f32) -> anyhow::Result<Self> {
        ensure!(
            lower < upper,
            "the lower temperature limit ({}) must be below the upper limit ({})",
            lower,
            upper
        );
        Ok(Self { lower, upper })
    }

    pub(crate) fn lower(&self) -> f32 {
        self.lower
    }

    pub(crate) fn upper(&self) -> f32 {
        self.upper
    }

    pub(crate) fn span(&self) -> f32 {
        self.upper - self.lower
    }
}

/// Resampling filters for enlarging the sensor grid.
///
/// Only smooth filters are offered. Nearest neighbor turns the image into large flat
/// blocks, which is exactly what the interpolation is there to avoid.
#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Method {
    /// Triangle (aka linear) sampling.
    #[serde(alias = "linear")]
    Triangle,

    /// Catmull-Rom (aka bicubic) sampling.
    #[serde(alias = "bicubic")]
    CatmullRom,

    /// Lanczos sampling with a window size of 3.
    #[serde(alias = "lanczos")]
    Lanczos3,
}

impl Default for Method {
    fn default() -> Self {
        Self::CatmullRom
    }
}

impl From<Method> for FilterType {
    fn from(method: Method) -> Self {
        match method {
            Method::Triangle => FilterType::Triangle,
            Method::CatmullRom => FilterType::CatmullRom,
            Method::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RenderSettings {
    /// The temperature mapped to the bottom of the color scale.
    #[serde(default = "default_lower_limit")]
    pub(crate) lower_limit: f32,

    /// The temperature mapped to the top of the color scale.
    #[serde(default = "default_upper_limit")]
    pub(crate) upper_limit: f32,

    /// Width in pixels of the upscaled image. The height follows from the grid's aspect
    /// ratio.
    #[serde(default = "default_display_width")]
    pub(crate) display_width: u32,

    /// Number of colors sampled from the gradient.
    #[serde(default = "default_palette_size")]
    pub(crate) palette_size: usize,

    #[serde(default = "default_colors", deserialize_with = "gradient::deserialize")]
    pub(crate) colors: colorous::Gradient,

    #[serde(default)]
    pub(crate) scaling_method: Method,
}

impl RenderSettings {
    pub(crate) fn range(&self) -> anyhow::Result<TemperatureRange> {
        TemperatureRange::new(self.lower_limit, self.upper_limit)
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            lower_limit: default_lower_limit(),
            upper_limit: default_upper_limit(),
            display_width: default_display_width(),
            palette_size: default_palette_size(),
            colors: default_colors(),
            scaling_method: Method::default(),
        }
    }
}

// colorous::Gradient doesn't implement PartialEq, so compare its debug form instead.
impl PartialEq for RenderSettings {
    fn eq(&self, other: &Self) -> bool {
        self.lower_limit == other.lower_limit
            && self.upper_limit == other.upper_limit
            && self.display_width == other.display_width
            && self.palette_size == other.palette_size
            && self.scaling_method == other.scaling_method
            && format!("{:?}", self.colors) == format!("{:?}", other.colors)
    }
}


#[cfg(test)]
mod render_test {
    use super::{Method, RenderSettings};

    #[test]
    fn defaults() {
        let parsed: Result<RenderSettings, _> = toml::from_str("");
        assert!(
            parsed.is_ok(),
            "Failed to parse empty TOML: {}",
            parsed.unwrap_err()
        );
        assert_eq!(parsed.unwrap(), RenderSettings::default());
    }

    #[test]
    fn limits() {
        let parsed: Result<RenderSettings, _> =
            toml::from_str("lower_limit = 18.5\nupper_limit = 40.0");
        assert!(
            parsed.is_ok(),
            "Failed to parse limits: {}",
            parsed.unwrap_err()
        );
        let expected = RenderSettings {
            lower_limit: 18.5,
            upper_limit: 40.0,
            ..RenderSettings::default()
        };
        assert_eq!(parsed.unwrap(), expected);
    }

    #[test]
    fn scaling_method_alias() {
        let parsed: Result<RenderSettings, _> = toml::from_str("scaling_method = \"bicubic\"");
        assert!(
            parsed.is_ok(),
            "Failed to parse aliased method: {}",
            parsed.unwrap_err()
        );
        assert_eq!(parsed.unwrap().scaling_method, Method::CatmullRom);
    }

    #[test]
    fn scaling_method_no_nearest() {
        let parsed: Result<RenderSettings, _> = toml::from_str("scaling_method = \"nearest\"");
        assert!(parsed.is_err(), "Accepted a blocky scaling method");
    }

    #[test]
    fn gradient_name() {
        let parsed: Result<RenderSettings, _> = toml::from_str("colors = \"inferno\"");
        assert!(
            parsed.is_ok(),
            "Failed to parse gradient name: {}",
            parsed.unwrap_err()
        );
        let expected = RenderSettings {
            colors: colorous::INFERNO,
            ..RenderSettings::default()
        };
        assert_eq!(parsed.unwrap(), expected);
    }

    #[test]
    fn bad_gradient_name() {
        let parsed: Result<RenderSettings, _> = toml::from_str("colors = \"no-such-gradient\"");
        assert!(parsed.is_err(), "Accepted a nonexistent gradient name");
    }

    #[test]
    fn bad_range_rejected_by_validation() {
        let settings = RenderSettings {
            lower_limit: 32.0,
            upper_limit: 26.0,
            ..RenderSettings::default()
        };
        assert!(settings.range().is_err());
    }
}
