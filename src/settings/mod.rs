// SPDX-License-Identifier: GPL-3.0-or-later
use anyhow::{ensure, Context as _};
use serde::Deserialize;

use std::fs;

mod cli;
pub(crate) mod gradient;

use crate::camera::CameraSettings;
use crate::render::RenderSettings;
use crate::stream::StreamSettings;

pub(crate) use cli::Args;

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct Settings {
    /// Sensor-specific settings.
    pub(crate) camera: CameraSettings,

    /// Settings for how grids are turned into images.
    pub(crate) render: RenderSettings,

    /// Settings for the HTTP server.
    pub(crate) stream: StreamSettings,
}

impl Settings {
    /// Read the configuration file (if one was given) and apply command-line overrides.
    pub(crate) fn load(args: &Args) -> anyhow::Result<Self> {
        let mut settings = match &args.config {
            Some(path) => {
                let config_data = fs::read_to_string(path).with_context(|| {
                    format!("Unable to read configuration file {}", path.display())
                })?;
                toml::from_str(&config_data).context("Unable to parse configuration file")?
            }
            None => Self::default(),
        };
        settings.apply_args(args);
        settings.validate()?;
        Ok(settings)
    }

    fn apply_args(&mut self, args: &Args) {
        if args.mock {
            self.camera = CameraSettings::Synthetic {
                common: self.camera.common().clone(),
            };
        }
        if let Some(interval) = args.interval {
            self.camera.common_mut().period_ms = interval;
        }
        if let Some(minimum) = args.minimum_temperature {
            self.render.lower_limit = minimum;
        }
        if let Some(maximum) = args.maximum_temperature {
            self.render.upper_limit = maximum;
        }
        if let Some(width) = args.display_width {
            self.render.display_width = width;
        }
        if let Some(address) = args.address {
            self.stream.address = address;
        }
        if let Some(port) = args.port {
            self.stream.port = port;
        }
    }

    /// Validate everything that would otherwise only fail mid-render.
    fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.camera.common().period_ms > 0,
            "the sample period must be positive"
        );
        self.render.range().map(|_| ())
    }
}
