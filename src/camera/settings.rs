// SPDX-License-Identifier: GPL-3.0-or-later
use std::convert::{TryFrom, TryInto};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context as _};
use linux_embedded_hal::I2cdev;
use serde::Deserialize;
use tracing::info;

use crate::render::TemperatureRange;

use super::i2c::Bus;
use super::mock::SyntheticSensor;
use super::thermal_sensor::ThermalSensor;

fn default_bus() -> Bus {
    Bus::Path(PathBuf::from("/dev/i2c-1"))
}

fn default_address() -> u8 {
    0x69
}

fn default_frame_rate() -> u8 {
    10
}

fn default_period_ms() -> u64 {
    100
}

/// Options shared by every sensor kind.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub(crate) struct CommonOptions {
    /// Milliseconds between samples, which is also the cadence of rendered frames.
    #[serde(default = "default_period_ms")]
    pub(crate) period_ms: u64,
}

impl Default for CommonOptions {
    fn default() -> Self {
        Self {
            period_ms: default_period_ms(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub(crate) enum CameraSettings {
    GridEye {
        #[serde(default = "default_bus")]
        bus: Bus,

        #[serde(default = "default_address")]
        address: u8,

        #[serde(default = "default_frame_rate")]
        frame_rate: u8,

        #[serde(flatten)]
        common: CommonOptions,
    },
    Synthetic {
        #[serde(flatten)]
        common: CommonOptions,
    },
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self::GridEye {
            bus: default_bus(),
            address: default_address(),
            frame_rate: default_frame_rate(),
            common: CommonOptions::default(),
        }
    }
}

impl CameraSettings {
    pub(crate) fn common(&self) -> &CommonOptions {
        match self {
            Self::GridEye { common, .. } => common,
            Self::Synthetic { common, .. } => common,
        }
    }

    pub(crate) fn common_mut(&mut self) -> &mut CommonOptions {
        match self {
            Self::GridEye { common, .. } => common,
            Self::Synthetic { common, .. } => common,
        }
    }

    /// The delay between samples.
    pub(crate) fn period(&self) -> Duration {
        Duration::from_millis(self.common().period_ms)
    }

    /// Open the configured sensor.
    ///
    /// Failures here are fatal to startup when a real module is configured; the synthetic
    /// generator cannot fail. The range is used by the synthetic generator to keep its
    /// values within the rendered scale.
    pub(crate) fn create_sensor(
        &self,
        range: &TemperatureRange,
    ) -> anyhow::Result<Box<dyn ThermalSensor + Send>> {
        match self {
            Self::GridEye {
                bus,
                address,
                frame_rate,
                ..
            } => {
                let device = I2cdev::try_from(bus).context("Unable to open I2C bus")?;
                let address: amg88::Address = (*address)
                    .try_into()
                    .context("Invalid GridEYE I2C address")?;
                let mut sensor = amg88::GridEye::new(device, address);
                let frame_rate = match frame_rate {
                    2..=10 => amg88::FrameRateValue::Fps10,
                    1 => amg88::FrameRateValue::Fps1,
                    _ => bail!("GridEYE frame rate must be between 1 and 10"),
                };
                sensor
                    .set_frame_rate(frame_rate)
                    .context("Error setting sensor frame rate")?;
                info!("connected to GridEYE module");
                Ok(Box::new(sensor))
            }
            Self::Synthetic { .. } => {
                info!("using synthetic sensor data");
                Ok(Box::new(SyntheticSensor::new(range)))
            }
        }
    }
}
