// SPDX-License-Identifier: GPL-3.0-or-later
use linux_embedded_hal::i2cdev::linux::LinuxI2CError;
use linux_embedded_hal::I2cdev;
use serde::Deserialize;

use std::convert::TryFrom;
use std::path::PathBuf;
use std::str::FromStr;

use crate::util::parse_int_decimal_hex;

/// An I2C bus, identified either by number or by device path.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub(crate) enum Bus {
    Number(u32),
    Path(PathBuf),
}

impl From<u32> for Bus {
    fn from(bus: u32) -> Self {
        Self::Number(bus)
    }
}

impl FromStr for Bus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Numbers (base-10 or 0x-prefixed base-16) are bus numbers, everything else is
        // treated as a device path.
        Ok(match parse_int_decimal_hex::<u32>(s) {
            Ok(bus_number) => Self::Number(bus_number),
            Err(_) => Self::Path(PathBuf::from(s)),
        })
    }
}

impl TryFrom<&Bus> for I2cdev {
    type Error = LinuxI2CError;

    fn try_from(bus: &Bus) -> Result<Self, Self::Error> {
        let device_path = match bus {
            Bus::Number(n) => PathBuf::from(format!("/dev/i2c-{}", n)),
            Bus::Path(p) => p.clone(),
        };
        I2cdev::new(device_path)
    }
}
