// SPDX-License-Identifier: GPL-3.0-or-later
use serde::Deserialize;

use std::net;
use std::path::PathBuf;

#[derive(Debug, Deserialize, PartialEq)]
pub(crate) struct StreamSettings {
    /// The address to bind the server to. Defaults to `0.0.0.0`.
    #[serde(default = "StreamSettings::default_address")]
    pub(crate) address: net::IpAddr,

    /// The port to bind the server to. Defaults to `12345`.
    #[serde(default = "StreamSettings::default_port")]
    pub(crate) port: u16,

    /// The directory static assets (including the page template) are served from.
    #[serde(default = "StreamSettings::default_asset_dir")]
    pub(crate) asset_dir: PathBuf,
}

impl StreamSettings {
    fn default_address() -> net::IpAddr {
        net::IpAddr::from([0u8, 0u8, 0u8, 0u8])
    }

    fn default_port() -> u16 {
        12345u16
    }

    fn default_asset_dir() -> PathBuf {
        PathBuf::from("public")
    }
}

impl From<&StreamSettings> for net::SocketAddr {
    fn from(settings: &StreamSettings) -> Self {
        net::SocketAddr::from((settings.address, settings.port))
    }
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            address: Self::default_address(),
            port: Self::default_port(),
            asset_dir: Self::default_asset_dir(),
        }
    }
}
