// SPDX-License-Identifier: GPL-3.0-or-later
use structopt::StructOpt;

use std::net::IpAddr;
use std::path::PathBuf;

/// Command-line flags. Anything given here overrides the configuration file.
#[derive(Debug, Default, StructOpt)]
#[structopt(about = "Serve images from a thermal camera module over HTTP.")]
pub(crate) struct Args {
    /// Path to a configuration file.
    #[structopt(short, long, parse(from_os_str))]
    pub(crate) config: Option<PathBuf>,

    /// Milliseconds between captured frames.
    #[structopt(short = "f", long)]
    pub(crate) interval: Option<u64>,

    /// Lowest temperature on the color scale, in degrees Celsius.
    #[structopt(long = "min")]
    pub(crate) minimum_temperature: Option<f32>,

    /// Highest temperature on the color scale, in degrees Celsius.
    #[structopt(long = "max")]
    pub(crate) maximum_temperature: Option<f32>,

    /// Width in pixels of the streamed image.
    #[structopt(short = "s", long = "size")]
    pub(crate) display_width: Option<u32>,

    /// Generate synthetic sensor data instead of reading hardware.
    #[structopt(long)]
    pub(crate) mock: bool,

    /// Address to bind the HTTP server to.
    #[structopt(long)]
    pub(crate) address: Option<IpAddr>,

    /// Port to bind the HTTP server to.
    #[structopt(short, long)]
    pub(crate) port: Option<u16>,
}

#[cfg(test)]
mod args_test {
    use structopt::StructOpt;

    use super::Args;

    #[test]
    fn no_flags() {
        let args = Args::from_iter(&["thermoview"]);
        assert!(args.config.is_none());
        assert!(args.interval.is_none());
        assert!(!args.mock);
    }

    #[test]
    fn viewer_flags() {
        let args = Args::from_iter(&[
            "thermoview",
            "-f",
            "50",
            "--min",
            "20",
            "--max",
            "40",
            "-s",
            "480",
            "--mock",
        ]);
        assert_eq!(args.interval, Some(50));
        assert_eq!(args.minimum_temperature, Some(20.0));
        assert_eq!(args.maximum_temperature, Some(40.0));
        assert_eq!(args.display_width, Some(480));
        assert!(args.mock);
    }

    #[test]
    fn server_flags() {
        let args = Args::from_iter(&["thermoview", "--address", "127.0.0.1", "-p", "8080"]);
        assert_eq!(args.address, Some("127.0.0.1".parse().unwrap()));
        assert_eq!(args.port, Some(8080));
    }
}
