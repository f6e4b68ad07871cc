// SPDX-License-Identifier: GPL-3.0-or-later
use structopt::StructOpt;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use std::convert::TryFrom;

mod camera;
mod pipeline;
mod render;
mod settings;
mod stream;
mod util;

use crate::pipeline::Pipeline;
use crate::settings::{Args, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::from_args();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let settings = Settings::load(&args)?;
    debug!(?settings, "loaded configuration");
    let pipeline = Pipeline::try_from(settings)?;
    pipeline.await;
    Ok(())
}
