// SPDX-License-Identifier: GPL-3.0-or-later
use anyhow::Context as _;
use futures::future::{Future, FutureExt};
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::watch;
use tokio::time;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, error, info, info_span};
use tracing_futures::Instrument;

use std::convert::TryFrom;
use std::fs;
use std::net::SocketAddr;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::camera::{ThermalImage, ThermalSensor as _, GRID_HEIGHT, GRID_WIDTH};
use crate::render::{RenderSettings, Renderer};
use crate::settings::Settings;
use crate::stream::{self, FramePublisher};
use crate::util::flatten_join_result;

type TaskList = FuturesUnordered<Box<dyn Future<Output = anyhow::Result<()>> + Unpin>>;

/// The whole application: sampler, renderer, and HTTP server tasks over two shared slots.
///
/// There is exactly one sampling loop and one render loop per process, started here and
/// never by request handlers. Both shared slots are watch channels, so readers always see
/// a complete snapshot.
pub(crate) struct Pipeline {
    grid_source: Option<watch::Receiver<ThermalImage>>,
    publisher: Option<FramePublisher>,
    tasks: TaskList,
}

impl Pipeline {
    /// Start the sampling loop, periodically replacing the shared grid.
    ///
    /// A failed read is logged and the tick skipped; the previous grid stays current.
    fn create_sampler(&mut self, settings: &Settings) -> anyhow::Result<()> {
        let range = settings.render.range()?;
        let mut sensor = settings.camera.create_sensor(&range)?;
        let period = settings.camera.period();
        let (grid_tx, grid_rx) = watch::channel(ThermalImage::new(GRID_WIDTH, GRID_HEIGHT));
        let sample_loop = async move {
            let mut ticks = time::interval(period);
            loop {
                ticks.tick().await;
                match sensor.thermal_image() {
                    Ok(grid) => {
                        if grid_tx.send(grid).is_err() {
                            debug!("no grid readers left, stopping sampler");
                            break;
                        }
                    }
                    Err(err) => error!(error = ?err, "unable to read a grid from the sensor"),
                }
            }
            anyhow::Result::<()>::Ok(())
        };
        self.grid_source = Some(grid_rx);
        self.tasks.push(Box::new(
            tokio::spawn(sample_loop.instrument(info_span!("sampler"))).map(flatten_join_result),
        ));
        Ok(())
    }

    /// Start the render loop: every new grid becomes the published frame.
    fn create_renderer(&mut self, settings: &RenderSettings) -> anyhow::Result<()> {
        let renderer = Renderer::new(settings)?;
        let grid_source = self
            .grid_source
            .as_ref()
            .context("the sampler must be created before the renderer")?
            .clone();
        let publisher = FramePublisher::new();
        let render_publisher = publisher.clone();
        let render_loop = async move {
            let mut grids = WatchStream::new(grid_source);
            while let Some(grid) = grids.next().await {
                let image = renderer.render(&grid)?;
                render_publisher.publish(&image)?;
            }
            debug!("grid source closed, stopping renderer");
            anyhow::Result::<()>::Ok(())
        };
        self.publisher = Some(publisher);
        self.tasks.push(Box::new(
            tokio::spawn(render_loop.instrument(info_span!("renderer"))).map(flatten_join_result),
        ));
        Ok(())
    }

    /// Start the HTTP server. Handlers only read the published frame.
    fn create_server(&mut self, settings: &Settings) -> anyhow::Result<()> {
        let publisher = self
            .publisher
            .as_ref()
            .context("the renderer must be created before the HTTP server")?
            .clone();
        let asset_dir = settings.stream.asset_dir.clone();
        let template_path = asset_dir.join("index.html");
        let template = fs::read_to_string(&template_path)
            .with_context(|| format!("Unable to read page template {}", template_path.display()))?;
        let index_page =
            stream::render_index(&template, settings.camera.common().period_ms);
        let routes = stream::routes(publisher, index_page, asset_dir);
        let bind_address = SocketAddr::from(&settings.stream);
        info!(address = %bind_address, "starting HTTP server");
        let server = warp::serve(routes).bind(bind_address);
        self.tasks.push(Box::new(
            server.instrument(info_span!("http_server")).map(Ok),
        ));
        Ok(())
    }
}

impl Future for Pipeline {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        loop {
            match self.tasks.poll_next_unpin(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(None) => return Poll::Ready(()),
                Poll::Ready(Some(result)) => {
                    if let Err(err) = result {
                        error!(error = ?err, "pipeline task exited with an error");
                    }
                }
            }
        }
    }
}

impl TryFrom<Settings> for Pipeline {
    type Error = anyhow::Error;

    fn try_from(settings: Settings) -> anyhow::Result<Self> {
        let mut pipeline = Self {
            grid_source: None,
            publisher: None,
            tasks: TaskList::default(),
        };
        pipeline.create_sampler(&settings)?;
        pipeline.create_renderer(&settings.render)?;
        pipeline.create_server(&settings)?;
        Ok(pipeline)
    }
}
