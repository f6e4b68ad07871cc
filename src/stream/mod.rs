// SPDX-License-Identifier: GPL-3.0-or-later
use http::Response;
use hyper::Body;
use warp::{Filter, Rejection, Reply};

use std::path::PathBuf;

mod frame;
mod settings;

pub(crate) use frame::FramePublisher;
pub(crate) use settings::StreamSettings;

/// Substitute the frame polling interval into the page template.
///
/// The template is plain HTML with a `{{interval}}` placeholder; anything fancier than
/// that is not needed for a single page with a single parameter.
pub(crate) fn render_index(template: &str, interval_ms: u64) -> String {
    template.replace("{{interval}}", &interval_ms.to_string())
}

/// The complete HTTP surface: the viewer page, the frame endpoint, and static assets.
///
/// Handlers only ever read the published frame. Rendering happens in the process-wide
/// pipeline regardless of how many clients are connected.
pub(crate) fn routes(
    publisher: FramePublisher,
    index_page: String,
    asset_dir: PathBuf,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let index = warp::path::end().map(move || warp::reply::html(index_page.clone()));
    let frame = warp::path("frame").and(warp::path::end()).map(move || {
        Response::builder()
            .status(200)
            .header("Cache-Control", "no-cache")
            .body(Body::from(publisher.latest()))
    });
    let assets = warp::path("public").and(warp::fs::dir(asset_dir));
    index.or(frame).or(assets)
}
