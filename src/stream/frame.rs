// SPDX-License-Identifier: GPL-3.0-or-later
use anyhow::Context as _;
use bytes::{BufMut, Bytes, BytesMut};
use image::codecs::png::PngEncoder;
use image::{ColorType, RgbaImage};
use tokio::sync::watch;
use tracing::trace;

use std::sync::{Arc, Mutex};

type WriteChannel = watch::Sender<Bytes>;
type ReadChannel = watch::Receiver<Bytes>;

pub(crate) const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// The hand-off point between the render loop and HTTP clients.
///
/// A watch channel holds the newest encoded frame; publishing swaps the whole value, so a
/// reader either sees the previous frame or the new one, never a torn mix of the two. No
/// history is kept. Before the first frame is published, readers get the bare data-URL
/// prefix, which a browser treats as an empty image.
#[derive(Clone, Debug)]
pub(crate) struct FramePublisher {
    rx_handle: ReadChannel,
    tx_handle: Arc<Mutex<WriteChannel>>,
}

impl FramePublisher {
    pub(crate) fn new() -> Self {
        let (tx, rx) = watch::channel(Bytes::from_static(DATA_URL_PREFIX.as_bytes()));
        Self {
            rx_handle: rx,
            tx_handle: Arc::new(Mutex::new(tx)),
        }
    }

    /// Encode a rendered image as a PNG data URL and swap it into the shared slot.
    pub(crate) fn publish(&self, image: &RgbaImage) -> anyhow::Result<()> {
        let png = encode_png(image)?;
        let mut data_url = String::with_capacity(DATA_URL_PREFIX.len() + (png.len() + 2) / 3 * 4);
        data_url.push_str(DATA_URL_PREFIX);
        base64::encode_config_buf(&png, base64::STANDARD, &mut data_url);
        trace!(encoded_length = data_url.len(), "publishing frame");
        self.tx_handle
            .lock()
            .unwrap()
            .send(Bytes::from(data_url))
            .context("No frame readers left")
    }

    /// The most recently published frame.
    pub(crate) fn latest(&self) -> Bytes {
        self.rx_handle.borrow().clone()
    }
}

fn encode_png(image: &RgbaImage) -> anyhow::Result<Bytes> {
    let mut png_buf = BytesMut::new().writer();
    PngEncoder::new(&mut png_buf)
        .encode(
            image.as_raw(),
            image.width(),
            image.height(),
            ColorType::Rgba8,
        )
        .context("Unable to encode frame as PNG")?;
    Ok(png_buf.into_inner().freeze())
}

#[cfg(test)]
mod publisher_test {
    use image::{Rgba, RgbaImage};

    use super::{FramePublisher, DATA_URL_PREFIX};

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn test_image(shade: u8) -> RgbaImage {
        RgbaImage::from_pixel(8, 8, Rgba([shade, 0, 0, 255]))
    }

    #[test]
    fn placeholder_before_first_frame() {
        let publisher = FramePublisher::new();
        assert_eq!(publisher.latest(), DATA_URL_PREFIX.as_bytes());
    }

    #[test]
    fn published_frame_is_a_png_data_url() {
        let publisher = FramePublisher::new();
        publisher.publish(&test_image(200)).unwrap();
        let latest = publisher.latest();
        assert!(latest.starts_with(DATA_URL_PREFIX.as_bytes()));
        let decoded = base64::decode(&latest[DATA_URL_PREFIX.len()..]).unwrap();
        assert_eq!(decoded[..8], PNG_MAGIC);
    }

    #[test]
    fn newest_frame_wins() {
        let publisher = FramePublisher::new();
        publisher.publish(&test_image(10)).unwrap();
        let first = publisher.latest();
        publisher.publish(&test_image(250)).unwrap();
        let second = publisher.latest();
        assert_ne!(first, second);
        // Re-publishing the same image reproduces the same encoding.
        publisher.publish(&test_image(10)).unwrap();
        assert_eq!(publisher.latest(), first);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_readers_see_whole_frames() {
        let publisher = FramePublisher::new();
        // Precompute the only two values any reader should ever observe.
        publisher.publish(&test_image(0)).unwrap();
        let frame_a = publisher.latest();
        publisher.publish(&test_image(255)).unwrap();
        let frame_b = publisher.latest();

        let reader = publisher.clone();
        let expected = (frame_a.clone(), frame_b.clone());
        let read_task = tokio::spawn(async move {
            for _ in 0..500 {
                let seen = reader.latest();
                assert!(
                    seen == expected.0 || seen == expected.1,
                    "reader observed a frame that was never published"
                );
                tokio::task::yield_now().await;
            }
        });
        let writer = publisher.clone();
        let write_task = tokio::spawn(async move {
            for i in 0..500u32 {
                let image = if i % 2 == 0 {
                    test_image(0)
                } else {
                    test_image(255)
                };
                writer.publish(&image).unwrap();
                tokio::task::yield_now().await;
            }
        });
        read_task.await.unwrap();
        write_task.await.unwrap();
    }
}
