//! Screen region capture using the xcap library
//!
//! The snapshot is synchronous: it blocks the calling thread for as long as
//! the OS takes to hand back the monitor's pixels.

use std::time::Instant;

use image::{imageops, DynamicImage, RgbImage, RgbaImage};
use log::{debug, info};
use thiserror::Error;
use xcap::{Monitor, XCapError};

use super::selection::Rectangle;

/// RGB pixels of one captured region
#[derive(Clone, Debug)]
pub struct CapturedImage {
    pixels: RgbImage,
}

impl CapturedImage {
    pub fn new(pixels: RgbImage) -> Self {
        Self { pixels }
    }

    /// An image with the given size and no content, used for degenerate regions
    pub fn blank(width: u32, height: u32) -> Self {
        Self::new(RgbImage::new(width, height))
    }

    pub fn from_rgba(image: RgbaImage) -> Self {
        Self::new(DynamicImage::ImageRgba8(image).to_rgb8())
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }
}

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("No monitor found at ({x}, {y}): {source}")]
    MonitorLookup {
        x: i32,
        y: i32,
        #[source]
        source: XCapError,
    },

    #[error("Screen capture failed: {0}")]
    Os(#[from] XCapError),

    #[error("Region {0:?} lies outside the captured monitor")]
    OffMonitor(Rectangle),
}

/// Anything that can turn a screen rectangle into pixels
pub trait FrameGrabber {
    fn capture(&self, rect: Rectangle) -> Result<CapturedImage, CaptureError>;
}

/// Grabs pixels from the monitor that contains the rectangle's origin
#[derive(Default, Clone, Copy, Debug)]
pub struct XcapGrabber;

impl FrameGrabber for XcapGrabber {
    fn capture(&self, rect: Rectangle) -> Result<CapturedImage, CaptureError> {
        let rect = rect.normalized();
        if rect.is_empty() {
            debug!(
                "Degenerate region {:?}, returning a {}x{} image",
                rect,
                rect.width(),
                rect.height()
            );
            return Ok(CapturedImage::blank(rect.width(), rect.height()));
        }

        let start = Instant::now();
        let (x, y) = rect.origin();
        let monitor = Monitor::from_point(x, y)
            .map_err(|source| CaptureError::MonitorLookup { x, y, source })?;
        let monitor_origin = (monitor.x()?, monitor.y()?);

        let frame = monitor.capture_image()?;
        let (crop_x, crop_y, crop_w, crop_h) =
            region_on_monitor(rect, monitor_origin, (frame.width(), frame.height()))
                .ok_or(CaptureError::OffMonitor(rect))?;

        let region = imageops::crop_imm(&frame, crop_x, crop_y, crop_w, crop_h).to_image();

        info!(
            "Captured {}x{} at ({}, {}) in {}ms",
            crop_w,
            crop_h,
            x,
            y,
            start.elapsed().as_millis()
        );

        Ok(CapturedImage::from_rgba(region))
    }
}

/// Translate a screen rectangle into the monitor frame and clamp it to the frame bounds
fn region_on_monitor(
    rect: Rectangle,
    monitor_origin: (i32, i32),
    frame_size: (u32, u32),
) -> Option<(u32, u32, u32, u32)> {
    let (x, y) = rect.origin();
    let local_x = u32::try_from(x - monitor_origin.0).ok()?;
    let local_y = u32::try_from(y - monitor_origin.1).ok()?;
    let (frame_w, frame_h) = frame_size;

    if local_x >= frame_w || local_y >= frame_h {
        return None;
    }

    let width = rect.width().min(frame_w - local_x);
    let height = rect.height().min(frame_h - local_y);
    Some((local_x, local_y, width, height))
}
