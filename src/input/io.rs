//! Loading frames through the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::input::{FrameView, OwnedFrame};
use crate::util::{DetectError, DetectResult};
use std::path::Path;

/// Borrows an `image` RGB buffer as a frame view.
pub fn view_from_rgb_image(img: &image::RgbImage) -> DetectResult<FrameView<'_>> {
    FrameView::from_slice(img.as_raw(), img.width() as usize, img.height() as usize)
}

/// Converts any decoded image to an owned RGB8 frame.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> DetectResult<OwnedFrame> {
    let rgb = img.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    OwnedFrame::new(rgb.into_raw(), width, height)
}

/// Decodes an image file into an RGB8 frame.
pub fn load_rgb_frame<P: AsRef<Path>>(path: P) -> DetectResult<OwnedFrame> {
    let img = image::open(path).map_err(|err| DetectError::ImageIo {
        reason: err.to_string(),
    })?;
    owned_from_dynamic_image(&img)
}
