//! Camera frames and model input tensors.
//!
//! `FrameView` is a borrowed view of an interleaved RGB8 frame with an explicit
//! row stride in bytes, so padded camera buffers can be used without copying.
//! [`to_input_tensor`] turns a frame into the square, `[0, 1]`-normalized
//! NHWC `f32` tensor a YOLO-style model expects.

use crate::util::{DetectError, DetectResult};

#[cfg(feature = "image-io")]
pub mod io;

/// Bytes per RGB8 pixel.
pub const CHANNELS: usize = 3;

/// Borrowed interleaved RGB8 frame.
#[derive(Copy, Clone, Debug)]
pub struct FrameView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> FrameView<'a> {
    /// Creates a tightly packed view (`stride == width * 3`).
    pub fn from_slice(data: &'a [u8], width: usize, height: usize) -> DetectResult<Self> {
        let stride = width
            .checked_mul(CHANNELS)
            .ok_or(DetectError::InvalidDimensions { width, height })?;
        Self::new(data, width, height, stride)
    }

    /// Creates a view whose rows start `stride` bytes apart.
    pub fn new(data: &'a [u8], width: usize, height: usize, stride: usize) -> DetectResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(DetectError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Frame width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the packed RGB bytes of row `y`.
    pub fn row(&self, y: usize) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width * CHANNELS)?;
        self.data.get(start..end)
    }

    /// Returns the RGB triple at `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width {
            return None;
        }
        let row = self.row(y)?;
        let base = x * CHANNELS;
        Some([row[base], row[base + 1], row[base + 2]])
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> DetectResult<usize> {
    if width == 0 || height == 0 {
        return Err(DetectError::InvalidDimensions { width, height });
    }
    let row_len = width
        .checked_mul(CHANNELS)
        .ok_or(DetectError::InvalidDimensions { width, height })?;
    if stride < row_len {
        return Err(DetectError::InvalidStride { row_len, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(row_len))
        .ok_or(DetectError::InvalidDimensions { width, height })
}

/// Owned, tightly packed RGB8 frame.
#[derive(Clone, Debug)]
pub struct OwnedFrame {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl OwnedFrame {
    /// Wraps a packed RGB8 buffer of exactly `width * height * 3` bytes.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> DetectResult<Self> {
        let needed = required_len(width, height, width.saturating_mul(CHANNELS))?;
        if data.len() != needed {
            return Err(DetectError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Borrows the frame as a view.
    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width * CHANNELS,
        }
    }

    /// Frame width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }
}

/// Maps a destination coordinate onto the source axis with half-pixel centers.
///
/// Returns the two neighbouring source indices and the weight of the second.
fn sample_axis(dst: usize, scale: f32, src_len: usize) -> (usize, usize, f32) {
    let src = ((dst as f32 + 0.5) * scale - 0.5).max(0.0);
    let lo = (src.floor() as usize).min(src_len - 1);
    let hi = (lo + 1).min(src_len - 1);
    (lo, hi, src - lo as f32)
}

/// Resizes `frame` bilinearly to `size x size` and scales bytes into `[0, 1]`.
///
/// The output is `size * size * 3` values in row-major HWC order, ready to be
/// fed as a `[1, size, size, 3]` tensor.
pub fn to_input_tensor(frame: FrameView<'_>, size: usize) -> DetectResult<Vec<f32>> {
    if size == 0 {
        return Err(DetectError::InvalidDimensions {
            width: size,
            height: size,
        });
    }

    let scale_x = frame.width() as f32 / size as f32;
    let scale_y = frame.height() as f32 / size as f32;
    let xs: Vec<_> = (0..size)
        .map(|x| sample_axis(x, scale_x, frame.width()))
        .collect();

    let mut out = Vec::with_capacity(size * size * CHANNELS);
    for y in 0..size {
        let (y0, y1, wy) = sample_axis(y, scale_y, frame.height());
        let row0 = frame.row(y0).ok_or(DetectError::InvalidDimensions {
            width: frame.width(),
            height: frame.height(),
        })?;
        let row1 = frame.row(y1).ok_or(DetectError::InvalidDimensions {
            width: frame.width(),
            height: frame.height(),
        })?;
        for &(x0, x1, wx) in &xs {
            for c in 0..CHANNELS {
                let p00 = row0[x0 * CHANNELS + c] as f32;
                let p01 = row0[x1 * CHANNELS + c] as f32;
                let p10 = row1[x0 * CHANNELS + c] as f32;
                let p11 = row1[x1 * CHANNELS + c] as f32;
                let top = p00 + (p01 - p00) * wx;
                let bottom = p10 + (p11 - p10) * wx;
                out.push((top + (bottom - top) * wy) / 255.0);
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{to_input_tensor, FrameView, OwnedFrame};
    use crate::DetectError;

    #[test]
    fn rejects_short_buffers_and_bad_stride() {
        let data = [0u8; 11];
        assert_eq!(
            FrameView::from_slice(&data, 2, 2).unwrap_err(),
            DetectError::BufferTooSmall { needed: 12, got: 11 }
        );
        assert_eq!(
            FrameView::new(&data, 2, 1, 5).unwrap_err(),
            DetectError::InvalidStride {
                row_len: 6,
                stride: 5
            }
        );
    }

    #[test]
    fn padded_rows_are_skipped() {
        // 1x2 frame with two padding bytes after each row.
        let data = [10u8, 20, 30, 0, 0, 40, 50, 60];
        let view = FrameView::new(&data, 1, 2, 5).unwrap();
        assert_eq!(view.pixel(0, 1), Some([40, 50, 60]));
        assert_eq!(view.pixel(1, 0), None);
    }

    #[test]
    fn uniform_frame_normalizes_to_constant() {
        let frame = OwnedFrame::new(vec![255u8; 4 * 6 * 3], 4, 6).unwrap();
        let tensor = to_input_tensor(frame.view(), 3).unwrap();
        assert_eq!(tensor.len(), 3 * 3 * 3);
        assert!(tensor.iter().all(|v| (v - 1.0).abs() < 1e-6));
    }

    #[test]
    fn identity_resize_keeps_pixels() {
        let data: Vec<u8> = (0u8..12).collect();
        let frame = OwnedFrame::new(data.clone(), 2, 2).unwrap();
        let tensor = to_input_tensor(frame.view(), 2).unwrap();
        for (value, byte) in tensor.iter().zip(data.iter()) {
            assert!((value - *byte as f32 / 255.0).abs() < 1e-6);
        }
    }
}
