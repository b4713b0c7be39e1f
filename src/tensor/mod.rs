//! Raw detector output as a borrowed row view.
//!
//! `RawOutput` is a zero-copy view over the flat `f32` buffer a YOLO-style
//! head produces for one frame. Each row holds `[cx, cy, w, h, objectness,
//! class_0, class_1, ...]`, so a row of width `W` carries `W - 5` class scores.
//! Row order carries no meaning and is not sorted by confidence.

use crate::util::{DetectError, DetectResult};

/// Number of leading geometry + objectness fields in every row.
pub const ROW_HEADER_LEN: usize = 5;

/// Index of the objectness field within a row.
pub const OBJECTNESS_IDX: usize = 4;

/// Borrowed view of one frame's detector output.
#[derive(Copy, Clone, Debug)]
pub struct RawOutput<'a> {
    data: &'a [f32],
    num_candidates: usize,
    row_width: usize,
}

impl<'a> RawOutput<'a> {
    /// Creates a view with an explicit `(num_candidates, row_width)` shape.
    ///
    /// Fails when rows are narrower than the five header fields or when the
    /// buffer length is not exactly `num_candidates * row_width`.
    pub fn new(data: &'a [f32], num_candidates: usize, row_width: usize) -> DetectResult<Self> {
        if row_width < ROW_HEADER_LEN {
            return Err(DetectError::RowTooNarrow { row_width });
        }
        let expected = num_candidates
            .checked_mul(row_width)
            .ok_or(DetectError::InvalidShape {
                reason: "candidate count times row width overflows",
            })?;
        if data.len() != expected {
            return Err(DetectError::ShapeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            num_candidates,
            row_width,
        })
    }

    /// Creates a view from a model's declared output shape.
    ///
    /// Accepts `[N, W]` or `[1, N, W]`; batched outputs are not supported.
    pub fn from_shape(data: &'a [f32], shape: &[usize]) -> DetectResult<Self> {
        match *shape {
            [num_candidates, row_width] => Self::new(data, num_candidates, row_width),
            [1, num_candidates, row_width] => Self::new(data, num_candidates, row_width),
            [_, _, _] => Err(DetectError::InvalidShape {
                reason: "batch dimension must be 1",
            }),
            _ => Err(DetectError::InvalidShape {
                reason: "expected rank 2 or rank 3 output",
            }),
        }
    }

    /// Returns the number of candidate rows.
    pub fn num_candidates(&self) -> usize {
        self.num_candidates
    }

    /// Returns the number of values per row.
    pub fn row_width(&self) -> usize {
        self.row_width
    }

    /// Returns the number of class scores per row.
    pub fn num_classes(&self) -> usize {
        self.row_width - ROW_HEADER_LEN
    }

    /// Returns the backing buffer.
    pub fn as_slice(&self) -> &'a [f32] {
        self.data
    }

    /// Returns row `idx` if it exists.
    pub fn row(&self, idx: usize) -> Option<Row<'a>> {
        if idx >= self.num_candidates {
            return None;
        }
        let start = idx * self.row_width;
        self.data.get(start..start + self.row_width).map(Row)
    }

    /// Iterates rows in buffer order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = Row<'a>> + 'a {
        self.data.chunks_exact(self.row_width).map(Row)
    }
}

/// One candidate row borrowed from a [`RawOutput`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Row<'a>(&'a [f32]);

impl<'a> Row<'a> {
    /// Normalized center x.
    pub fn center_x(&self) -> f32 {
        self.0[0]
    }

    /// Normalized center y.
    pub fn center_y(&self) -> f32 {
        self.0[1]
    }

    /// Normalized box width.
    pub fn width(&self) -> f32 {
        self.0[2]
    }

    /// Normalized box height.
    pub fn height(&self) -> f32 {
        self.0[3]
    }

    /// Class-agnostic objectness probability.
    pub fn objectness(&self) -> f32 {
        self.0[OBJECTNESS_IDX]
    }

    /// Per-class scores indexed by class id.
    pub fn class_scores(&self) -> &'a [f32] {
        &self.0[ROW_HEADER_LEN..]
    }

    /// Returns the full row.
    pub fn as_slice(&self) -> &'a [f32] {
        self.0
    }
}
