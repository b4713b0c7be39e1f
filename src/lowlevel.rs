//! Individual pipeline stages for custom frame loops.
//!
//! Most callers should use [`DetectionSession`](crate::DetectionSession),
//! which chains these stages and keeps announcement state. The functions here
//! are stateless and can be recombined, e.g. to run NMS on boxes from another
//! source.

pub use crate::announce::summarize;
pub use crate::candidate::{filter_candidates, filter_row, Candidate};
#[cfg(feature = "rayon")]
pub use crate::candidate::rayon::filter_candidates_par;
pub use crate::detection::decode::{decode_box, decode_detections};
pub use crate::detection::nms::nms;
pub use crate::input::to_input_tensor;
pub use crate::tensor::{Row, OBJECTNESS_IDX, ROW_HEADER_LEN};
