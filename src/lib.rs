//! visionassist decodes object-detector output into stable spoken summaries.
//!
//! One frame of raw YOLO-style output flows through confidence filtering,
//! pixel-space box decoding, label-aware non-maximum suppression and a
//! repeat-suppressing announcer. [`DetectionSession`] drives the whole
//! pipeline and reports per-frame outcomes without ever failing the session.
//! Row filtering can run in parallel via the `rayon` feature.

pub mod announce;
pub mod candidate;
pub mod config;
pub mod detection;
pub mod input;
pub mod labels;
pub mod lowlevel;
pub mod provider;
pub mod session;
pub mod tensor;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use input::io;

pub use announce::{AnnouncementDecision, SpokenState, Summary};
pub use config::DetectConfig;
pub use detection::{iou, Detection, DetectionSet, PixelRect};
pub use input::{FrameView, OwnedFrame};
pub use labels::{LabelTable, UNKNOWN_LABEL};
pub use provider::{InferenceModel, ModelOutput};
pub use session::{DetectionSession, FrameReport, FrameStatus, PauseHandle, SharedSession};
pub use tensor::RawOutput;
pub use util::{DetectError, DetectResult};
