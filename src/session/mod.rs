//! Per-frame orchestration and cross-frame announcement state.
//!
//! A [`DetectionSession`] runs tensor → candidates → boxes → NMS → summary for
//! each frame and keeps the last spoken summary between frames. Every failure
//! is confined to the frame that caused it and reported on the
//! [`FrameReport`]; the session itself never enters an error state.

use crate::announce::{summarize, AnnouncementDecision, SpokenState, Summary};
use crate::candidate::filter_candidates;
use crate::config::DetectConfig;
use crate::detection::decode::decode_detections;
use crate::detection::nms::nms;
use crate::detection::DetectionSet;
use crate::input::{to_input_tensor, FrameView};
use crate::labels::LabelTable;
use crate::provider::InferenceModel;
use crate::tensor::RawOutput;
use crate::trace::{trace_event, trace_span, trace_warn};
use crate::util::{DetectError, DetectResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

mod shared;

pub use shared::SharedSession;

/// Outcome of one frame, as shown on the status line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// At least one object survived; carries the frame's summary.
    Detected { summary: String },
    /// Decoding succeeded but nothing survived.
    NoObjects,
    /// The session was paused and the frame was skipped.
    Paused,
    /// The frame could not be decoded.
    Failed { reason: String },
}

impl FrameStatus {
    /// Human-readable status line.
    pub fn message(&self) -> String {
        match self {
            FrameStatus::Detected { summary } => summary.clone(),
            FrameStatus::NoObjects => "No objects detected.".to_owned(),
            FrameStatus::Paused => "Detection paused.".to_owned(),
            FrameStatus::Failed { reason } => format!("Detection failed: {reason}"),
        }
    }

    /// True for [`FrameStatus::Failed`].
    pub fn is_failure(&self) -> bool {
        matches!(self, FrameStatus::Failed { .. })
    }
}

/// Everything the caller needs after one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameReport {
    /// Surviving detections in NMS accept order.
    pub detections: DetectionSet,
    /// Whether to hand a summary to the speech sink.
    pub decision: AnnouncementDecision,
    /// Status for the UI.
    pub status: FrameStatus,
}

impl FrameReport {
    fn paused() -> Self {
        Self {
            detections: DetectionSet::new(),
            decision: AnnouncementDecision::Silent,
            status: FrameStatus::Paused,
        }
    }

    fn failed(reason: String) -> Self {
        Self {
            detections: DetectionSet::new(),
            decision: AnnouncementDecision::Silent,
            status: FrameStatus::Failed { reason },
        }
    }
}

/// Cloneable pause switch shared between the session and a UI thread.
#[derive(Clone, Debug, Default)]
pub struct PauseHandle(Arc<AtomicBool>);

impl PauseHandle {
    /// Stops processing until [`resume`](Self::resume) is called.
    pub fn pause(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Resumes processing.
    pub fn resume(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    /// Returns the current flag.
    pub fn is_paused(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Detection pipeline plus the state needed to avoid repeating itself.
///
/// Calls take `&mut self`, so one session processes at most one frame at a
/// time. Use [`SharedSession`] when frames arrive on several threads.
#[derive(Debug)]
pub struct DetectionSession {
    cfg: DetectConfig,
    labels: LabelTable,
    spoken: SpokenState,
    pause: PauseHandle,
}

impl DetectionSession {
    /// Creates a session after validating `cfg`.
    pub fn new(cfg: DetectConfig, labels: LabelTable) -> DetectResult<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            labels,
            spoken: SpokenState::new(),
            pause: PauseHandle::default(),
        })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &DetectConfig {
        &self.cfg
    }

    /// Returns the label table.
    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Returns a handle that pauses or resumes this session.
    pub fn pause_handle(&self) -> PauseHandle {
        self.pause.clone()
    }

    /// Returns true while frames are being skipped.
    pub fn is_paused(&self) -> bool {
        self.pause.is_paused()
    }

    /// Returns the last summary handed to the speech sink.
    pub fn last_summary(&self) -> &str {
        self.spoken.last_summary()
    }

    /// Forgets the last announcement, e.g. when the detection screen closes.
    pub fn reset(&mut self) {
        self.spoken.clear();
    }

    /// Processes one frame of raw model output.
    ///
    /// `shape` is the model's declared output shape (`[N, W]` or `[1, N, W]`)
    /// and the frame dimensions are those of the camera image the boxes are
    /// mapped onto. The tensor is only borrowed for the duration of the call.
    pub fn process_frame(
        &mut self,
        data: &[f32],
        shape: &[usize],
        frame_width: u32,
        frame_height: u32,
    ) -> FrameReport {
        if self.is_paused() {
            return FrameReport::paused();
        }
        match RawOutput::from_shape(data, shape) {
            Ok(raw) => self.process_raw(raw, frame_width, frame_height),
            Err(err) => self.fail(err),
        }
    }

    /// Processes an already validated output view.
    pub fn process_raw(
        &mut self,
        raw: RawOutput<'_>,
        frame_width: u32,
        frame_height: u32,
    ) -> FrameReport {
        if self.is_paused() {
            return FrameReport::paused();
        }
        let _span = trace_span!(
            "process_frame",
            candidates = raw.num_candidates(),
            classes = raw.num_classes()
        )
        .entered();

        let detections = match self.detect(raw, frame_width, frame_height) {
            Ok(detections) => detections,
            Err(err) => return self.fail(err),
        };

        let summary = summarize(&detections);
        let decision = self.spoken.decide(&summary);
        let status = match summary {
            Summary::Empty => FrameStatus::NoObjects,
            Summary::Text(summary) => FrameStatus::Detected { summary },
        };
        trace_event!("frame_done", announce = decision.is_announce());

        FrameReport {
            detections,
            decision,
            status,
        }
    }

    /// Preprocesses `frame`, runs `model` and decodes its output.
    ///
    /// Boxes are mapped onto the frame's own dimensions. Preprocessing and
    /// inference errors are reported like decode failures.
    pub fn process_image<M: InferenceModel + ?Sized>(
        &mut self,
        model: &mut M,
        frame: FrameView<'_>,
    ) -> FrameReport {
        if self.is_paused() {
            return FrameReport::paused();
        }
        let (Ok(frame_width), Ok(frame_height)) =
            (u32::try_from(frame.width()), u32::try_from(frame.height()))
        else {
            return self.fail(DetectError::InvalidDimensions {
                width: frame.width(),
                height: frame.height(),
            });
        };

        let output = match to_input_tensor(frame, self.cfg.input_size)
            .and_then(|input| model.infer(&input, self.cfg.input_size))
        {
            Ok(output) => output,
            Err(err) => return self.fail(err),
        };
        match output.view() {
            Ok(raw) => self.process_raw(raw, frame_width, frame_height),
            Err(err) => self.fail(err),
        }
    }

    fn detect(
        &self,
        raw: RawOutput<'_>,
        frame_width: u32,
        frame_height: u32,
    ) -> DetectResult<DetectionSet> {
        let candidates = self.filter(raw);
        trace_event!("candidates_filtered", kept = candidates.len());

        let decoded = decode_detections(&candidates, &self.labels, frame_width, frame_height)?;
        trace_event!("boxes_decoded", kept = decoded.len());

        let kept = nms(decoded, self.cfg.iou_threshold);
        trace_event!("nms_done", kept = kept.len());
        Ok(kept)
    }

    #[cfg(feature = "rayon")]
    fn filter(&self, raw: RawOutput<'_>) -> Vec<crate::candidate::Candidate> {
        if self.cfg.parallel {
            crate::candidate::rayon::filter_candidates_par(raw, self.cfg.confidence_threshold)
        } else {
            filter_candidates(raw, self.cfg.confidence_threshold)
        }
    }

    #[cfg(not(feature = "rayon"))]
    fn filter(&self, raw: RawOutput<'_>) -> Vec<crate::candidate::Candidate> {
        filter_candidates(raw, self.cfg.confidence_threshold)
    }

    fn fail(&self, err: DetectError) -> FrameReport {
        let reason = err.to_string();
        trace_warn!("frame_failed", reason = reason.as_str());
        FrameReport::failed(reason)
    }
}
