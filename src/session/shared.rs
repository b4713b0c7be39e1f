//! Thread-safe session wrapper with keep-only-latest frame dropping.
//!
//! Camera callbacks may deliver frames faster than they are decoded. Instead
//! of queueing them, [`SharedSession::try_process_frame`] refuses a frame
//! while another one is in flight and the caller releases it immediately.

use crate::input::FrameView;
use crate::provider::InferenceModel;
use crate::session::{DetectionSession, FrameReport, PauseHandle};
use crate::trace::trace_event;
use std::sync::{Arc, Mutex, MutexGuard, TryLockError};

/// Cloneable handle to one [`DetectionSession`].
#[derive(Clone, Debug)]
pub struct SharedSession {
    inner: Arc<Mutex<DetectionSession>>,
    pause: PauseHandle,
}

impl SharedSession {
    /// Wraps a session for use from several threads.
    pub fn new(session: DetectionSession) -> Self {
        let pause = session.pause_handle();
        Self {
            inner: Arc::new(Mutex::new(session)),
            pause,
        }
    }

    /// Returns the pause switch without taking the session lock.
    pub fn pause_handle(&self) -> PauseHandle {
        self.pause.clone()
    }

    /// Processes a frame unless another frame is already being processed.
    ///
    /// Returns `None` when the frame was dropped.
    pub fn try_process_frame(
        &self,
        data: &[f32],
        shape: &[usize],
        frame_width: u32,
        frame_height: u32,
    ) -> Option<FrameReport> {
        let mut session = self.try_acquire()?;
        Some(session.process_frame(data, shape, frame_width, frame_height))
    }

    /// Runs inference and decoding unless another frame is in flight.
    pub fn try_process_image<M: InferenceModel + ?Sized>(
        &self,
        model: &mut M,
        frame: FrameView<'_>,
    ) -> Option<FrameReport> {
        let mut session = self.try_acquire()?;
        Some(session.process_image(model, frame))
    }

    /// Clears the spoken state, waiting for any in-flight frame to finish.
    pub fn reset(&self) {
        self.lock().reset();
    }

    /// Returns a copy of the last announced summary.
    pub fn last_summary(&self) -> String {
        self.lock().last_summary().to_owned()
    }

    fn lock(&self) -> MutexGuard<'_, DetectionSession> {
        // Frame processing leaves no partial state behind, so a poisoned lock
        // is still consistent.
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn try_acquire(&self) -> Option<MutexGuard<'_, DetectionSession>> {
        match self.inner.try_lock() {
            Ok(guard) => Some(guard),
            Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => {
                trace_event!("frame_dropped", busy = true);
                None
            }
        }
    }
}
