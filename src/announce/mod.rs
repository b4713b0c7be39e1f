//! Spoken summaries and repeat suppression.
//!
//! A frame's detections are summarized as `"<count> <label>"` groups in
//! first-appearance order, e.g. `"2 person 1 chair"`. The summary is spoken
//! only when it differs from the last one spoken, so a static scene is
//! announced once rather than on every frame.

use crate::detection::Detection;

/// Per-frame summary of what was detected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Summary {
    /// The frame produced no detections.
    Empty,
    /// Count-per-label text for a non-empty frame.
    Text(String),
}

impl Summary {
    /// Returns the summary text, or `None` for an empty frame.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Summary::Empty => None,
            Summary::Text(text) => Some(text),
        }
    }
}

/// Builds the summary for a set of detections.
pub fn summarize(detections: &[Detection]) -> Summary {
    if detections.is_empty() {
        return Summary::Empty;
    }

    let mut groups: Vec<(&str, usize)> = Vec::new();
    for detection in detections {
        match groups
            .iter_mut()
            .find(|(label, _)| *label == detection.label)
        {
            Some((_, count)) => *count += 1,
            None => groups.push((detection.label.as_str(), 1)),
        }
    }

    let text = groups
        .iter()
        .map(|(label, count)| format!("{count} {label}"))
        .collect::<Vec<_>>()
        .join(" ");
    Summary::Text(text)
}

/// Whether the caller should speak this frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnnouncementDecision {
    /// Speak the given text.
    Announce(String),
    /// Nothing new to say.
    Silent,
}

impl AnnouncementDecision {
    /// Returns the text to speak, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            AnnouncementDecision::Announce(text) => Some(text),
            AnnouncementDecision::Silent => None,
        }
    }

    /// True for [`AnnouncementDecision::Announce`].
    pub fn is_announce(&self) -> bool {
        matches!(self, AnnouncementDecision::Announce(_))
    }
}

/// Last summary handed to the speech sink.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpokenState {
    last_summary: String,
}

impl SpokenState {
    /// Creates state with nothing spoken yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the most recently announced summary (empty before the first).
    pub fn last_summary(&self) -> &str {
        &self.last_summary
    }

    /// Decides whether `summary` should be spoken, recording it if so.
    ///
    /// Empty and blank summaries are never announced and leave the state as
    /// it was, so an object that briefly drops out and returns is not
    /// repeated.
    pub fn decide(&mut self, summary: &Summary) -> AnnouncementDecision {
        match summary {
            Summary::Text(text) if !text.trim().is_empty() && *text != self.last_summary => {
                self.last_summary.clone_from(text);
                AnnouncementDecision::Announce(text.clone())
            }
            _ => AnnouncementDecision::Silent,
        }
    }

    /// Forgets the last announcement.
    pub fn clear(&mut self) {
        self.last_summary.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{summarize, AnnouncementDecision, SpokenState, Summary};

    #[test]
    fn blank_text_is_not_announced() {
        let mut state = SpokenState::new();
        let decision = state.decide(&Summary::Text("  ".to_owned()));
        assert_eq!(decision, AnnouncementDecision::Silent);
        assert_eq!(state.last_summary(), "");
    }

    #[test]
    fn empty_detections_summarize_to_empty() {
        assert_eq!(summarize(&[]), Summary::Empty);
        assert_eq!(Summary::Empty.as_text(), None);
    }
}
