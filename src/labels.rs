//! Class-name table indexed by class id.
//!
//! Labels come from a plain `labels.txt` with one name per line; line `i`
//! names class `i`. Lookups never fail: an id past the end of the table
//! resolves to [`UNKNOWN_LABEL`] so every detection can still be announced.

use crate::util::{DetectError, DetectResult};
use std::io::BufRead;
use std::path::Path;

/// Label used for class ids the table does not cover.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Ordered, index-stable list of class names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    /// Creates a table from names in class-id order.
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    /// Reads one label per line.
    ///
    /// Surrounding whitespace (including a trailing `\r`) is trimmed. Blank
    /// lines are kept so later ids stay aligned with the model's classes.
    pub fn from_reader<R: BufRead>(reader: R) -> DetectResult<Self> {
        let mut labels = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(|err| DetectError::LabelIo {
                reason: err.to_string(),
            })?;
            labels.push(line.trim().to_owned());
        }
        Ok(Self { labels })
    }

    /// Loads a label file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> DetectResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|err| DetectError::LabelIo {
            reason: format!("{}: {err}", path.display()),
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Returns the label for `class_id`, or [`UNKNOWN_LABEL`] if out of range.
    pub fn resolve(&self, class_id: usize) -> &str {
        self.labels
            .get(class_id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_LABEL)
    }

    /// Returns the number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true when the table has no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterates labels in class-id order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for LabelTable {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}
