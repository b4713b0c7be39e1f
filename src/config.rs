//! Detection thresholds and model input settings.

use crate::util::{DetectError, DetectResult};

/// Configuration shared by every stage of frame processing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectConfig {
    /// Minimum `objectness * class_score` for a candidate to survive, in (0, 1].
    pub confidence_threshold: f32,
    /// Same-label overlap above which the smaller box is suppressed, in [0, 1].
    pub iou_threshold: f32,
    /// Square edge length, in pixels, of the model's input tensor.
    pub input_size: usize,
    /// Filter candidate rows in parallel (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.5,
            iou_threshold: 0.45,
            input_size: 320,
            parallel: false,
        }
    }
}

impl DetectConfig {
    /// Checks that every value is within its documented range.
    pub fn validate(&self) -> DetectResult<()> {
        if !(self.confidence_threshold > 0.0 && self.confidence_threshold <= 1.0) {
            return Err(DetectError::InvalidConfig(
                "confidence_threshold must be in (0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&self.iou_threshold) {
            return Err(DetectError::InvalidConfig("iou_threshold must be in [0, 1]"));
        }
        if self.input_size == 0 {
            return Err(DetectError::InvalidConfig("input_size must be positive"));
        }
        if self.parallel && !cfg!(feature = "rayon") {
            return Err(DetectError::InvalidConfig(
                "parallel requires the rayon feature",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::DetectConfig;
    use crate::DetectError;

    #[test]
    fn defaults_are_valid() {
        let cfg = DetectConfig::default();
        assert_eq!(cfg.confidence_threshold, 0.5);
        assert_eq!(cfg.iou_threshold, 0.45);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_thresholds() {
        let zero = DetectConfig {
            confidence_threshold: 0.0,
            ..DetectConfig::default()
        };
        assert!(matches!(zero.validate(), Err(DetectError::InvalidConfig(_))));

        let nan = DetectConfig {
            iou_threshold: f32::NAN,
            ..DetectConfig::default()
        };
        assert!(nan.validate().is_err());

        let edge = DetectConfig {
            confidence_threshold: 1.0,
            iou_threshold: 0.0,
            ..DetectConfig::default()
        };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn rejects_zero_input_size() {
        let cfg = DetectConfig {
            input_size: 0,
            ..DetectConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(DetectError::InvalidConfig("input_size must be positive"))
        );
    }
}
