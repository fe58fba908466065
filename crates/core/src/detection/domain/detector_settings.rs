use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::shared::constants::DEFAULT_MIN_DETECTION_INTERVAL_MS;

/// Detection algorithm fidelity tradeoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectorMode {
    Fast,
    Accurate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandmarkMode {
    None,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationMode {
    None,
    All,
}

impl std::fmt::Display for DetectorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectorMode::Fast => write!(f, "Fast"),
            DetectorMode::Accurate => write!(f, "Accurate"),
        }
    }
}

/// Options handed to the upstream face detector.
///
/// `tracking` is a detector-internal continuity hint; it does not give this
/// crate a persistent face identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceDetectorSettings {
    pub mode: DetectorMode,
    #[serde(rename = "detectLandmarks")]
    pub landmarks: LandmarkMode,
    #[serde(rename = "runClassifications")]
    pub classifications: ClassificationMode,
    /// Milliseconds between detections.
    #[serde(rename = "minDetectionInterval")]
    pub min_detection_interval_ms: u64,
    pub tracking: bool,
}

impl Default for FaceDetectorSettings {
    fn default() -> Self {
        Self {
            mode: DetectorMode::Fast,
            landmarks: LandmarkMode::None,
            classifications: ClassificationMode::None,
            min_detection_interval_ms: DEFAULT_MIN_DETECTION_INTERVAL_MS,
            tracking: true,
        }
    }
}

impl FaceDetectorSettings {
    pub fn min_detection_interval(&self) -> Duration {
        Duration::from_millis(self.min_detection_interval_ms)
    }
}
