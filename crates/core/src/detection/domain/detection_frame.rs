use serde::{Deserialize, Serialize};

use crate::detection::domain::detected_face::DetectedFace;

/// One detector output event: every face found in a single preview frame,
/// in the order the detector emitted them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionFrame {
    #[serde(default)]
    pub timestamp_ms: u64,
    pub faces: Vec<DetectedFace>,
}

impl DetectionFrame {
    pub fn new(timestamp_ms: u64, faces: Vec<DetectedFace>) -> Self {
        Self {
            timestamp_ms,
            faces,
        }
    }

    pub fn empty(timestamp_ms: u64) -> Self {
        Self::new(timestamp_ms, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}
