use serde::{Deserialize, Serialize};

use crate::shared::geometry::Bounds;

/// Classification probabilities, present only when the detector runs
/// classifications.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceClassifications {
    pub smiling_probability: f64,
    pub left_eye_open_probability: f64,
    pub right_eye_open_probability: f64,
}

/// One face region reported by the detector for a single frame.
///
/// `face_id` is the detector's own tracking hint. It is carried for
/// diagnostics only: the overlay never keys anything on it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedFace {
    pub bounds: Bounds,
    #[serde(default, rename = "faceID", skip_serializing_if = "Option::is_none")]
    pub face_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaw_angle: Option<f64>,
    #[serde(flatten)]
    pub classifications: Option<FaceClassifications>,
}

impl DetectedFace {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            face_id: None,
            roll_angle: None,
            yaw_angle: None,
            classifications: None,
        }
    }

    pub fn with_face_id(mut self, face_id: u32) -> Self {
        self.face_id = Some(face_id);
        self
    }
}
