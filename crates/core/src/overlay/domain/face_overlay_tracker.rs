use crate::detection::domain::detection_frame::DetectionFrame;
use crate::overlay::domain::coordinate_mapper::{CoordinateMapper, IdentityMapper};
use crate::overlay::domain::face_selector::{FaceSelector, FirstFaceSelector};
use crate::overlay::domain::overlay_state::{OverlayBox, OverlayState};

/// Reduces a stream of detection events to the single overlay box.
///
/// The state always reflects only the most recent event: no smoothing, no
/// hold-over when a face disappears. With the default selector and mapper an
/// event with faces yields a box equal to the first face's bounds.
pub struct FaceOverlayTracker {
    selector: Box<dyn FaceSelector>,
    mapper: Box<dyn CoordinateMapper>,
    state: OverlayState,
}

impl FaceOverlayTracker {
    pub fn new(selector: Box<dyn FaceSelector>, mapper: Box<dyn CoordinateMapper>) -> Self {
        Self {
            selector,
            mapper,
            state: OverlayState::Empty,
        }
    }

    pub fn update(&mut self, frame: &DetectionFrame) -> OverlayState {
        self.state = reduce(frame, &*self.selector, &*self.mapper);
        self.state
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }
}

impl Default for FaceOverlayTracker {
    fn default() -> Self {
        Self::new(Box::new(FirstFaceSelector), Box::new(IdentityMapper))
    }
}

/// Overlay for a single event: first face, detector coordinates.
pub fn overlay_for(frame: &DetectionFrame) -> OverlayState {
    reduce(frame, &FirstFaceSelector, &IdentityMapper)
}

fn reduce(
    frame: &DetectionFrame,
    selector: &dyn FaceSelector,
    mapper: &dyn CoordinateMapper,
) -> OverlayState {
    match selector.select(&frame.faces) {
        Some(face) => OverlayState::Box(OverlayBox::from(mapper.map(face.bounds))),
        None => OverlayState::Empty,
    }
}
