use std::time::Duration;

use crate::detection::domain::detection_frame::DetectionFrame;
use crate::detection::domain::detection_source::DetectionSource;
use crate::detection::domain::detection_throttle::DetectionThrottle;

/// Decorator that caps the event rate of an inner source.
///
/// Frames arriving sooner than the minimum detection interval after the last
/// forwarded frame are dropped, the same way the platform detector skips
/// work between detections. Errors from the inner source always pass through.
pub struct ThrottledDetectionSource {
    inner: Box<dyn DetectionSource>,
    throttle: DetectionThrottle,
}

impl ThrottledDetectionSource {
    pub fn new(inner: Box<dyn DetectionSource>, min_interval: Duration) -> Self {
        Self {
            inner,
            throttle: DetectionThrottle::new(min_interval),
        }
    }
}

impl DetectionSource for ThrottledDetectionSource {
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<DetectionFrame, Box<dyn std::error::Error>>> + '_> {
        let throttle = &mut self.throttle;
        Box::new(self.inner.frames().filter(move |result| match result {
            Ok(frame) => throttle.admit(frame.timestamp_ms),
            Err(_) => true,
        }))
    }
}
