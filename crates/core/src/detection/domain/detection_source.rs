use crate::detection::domain::detection_frame::DetectionFrame;

/// Upstream face detector, seen as a stream of per-frame detection events.
///
/// The detector itself (live camera, vision service, recording) lives
/// outside this crate; implementations only adapt its output.
pub trait DetectionSource: Send {
    /// Returns an iterator over detection events in emission order.
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<DetectionFrame, Box<dyn std::error::Error>>> + '_>;
}
