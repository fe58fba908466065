use crate::detection::domain::detection_source::DetectionSource;
use crate::overlay::domain::face_overlay_tracker::FaceOverlayTracker;
use crate::overlay::domain::overlay_renderer::OverlayRenderer;
use crate::pipeline::session_logger::SessionLogger;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub frames: usize,
    pub frames_with_face: usize,
    /// Faces detected but not chosen for the overlay.
    pub ignored_faces: usize,
    /// Empty -> Box transitions.
    pub overlay_shown: usize,
    /// Box -> Empty transitions.
    pub overlay_hidden: usize,
}

/// Replays detection events through the tracker: source → track → render.
pub struct ReplaySessionUseCase {
    source: Box<dyn DetectionSource>,
    tracker: FaceOverlayTracker,
    renderer: Box<dyn OverlayRenderer>,
    logger: Box<dyn SessionLogger>,
}

impl ReplaySessionUseCase {
    pub fn new(
        source: Box<dyn DetectionSource>,
        tracker: FaceOverlayTracker,
        renderer: Box<dyn OverlayRenderer>,
        logger: Box<dyn SessionLogger>,
    ) -> Self {
        Self {
            source,
            tracker,
            renderer,
            logger,
        }
    }

    pub fn execute(&mut self) -> Result<ReplaySummary, Box<dyn std::error::Error>> {
        let mut summary = ReplaySummary::default();
        let mut previous = self.tracker.state();

        self.logger.info("Replaying detection events");
        for frame in self.source.frames() {
            let frame = frame?;
            let state = self.tracker.update(&frame);

            summary.frames += 1;
            if !frame.faces.is_empty() {
                summary.frames_with_face += 1;
                if state.as_box().is_some() {
                    summary.ignored_faces += frame.faces.len() - 1;
                }
            }
            match (previous.is_empty(), state.is_empty()) {
                (true, false) => summary.overlay_shown += 1,
                (false, true) => summary.overlay_hidden += 1,
                _ => {}
            }
            previous = state;

            self.renderer.render(frame.timestamp_ms, &state)?;
            self.logger.frame(frame.timestamp_ms, frame.faces.len());
        }

        self.logger
            .metric("ignored_faces", summary.ignored_faces as f64);
        self.logger.summary();
        log::debug!("Replay finished: {summary:?}");

        Ok(summary)
    }
}
