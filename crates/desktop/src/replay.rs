use std::collections::VecDeque;
use std::time::{Duration, Instant};

use facecam_core::detection::domain::detection_frame::DetectionFrame;
use facecam_core::detection::domain::detection_throttle::DetectionThrottle;
use facecam_core::overlay::domain::face_overlay_tracker::FaceOverlayTracker;
use facecam_core::overlay::domain::overlay_state::OverlayState;

/// Recorded detection events played back against the wall clock.
pub struct Replay {
    pending: VecDeque<DetectionFrame>,
    started: Instant,
    first_timestamp_ms: u64,
}

impl Replay {
    /// Events without distinct timestamps are spaced `pace` apart.
    pub fn new(frames: Vec<DetectionFrame>, pace: Duration, started: Instant) -> Self {
        let pending: VecDeque<DetectionFrame> = pace_untimed(frames, pace).into();
        let first_timestamp_ms = pending.front().map(|f| f.timestamp_ms).unwrap_or(0);
        Self {
            pending,
            started,
            first_timestamp_ms,
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns every event whose offset from the first event has
    /// elapsed by `now`.
    pub fn due(&mut self, now: Instant) -> Vec<DetectionFrame> {
        let elapsed_ms = now.saturating_duration_since(self.started).as_millis() as u64;
        let mut due = Vec::new();
        while let Some(next) = self.pending.front() {
            if next.timestamp_ms.saturating_sub(self.first_timestamp_ms) > elapsed_ms {
                break;
            }
            match self.pending.pop_front() {
                Some(frame) => due.push(frame),
                None => break,
            }
        }
        due
    }
}

/// Runs due events through the throttle and the tracker. Returns the last
/// overlay produced, or `None` when every event was throttled.
pub fn apply(
    frames: &[DetectionFrame],
    throttle: &mut DetectionThrottle,
    tracker: &mut FaceOverlayTracker,
) -> Option<OverlayState> {
    let mut latest = None;
    for frame in frames {
        if throttle.admit(frame.timestamp_ms) {
            latest = Some(tracker.update(frame));
        }
    }
    latest
}

/// A recording whose events all share one timestamp (typically omitted and
/// defaulted to 0) is re-stamped `first + index * pace`.
fn pace_untimed(mut frames: Vec<DetectionFrame>, pace: Duration) -> Vec<DetectionFrame> {
    let Some(base) = frames.first().map(|f| f.timestamp_ms) else {
        return frames;
    };
    if frames.len() < 2 || frames.iter().any(|f| f.timestamp_ms != base) {
        return frames;
    }
    let step = (pace.as_millis() as u64).max(1);
    for (i, frame) in frames.iter_mut().enumerate() {
        frame.timestamp_ms = base + i as u64 * step;
    }
    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use facecam_core::detection::domain::detected_face::DetectedFace;
    use facecam_core::overlay::domain::overlay_state::OverlayBox;
    use facecam_core::shared::geometry::Bounds;

    const PACE: Duration = Duration::from_millis(100);

    fn face_a() -> DetectedFace {
        DetectedFace::new(Bounds::new(10.0, 20.0, 100.0, 150.0))
    }

    fn untimed(json: &str) -> Vec<DetectionFrame> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_untimed_recording_is_paced_by_index() {
        let frames = untimed(r#"[{"faces": []}, {"faces": []}, {"faces": []}]"#);
        let replay = Replay::new(frames, PACE, Instant::now());

        let stamps: Vec<u64> = replay.pending.iter().map(|f| f.timestamp_ms).collect();
        assert_eq!(stamps, vec![0, 100, 200]);
    }

    #[test]
    fn test_timestamped_recording_is_untouched() {
        let frames = vec![
            DetectionFrame::empty(5),
            DetectionFrame::empty(40),
            DetectionFrame::empty(40),
        ];
        let replay = Replay::new(frames, PACE, Instant::now());

        let stamps: Vec<u64> = replay.pending.iter().map(|f| f.timestamp_ms).collect();
        assert_eq!(stamps, vec![5, 40, 40]);
    }

    #[test]
    fn test_due_follows_elapsed_time() {
        let start = Instant::now();
        let mut replay = Replay::new(
            vec![
                DetectionFrame::empty(1000),
                DetectionFrame::empty(1050),
                DetectionFrame::empty(1200),
            ],
            PACE,
            start,
        );

        assert_eq!(replay.due(start).len(), 1);
        assert_eq!(replay.due(start + Duration::from_millis(60)).len(), 1);
        assert_eq!(replay.len(), 1);
        assert!(!replay.is_finished());

        assert_eq!(replay.due(start + Duration::from_secs(1)).len(), 1);
        assert!(replay.is_finished());
    }

    #[test]
    fn test_untimed_face_lost_clears_overlay() {
        let frames = untimed(
            r#"[
                {"faces": [{"bounds": {"origin": {"x": 10, "y": 20}, "size": {"width": 100, "height": 150}}}]},
                {"faces": []}
            ]"#,
        );
        let start = Instant::now();
        let mut replay = Replay::new(frames, PACE, start);
        let mut throttle = DetectionThrottle::new(PACE);
        let mut tracker = FaceOverlayTracker::default();

        let first = replay.due(start);
        assert_eq!(
            apply(&first, &mut throttle, &mut tracker),
            Some(OverlayState::Box(OverlayBox::new(10.0, 20.0, 100.0, 150.0)))
        );

        let rest = replay.due(start + Duration::from_secs(1));
        assert_eq!(
            apply(&rest, &mut throttle, &mut tracker),
            Some(OverlayState::Empty)
        );
        assert!(replay.is_finished());
        assert_eq!(tracker.state(), OverlayState::Empty);
    }

    #[test]
    fn test_apply_reports_none_when_all_throttled() {
        let mut throttle = DetectionThrottle::new(PACE);
        let mut tracker = FaceOverlayTracker::default();
        assert!(apply(&[DetectionFrame::empty(0)], &mut throttle, &mut tracker).is_some());

        let frames = vec![DetectionFrame::new(10, vec![face_a()])];
        assert_eq!(apply(&frames, &mut throttle, &mut tracker), None);
        assert_eq!(tracker.state(), OverlayState::Empty);
    }
}
