use std::collections::HashMap;
use std::time::Instant;

/// Observer for replay and capture sessions.
///
/// Use cases report through this trait so the CLI can print progress while
/// the desktop app and tests stay silent.
pub trait SessionLogger: Send {
    /// One detection event was processed.
    fn frame(&mut self, timestamp_ms: u64, face_count: usize);

    /// Record a point-in-time metric (e.g. dropped events, overlay area).
    fn metric(&mut self, name: &str, value: f64);

    fn info(&mut self, message: &str);

    /// Emit an end-of-session summary. Default: no-op.
    fn summary(&self) {}
}

pub struct NullSessionLogger;

impl SessionLogger for NullSessionLogger {
    fn frame(&mut self, _timestamp_ms: u64, _face_count: usize) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI logger: throttled progress lines plus a summary report.
pub struct StdoutSessionLogger {
    throttle_frames: usize,
    frames: usize,
    faces: usize,
    last_timestamp_ms: Option<u64>,
    metrics: HashMap<String, Vec<f64>>,
    start_time: Instant,
    messages: Vec<String>,
}

impl StdoutSessionLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            frames: 0,
            faces: 0,
            last_timestamp_ms: None,
            metrics: HashMap::new(),
            start_time: Instant::now(),
            messages: Vec::new(),
        }
    }

    /// Returns the formatted summary, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.frames == 0 && self.metrics.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Session summary ({} events, {:.1}s wall time):",
            self.frames,
            elapsed_ms / 1000.0
        )];

        if self.frames > 0 {
            let avg_faces = self.faces as f64 / self.frames as f64;
            lines.push(format!("  faces per event: avg {avg_faces:.2}"));
        }
        if let Some(ts) = self.last_timestamp_ms {
            lines.push(format!("  last event at {ts}ms"));
        }

        let mut names: Vec<_> = self.metrics.keys().collect();
        names.sort();
        for name in names {
            let values = &self.metrics[name];
            let avg = if values.is_empty() {
                0.0
            } else {
                values.iter().sum::<f64>() / values.len() as f64
            };
            lines.push(format!("  {name}: avg {avg:.1}"));
        }

        Some(lines.join("\n"))
    }

    pub fn metrics_for(&self, name: &str) -> Option<&[f64]> {
        self.metrics.get(name).map(|v| v.as_slice())
    }

    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl Default for StdoutSessionLogger {
    fn default() -> Self {
        Self::new(50)
    }
}

impl SessionLogger for StdoutSessionLogger {
    fn frame(&mut self, timestamp_ms: u64, face_count: usize) {
        self.frames += 1;
        self.faces += face_count;
        self.last_timestamp_ms = Some(timestamp_ms);
        if self.frames % self.throttle_frames == 0 {
            log::info!("Replayed {} events (t={timestamp_ms}ms)", self.frames);
        }
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    fn info(&mut self, message: &str) {
        self.messages.push(message.to_string());
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_null_logger_all_methods_are_noop() {
        let mut logger = NullSessionLogger;
        logger.frame(0, 1);
        logger.metric("dropped", 1.0);
        logger.info("hello");
        logger.summary();
    }

    #[test]
    fn test_frame_counts_events_and_faces() {
        let mut logger = StdoutSessionLogger::new(10);
        logger.frame(0, 1);
        logger.frame(33, 2);
        logger.frame(66, 0);

        assert_eq!(logger.frames(), 3);
        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("3 events"));
        assert!(summary.contains("avg 1.00"));
        assert!(summary.contains("last event at 66ms"));
    }

    #[test]
    fn test_metric_records_values() {
        let mut logger = StdoutSessionLogger::new(10);
        logger.metric("dropped", 3.0);
        logger.metric("dropped", 4.0);

        let values = logger.metrics_for("dropped").unwrap();
        assert_eq!(values.len(), 2);
        assert_relative_eq!(values.iter().sum::<f64>() / 2.0, 3.5);

        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("dropped: avg 3.5"));
    }

    #[test]
    fn test_empty_summary_returns_none() {
        assert!(StdoutSessionLogger::new(10).summary_string().is_none());
    }

    #[test]
    fn test_info_stores_messages() {
        let mut logger = StdoutSessionLogger::default();
        logger.info("replay started");
        assert_eq!(logger.messages, vec!["replay started".to_string()]);
    }

    #[test]
    fn test_throttle_never_zero() {
        let logger = StdoutSessionLogger::new(0);
        assert_eq!(logger.throttle_frames, 1);
    }
}
