use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::detection::domain::detection_frame::DetectionFrame;
use crate::detection::domain::detection_source::DetectionSource;

#[derive(Error, Debug)]
pub enum RecordingError {
    #[error("failed to read recording {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid recording {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid recording {path} at line {line}: {source}")]
    ParseLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Replays detection events captured from a live detector.
///
/// `.jsonl` files hold one frame per line (blank lines skipped); anything
/// else is read as a single JSON array of frames.
pub struct RecordedDetectionSource {
    frames: Vec<DetectionFrame>,
}

impl RecordedDetectionSource {
    pub fn new(frames: Vec<DetectionFrame>) -> Self {
        Self { frames }
    }

    pub fn open(path: &Path) -> Result<Self, RecordingError> {
        let text = fs::read_to_string(path).map_err(|e| RecordingError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let frames = if is_json_lines(path) {
            parse_json_lines(path, &text)?
        } else {
            serde_json::from_str(&text).map_err(|e| RecordingError::Parse {
                path: path.to_path_buf(),
                source: e,
            })?
        };

        log::info!(
            "Loaded {} detection frames from {}",
            frames.len(),
            path.display()
        );
        Ok(Self::new(frames))
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn into_frames(self) -> Vec<DetectionFrame> {
        self.frames
    }
}

impl DetectionSource for RecordedDetectionSource {
    fn frames(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<DetectionFrame, Box<dyn std::error::Error>>> + '_> {
        Box::new(self.frames.drain(..).map(Ok))
    }
}

fn is_json_lines(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("jsonl"))
        .unwrap_or(false)
}

fn parse_json_lines(path: &Path, text: &str) -> Result<Vec<DetectionFrame>, RecordingError> {
    let mut frames = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let frame = serde_json::from_str(line).map_err(|e| RecordingError::ParseLine {
            path: path.to_path_buf(),
            line: i + 1,
            source: e,
        })?;
        frames.push(frame);
    }
    Ok(frames)
}
