use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("camera capture failed: {0}")]
    Camera(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("photo path {path} does not contain the '{marker}' segment")]
    MissingMarker { path: PathBuf, marker: String },
    #[error("photo path {0} has no file name after the capture segment")]
    EmptyName(PathBuf),
    #[error("failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
