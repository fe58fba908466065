use std::path::PathBuf;

use crate::camera::domain::camera_controls::{CameraFacing, FlashMode};

/// A still written by the camera to its own capture location.
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Platform camera, reduced to the one operation the screen needs.
pub trait Camera: Send {
    fn take_picture(
        &mut self,
        facing: CameraFacing,
        flash: FlashMode,
    ) -> Result<Photo, Box<dyn std::error::Error + Send + Sync>>;
}
