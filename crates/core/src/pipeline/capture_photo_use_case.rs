use std::path::PathBuf;

use crate::camera::domain::camera::{Camera, Photo};
use crate::camera::domain::camera_controls::{CameraFacing, FlashMode};
use crate::camera::domain::capture_error::CaptureError;
use crate::camera::domain::destination::destination_for;
use crate::camera::domain::photo_store::PhotoStore;
use crate::shared::constants::CAMERA_PATH_MARKER;

#[derive(Debug, Clone, PartialEq)]
pub struct SavedPhoto {
    pub photo: Photo,
    pub destination: PathBuf,
    pub bytes: u64,
}

/// Takes a picture and copies it from the camera's location into app storage.
pub struct CapturePhotoUseCase {
    camera: Box<dyn Camera>,
    store: Box<dyn PhotoStore>,
    marker: String,
}

impl CapturePhotoUseCase {
    pub fn new(camera: Box<dyn Camera>, store: Box<dyn PhotoStore>) -> Self {
        Self {
            camera,
            store,
            marker: CAMERA_PATH_MARKER.to_string(),
        }
    }

    /// Overrides the path segment that separates the camera's directory from
    /// the photo's relative name.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn execute(
        &mut self,
        facing: CameraFacing,
        flash: FlashMode,
    ) -> Result<SavedPhoto, CaptureError> {
        let photo = self
            .camera
            .take_picture(facing, flash)
            .map_err(CaptureError::Camera)?;
        log::info!(
            "Captured {} ({}x{})",
            photo.path.display(),
            photo.width,
            photo.height
        );

        let destination = destination_for(&photo.path, self.store.documents_dir(), &self.marker)?;
        let bytes = self
            .store
            .copy(&photo.path, &destination)
            .map_err(|source| CaptureError::Copy {
                from: photo.path.clone(),
                to: destination.clone(),
                source,
            })?;

        Ok(SavedPhoto {
            photo,
            destination,
            bytes,
        })
    }
}
