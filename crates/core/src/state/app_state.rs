use std::path::PathBuf;

use crate::camera::domain::camera_controls::{CameraFacing, FlashMode};
use crate::camera::domain::permission::{PermissionStatus, Screen};
use crate::overlay::domain::overlay_state::OverlayState;

/// Progress of the most recent photo capture.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CaptureStatus {
    #[default]
    Idle,
    InProgress,
    Saved(PathBuf),
    Failed(String),
}

impl CaptureStatus {
    pub fn is_in_progress(&self) -> bool {
        matches!(self, CaptureStatus::InProgress)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ToggleFacing,
    ToggleFlash,
    PermissionResolved(PermissionStatus),
    OverlayUpdated(OverlayState),
    CaptureStarted,
    CaptureSaved(PathBuf),
    CaptureFailed(String),
}

/// Everything the camera screen renders from.
///
/// Each field is changed by its own actions only, so a capture finishing
/// mid-stream never disturbs the overlay and vice versa.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub facing: CameraFacing,
    pub flash: FlashMode,
    pub permission: Option<PermissionStatus>,
    pub overlay: OverlayState,
    pub capture: CaptureStatus,
}

impl AppState {
    pub fn reduce(self, action: Action) -> AppState {
        match action {
            Action::ToggleFacing => AppState {
                facing: self.facing.toggled(),
                ..self
            },
            Action::ToggleFlash => AppState {
                flash: self.flash.toggled(),
                ..self
            },
            Action::PermissionResolved(status) => AppState {
                permission: Some(status),
                ..self
            },
            Action::OverlayUpdated(overlay) => AppState { overlay, ..self },
            Action::CaptureStarted => AppState {
                capture: CaptureStatus::InProgress,
                ..self
            },
            Action::CaptureSaved(path) => AppState {
                capture: CaptureStatus::Saved(path),
                ..self
            },
            Action::CaptureFailed(message) => AppState {
                capture: CaptureStatus::Failed(message),
                ..self
            },
        }
    }

    pub fn screen(&self) -> Screen {
        Screen::resolve(self.permission)
    }
}
