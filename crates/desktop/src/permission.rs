use facecam_core::camera::domain::permission::{PermissionProvider, PermissionStatus};

/// Camera access recorded as a consent flag in the settings file.
///
/// Desktop platforms have no uniform camera prompt, so the app's own
/// permission screen stands in for it. Until the user grants access the
/// status is `Denied`, which shows that screen.
pub struct SettingsPermission {
    granted: bool,
}

impl SettingsPermission {
    pub fn new(granted: bool) -> Self {
        Self { granted }
    }

    pub fn revoke(&mut self) -> PermissionStatus {
        self.granted = false;
        PermissionStatus::Denied
    }
}

impl PermissionProvider for SettingsPermission {
    fn status(&self) -> Option<PermissionStatus> {
        Some(if self.granted {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        })
    }

    fn request(&mut self) -> PermissionStatus {
        self.granted = true;
        PermissionStatus::Granted
    }
}
