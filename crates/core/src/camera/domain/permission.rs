#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Source of camera permission. The actual prompt belongs to the platform.
pub trait PermissionProvider: Send {
    /// Current status, or `None` while it is still being determined.
    fn status(&self) -> Option<PermissionStatus>;

    /// Asks again. Returns the status after the request.
    fn request(&mut self) -> PermissionStatus;
}

/// Which top-level screen the app shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Permission not known yet: render nothing.
    Blank,
    /// Permission refused: explain and offer a single retry action.
    PermissionPrompt,
    Camera,
}

impl Screen {
    pub fn resolve(permission: Option<PermissionStatus>) -> Self {
        match permission {
            None => Screen::Blank,
            Some(PermissionStatus::Denied) => Screen::PermissionPrompt,
            Some(PermissionStatus::Granted) => Screen::Camera,
        }
    }
}
