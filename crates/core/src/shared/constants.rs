pub const APP_DIR_NAME: &str = "FaceCam";

/// Path segment the platform camera writes captures under. The stored file
/// name is whatever follows it.
pub const CAMERA_PATH_MARKER: &str = "Camera";

pub const DEFAULT_MIN_DETECTION_INTERVAL_MS: u64 = 100;

pub const OVERLAY_BORDER_WIDTH: f64 = 2.0;
pub const OVERLAY_Z_INDEX: u32 = 1000;

pub const PERMISSION_PROMPT_TEXT: &str = "We need your permission to show the camera";
pub const PERMISSION_ACTION_LABEL: &str = "grant permission";

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
