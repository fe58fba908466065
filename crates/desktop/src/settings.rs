use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use facecam_core::detection::domain::detector_settings::FaceDetectorSettings;
use facecam_core::overlay::domain::face_selector::SelectionPolicy;
use facecam_core::shared::constants::APP_DIR_NAME;

/// Persisted desktop preferences. Unknown or missing fields fall back to
/// their defaults so older files keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub detector: FaceDetectorSettings,
    pub selection: SelectionPolicy,
    /// Show the front camera mirrored, like a selfie preview.
    pub mirror_front: bool,
    /// The user granted camera access from the permission prompt.
    pub camera_access: bool,
    /// Overrides the platform documents folder for saved photos.
    pub documents_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            detector: FaceDetectorSettings::default(),
            selection: SelectionPolicy::First,
            mirror_front: true,
            camera_access: false,
            documents_dir: None,
        }
    }
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join("settings.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .map(|json| Self::from_json(&json))
            .unwrap_or_default()
    }

    fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed settings: {e}");
            Self::default()
        })
    }

    pub fn save(&self) {
        match Self::config_path() {
            Some(path) => {
                if let Err(e) = self.write_to(&path) {
                    log::warn!("Failed to save settings to {}: {e}", path.display());
                }
            }
            None => log::warn!("No config directory; settings not saved"),
        }
    }

    fn write_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = Settings::from_json(r#"{"selection": "largest"}"#);
        assert_eq!(settings.selection, SelectionPolicy::Largest);
        assert!(settings.mirror_front);
        assert!(!settings.camera_access);
        assert_eq!(settings.detector, FaceDetectorSettings::default());
    }

    #[test]
    fn test_malformed_file_falls_back() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
    }

    #[test]
    fn test_write_to_round_trips_consent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            camera_access: true,
            ..Settings::default()
        };

        settings.write_to(&path).unwrap();

        let loaded = Settings::from_json(&fs::read_to_string(&path).unwrap());
        assert!(loaded.camera_access);
    }

    #[test]
    fn test_write_to_unwritable_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"x").unwrap();

        // parent is a regular file, so the directory cannot be created
        assert!(Settings::default()
            .write_to(&blocker.join("settings.json"))
            .is_err());
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["selection"], "first");
        assert_eq!(json["detector"]["mode"], "fast");
        assert_eq!(json["detector"]["minDetectionInterval"], 100);
        assert_eq!(json["detector"]["detectLandmarks"], "none");
    }
}
