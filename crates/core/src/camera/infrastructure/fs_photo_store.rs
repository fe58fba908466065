use std::fs;
use std::path::{Path, PathBuf};

use crate::camera::domain::photo_store::PhotoStore;
use crate::shared::constants::APP_DIR_NAME;

/// App storage on the local file system.
pub struct FsPhotoStore {
    documents_dir: PathBuf,
}

impl FsPhotoStore {
    pub fn new(documents_dir: impl Into<PathBuf>) -> Self {
        Self {
            documents_dir: documents_dir.into(),
        }
    }

    /// Platform documents directory, falling back to the data directory.
    ///
    /// - macOS: `~/Documents/FaceCam/`
    /// - Linux: `$XDG_DOCUMENTS_DIR/FaceCam/` or `~/.local/share/FaceCam/`
    /// - Windows: `%USERPROFILE%/Documents/FaceCam/`
    pub fn default_location() -> Option<Self> {
        dirs::document_dir()
            .or_else(dirs::data_dir)
            .map(|d| Self::new(d.join(APP_DIR_NAME)))
    }
}

impl PhotoStore for FsPhotoStore {
    fn documents_dir(&self) -> &Path {
        &self.documents_dir
    }

    fn copy(&self, from: &Path, to: &Path) -> std::io::Result<u64> {
        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(from, to)
    }
}
