use std::path::{Path, PathBuf};

use crate::camera::domain::capture_error::CaptureError;

/// Where a captured photo is stored inside app storage.
///
/// The relative name is the part of `source` between the first occurrence of
/// `marker` and the next one (or the end), with leading separators removed.
pub fn destination_for(
    source: &Path,
    documents_dir: &Path,
    marker: &str,
) -> Result<PathBuf, CaptureError> {
    let text = source.to_string_lossy();
    let mut parts = text.split(marker);
    parts.next();
    let segment = parts.next().ok_or_else(|| CaptureError::MissingMarker {
        path: source.to_path_buf(),
        marker: marker.to_string(),
    })?;

    let relative = segment.trim_start_matches(['/', '\\']);
    if relative.is_empty() {
        return Err(CaptureError::EmptyName(source.to_path_buf()));
    }
    Ok(documents_dir.join(relative))
}
