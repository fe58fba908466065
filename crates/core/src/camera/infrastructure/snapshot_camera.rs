use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::camera::domain::camera::{Camera, Photo};
use crate::camera::domain::camera_controls::{CameraFacing, FlashMode};
use crate::shared::constants::{APP_DIR_NAME, CAMERA_PATH_MARKER};
use crate::shared::frame::Frame;

/// Backdrop used when no preview still has been supplied.
const BLANK_RGB: [u8; 3] = [0, 0, 0];

/// Camera stand-in that saves the current preview still as a JPEG.
///
/// Captures land in `<cache_root>/Camera/`, the same layout the platform
/// camera uses, so destination naming works unchanged. Front-facing
/// captures are mirrored when the preview is shown mirrored.
pub struct SnapshotCamera {
    capture_dir: PathBuf,
    width: u32,
    height: u32,
    preview: Option<Frame>,
    mirror_front: bool,
    captured: usize,
}

impl SnapshotCamera {
    pub fn new(cache_root: &Path, width: u32, height: u32) -> Self {
        Self {
            capture_dir: cache_root.join(CAMERA_PATH_MARKER),
            width,
            height,
            preview: None,
            mirror_front: true,
            captured: 0,
        }
    }

    /// Whether front-camera captures are flipped left to right.
    pub fn with_mirror_front(mut self, mirror_front: bool) -> Self {
        self.mirror_front = mirror_front;
        self
    }

    /// A root containing the capture marker would make every photo's
    /// relative name ambiguous.
    pub fn is_usable_cache_root(root: &Path) -> bool {
        !root.to_string_lossy().contains(CAMERA_PATH_MARKER)
    }

    pub fn default_cache_root() -> Option<PathBuf> {
        dirs::cache_dir().map(|d| d.join(APP_DIR_NAME))
    }

    pub fn set_preview(&mut self, frame: Frame) {
        self.preview = Some(frame);
    }

    /// Decodes an image file into an RGB preview still.
    pub fn load_preview(path: &Path) -> Result<Frame, Box<dyn std::error::Error>> {
        let img = image::open(path)?.to_rgb8();
        let (w, h) = img.dimensions();
        Ok(Frame::new(img.into_raw(), w, h, 3))
    }

    fn next_file_name(&mut self) -> String {
        self.captured += 1;
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        format!("IMG_{millis}_{:04}.jpg", self.captured)
    }
}

impl Camera for SnapshotCamera {
    fn take_picture(
        &mut self,
        facing: CameraFacing,
        flash: FlashMode,
    ) -> Result<Photo, Box<dyn std::error::Error + Send + Sync>> {
        fs::create_dir_all(&self.capture_dir)?;

        let frame = match &self.preview {
            Some(frame) => frame.clone(),
            None => Frame::filled(self.width, self.height, BLANK_RGB),
        };
        if frame.channels() != 3 {
            return Err(format!("Preview still has {} channels, expected RGB", frame.channels()).into());
        }
        let (width, height) = (frame.width(), frame.height());

        let img = image::RgbImage::from_raw(width, height, frame.into_data())
            .ok_or("Preview still is smaller than its dimensions")?;
        let img = match facing {
            CameraFacing::Front if self.mirror_front => image::imageops::flip_horizontal(&img),
            _ => img,
        };

        if flash == FlashMode::On {
            log::debug!("Flash requested; snapshot stills are not re-exposed");
        }

        let name = self.next_file_name();
        let path = self.capture_dir.join(name);
        img.save(&path)?;

        Ok(Photo {
            path,
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 16x8 still: left half red, right half blue.
    fn split_frame() -> Frame {
        let mut data = Vec::with_capacity(16 * 8 * 3);
        for _row in 0..8 {
            for col in 0..16 {
                if col < 8 {
                    data.extend_from_slice(&[255, 0, 0]);
                } else {
                    data.extend_from_slice(&[0, 0, 255]);
                }
            }
        }
        Frame::new(data, 16, 8, 3)
    }

    #[test]
    fn test_capture_goes_under_camera_segment() {
        let dir = tempfile::tempdir().unwrap();
        let mut camera = SnapshotCamera::new(dir.path(), 16, 8);

        let photo = camera
            .take_picture(CameraFacing::Back, FlashMode::Off)
            .unwrap();

        assert!(photo.path.exists());
        assert!(photo.path.starts_with(dir.path().join("Camera")));
        assert_eq!((photo.width, photo.height), (16, 8));
    }

    #[test]
    fn test_successive_captures_have_distinct_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut camera = SnapshotCamera::new(dir.path(), 4, 4);

        let a = camera.take_picture(CameraFacing::Back, FlashMode::Off).unwrap();
        let b = camera.take_picture(CameraFacing::Back, FlashMode::On).unwrap();

        assert_ne!(a.path, b.path);
    }

    #[test]
    fn test_preview_dimensions_win_over_default() {
        let dir = tempfile::tempdir().unwrap();
        let mut camera = SnapshotCamera::new(dir.path(), 640, 480);
        camera.set_preview(Frame::filled(32, 24, [200, 200, 200]));

        let photo = camera.take_picture(CameraFacing::Back, FlashMode::Off).unwrap();

        let img = image::open(&photo.path).unwrap();
        assert_eq!((img.width(), img.height()), (32, 24));
    }

    #[test]
    fn test_front_capture_is_mirrored() {
        let dir = tempfile::tempdir().unwrap();
        let mut camera = SnapshotCamera::new(dir.path(), 16, 8);
        camera.set_preview(split_frame());

        let photo = camera.take_picture(CameraFacing::Front, FlashMode::Off).unwrap();

        let img = image::open(&photo.path).unwrap().to_rgb8();
        // JPEG is lossy: compare dominant channels only
        let left = img.get_pixel(1, 4).0;
        assert!(left[2] > left[0], "left pixel should now be blue: {left:?}");
    }

    #[test]
    fn test_front_capture_unmirrored_when_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let mut camera = SnapshotCamera::new(dir.path(), 16, 8).with_mirror_front(false);
        camera.set_preview(split_frame());

        let photo = camera.take_picture(CameraFacing::Front, FlashMode::Off).unwrap();

        let img = image::open(&photo.path).unwrap().to_rgb8();
        let left = img.get_pixel(1, 4).0;
        assert!(left[0] > left[2], "left pixel should stay red: {left:?}");
    }

    #[test]
    fn test_back_capture_is_not_mirrored() {
        let dir = tempfile::tempdir().unwrap();
        let mut camera = SnapshotCamera::new(dir.path(), 16, 8);
        camera.set_preview(split_frame());

        let photo = camera.take_picture(CameraFacing::Back, FlashMode::Off).unwrap();

        let img = image::open(&photo.path).unwrap().to_rgb8();
        let left = img.get_pixel(1, 4).0;
        assert!(left[0] > left[2], "left pixel should stay red: {left:?}");
    }

    #[test]
    fn test_cache_root_with_marker_is_unusable() {
        assert!(!SnapshotCamera::is_usable_cache_root(Path::new("/home/a/Camera")));
        assert!(!SnapshotCamera::is_usable_cache_root(Path::new("/media/CameraRoll/cache")));
        assert!(SnapshotCamera::is_usable_cache_root(Path::new("/home/a/.cache/FaceCam")));
    }

    #[test]
    fn test_marker_in_cache_root_breaks_destination() {
        use crate::camera::domain::capture_error::CaptureError;
        use crate::camera::domain::destination::destination_for;

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("Camera");
        let mut camera = SnapshotCamera::new(&root, 4, 4);
        let photo = camera.take_picture(CameraFacing::Back, FlashMode::Off).unwrap();

        let err = destination_for(&photo.path, Path::new("/docs"), CAMERA_PATH_MARKER)
            .err()
            .unwrap();
        assert!(matches!(err, CaptureError::EmptyName(_)));
        assert!(!SnapshotCamera::is_usable_cache_root(&root));
    }

    #[test]
    fn test_non_rgb_preview_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut camera = SnapshotCamera::new(dir.path(), 1, 1);
        camera.set_preview(Frame::new(vec![0; 4], 1, 1, 4));

        assert!(camera
            .take_picture(CameraFacing::Back, FlashMode::Off)
            .is_err());
    }

    #[test]
    fn test_load_preview_reads_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("still.png");
        image::RgbImage::from_pixel(5, 3, image::Rgb([1, 2, 3]))
            .save(&path)
            .unwrap();

        let frame = SnapshotCamera::load_preview(&path).unwrap();

        assert_eq!((frame.width(), frame.height(), frame.channels()), (5, 3, 3));
        assert_eq!(&frame.data()[..3], &[1, 2, 3]);
    }
}
