use std::sync::{Arc, Mutex};
use std::thread;

use crossbeam_channel::Receiver;

use crate::camera::domain::camera_controls::{CameraFacing, FlashMode};
use crate::pipeline::capture_photo_use_case::{CapturePhotoUseCase, SavedPhoto};

#[derive(Debug)]
pub enum CaptureMessage {
    Saved(SavedPhoto),
    Failed(String),
}

/// Runs one capture on a background thread.
///
/// Exactly one message is sent. Failures are logged here and never retried;
/// the caller only has to reflect the outcome.
pub fn spawn(
    use_case: Arc<Mutex<CapturePhotoUseCase>>,
    facing: CameraFacing,
    flash: FlashMode,
) -> Receiver<CaptureMessage> {
    let (tx, rx) = crossbeam_channel::bounded::<CaptureMessage>(1);

    thread::spawn(move || {
        let result = match use_case.lock() {
            Ok(mut uc) => uc.execute(facing, flash).map_err(|e| e.to_string()),
            Err(_) => Err("capture state poisoned by an earlier panic".to_string()),
        };

        let message = match result {
            Ok(saved) => {
                log::info!("Saved photo to {}", saved.destination.display());
                CaptureMessage::Saved(saved)
            }
            Err(e) => {
                log::error!("Failed to take picture (facing={facing}, flash={flash}): {e}");
                CaptureMessage::Failed(e)
            }
        };
        let _ = tx.send(message);
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::domain::camera::{Camera, Photo};
    use crate::camera::domain::photo_store::PhotoStore;
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    struct StubCamera(Result<PathBuf, &'static str>);

    impl Camera for StubCamera {
        fn take_picture(
            &mut self,
            _facing: CameraFacing,
            _flash: FlashMode,
        ) -> Result<Photo, Box<dyn std::error::Error + Send + Sync>> {
            match &self.0 {
                Ok(path) => Ok(Photo {
                    path: path.clone(),
                    width: 1,
                    height: 1,
                }),
                Err(msg) => Err((*msg).into()),
            }
        }
    }

    struct StubStore(PathBuf);

    impl PhotoStore for StubStore {
        fn documents_dir(&self) -> &Path {
            &self.0
        }

        fn copy(&self, _from: &Path, _to: &Path) -> std::io::Result<u64> {
            Ok(7)
        }
    }

    fn use_case(camera: StubCamera) -> Arc<Mutex<CapturePhotoUseCase>> {
        Arc::new(Mutex::new(CapturePhotoUseCase::new(
            Box::new(camera),
            Box::new(StubStore(PathBuf::from("/docs"))),
        )))
    }

    #[test]
    fn test_reports_saved() {
        let uc = use_case(StubCamera(Ok(PathBuf::from("/cache/Camera/IMG_1.jpg"))));
        let rx = spawn(uc, CameraFacing::Front, FlashMode::Off);

        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            CaptureMessage::Saved(saved) => {
                assert_eq!(saved.destination, PathBuf::from("/docs/IMG_1.jpg"));
                assert_eq!(saved.bytes, 7);
            }
            other => panic!("expected Saved, got {other:?}"),
        }
    }

    #[test]
    fn test_reports_failure() {
        let uc = use_case(StubCamera(Err("shutter jammed")));
        let rx = spawn(uc, CameraFacing::Back, FlashMode::On);

        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            CaptureMessage::Failed(msg) => assert!(msg.contains("shutter jammed")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn test_sends_exactly_one_message() {
        let uc = use_case(StubCamera(Err("nope")));
        let rx = spawn(uc, CameraFacing::Front, FlashMode::Off);

        assert!(rx.recv_timeout(Duration::from_secs(5)).is_ok());
        // sender is dropped once the thread finishes
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_err());
    }
}
