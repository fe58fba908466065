use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, TryRecvError};
use iced::widget::{
    button, canvas, checkbox, column, container, image, pick_list, row, slider, stack, text,
    tooltip, Space,
};
use iced::{Alignment, Color, ContentFit, Element, Length, Subscription, Task, Theme};

use facecam_core::camera::domain::camera_controls::CameraFacing;
use facecam_core::camera::domain::permission::{PermissionProvider, PermissionStatus, Screen};
use facecam_core::camera::domain::photo_store::PhotoStore;
use facecam_core::camera::infrastructure::fs_photo_store::FsPhotoStore;
use facecam_core::camera::infrastructure::snapshot_camera::SnapshotCamera;
use facecam_core::detection::domain::detection_throttle::DetectionThrottle;
use facecam_core::detection::infrastructure::recorded_detection_source::RecordedDetectionSource;
use facecam_core::overlay::domain::coordinate_mapper::IdentityMapper;
use facecam_core::overlay::domain::face_overlay_tracker::FaceOverlayTracker;
use facecam_core::overlay::domain::face_selector::SelectionPolicy;
use facecam_core::overlay::domain::overlay_state::OverlayState;
use facecam_core::overlay::domain::overlay_style::OverlayStyle;
use facecam_core::pipeline::capture_photo_use_case::CapturePhotoUseCase;
use facecam_core::pipeline::capture_worker::{self, CaptureMessage};
use facecam_core::shared::constants::{
    CAMERA_PATH_MARKER, IMAGE_EXTENSIONS, PERMISSION_ACTION_LABEL, PERMISSION_PROMPT_TEXT,
};
use facecam_core::shared::frame::Frame;
use facecam_core::state::app_state::{Action, AppState, CaptureStatus};

use crate::permission::SettingsPermission;
use crate::preview_overlay::PreviewOverlay;
use crate::replay::{self, Replay};
use crate::settings::Settings;

/// Preview size assumed when no still has been loaded.
const DEFAULT_PREVIEW_SIZE: (u32, u32) = (640, 480);
const TICK: Duration = Duration::from_millis(33);

#[derive(Debug, Clone)]
pub enum Message {
    PermissionResolved(PermissionStatus),
    RequestPermission,
    RevokePermission,
    ToggleFacing,
    ToggleFlash,
    TakePicture,
    Tick(Instant),
    SelectRecording,
    RecordingSelected(Option<PathBuf>),
    SelectPreview,
    PreviewSelected(Option<PathBuf>),
    OpenPhotos,
    SelectionChanged(SelectionPolicy),
    MirrorFrontChanged(bool),
    MinIntervalChanged(u32),
}

/// Still shown as the camera preview, in both orientations.
struct Preview {
    frame: Frame,
    handle: image::Handle,
    mirrored: image::Handle,
}

pub struct App {
    state: AppState,
    settings: Settings,
    permission: SettingsPermission,
    tracker: FaceOverlayTracker,
    throttle: DetectionThrottle,
    replay: Option<Replay>,
    preview: Option<Preview>,
    capture_rx: Option<Receiver<CaptureMessage>>,
    notice: Option<String>,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        let settings = Settings::load();
        let permission = SettingsPermission::new(settings.camera_access);
        let startup = match permission.status() {
            Some(status) => Task::done(Message::PermissionResolved(status)),
            None => Task::none(),
        };

        (
            Self {
                state: AppState::default(),
                tracker: build_tracker(settings.selection),
                throttle: DetectionThrottle::new(settings.detector.min_detection_interval()),
                settings,
                permission,
                replay: None,
                preview: None,
                capture_rx: None,
                notice: None,
            },
            startup,
        )
    }

    fn dispatch(&mut self, action: Action) {
        self.state = std::mem::take(&mut self.state).reduce(action);
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PermissionResolved(status) => {
                self.dispatch(Action::PermissionResolved(status));
            }
            Message::RequestPermission => {
                let status = self.permission.request();
                self.settings.camera_access = status == PermissionStatus::Granted;
                self.settings.save();
                self.dispatch(Action::PermissionResolved(status));
            }
            Message::RevokePermission => {
                let status = self.permission.revoke();
                self.settings.camera_access = false;
                self.settings.save();
                self.dispatch(Action::PermissionResolved(status));
            }
            Message::ToggleFacing => self.dispatch(Action::ToggleFacing),
            Message::ToggleFlash => self.dispatch(Action::ToggleFlash),
            Message::TakePicture => self.take_picture(),
            Message::Tick(now) => {
                self.advance_replay(now);
                self.poll_capture();
            }
            Message::SelectRecording => {
                return Task::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .set_title("Open detection recording")
                            .add_filter("Detection recordings", &["json", "jsonl"])
                            .pick_file()
                            .await
                            .map(|h| h.path().to_path_buf())
                    },
                    Message::RecordingSelected,
                );
            }
            Message::RecordingSelected(Some(path)) => self.start_replay(path),
            Message::RecordingSelected(None) => {}
            Message::SelectPreview => {
                return Task::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .set_title("Open preview still")
                            .add_filter("Images", IMAGE_EXTENSIONS)
                            .pick_file()
                            .await
                            .map(|h| h.path().to_path_buf())
                    },
                    Message::PreviewSelected,
                );
            }
            Message::PreviewSelected(Some(path)) => match SnapshotCamera::load_preview(&path) {
                Ok(frame) => {
                    self.preview = Some(Preview {
                        handle: to_handle(&frame, false),
                        mirrored: to_handle(&frame, true),
                        frame,
                    });
                    self.notice = None;
                }
                Err(e) => {
                    log::error!("Failed to load preview {}: {e}", path.display());
                    self.notice = Some(format!("Could not open {}: {e}", path.display()));
                }
            },
            Message::PreviewSelected(None) => {}
            Message::OpenPhotos => match self.photo_store() {
                Some(store) => {
                    let dir = store.documents_dir();
                    if let Err(e) = std::fs::create_dir_all(dir).and_then(|_| open::that(dir)) {
                        log::warn!("Could not open {}: {e}", dir.display());
                    }
                }
                None => log::warn!("No documents directory on this platform"),
            },
            Message::SelectionChanged(policy) => {
                self.settings.selection = policy;
                self.settings.save();
                self.tracker = build_tracker(policy);
            }
            Message::MirrorFrontChanged(enabled) => {
                self.settings.mirror_front = enabled;
                self.settings.save();
            }
            Message::MinIntervalChanged(ms) => {
                self.settings.detector.min_detection_interval_ms = ms as u64;
                self.settings.save();
                self.throttle = DetectionThrottle::new(self.settings.detector.min_detection_interval());
            }
        }
        Task::none()
    }

    fn start_replay(&mut self, path: PathBuf) {
        match RecordedDetectionSource::open(&path) {
            Ok(source) => {
                let pace = self.settings.detector.min_detection_interval().max(TICK);
                let replay = Replay::new(source.into_frames(), pace, Instant::now());
                log::info!("Replaying {} events from {}", replay.len(), path.display());
                self.tracker = build_tracker(self.settings.selection);
                self.throttle.reset();
                self.dispatch(Action::OverlayUpdated(OverlayState::Empty));
                self.replay = Some(replay);
                self.notice = None;
            }
            Err(e) => {
                log::error!("{e}");
                self.notice = Some(e.to_string());
            }
        }
    }

    /// Feeds every event that has come due through the throttle and the
    /// tracker.
    fn advance_replay(&mut self, now: Instant) {
        let Some(replay) = self.replay.as_mut() else {
            return;
        };
        let due = replay.due(now);
        let finished = replay.is_finished();

        if let Some(overlay) = replay::apply(&due, &mut self.throttle, &mut self.tracker) {
            self.dispatch(Action::OverlayUpdated(overlay));
        }
        if finished {
            log::info!("Replay finished");
            self.replay = None;
        }
    }

    fn take_picture(&mut self) {
        if self.state.capture.is_in_progress() {
            return;
        }
        self.dispatch(Action::CaptureStarted);
        match self.spawn_capture() {
            Ok(rx) => self.capture_rx = Some(rx),
            Err(e) => {
                log::error!(
                    "Failed to take picture (facing={}, flash={}): {e}",
                    self.state.facing,
                    self.state.flash
                );
                self.dispatch(Action::CaptureFailed(e));
            }
        }
    }

    fn spawn_capture(&self) -> Result<Receiver<CaptureMessage>, String> {
        let cache_root =
            SnapshotCamera::default_cache_root().ok_or("Could not determine cache directory")?;
        if !SnapshotCamera::is_usable_cache_root(&cache_root) {
            return Err(format!(
                "Cache directory {} contains a '{CAMERA_PATH_MARKER}' path segment",
                cache_root.display()
            ));
        }
        let store = self
            .photo_store()
            .ok_or("Could not determine documents directory")?;

        let (width, height) = self.source_size();
        let mut camera = SnapshotCamera::new(&cache_root, width, height)
            .with_mirror_front(self.settings.mirror_front);
        if let Some(preview) = &self.preview {
            camera.set_preview(preview.frame.clone());
        }

        let use_case = CapturePhotoUseCase::new(Box::new(camera), Box::new(store));
        Ok(capture_worker::spawn(
            Arc::new(Mutex::new(use_case)),
            self.state.facing,
            self.state.flash,
        ))
    }

    fn poll_capture(&mut self) {
        let Some(rx) = &self.capture_rx else {
            return;
        };
        let received = rx.try_recv();
        match received {
            Ok(CaptureMessage::Saved(saved)) => {
                self.capture_rx = None;
                self.dispatch(Action::CaptureSaved(saved.destination));
            }
            Ok(CaptureMessage::Failed(e)) => {
                self.capture_rx = None;
                self.dispatch(Action::CaptureFailed(e));
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.capture_rx = None;
                self.dispatch(Action::CaptureFailed(
                    "Capture worker stopped without a result".to_string(),
                ));
            }
        }
    }

    fn photo_store(&self) -> Option<FsPhotoStore> {
        match &self.settings.documents_dir {
            Some(dir) => Some(FsPhotoStore::new(dir.clone())),
            None => FsPhotoStore::default_location(),
        }
    }

    fn source_size(&self) -> (u32, u32) {
        self.preview
            .as_ref()
            .map(|p| (p.frame.width(), p.frame.height()))
            .unwrap_or(DEFAULT_PREVIEW_SIZE)
    }

    fn is_mirrored(&self) -> bool {
        self.settings.mirror_front && self.state.facing == CameraFacing::Front
    }

    pub fn view(&self) -> Element<'_, Message> {
        match self.state.screen() {
            Screen::Blank => container(Space::new())
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            Screen::PermissionPrompt => self.permission_view(),
            Screen::Camera => self.camera_view(),
        }
    }

    fn permission_view(&self) -> Element<'_, Message> {
        container(
            column![
                text(PERMISSION_PROMPT_TEXT).size(15),
                button(text(PERMISSION_ACTION_LABEL)).on_press(Message::RequestPermission),
            ]
            .spacing(12)
            .align_x(Alignment::Center),
        )
        .center(Length::Fill)
        .into()
    }

    fn camera_view(&self) -> Element<'_, Message> {
        let mirrored = self.is_mirrored();

        let preview: Element<'_, Message> = match &self.preview {
            Some(p) => image(if mirrored {
                p.mirrored.clone()
            } else {
                p.handle.clone()
            })
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Fill)
            .into(),
            None => container(Space::new())
                .width(Length::Fill)
                .height(Length::Fill)
                .style(|_theme: &Theme| container::Style {
                    background: Some(Color::BLACK.into()),
                    ..container::Style::default()
                })
                .into(),
        };

        let overlay = canvas(PreviewOverlay {
            overlay: self.state.overlay,
            source_size: self.source_size(),
            mirrored,
            style: OverlayStyle::default(),
        })
        .width(Length::Fill)
        .height(Length::Fill);

        let viewport = stack![preview, overlay]
            .width(Length::Fill)
            .height(Length::Fill);

        let in_progress = self.state.capture.is_in_progress();
        let controls = row![
            tooltip(
                button(text(format!("Camera: {}", self.state.facing)))
                    .on_press(Message::ToggleFacing),
                text(self.state.facing.icon_name()).size(11),
                tooltip::Position::Top,
            ),
            tooltip(
                button(text(format!("Flash: {}", self.state.flash)))
                    .on_press(Message::ToggleFlash),
                text(self.state.flash.icon_name()).size(11),
                tooltip::Position::Top,
            ),
            Space::new().width(Length::Fill),
            button(text("Take picture"))
                .on_press_maybe((!in_progress).then_some(Message::TakePicture))
                .style(button::primary),
        ]
        .spacing(8)
        .align_y(Alignment::Center);

        let status = text(self.status_line()).size(12);

        let sources = row![
            button(text("Open recording…")).on_press(Message::SelectRecording),
            button(text("Open preview…")).on_press(Message::SelectPreview),
            button(text("Show photos")).on_press(Message::OpenPhotos),
            Space::new().width(Length::Fill),
            button(text("Revoke camera access"))
                .on_press(Message::RevokePermission)
                .style(button::text),
        ]
        .spacing(8)
        .align_y(Alignment::Center);

        let interval = self.settings.detector.min_detection_interval_ms as u32;
        let options = row![
            text("Track").size(13),
            pick_list(
                SelectionPolicy::ALL,
                Some(self.settings.selection),
                Message::SelectionChanged
            )
            .text_size(13),
            checkbox(self.settings.mirror_front)
                .label("Mirror front camera")
                .on_toggle(Message::MirrorFrontChanged)
                .text_size(13),
            text(format!("Min interval {interval}ms")).size(13),
            slider(0..=500, interval, Message::MinIntervalChanged)
                .step(10u32)
                .width(120),
        ]
        .spacing(10)
        .align_y(Alignment::Center);

        column![viewport, controls, status, sources, options]
            .spacing(8)
            .padding(12)
            .height(Length::Fill)
            .into()
    }

    fn status_line(&self) -> String {
        if let Some(notice) = &self.notice {
            return notice.clone();
        }
        match &self.state.capture {
            CaptureStatus::Idle => String::new(),
            CaptureStatus::InProgress => "Saving photo…".to_string(),
            CaptureStatus::Saved(path) => format!("Saved {}", path.display()),
            CaptureStatus::Failed(e) => format!("Capture failed: {e}"),
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        if self.replay.is_some() || self.capture_rx.is_some() {
            iced::time::every(TICK).map(Message::Tick)
        } else {
            Subscription::none()
        }
    }
}

fn build_tracker(policy: SelectionPolicy) -> FaceOverlayTracker {
    FaceOverlayTracker::new(policy.selector(), Box::new(IdentityMapper))
}

/// RGBA image handle for an RGB frame, optionally flipped left to right.
fn to_handle(frame: &Frame, mirrored: bool) -> image::Handle {
    let (width, height) = (frame.width() as usize, frame.height() as usize);
    let channels = frame.channels() as usize;
    let data = frame.data();
    let mut rgba = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let src_x = if mirrored { width - 1 - x } else { x };
            let i = (y * width + src_x) * channels;
            rgba.extend_from_slice(&data[i..i + 3]);
            rgba.push(0xff);
        }
    }
    image::Handle::from_rgba(frame.width(), frame.height(), rgba)
}
