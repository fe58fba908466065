use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::{Parser, Subcommand};

use facecam_core::camera::domain::camera_controls::{CameraFacing, FlashMode};
use facecam_core::camera::infrastructure::fs_photo_store::FsPhotoStore;
use facecam_core::camera::infrastructure::snapshot_camera::SnapshotCamera;
use facecam_core::detection::domain::detection_source::DetectionSource;
use facecam_core::detection::domain::detector_settings::FaceDetectorSettings;
use facecam_core::detection::infrastructure::recorded_detection_source::RecordedDetectionSource;
use facecam_core::detection::infrastructure::throttled_detection_source::ThrottledDetectionSource;
use facecam_core::overlay::domain::coordinate_mapper::{CoordinateMapper, IdentityMapper, ScaleMapper};
use facecam_core::overlay::domain::face_overlay_tracker::FaceOverlayTracker;
use facecam_core::overlay::domain::face_selector::SelectionPolicy;
use facecam_core::overlay::domain::overlay_renderer::OverlayRenderer;
use facecam_core::overlay::domain::overlay_style::OverlayStyle;
use facecam_core::overlay::infrastructure::json_lines_renderer::JsonLinesRenderer;
use facecam_core::pipeline::capture_photo_use_case::CapturePhotoUseCase;
use facecam_core::pipeline::capture_worker::{self, CaptureMessage};
use facecam_core::pipeline::replay_session_use_case::ReplaySessionUseCase;
use facecam_core::pipeline::session_logger::StdoutSessionLogger;
use facecam_core::shared::constants::{CAMERA_PATH_MARKER, IMAGE_EXTENSIONS};

/// Face overlay tracking and photo capture.
#[derive(Parser)]
#[command(name = "facecam")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay recorded detection events and print one overlay per event.
    Replay {
        /// Recording: a JSON array of events or one event per line (.jsonl).
        recording: PathBuf,

        /// Write overlay lines here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Drop events closer together than this (0 = keep all).
        #[arg(long, default_value = "0")]
        min_interval_ms: u64,

        /// Which face drives the overlay: first or largest.
        #[arg(long, default_value = "first")]
        select: String,

        /// Horizontal scale from detector to surface coordinates.
        #[arg(long)]
        scale_x: Option<f64>,

        /// Vertical scale from detector to surface coordinates.
        #[arg(long)]
        scale_y: Option<f64>,

        /// Mirror boxes horizontally across a surface this wide.
        #[arg(long)]
        mirror_width: Option<f64>,
    },

    /// Take a picture and copy it into app storage.
    Capture {
        /// Still image used as the camera preview.
        #[arg(long)]
        preview: Option<PathBuf>,

        /// Blank capture width when no preview is given.
        #[arg(long, default_value = "640")]
        width: u32,

        /// Blank capture height when no preview is given.
        #[arg(long, default_value = "480")]
        height: u32,

        /// Camera facing: front or back.
        #[arg(long, default_value = "front")]
        facing: String,

        /// Flash: off or on.
        #[arg(long, default_value = "off")]
        flash: String,

        /// Keep front-camera captures unmirrored.
        #[arg(long)]
        no_mirror: bool,

        /// App storage directory (default: platform documents dir).
        #[arg(long)]
        documents: Option<PathBuf>,

        /// Camera cache directory (default: platform cache dir).
        #[arg(long)]
        cache: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli.command)?;

    match cli.command {
        Command::Replay {
            recording,
            output,
            min_interval_ms,
            select,
            scale_x,
            scale_y,
            mirror_width,
        } => run_replay(
            &recording,
            output.as_deref(),
            min_interval_ms,
            parse_policy(&select),
            build_mapper(scale_x, scale_y, mirror_width),
        ),
        Command::Capture {
            preview,
            width,
            height,
            facing,
            flash,
            no_mirror,
            documents,
            cache,
        } => run_capture(
            preview.as_deref(),
            (width, height),
            parse_facing(&facing),
            parse_flash(&flash),
            !no_mirror,
            documents,
            cache,
        ),
    }
}

fn run_replay(
    recording: &Path,
    output: Option<&Path>,
    min_interval_ms: u64,
    policy: SelectionPolicy,
    mapper: Box<dyn CoordinateMapper>,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = FaceDetectorSettings::default();
    log::info!(
        "Detector settings: mode={}, landmarks={:?}, classifications={:?}, interval={}ms, tracking={}",
        settings.mode,
        settings.landmarks,
        settings.classifications,
        settings.min_detection_interval_ms,
        settings.tracking
    );

    let recorded = RecordedDetectionSource::open(recording)?;
    let recorded_events = recorded.len();
    let source: Box<dyn DetectionSource> = if min_interval_ms > 0 {
        Box::new(ThrottledDetectionSource::new(
            Box::new(recorded),
            Duration::from_millis(min_interval_ms),
        ))
    } else {
        Box::new(recorded)
    };

    let renderer: Box<dyn OverlayRenderer> = match output {
        Some(path) => Box::new(JsonLinesRenderer::new(
            BufWriter::new(File::create(path)?),
            OverlayStyle::default(),
        )),
        None => Box::new(JsonLinesRenderer::new(
            std::io::stdout(),
            OverlayStyle::default(),
        )),
    };

    let tracker = FaceOverlayTracker::new(policy.selector(), mapper);
    let mut use_case = ReplaySessionUseCase::new(
        source,
        tracker,
        renderer,
        Box::new(StdoutSessionLogger::default()),
    );
    let summary = use_case.execute()?;

    log::info!(
        "Replayed {} events: {} with a face, overlay shown {} times, hidden {} times",
        summary.frames,
        summary.frames_with_face,
        summary.overlay_shown,
        summary.overlay_hidden
    );
    if min_interval_ms > 0 {
        let dropped = recorded_events.saturating_sub(summary.frames);
        log::info!("Throttle dropped {dropped} of {recorded_events} events ({min_interval_ms}ms interval)");
    }
    if let Some(path) = output {
        log::info!("Overlay written to {}", path.display());
    }
    Ok(())
}

fn run_capture(
    preview: Option<&Path>,
    (width, height): (u32, u32),
    facing: CameraFacing,
    flash: FlashMode,
    mirror_front: bool,
    documents: Option<PathBuf>,
    cache: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let cache_root = match cache {
        Some(dir) => dir,
        None => SnapshotCamera::default_cache_root().ok_or("Could not determine cache directory")?,
    };
    let store = match documents {
        Some(dir) => FsPhotoStore::new(dir),
        None => FsPhotoStore::default_location().ok_or("Could not determine documents directory")?,
    };

    if !SnapshotCamera::is_usable_cache_root(&cache_root) {
        return Err(format!(
            "Cache directory must not contain a '{CAMERA_PATH_MARKER}' path segment: {}",
            cache_root.display()
        )
        .into());
    }

    let mut camera =
        SnapshotCamera::new(&cache_root, width, height).with_mirror_front(mirror_front);
    if let Some(path) = preview {
        camera.set_preview(SnapshotCamera::load_preview(path)?);
    }

    let use_case = Arc::new(Mutex::new(CapturePhotoUseCase::new(
        Box::new(camera),
        Box::new(store),
    )));
    match capture_worker::spawn(use_case, facing, flash).recv()? {
        CaptureMessage::Saved(saved) => {
            println!("{}", saved.destination.display());
            Ok(())
        }
        CaptureMessage::Failed(e) => Err(e.into()),
    }
}

fn build_mapper(
    scale_x: Option<f64>,
    scale_y: Option<f64>,
    mirror_width: Option<f64>,
) -> Box<dyn CoordinateMapper> {
    if scale_x.is_none() && scale_y.is_none() && mirror_width.is_none() {
        return Box::new(IdentityMapper);
    }
    let mapper = ScaleMapper::new(scale_x.unwrap_or(1.0), scale_y.unwrap_or(1.0));
    match mirror_width {
        Some(w) => Box::new(mapper.mirrored(w)),
        None => Box::new(mapper),
    }
}

fn validate(command: &Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Replay {
            recording,
            select,
            scale_x,
            scale_y,
            mirror_width,
            ..
        } => {
            if !recording.exists() {
                return Err(format!("Recording not found: {}", recording.display()).into());
            }
            if select != "first" && select != "largest" {
                return Err(format!("Select must be 'first' or 'largest', got '{select}'").into());
            }
            for (flag, value) in [("--scale-x", scale_x), ("--scale-y", scale_y)] {
                if let Some(v) = value {
                    if !(v.is_finite() && *v > 0.0) {
                        return Err(format!("{flag} must be a positive number, got {v}").into());
                    }
                }
            }
            if let Some(w) = mirror_width {
                if !(w.is_finite() && *w > 0.0) {
                    return Err(format!("--mirror-width must be a positive number, got {w}").into());
                }
            }
        }
        Command::Capture {
            preview,
            width,
            height,
            facing,
            flash,
            cache,
            ..
        } => {
            if let Some(path) = preview {
                if !path.exists() {
                    return Err(format!("Preview image not found: {}", path.display()).into());
                }
                if !is_image(path) {
                    return Err(format!("Preview is not an image file: {}", path.display()).into());
                }
            }
            if *width == 0 || *height == 0 {
                return Err(format!("Capture size must be non-zero, got {width}x{height}").into());
            }
            if facing != "front" && facing != "back" {
                return Err(format!("Facing must be 'front' or 'back', got '{facing}'").into());
            }
            if flash != "off" && flash != "on" {
                return Err(format!("Flash must be 'off' or 'on', got '{flash}'").into());
            }
            if let Some(dir) = cache {
                if !SnapshotCamera::is_usable_cache_root(dir) {
                    return Err(format!(
                        "--cache must not contain a '{CAMERA_PATH_MARKER}' path segment, got {}",
                        dir.display()
                    )
                    .into());
                }
            }
        }
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn parse_policy(select: &str) -> SelectionPolicy {
    if select == "largest" {
        SelectionPolicy::Largest
    } else {
        SelectionPolicy::First
    }
}

fn parse_facing(facing: &str) -> CameraFacing {
    if facing == "back" {
        CameraFacing::Back
    } else {
        CameraFacing::Front
    }
}

fn parse_flash(flash: &str) -> FlashMode {
    if flash == "on" {
        FlashMode::On
    } else {
        FlashMode::Off
    }
}
