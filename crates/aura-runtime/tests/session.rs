//! End-to-end session tests: synthetic detectors feeding the cache, the
//! render loop composing onto a software surface.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use aura_core::{
    BoundingBox, Modality, ModuleConfig, NormalizedLandmark, ObjectDetection, OverlayResult,
    POSE_LANDMARK_COUNT,
};
use aura_render::{DrawList, RenderSurface, SoftwareSurface, Viewport, VIDEO_PLANE};
use aura_runtime::{
    BrokenDetector, CaptureSession, JitteredPoseDetector, ScriptedDetector, SessionConfig,
    StaticFrameSource,
};
use aura_snapshot::DetectionUpdate;

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// A surface the test can inspect while the session renders into it.
#[derive(Clone)]
struct SharedSurface(Arc<Mutex<SoftwareSurface>>);

impl SharedSurface {
    fn new(width: u32, height: u32) -> Self {
        Self(Arc::new(Mutex::new(
            SoftwareSurface::new(width, height).unwrap(),
        )))
    }
}

impl RenderSurface for SharedSurface {
    fn viewport(&self) -> Viewport {
        self.0.lock().viewport()
    }

    fn submit(&mut self, list: &DrawList) -> OverlayResult<()> {
        self.0.lock().submit(list)
    }
}

fn three_person_update() -> DetectionUpdate {
    DetectionUpdate::Objects(vec![
        ObjectDetection::new("person", 0.9, BoundingBox::new(0.1, 0.1, 0.2, 0.3)),
        ObjectDetection::new("person", 0.85, BoundingBox::new(0.4, 0.2, 0.2, 0.3)),
        ObjectDetection::new("person", 0.8, BoundingBox::new(0.7, 0.15, 0.2, 0.3)),
    ])
}

fn visible_pose() -> Vec<NormalizedLandmark> {
    vec![NormalizedLandmark::new(0.5, 0.5).with_visibility(0.9); POSE_LANDMARK_COUNT]
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn rectangles_without_labels_reach_the_pixel_buffer() {
    init_tracing();

    let surface = SharedSurface::new(320, 240);
    let mut config = ModuleConfig::default();
    config.show_labels = false;

    // the detector keeps re-delivering so staleness never interferes
    let detector = ScriptedDetector::new(
        Modality::Object,
        std::iter::repeat(three_person_update()).take(200),
    )
    .with_cadence(Duration::from_millis(5));

    let session = CaptureSession::start(
        Arc::new(StaticFrameSource::new(640, 480)),
        vec![Box::new(detector)],
        Box::new(surface.clone()),
        SessionConfig::default(),
        config,
    );

    tokio::time::sleep(Duration::from_millis(300)).await;

    {
        let surface = surface.0.lock();

        // canvas 320x240, video 640x480: cover-fit scale 0.5, no offsets.
        // first box {x:0.1, w:0.2} mirrored: left edge at (1-0.3)*320 = 224
        let corner = surface.pixel(224, 24).unwrap();
        assert_ne!(corner, VIDEO_PLANE, "box stroke missing at mirrored corner");
        assert!(
            corner[1] > corner[0],
            "expected the object stroke color, got {corner:?}"
        );

        // no text, no label chips
        assert!(surface.text_runs().is_empty());

        // interior of the video plane, away from any box edge, stays plane
        assert_eq!(surface.pixel(160, 230).unwrap(), VIDEO_PLANE);
    }

    session.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn disabling_a_module_clears_its_slot() {
    init_tracing();

    let detector = ScriptedDetector::new(
        Modality::Pose,
        vec![DetectionUpdate::Pose(visible_pose())],
    )
    .with_cadence(Duration::from_millis(5));

    let session = CaptureSession::start(
        Arc::new(StaticFrameSource::new(640, 480)),
        vec![Box::new(detector)],
        Box::new(SharedSurface::new(160, 120)),
        SessionConfig::default(),
        ModuleConfig::default(),
    );

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(session.snapshot().pose_landmarks.is_some());

    session.set_module_enabled(Modality::Pose, false);
    assert!(session.snapshot().pose_landmarks.is_none());
    // the cache slot itself is cleared too, not only gated
    assert!(session.cache().read().pose_landmarks.is_none());

    session.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn staleness_policy_clears_quiet_slots() {
    init_tracing();

    // one single completion, then silence
    let detector = ScriptedDetector::new(
        Modality::Pose,
        vec![DetectionUpdate::Pose(visible_pose())],
    )
    .with_cadence(Duration::from_millis(5));

    let session = CaptureSession::start(
        Arc::new(StaticFrameSource::new(640, 480)),
        vec![Box::new(detector)],
        Box::new(SharedSurface::new(160, 120)),
        SessionConfig {
            staleness_window: Some(Duration::from_millis(100)),
            ..Default::default()
        },
        ModuleConfig::default(),
    );

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert!(session.cache().read().pose_landmarks.is_some());

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(
        session.cache().read().pose_landmarks.is_none(),
        "quiet slot survived the staleness window"
    );

    session.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn proximity_tracks_the_pose_detector() {
    init_tracing();

    let session = CaptureSession::start(
        Arc::new(StaticFrameSource::new(640, 480)),
        vec![Box::new(JitteredPoseDetector::new(42, 0.5))],
        Box::new(SharedSurface::new(160, 120)),
        SessionConfig::default(),
        ModuleConfig::default(),
    );

    tokio::time::sleep(Duration::from_millis(150)).await;

    let estimate = session.proximity();
    assert!(estimate.is_present);
    assert!(estimate.level > 0.5, "level {} too low", estimate.level);
    assert!((estimate.center_x - 0.5).abs() < 0.1);

    session.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn broken_detector_degrades_without_failing_the_session() {
    init_tracing();

    let working = ScriptedDetector::new(
        Modality::Object,
        std::iter::repeat(three_person_update()).take(50),
    )
    .with_cadence(Duration::from_millis(5));

    let session = CaptureSession::start(
        Arc::new(StaticFrameSource::new(640, 480)),
        vec![
            Box::new(BrokenDetector::new(Modality::FaceMesh)),
            Box::new(working),
        ],
        Box::new(SharedSurface::new(160, 120)),
        SessionConfig::default(),
        ModuleConfig::default(),
    );

    tokio::time::sleep(Duration::from_millis(150)).await;

    let snapshot = session.snapshot();
    assert!(snapshot.face_landmarks.is_none());
    assert!(!snapshot.objects.is_empty());

    session.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn transcript_panel_follows_speech_state() {
    init_tracing();

    let detector = ScriptedDetector::new(
        Modality::Speech,
        vec![
            DetectionUpdate::SpeechInterim("hel".into()),
            DetectionUpdate::SpeechFinal {
                segment: "hello there".into(),
                sentiment: None,
            },
        ],
    )
    .with_cadence(Duration::from_millis(10));

    let session = CaptureSession::start(
        Arc::new(StaticFrameSource::new(640, 480)),
        vec![Box::new(detector)],
        Box::new(SharedSurface::new(160, 120)),
        SessionConfig::default(),
        ModuleConfig::default(),
    );

    tokio::time::sleep(Duration::from_millis(150)).await;

    assert!(session.panels().transcript_visible);
    let speech = session.snapshot().speech;
    assert_eq!(speech.transcript, "hello there");
    assert!(speech.interim_transcript.is_empty());

    session.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn shutdown_clears_the_cache() {
    init_tracing();

    let detector = ScriptedDetector::new(
        Modality::Pose,
        vec![DetectionUpdate::Pose(visible_pose())],
    )
    .with_cadence(Duration::from_millis(5));

    let session = CaptureSession::start(
        Arc::new(StaticFrameSource::new(640, 480)),
        vec![Box::new(detector)],
        Box::new(SharedSurface::new(160, 120)),
        SessionConfig::default(),
        ModuleConfig::default(),
    );

    tokio::time::sleep(Duration::from_millis(80)).await;
    let cache = Arc::clone(session.cache());
    assert!(cache.read().pose_landmarks.is_some());

    session.shutdown().await;
    assert!(cache.read().pose_landmarks.is_none());
}
