//! Synthetic sources and detectors
//!
//! Deterministic stand-ins for the real models: a static frame source, a
//! scripted detector that replays a fixed update sequence, and jittered
//! generators for soak-style tests. These drive the integration tests and
//! any headless demo.

use std::collections::VecDeque;
use std::time::Duration;

use bytes::Bytes;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use aura_core::{Modality, NormalizedLandmark, OverlayResult, POSE_LANDMARK_COUNT};
use aura_render::SourceDims;
use aura_snapshot::DetectionUpdate;

use crate::{Detector, Frame, FrameSource};

/// A frame source that always serves the same gray frame.
pub struct StaticFrameSource {
    frame: Frame,
}

impl StaticFrameSource {
    pub fn new(width: u32, height: u32) -> Self {
        let data = Bytes::from(vec![0x80u8; (width * height * 4) as usize]);
        Self {
            frame: Frame::new(data, width, height),
        }
    }
}

impl FrameSource for StaticFrameSource {
    fn dimensions(&self) -> SourceDims {
        self.frame.dims()
    }

    fn grab(&self) -> Option<Frame> {
        Some(self.frame.clone())
    }
}

/// A source that reports zero dimensions, for not-yet-ready paths.
pub struct UnreadySource;

impl FrameSource for UnreadySource {
    fn dimensions(&self) -> SourceDims {
        SourceDims::default()
    }

    fn grab(&self) -> Option<Frame> {
        None
    }
}

/// Replays a fixed sequence of updates, one per detect call, then keeps
/// producing nothing.
pub struct ScriptedDetector {
    modality: Modality,
    script: VecDeque<DetectionUpdate>,
    cadence: Duration,
    ready: bool,
}

impl ScriptedDetector {
    pub fn new(modality: Modality, updates: impl IntoIterator<Item = DetectionUpdate>) -> Self {
        Self {
            modality,
            script: updates.into_iter().collect(),
            cadence: Duration::from_millis(10),
            ready: false,
        }
    }

    pub fn with_cadence(mut self, cadence: Duration) -> Self {
        self.cadence = cadence;
        self
    }
}

impl Detector for ScriptedDetector {
    fn modality(&self) -> Modality {
        self.modality
    }

    fn init(&mut self) -> OverlayResult<()> {
        self.ready = true;
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn cadence(&self) -> Duration {
        self.cadence
    }

    fn detect(&mut self, _frame: &Frame) -> Option<DetectionUpdate> {
        self.script.pop_front()
    }

    fn close(&mut self) {
        self.ready = false;
    }
}

/// Emits a torso-centered pose with per-frame jitter, endlessly.
pub struct JitteredPoseDetector {
    rng: StdRng,
    span: f32,
    cadence: Duration,
    ready: bool,
}

impl JitteredPoseDetector {
    pub fn new(seed: u64, span: f32) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            span,
            cadence: Duration::from_millis(15),
            ready: false,
        }
    }
}

impl Detector for JitteredPoseDetector {
    fn modality(&self) -> Modality {
        Modality::Pose
    }

    fn init(&mut self) -> OverlayResult<()> {
        self.ready = true;
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn cadence(&self) -> Duration {
        self.cadence
    }

    fn detect(&mut self, _frame: &Frame) -> Option<DetectionUpdate> {
        let jitter = |rng: &mut StdRng| rng.gen_range(-0.01f32..0.01);
        let half = self.span / 2.0;

        let mut landmarks =
            vec![NormalizedLandmark::new(0.5, 0.5).with_visibility(0.95); POSE_LANDMARK_COUNT];
        // torso corners around the frame center
        landmarks[11] = NormalizedLandmark::new(0.5 - half + jitter(&mut self.rng), 0.4)
            .with_visibility(0.95);
        landmarks[12] = NormalizedLandmark::new(0.5 + half + jitter(&mut self.rng), 0.4)
            .with_visibility(0.95);
        landmarks[23] = NormalizedLandmark::new(0.5 - half + jitter(&mut self.rng), 0.7)
            .with_visibility(0.95);
        landmarks[24] = NormalizedLandmark::new(0.5 + half + jitter(&mut self.rng), 0.7)
            .with_visibility(0.95);

        Some(DetectionUpdate::Pose(landmarks))
    }

    fn close(&mut self) {
        self.ready = false;
    }
}

/// A detector whose `init` fails, for degraded-start paths.
pub struct BrokenDetector {
    modality: Modality,
}

impl BrokenDetector {
    pub fn new(modality: Modality) -> Self {
        Self { modality }
    }
}

impl Detector for BrokenDetector {
    fn modality(&self) -> Modality {
        self.modality
    }

    fn init(&mut self) -> OverlayResult<()> {
        Err(aura_core::OverlayError::DetectorNotReady(self.modality))
    }

    fn is_ready(&self) -> bool {
        false
    }

    fn detect(&mut self, _frame: &Frame) -> Option<DetectionUpdate> {
        None
    }

    fn close(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_detector_replays_then_dries_up() {
        let mut detector = ScriptedDetector::new(
            Modality::Object,
            vec![DetectionUpdate::Objects(Vec::new())],
        );
        detector.init().unwrap();
        let frame = StaticFrameSource::new(64, 64).grab().unwrap();

        assert!(detector.detect(&frame).is_some());
        assert!(detector.detect(&frame).is_none());
    }

    #[test]
    fn test_jittered_pose_is_valid_topology() {
        let mut detector = JitteredPoseDetector::new(7, 0.3);
        detector.init().unwrap();
        let frame = StaticFrameSource::new(64, 64).grab().unwrap();

        match detector.detect(&frame) {
            Some(DetectionUpdate::Pose(landmarks)) => {
                assert_eq!(landmarks.len(), POSE_LANDMARK_COUNT);
            }
            other => panic!("unexpected update: {other:?}"),
        }
    }

    #[test]
    fn test_unready_source() {
        let source = UnreadySource;
        assert!(!source.dimensions().is_ready());
        assert!(source.grab().is_none());
    }
}
