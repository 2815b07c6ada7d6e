//! Snapshot cache - the mailbox between detector completions and the renderer
//!
//! Writers are detector-completion callbacks, each replacing exactly one
//! slot; readers are the render loop and metric estimators. A write is a
//! whole-value slot replacement under the lock, so a reader observes the old
//! value or the new one, never a partial state.
//!
//! Within one modality the cache is last-writer-wins: if two completions
//! resolve out of submission order, the later-resolving one sticks. Each
//! completion is self-contained (never a delta), so this is an accepted mild
//! inconsistency under load, not a correctness problem. The cache does not
//! track submission sequence numbers.

use parking_lot::RwLock;
use tracing::warn;

use aura_core::{
    CaptureTime, FaceAttributes, HandData, Modality, ModuleConfig, NormalizedLandmark,
    ObjectDetection, SentimentScore, FACE_LANDMARK_COUNT, FACE_WITH_IRIS_COUNT,
    HAND_LANDMARK_COUNT, POSE_LANDMARK_COUNT,
};

use crate::SceneSnapshot;

/// One detector completion, typed by modality.
///
/// An empty payload (empty landmark/object list) means "nothing detected
/// this cycle" and clears the slot; adapters that fail entirely simply never
/// deliver an update, leaving the previous value in place.
#[derive(Debug, Clone)]
pub enum DetectionUpdate {
    FaceMesh(Vec<NormalizedLandmark>),
    Pose(Vec<NormalizedLandmark>),
    Hands(Vec<HandData>),
    Objects(Vec<ObjectDetection>),
    FaceAttributes(Option<FaceAttributes>),
    /// Replace the interim transcript wholesale
    SpeechInterim(String),
    /// Commit a finalized segment (appends, clears interim)
    SpeechFinal {
        segment: String,
        sentiment: Option<SentimentScore>,
    },
}

impl DetectionUpdate {
    pub fn modality(&self) -> Modality {
        match self {
            DetectionUpdate::FaceMesh(_) => Modality::FaceMesh,
            DetectionUpdate::Pose(_) => Modality::Pose,
            DetectionUpdate::Hands(_) => Modality::Hand,
            DetectionUpdate::Objects(_) => Modality::Object,
            DetectionUpdate::FaceAttributes(_) => Modality::FaceAttributes,
            DetectionUpdate::SpeechInterim(_) | DetectionUpdate::SpeechFinal { .. } => {
                Modality::Speech
            }
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    snapshot: SceneSnapshot,
    updated_at: [Option<CaptureTime>; Modality::COUNT],
}

/// The result cache: latest completed result per modality, one consistent
/// read for the renderer.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    inner: RwLock<Inner>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace one modality's slot with a fresh completion.
    ///
    /// Never blocks on other modalities and never waits for the renderer.
    /// Landmark arrays with a wrong fixed length are degenerate values the
    /// adapter contract forbids; they are collapsed to "nothing detected"
    /// here as a last line of defense.
    pub fn update_at(&self, update: DetectionUpdate, at: CaptureTime) {
        let modality = update.modality();
        let mut inner = self.inner.write();

        match update {
            DetectionUpdate::FaceMesh(landmarks) => {
                inner.snapshot.face_landmarks = accept_landmarks(
                    landmarks,
                    &[FACE_LANDMARK_COUNT, FACE_WITH_IRIS_COUNT],
                    modality,
                );
            }
            DetectionUpdate::Pose(landmarks) => {
                inner.snapshot.pose_landmarks =
                    accept_landmarks(landmarks, &[POSE_LANDMARK_COUNT], modality);
            }
            DetectionUpdate::Hands(hands) => {
                let (valid, invalid): (Vec<_>, Vec<_>) =
                    hands.into_iter().partition(|h| h.has_valid_topology());
                if !invalid.is_empty() {
                    warn!(
                        modality = %modality,
                        dropped = invalid.len(),
                        expected = HAND_LANDMARK_COUNT,
                        "dropping hands with degenerate landmark arrays"
                    );
                }
                inner.snapshot.hands = valid;
            }
            DetectionUpdate::Objects(objects) => {
                inner.snapshot.objects = objects;
            }
            DetectionUpdate::FaceAttributes(attrs) => {
                inner.snapshot.face_bio = attrs;
            }
            DetectionUpdate::SpeechInterim(text) => {
                inner.snapshot.speech.set_interim(&text);
            }
            DetectionUpdate::SpeechFinal { segment, sentiment } => {
                inner.snapshot.speech.commit_final(&segment);
                if let Some(s) = sentiment {
                    inner.snapshot.speech.set_sentiment(s.sentiment, s.confidence);
                }
            }
        }

        inner.updated_at[modality.index()] = Some(at);
    }

    /// `update_at` without a timestamp, for callers outside any session
    /// clock (tests, one-shot composition).
    pub fn update(&self, update: DetectionUpdate) {
        self.update_at(update, CaptureTime::ZERO);
    }

    /// Clear one modality's slot. Used when its module is toggled off, when
    /// the staleness policy fires, and at session teardown.
    pub fn clear(&self, modality: Modality) {
        let mut inner = self.inner.write();
        inner.snapshot.clear(modality);
        inner.updated_at[modality.index()] = None;
    }

    pub fn clear_all(&self) {
        let mut inner = self.inner.write();
        inner.snapshot = SceneSnapshot::empty();
        inner.updated_at = [None; Modality::COUNT];
    }

    /// The latest consistent snapshot.
    pub fn read(&self) -> SceneSnapshot {
        self.inner.read().snapshot.clone()
    }

    /// The latest snapshot with disabled modules masked out.
    pub fn read_gated(&self, config: &ModuleConfig) -> SceneSnapshot {
        self.inner.read().snapshot.gated(config)
    }

    /// When this modality last completed, if it ever has since the last
    /// clear. The cache itself never expires anything; staleness decisions
    /// belong to an explicit policy layered on top.
    pub fn last_update(&self, modality: Modality) -> Option<CaptureTime> {
        self.inner.read().updated_at[modality.index()]
    }
}

fn accept_landmarks(
    landmarks: Vec<NormalizedLandmark>,
    valid_lengths: &[usize],
    modality: Modality,
) -> Option<Vec<NormalizedLandmark>> {
    if landmarks.is_empty() {
        return None;
    }
    if !valid_lengths.contains(&landmarks.len()) {
        warn!(
            modality = %modality,
            got = landmarks.len(),
            expected = ?valid_lengths,
            "dropping degenerate landmark array"
        );
        return None;
    }
    Some(landmarks)
}
