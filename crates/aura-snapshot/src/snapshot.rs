//! Scene snapshot - the aggregated latest-known result across all modalities
//!
//! One slot per modality, each independently nullable. A slot holds the most
//! recently completed result for its modality; "value never set" and "value
//! cleared" are indistinguishable to readers, both render nothing.

use aura_core::{
    FaceAttributes, HandData, Modality, ModuleConfig, NormalizedLandmark, ObjectDetection,
    SpeechState,
};

/// The aggregate of every modality's latest result at one read instant.
///
/// A rendered frame may legitimately combine a face result from 40ms ago
/// with a pose result from 10ms ago; modalities are fused at independent
/// rates, never in lockstep.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneSnapshot {
    /// Dense face mesh landmarks (468, or 478 with iris refinement)
    pub face_landmarks: Option<Vec<NormalizedLandmark>>,
    /// Body pose landmarks (33)
    pub pose_landmarks: Option<Vec<NormalizedLandmark>>,
    /// Detected hands, possibly several
    pub hands: Vec<HandData>,
    /// Detected objects, possibly several
    pub objects: Vec<ObjectDetection>,
    /// Facial attribute inference for the primary face
    pub face_bio: Option<FaceAttributes>,
    /// Live transcription state
    pub speech: SpeechState,
}

impl SceneSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Clear one modality's slot back to "nothing detected".
    pub fn clear(&mut self, modality: Modality) {
        match modality {
            Modality::FaceMesh => self.face_landmarks = None,
            Modality::Pose => self.pose_landmarks = None,
            Modality::Hand => self.hands.clear(),
            Modality::Object => self.objects.clear(),
            Modality::FaceAttributes => self.face_bio = None,
            Modality::Speech => self.speech = SpeechState::default(),
        }
    }

    /// Does this modality's slot currently hold anything?
    pub fn has(&self, modality: Modality) -> bool {
        match modality {
            Modality::FaceMesh => self.face_landmarks.is_some(),
            Modality::Pose => self.pose_landmarks.is_some(),
            Modality::Hand => !self.hands.is_empty(),
            Modality::Object => !self.objects.is_empty(),
            Modality::FaceAttributes => self.face_bio.is_some(),
            Modality::Speech => !self.speech.is_empty(),
        }
    }

    /// A copy with every disabled module's slot masked out.
    ///
    /// This is where config gates visibility: a stale value may remain in
    /// the cache after a module is toggled off, but it never survives a
    /// gated read.
    pub fn gated(&self, config: &ModuleConfig) -> SceneSnapshot {
        let mut out = self.clone();
        for &modality in Modality::all() {
            if !config.enabled(modality) {
                out.clear(modality);
            }
        }
        out
    }
}
