//! Modality enumeration
//!
//! One modality per detection category. Every per-modality structure in the
//! engine (cache slots, module toggles, adapter tasks) is keyed by this enum.

use std::fmt;

/// A detection category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Modality {
    /// Dense face mesh landmarks
    FaceMesh = 0,
    /// Body pose skeleton
    Pose = 1,
    /// Hand landmarks and gesture guesses
    Hand = 2,
    /// Generic object detection
    Object = 3,
    /// Facial attribute / emotion inference
    FaceAttributes = 4,
    /// Live speech transcription and sentiment
    Speech = 5,
}

impl Modality {
    pub const COUNT: usize = 6;

    /// All modalities in slot order.
    pub fn all() -> &'static [Modality] {
        &[
            Modality::FaceMesh,
            Modality::Pose,
            Modality::Hand,
            Modality::Object,
            Modality::FaceAttributes,
            Modality::Speech,
        ]
    }

    /// Stable slot index.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Human-readable name, used in config maps and logs.
    pub fn name(self) -> &'static str {
        match self {
            Modality::FaceMesh => "face_mesh",
            Modality::Pose => "pose",
            Modality::Hand => "hand",
            Modality::Object => "object",
            Modality::FaceAttributes => "face_attributes",
            Modality::Speech => "speech",
        }
    }

    /// Fixed landmark array length this modality's detector must honor,
    /// if it produces landmark arrays at all.
    ///
    /// Adapters deliver "no detection" instead of an array of any other
    /// length; index-based connection tables assume these counts.
    pub fn landmark_count(self) -> Option<usize> {
        match self {
            Modality::FaceMesh => Some(crate::FACE_LANDMARK_COUNT),
            Modality::Pose => Some(crate::POSE_LANDMARK_COUNT),
            Modality::Hand => Some(crate::HAND_LANDMARK_COUNT),
            _ => None,
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
