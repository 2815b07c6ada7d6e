//! Module configuration
//!
//! A plain read/update object consumed by both the adapter layer (to skip
//! unnecessary detector work) and the compositor (to skip unnecessary
//! drawing). All transitions are pure state changes with no I/O. Config
//! gates visibility at the read/render boundary, not merely presence in the
//! cache.

use serde::{Deserialize, Serialize};

use crate::Modality;

/// Per-modality enable flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleToggles {
    pub face_mesh: bool,
    pub pose: bool,
    pub hand: bool,
    pub object: bool,
    pub face_attributes: bool,
    pub speech: bool,
}

impl Default for ModuleToggles {
    fn default() -> Self {
        Self {
            face_mesh: true,
            pose: true,
            hand: true,
            object: true,
            face_attributes: true,
            speech: true,
        }
    }
}

impl ModuleToggles {
    pub fn get(&self, modality: Modality) -> bool {
        match modality {
            Modality::FaceMesh => self.face_mesh,
            Modality::Pose => self.pose,
            Modality::Hand => self.hand,
            Modality::Object => self.object,
            Modality::FaceAttributes => self.face_attributes,
            Modality::Speech => self.speech,
        }
    }

    pub fn set(&mut self, modality: Modality, enabled: bool) {
        match modality {
            Modality::FaceMesh => self.face_mesh = enabled,
            Modality::Pose => self.pose = enabled,
            Modality::Hand => self.hand = enabled,
            Modality::Object => self.object = enabled,
            Modality::FaceAttributes => self.face_attributes = enabled,
            Modality::Speech => self.speech = enabled,
        }
    }

    /// All modules disabled.
    pub fn none() -> Self {
        Self {
            face_mesh: false,
            pose: false,
            hand: false,
            object: false,
            face_attributes: false,
            speech: false,
        }
    }
}

/// Overlay module and display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Which detection modules are active
    pub modules: ModuleToggles,
    /// Draw object labels
    pub show_labels: bool,
    /// Append confidence percentages to labels
    pub show_confidence: bool,
    /// Draw pose/hand connection skeletons
    pub show_skeleton: bool,
    /// Show the facial-attribute side panel
    pub show_bio_card: bool,
    /// Show the transcript side panel
    pub show_transcript: bool,
    /// Draw gesture labels above hands
    pub show_gesture_label: bool,
    /// Global overlay opacity in [0,1]
    pub opacity: f32,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            modules: ModuleToggles::default(),
            show_labels: true,
            show_confidence: true,
            show_skeleton: true,
            show_bio_card: true,
            show_transcript: true,
            show_gesture_label: true,
            opacity: 1.0,
        }
    }
}

impl ModuleConfig {
    /// Is this modality's module active?
    #[inline]
    pub fn enabled(&self, modality: Modality) -> bool {
        self.modules.get(modality)
    }

    pub fn set_enabled(&mut self, modality: Modality, enabled: bool) {
        self.modules.set(modality, enabled);
    }

    /// Set global overlay opacity, clamped to [0,1].
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Enabled modalities in slot order.
    pub fn enabled_modalities(&self) -> impl Iterator<Item = Modality> + '_ {
        Modality::all()
            .iter()
            .copied()
            .filter(move |&m| self.enabled(m))
    }
}
