//! Proximity estimation - one closeness scalar from pose and face landmarks
//!
//! The estimate is a pure function of the latest landmark sets: callable at
//! any rate, idempotent, order-independent with respect to which set is
//! supplied. The normalization and blend constants are product-tuned
//! values, carried as configurable defaults rather than invariants;
//! callers needing different sensitivity construct their own config or
//! post-process `level`.

use aura_core::{BoundingBox, NormalizedLandmark};

/// Torso keypoints in the 33-landmark pose layout: left/right shoulder,
/// left/right hip.
const TORSO_LANDMARKS: [usize; 4] = [11, 12, 23, 24];

/// Tuning constants for the proximity estimate.
#[derive(Debug, Clone)]
pub struct ProximityConfig {
    /// Torso bbox area at which the pose-based level saturates
    pub pose_area_norm: f32,
    /// Face bbox area at which the face-based level saturates
    pub face_area_norm: f32,
    /// Pose weight when blending with the face supplement
    pub pose_blend: f32,
    /// Face weight when blending with the pose estimate
    pub face_blend: f32,
    /// Exclusive visibility threshold for torso points
    pub visibility_threshold: f32,
    /// Minimum valid torso points for a pose-based estimate
    pub min_torso_points: usize,
    /// Minimum face landmarks before the face supplement applies
    pub min_face_landmarks: usize,
    /// How many leading face points the face bbox spans
    pub face_sample: usize,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            pose_area_norm: 0.2,
            face_area_norm: 0.08,
            pose_blend: 0.7,
            face_blend: 0.3,
            visibility_threshold: 0.5,
            min_torso_points: 2,
            min_face_landmarks: 10,
            face_sample: 50,
        }
    }
}

/// The derived closeness/engagement signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityEstimate {
    /// Closeness in [0,1]
    pub level: f32,
    /// True once any landmark source contributed, even at level 0
    pub is_present: bool,
    /// Raw torso bbox area in normalized units
    pub body_area: f32,
    /// Center of mass, x
    pub center_x: f32,
    /// Center of mass, y
    pub center_y: f32,
}

impl ProximityEstimate {
    /// The nobody-here result.
    pub fn absent() -> Self {
        Self {
            level: 0.0,
            is_present: false,
            body_area: 0.0,
            center_x: 0.5,
            center_y: 0.5,
        }
    }
}

/// Estimate closeness with the default tuning.
pub fn estimate_proximity(
    pose_landmarks: Option<&[NormalizedLandmark]>,
    face_landmarks: Option<&[NormalizedLandmark]>,
) -> ProximityEstimate {
    estimate_proximity_with(&ProximityConfig::default(), pose_landmarks, face_landmarks)
}

/// Estimate closeness with explicit tuning.
pub fn estimate_proximity_with(
    config: &ProximityConfig,
    pose_landmarks: Option<&[NormalizedLandmark]>,
    face_landmarks: Option<&[NormalizedLandmark]>,
) -> ProximityEstimate {
    let mut estimate = ProximityEstimate::absent();

    if let Some(pose) = pose_landmarks {
        let torso: Vec<NormalizedLandmark> = TORSO_LANDMARKS
            .iter()
            .filter_map(|&i| pose.get(i))
            .filter(|lm| lm.is_finite())
            .filter(|lm| lm.visibility_or_full() > config.visibility_threshold)
            .copied()
            .collect();

        if torso.len() >= config.min_torso_points {
            if let Some(bbox) = BoundingBox::around(&torso) {
                let (cx, cy) = bbox.center();
                estimate.body_area = bbox.area();
                estimate.level = (bbox.area() / config.pose_area_norm).min(1.0);
                estimate.center_x = cx;
                estimate.center_y = cy;
                estimate.is_present = true;
            }
        }
    }

    if let Some(face) = face_landmarks {
        if face.len() >= config.min_face_landmarks {
            let sample = &face[..config.face_sample.min(face.len())];
            if let Some(bbox) = BoundingBox::around(sample) {
                let face_level = (bbox.area() / config.face_area_norm).min(1.0);

                if estimate.is_present {
                    estimate.level =
                        estimate.level * config.pose_blend + face_level * config.face_blend;
                } else {
                    let (cx, cy) = bbox.center();
                    estimate.level = face_level;
                    estimate.center_x = cx;
                    estimate.center_y = cy;
                }
                estimate.is_present = true;
            }
        }
    }

    estimate.level = estimate.level.clamp(0.0, 1.0);
    estimate
}
