//! Fixed connection topologies
//!
//! Index-pair tables joining landmarks into skeletons and face features.
//! All indices assume the fixed detector-defined array lengths (pose 33,
//! hand 21, face 468/478); the adapter layer guarantees those lengths, so
//! lookups here are plain indexing guarded once per element.

/// Body skeleton segments over the 33-landmark pose layout.
pub const POSE_CONNECTIONS: &[(usize, usize)] = &[
    // face
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 7),
    (0, 4),
    (4, 5),
    (5, 6),
    (6, 8),
    (9, 10),
    // torso
    (11, 12),
    (11, 23),
    (12, 24),
    (23, 24),
    // left arm
    (11, 13),
    (13, 15),
    (15, 17),
    (15, 19),
    (15, 21),
    (17, 19),
    // right arm
    (12, 14),
    (14, 16),
    (16, 18),
    (16, 20),
    (16, 22),
    (18, 20),
    // left leg
    (23, 25),
    (25, 27),
    (27, 29),
    (29, 31),
    (27, 31),
    // right leg
    (24, 26),
    (26, 28),
    (28, 30),
    (30, 32),
    (28, 32),
];

/// Hand skeleton segments over the 21-landmark hand layout.
pub const HAND_CONNECTIONS: &[(usize, usize)] = &[
    // thumb
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    // index
    (0, 5),
    (5, 6),
    (6, 7),
    (7, 8),
    // middle
    (5, 9),
    (9, 10),
    (10, 11),
    (11, 12),
    // ring
    (9, 13),
    (13, 14),
    (14, 15),
    (15, 16),
    // pinky
    (13, 17),
    (0, 17),
    (17, 18),
    (18, 19),
    (19, 20),
];

/// The hand wrist landmark, anchor for gesture labels.
pub const HAND_WRIST: usize = 0;

/// A named face feature traced as a polyline over mesh indices.
#[derive(Debug, Clone, Copy)]
pub struct FeaturePath {
    pub name: &'static str,
    pub indices: &'static [usize],
    /// Closed loops (oval, eyes, lips) get a segment back to the start;
    /// open polylines (eyebrows, nose) do not.
    pub closed: bool,
}

/// Face contour outline.
pub const FACE_OVAL: FeaturePath = FeaturePath {
    name: "oval",
    indices: &[
        10, 338, 297, 332, 284, 251, 389, 356, 454, 323, 361, 288, 397, 365, 379, 378, 400, 377,
        152, 148, 176, 149, 150, 136, 172, 58, 132, 93, 234, 127, 162, 21, 54, 103, 67, 109,
    ],
    closed: true,
};

pub const LEFT_EYEBROW: FeaturePath = FeaturePath {
    name: "left_eyebrow",
    indices: &[70, 63, 105, 66, 107],
    closed: false,
};

pub const RIGHT_EYEBROW: FeaturePath = FeaturePath {
    name: "right_eyebrow",
    indices: &[300, 293, 334, 296, 336],
    closed: false,
};

pub const LEFT_EYE: FeaturePath = FeaturePath {
    name: "left_eye",
    indices: &[
        33, 7, 163, 144, 145, 153, 154, 155, 133, 173, 157, 158, 159, 160, 161, 246,
    ],
    closed: true,
};

pub const RIGHT_EYE: FeaturePath = FeaturePath {
    name: "right_eye",
    indices: &[
        263, 249, 390, 373, 374, 380, 381, 382, 362, 398, 384, 385, 386, 387, 388, 466,
    ],
    closed: true,
};

pub const NOSE: FeaturePath = FeaturePath {
    name: "nose",
    indices: &[168, 6, 197, 195, 5, 4, 1],
    closed: false,
};

pub const LIPS: FeaturePath = FeaturePath {
    name: "lips",
    indices: &[
        61, 146, 91, 181, 84, 17, 314, 405, 321, 375, 291, 409, 270, 269, 267, 0, 37, 39, 40, 185,
    ],
    closed: true,
};

/// Feature outlines in draw order.
pub const FACE_FEATURES: &[FeaturePath] = &[
    FACE_OVAL,
    LEFT_EYEBROW,
    RIGHT_EYEBROW,
    LEFT_EYE,
    RIGHT_EYE,
    NOSE,
    LIPS,
];

/// Condensed whole-face tessellation: the contour segments plus cross-links
/// tying features to the oval and to each other, drawn at low opacity as
/// mesh texture under the feature outlines.
pub const FACE_TESSELLATION: &[(usize, usize)] = &[
    // brow to oval
    (70, 162),
    (63, 21),
    (105, 54),
    (66, 103),
    (107, 67),
    (300, 389),
    (293, 251),
    (334, 284),
    (296, 332),
    (336, 297),
    // brow to eye
    (70, 33),
    (63, 160),
    (105, 159),
    (66, 158),
    (107, 133),
    (300, 263),
    (293, 387),
    (334, 386),
    (296, 385),
    (336, 362),
    // eye to nose bridge
    (133, 168),
    (362, 168),
    (155, 6),
    (382, 6),
    // eye to cheek / oval
    (33, 127),
    (144, 93),
    (145, 132),
    (153, 58),
    (263, 356),
    (373, 323),
    (374, 361),
    (380, 288),
    // nose to lips
    (4, 0),
    (1, 37),
    (1, 267),
    (195, 61),
    (195, 291),
    // lips to jaw
    (61, 172),
    (146, 136),
    (91, 150),
    (181, 149),
    (84, 176),
    (17, 152),
    (314, 400),
    (405, 378),
    (321, 379),
    (375, 365),
    (291, 397),
    // forehead fan
    (10, 107),
    (10, 336),
    (10, 168),
    (109, 70),
    (338, 300),
    // cheek fans
    (4, 133),
    (4, 362),
    (4, 58),
    (4, 288),
];

/// Forehead reference landmark, anchor for the attribute side panel.
pub const FACE_FOREHEAD: usize = 10;

/// Iris refinement landmarks, present only in 478-point meshes.
pub const IRIS_LANDMARKS: std::ops::Range<usize> = 468..478;

#[cfg(test)]
mod tests {
    use aura_core::{FACE_LANDMARK_COUNT, HAND_LANDMARK_COUNT, POSE_LANDMARK_COUNT};

    use super::*;

    #[test]
    fn test_pose_indices_in_range() {
        for &(a, b) in POSE_CONNECTIONS {
            assert!(a < POSE_LANDMARK_COUNT);
            assert!(b < POSE_LANDMARK_COUNT);
        }
    }

    #[test]
    fn test_hand_indices_in_range() {
        for &(a, b) in HAND_CONNECTIONS {
            assert!(a < HAND_LANDMARK_COUNT);
            assert!(b < HAND_LANDMARK_COUNT);
        }
    }

    #[test]
    fn test_face_indices_in_range() {
        for feature in FACE_FEATURES {
            for &i in feature.indices {
                assert!(i < FACE_LANDMARK_COUNT, "{} index {}", feature.name, i);
            }
        }
        for &(a, b) in FACE_TESSELLATION {
            assert!(a < FACE_LANDMARK_COUNT);
            assert!(b < FACE_LANDMARK_COUNT);
        }
    }

    #[test]
    fn test_closed_flags() {
        assert!(FACE_OVAL.closed);
        assert!(LEFT_EYE.closed);
        assert!(LIPS.closed);
        assert!(!LEFT_EYEBROW.closed);
        assert!(!NOSE.closed);
    }
}
