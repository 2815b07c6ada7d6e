//! Overlay layers
//!
//! One pure function per layer, each appending primitives to the frame's
//! draw list. A malformed or missing landmark skips that element only;
//! layers never fail a frame.

use aura_core::{HandData, ModuleConfig, NormalizedLandmark, ObjectDetection, Point};

use crate::{
    topology, Color, DrawCmd, DrawList, ViewTransform,
};

/// Pose connection endpoints below or at this visibility are not drawable;
/// the threshold is exclusive.
pub const POSE_VISIBILITY_THRESHOLD: f32 = 0.5;

const LINE_WIDTH: f32 = 2.0;
const JOINT_RADIUS: f32 = 4.0;
const GLOW_RADIUS: f32 = 8.0;
const LABEL_SIZE: f32 = 13.0;
const CHIP_PAD: f32 = 6.0;

const OBJECT_COLOR: Color = Color::rgb(0.25, 0.88, 0.5);
const POSE_COLOR: Color = Color::rgb(0.0, 0.85, 1.0);
const HAND_COLOR: Color = Color::rgb(1.0, 0.72, 0.2);
const FACE_MESH_COLOR: Color = Color::rgba(1.0, 1.0, 1.0, 0.18);
const FACE_FEATURE_COLOR: Color = Color::rgb(0.65, 0.95, 1.0);
const IRIS_COLOR: Color = Color::rgb(1.0, 1.0, 1.0);
const CHIP_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.6);
const LABEL_COLOR: Color = Color::WHITE;

/// Object boxes, with optional label chips.
pub fn render_objects(
    list: &mut DrawList,
    objects: &[ObjectDetection],
    config: &ModuleConfig,
    transform: &ViewTransform,
) {
    for detection in objects {
        let Some(rect) = transform.rect(&detection.bounding_box) else {
            continue;
        };

        list.push(DrawCmd::StrokeRect {
            rect,
            color: OBJECT_COLOR,
            width: LINE_WIDTH,
        });

        if !config.show_labels {
            continue;
        }

        let text = if config.show_confidence {
            format!("{} {:.0}%", detection.label, detection.confidence * 100.0)
        } else {
            detection.label.clone()
        };

        let chip_width = text.len() as f32 * LABEL_SIZE * 0.6 + CHIP_PAD * 2.0;
        let chip_height = LABEL_SIZE + CHIP_PAD;
        let chip = crate::Rect::new(rect.x, rect.y - chip_height, chip_width, chip_height);

        list.push(DrawCmd::FillRect {
            rect: chip,
            color: CHIP_COLOR,
        });
        list.push(DrawCmd::Text {
            origin: Point::new(chip.x + CHIP_PAD, rect.y - CHIP_PAD / 2.0),
            text,
            color: LABEL_COLOR,
            size: LABEL_SIZE,
        });
    }
}

fn pose_point(
    landmarks: &[NormalizedLandmark],
    index: usize,
    transform: &ViewTransform,
) -> Option<Point> {
    let lm = landmarks.get(index)?;
    if lm.visibility_or_full() <= POSE_VISIBILITY_THRESHOLD {
        return None;
    }
    transform.point(lm)
}

/// Body skeleton: connection segments plus joint markers, visibility-gated.
pub fn render_pose(
    list: &mut DrawList,
    landmarks: &[NormalizedLandmark],
    transform: &ViewTransform,
) {
    for &(a, b) in topology::POSE_CONNECTIONS {
        let (Some(from), Some(to)) = (
            pose_point(landmarks, a, transform),
            pose_point(landmarks, b, transform),
        ) else {
            continue;
        };

        list.push(DrawCmd::Line {
            from,
            to,
            color: POSE_COLOR,
            width: LINE_WIDTH,
            glow: GLOW_RADIUS,
        });
    }

    for i in 0..landmarks.len() {
        if let Some(center) = pose_point(landmarks, i, transform) {
            list.push(DrawCmd::Circle {
                center,
                radius: JOINT_RADIUS,
                color: POSE_COLOR,
                filled: true,
            });
        }
    }
}

/// Hand skeletons and gesture labels. Hand landmarks carry no visibility
/// field and are always drawn fully.
pub fn render_hands(
    list: &mut DrawList,
    hands: &[HandData],
    config: &ModuleConfig,
    transform: &ViewTransform,
) {
    for hand in hands {
        if config.show_skeleton {
            for &(a, b) in topology::HAND_CONNECTIONS {
                let (Some(la), Some(lb)) = (hand.landmarks.get(a), hand.landmarks.get(b)) else {
                    continue;
                };
                let (Some(from), Some(to)) = (transform.point(la), transform.point(lb)) else {
                    continue;
                };

                list.push(DrawCmd::Line {
                    from,
                    to,
                    color: HAND_COLOR,
                    width: LINE_WIDTH,
                    glow: GLOW_RADIUS,
                });
            }

            for lm in &hand.landmarks {
                if let Some(center) = transform.point(lm) {
                    list.push(DrawCmd::Circle {
                        center,
                        radius: JOINT_RADIUS - 1.0,
                        color: HAND_COLOR,
                        filled: true,
                    });
                }
            }
        }

        if config.show_gesture_label {
            if let (Some(gesture), Some(wrist)) = (
                hand.gesture.as_ref(),
                hand.landmarks
                    .get(topology::HAND_WRIST)
                    .and_then(|lm| transform.point(lm)),
            ) {
                list.push(DrawCmd::Text {
                    origin: Point::new(wrist.x, wrist.y - 12.0),
                    text: gesture.gesture.clone(),
                    color: HAND_COLOR,
                    size: LABEL_SIZE,
                });
            }
        }
    }
}

fn feature_segments(
    list: &mut DrawList,
    landmarks: &[NormalizedLandmark],
    indices: &[usize],
    closed: bool,
    color: Color,
    transform: &ViewTransform,
) {
    let segment = |list: &mut DrawList, ia: usize, ib: usize| {
        let (Some(la), Some(lb)) = (landmarks.get(ia), landmarks.get(ib)) else {
            return;
        };
        let (Some(from), Some(to)) = (transform.point(la), transform.point(lb)) else {
            return;
        };
        list.push(DrawCmd::Line {
            from,
            to,
            color,
            width: 1.0,
            glow: 0.0,
        });
    };

    for pair in indices.windows(2) {
        segment(list, pair[0], pair[1]);
    }
    if closed && indices.len() > 2 {
        segment(list, indices[indices.len() - 1], indices[0]);
    }
}

/// Face mesh: low-opacity tessellation texture, then named feature outlines
/// at higher contrast, then iris markers when refinement landmarks exist.
pub fn render_face(
    list: &mut DrawList,
    landmarks: &[NormalizedLandmark],
    transform: &ViewTransform,
) {
    for &(a, b) in topology::FACE_TESSELLATION {
        let (Some(la), Some(lb)) = (landmarks.get(a), landmarks.get(b)) else {
            continue;
        };
        let (Some(from), Some(to)) = (transform.point(la), transform.point(lb)) else {
            continue;
        };
        list.push(DrawCmd::Line {
            from,
            to,
            color: FACE_MESH_COLOR,
            width: 1.0,
            glow: 0.0,
        });
    }

    for feature in topology::FACE_FEATURES {
        feature_segments(
            list,
            landmarks,
            feature.indices,
            feature.closed,
            FACE_FEATURE_COLOR,
            transform,
        );
    }

    if landmarks.len() >= aura_core::FACE_WITH_IRIS_COUNT {
        for i in topology::IRIS_LANDMARKS {
            if let Some(center) = landmarks.get(i).and_then(|lm| transform.point(lm)) {
                list.push(DrawCmd::Circle {
                    center,
                    radius: 1.5,
                    color: IRIS_COLOR,
                    filled: true,
                });
            }
        }
    }
}
